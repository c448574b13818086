//! Identity endpoint client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gatekeeper only needs "give me the user for this token". That seam is
//! `IdentityProvider`; `HttpIdentityClient` is the production implementation
//! talking to `GET {base}/api/user`, and tests swap in counting mocks.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::error::{ConfigError, ValidationError};
use crate::state::UserRecord;

pub const USER_PATH: &str = "/api/user";

/// Resolves a bearer token to the user it belongs to.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch the user record for `token`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the token is rejected, the request
    /// fails, or the response cannot be decoded.
    async fn fetch_user(&self, token: &str) -> Result<UserRecord, ValidationError>;
}

fn user_endpoint(base_url: &str) -> String {
    format!("{}{USER_PATH}", base_url.trim_end_matches('/'))
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// `reqwest`-backed identity client.
#[derive(Clone, Debug)]
pub struct HttpIdentityClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpIdentityClient {
    /// Build a client for `base_url`. `timeout` of `None` means requests may
    /// wait indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: user_endpoint(base_url) })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityClient {
    async fn fetch_user(&self, token: &str) -> Result<UserRecord, ValidationError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, bearer(token))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ValidationError::Rejected { status: status.as_u16() });
        }

        resp.json::<UserRecord>().await.map_err(ValidationError::from)
    }
}
