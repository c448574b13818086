//! Authentication state for the current session.
//!
//! DESIGN
//! ======
//! One `AuthState` exists per running application. It is owned by the
//! navigator and lent mutably to the gatekeeper for the duration of a single
//! navigation, so there is no ambient singleton and no locking.
//!
//! INVARIANTS
//! ==========
//! - `is_authenticated()` is derived from token presence and cannot be set.
//! - `user` is present only if the last validation of the current token
//!   succeeded. Installing a new token or clearing drops it.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Opaque profile returned by the identity endpoint.
///
/// Stored as-is; the gatekeeper never looks inside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(serde_json::Value);

impl UserRecord {
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Bearer credential plus the profile last fetched for it.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    token: Option<String>,
    user: Option<UserRecord>,
    validated_at: Option<Instant>,
}

impl AuthState {
    /// Unauthenticated state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with a token restored from persisted storage.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()), user: None, validated_at: None }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// When the current token last passed remote validation.
    #[must_use]
    pub fn validated_at(&self) -> Option<Instant> {
        self.validated_at
    }

    /// Install a fresh credential. The previous user belonged to the old
    /// token, so it is dropped until the next successful validation.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
        self.user = None;
        self.validated_at = None;
    }

    /// Forget the credential and the profile.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.validated_at = None;
    }

    pub(crate) fn record_validation(&mut self, user: UserRecord, at: Instant) {
        self.user = Some(user);
        self.validated_at = Some(at);
    }
}
