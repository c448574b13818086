//! Gatekeeper configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::ConfigError;
use crate::gate::RevalidationPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub const ENV_API_BASE_URL: &str = "NAVGUARD_API_BASE_URL";
pub const ENV_VALIDATE_TIMEOUT_SECS: &str = "NAVGUARD_VALIDATE_TIMEOUT_SECS";
pub const ENV_REVALIDATE_AFTER_SECS: &str = "NAVGUARD_REVALIDATE_AFTER_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Identity service origin; `/api/user` is appended.
    pub api_base_url: String,
    /// `None` lets a hung request block its navigation indefinitely.
    pub validate_timeout: Option<Duration>,
    pub revalidation: RevalidationPolicy,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            validate_timeout: None,
            revalidation: RevalidationPolicy::Always,
        }
    }
}

impl GateConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `NAVGUARD_API_BASE_URL`: default `http://localhost:8000`
    /// - `NAVGUARD_VALIDATE_TIMEOUT_SECS`: unset or `0` disables the timeout
    /// - `NAVGUARD_REVALIDATE_AFTER_SECS`: unset or `0` revalidates every navigation
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or the base URL is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GateConfig::from_env`] but reads through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or the base URL is blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup(ENV_API_BASE_URL) {
            Some(raw) => normalize_base_url(ENV_API_BASE_URL, &raw)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let validate_timeout = parse_secs(ENV_VALIDATE_TIMEOUT_SECS, lookup(ENV_VALIDATE_TIMEOUT_SECS).as_deref())?;
        let revalidation = match parse_secs(ENV_REVALIDATE_AFTER_SECS, lookup(ENV_REVALIDATE_AFTER_SECS).as_deref())? {
            Some(ttl) => RevalidationPolicy::AtMostEvery(ttl),
            None => RevalidationPolicy::Always,
        };

        Ok(Self { api_base_url, validate_timeout, revalidation })
    }
}

/// Trim whitespace and trailing slashes from a base URL taken from `source`.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyBaseUrl`] if nothing is left after trimming.
pub fn normalize_base_url(source: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl { var: source.into() });
    }
    Ok(trimmed.to_string())
}

/// Parse a seconds value where absent, blank, or zero mean "off".
fn parse_secs(var: &str, raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let secs = raw
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber { var: var.into(), value: raw.into() })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
