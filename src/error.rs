//! Error types for identity validation and configuration.
//!
//! ERROR HANDLING
//! ==============
//! `ValidationError` never escapes the gatekeeper: every variant is folded
//! into a login redirect. It exists so providers and logs can say what went
//! wrong without the caller having to care.

// =============================================================================
// VALIDATION
// =============================================================================

/// Errors produced while checking a bearer token against the identity endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("identity endpoint rejected token: status {status}")]
    Rejected { status: u16 },

    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("identity request failed: {0}")]
    Transport(String),

    /// The configured request timeout elapsed before a response arrived.
    #[error("identity request timed out")]
    Timeout,

    /// The response body could not be decoded as a user record.
    #[error("identity response malformed: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Short machine-readable code for structured logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "E_REJECTED",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Timeout => "E_TIMEOUT",
            Self::Malformed(_) => "E_MALFORMED",
        }
    }
}

impl From<reqwest::Error> for ValidationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Malformed(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Errors produced while reading gatekeeper configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric setting held something other than a non-negative integer.
    #[error("invalid number for {var}: {value:?}")]
    InvalidNumber { var: String, value: String },

    /// The identity base URL was empty after trimming.
    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}
