//! Session gatekeeper: decides whether a navigation may proceed.
//!
//! ARCHITECTURE
//! ============
//! Checks run in a fixed order:
//! 1. Protected destination + no token => redirect, no remote call.
//! 2. Token present (any destination) => validate remotely. Success stores
//!    the user; any failure clears the session and redirects.
//! 3. Otherwise allow.
//!
//! TRADE-OFFS
//! ==========
//! Step 2 runs on every navigation that carries a token, public routes
//! included. `RevalidationPolicy::AtMostEvery` can skip recent repeats, but
//! the default is `Always`.
//!
//! CONCURRENCY
//! ===========
//! `decide` takes `&mut AuthState`, so validations for one state are
//! serialized by the borrow checker. State is only touched after the remote
//! call resolves; a dropped future leaves it as it was.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::identity::IdentityProvider;
use crate::state::AuthState;

// =============================================================================
// DESTINATION / DECISION
// =============================================================================

/// Requested navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// Route name; opaque to the gatekeeper.
    pub route: String,
    /// Declared by the route's metadata.
    pub requires_auth: bool,
}

impl Destination {
    #[must_use]
    pub fn public(route: impl Into<String>) -> Self {
        Self { route: route.into(), requires_auth: false }
    }

    #[must_use]
    pub fn protected(route: impl Into<String>) -> Self {
        Self { route: route.into(), requires_auth: true }
    }
}

/// Why a navigation was sent to login.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denial {
    /// Protected destination, no credential.
    UnauthenticatedAccess,
    /// Credential rejected or unverifiable; transport failures land here too.
    InvalidCredential,
}

/// Outcome of a single gate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin(Denial),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// How often a present token is re-checked against the identity endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevalidationPolicy {
    /// Every navigation.
    #[default]
    Always,
    /// Skip the remote call if the current token passed less than this long ago.
    AtMostEvery(Duration),
}

impl RevalidationPolicy {
    fn is_fresh(self, validated_at: Option<Instant>, now: Instant) -> bool {
        match (self, validated_at) {
            (Self::AtMostEvery(ttl), Some(at)) => now.saturating_duration_since(at) < ttl,
            _ => false,
        }
    }
}

// =============================================================================
// GATEKEEPER
// =============================================================================

/// Gate run once per navigation attempt.
#[derive(Clone)]
pub struct SessionGatekeeper {
    identity: Arc<dyn IdentityProvider>,
    policy: RevalidationPolicy,
}

impl SessionGatekeeper {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity, policy: RevalidationPolicy::Always }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RevalidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> RevalidationPolicy {
        self.policy
    }

    /// Decide whether `destination` may be entered, updating `state` with the
    /// outcome of any remote validation.
    pub async fn decide(&self, destination: &Destination, state: &mut AuthState) -> Decision {
        if destination.requires_auth && !state.is_authenticated() {
            tracing::debug!(route = %destination.route, "unauthenticated access to protected route");
            return Decision::RedirectToLogin(Denial::UnauthenticatedAccess);
        }

        let Some(token) = state.token() else {
            return Decision::Allow;
        };

        if self.policy.is_fresh(state.validated_at(), Instant::now()) {
            tracing::debug!(route = %destination.route, "token recently validated; skipping check");
            return Decision::Allow;
        }

        let outcome = self.identity.fetch_user(token).await;
        match outcome {
            Ok(user) => {
                tracing::debug!(route = %destination.route, "token validated");
                state.record_validation(user, Instant::now());
                Decision::Allow
            }
            Err(e) => {
                tracing::warn!(
                    route = %destination.route,
                    code = e.code(),
                    error = %e,
                    "token invalid, redirecting to login"
                );
                state.clear();
                Decision::RedirectToLogin(Denial::InvalidCredential)
            }
        }
    }
}
