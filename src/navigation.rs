//! Router-side driver for the gatekeeper.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigator owns the session's single `AuthState` and runs every
//! navigation through the gate before committing to a target. Navigations
//! are handled one at a time (`&mut self`), matching how a router serializes
//! route changes.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use crate::gate::{Decision, Destination, SessionGatekeeper};
use crate::state::AuthState;

pub const LOGIN_ROUTE: &str = "Login";

/// Result of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Where the router should actually go.
    pub target: Destination,
    pub decision: Decision,
}

pub struct Navigator {
    gatekeeper: SessionGatekeeper,
    state: AuthState,
    login: Destination,
}

impl Navigator {
    #[must_use]
    pub fn new(gatekeeper: SessionGatekeeper, state: AuthState) -> Self {
        Self { gatekeeper, state, login: Destination::public(LOGIN_ROUTE) }
    }

    /// Override the destination substituted on redirect.
    #[must_use]
    pub fn with_login(mut self, login: Destination) -> Self {
        self.login = login;
        self
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub fn login(&self) -> &Destination {
        &self.login
    }

    /// Gate `destination` and resolve where the router ends up.
    pub async fn navigate(&mut self, destination: Destination) -> Navigation {
        let decision = self.gatekeeper.decide(&destination, &mut self.state).await;
        let target = match decision {
            Decision::Allow => destination,
            Decision::RedirectToLogin(_) => self.login.clone(),
        };
        Navigation { target, decision }
    }

    /// Install a credential obtained from a successful login.
    pub fn login_with(&mut self, token: impl Into<String>) {
        self.state.set_token(token);
    }

    pub fn logout(&mut self) {
        self.state.clear();
    }
}
