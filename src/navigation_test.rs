use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use crate::error::ValidationError;
use crate::gate::Denial;
use crate::identity::IdentityProvider;
use crate::state::UserRecord;

/// Accepts exactly one token; everything else is a 401.
struct SingleTokenIdentity {
    valid: &'static str,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl IdentityProvider for SingleTokenIdentity {
    async fn fetch_user(&self, token: &str) -> Result<UserRecord, ValidationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if token == self.valid {
            Ok(UserRecord::new(json!({"id": 1, "name": "Al"})))
        } else {
            Err(ValidationError::Rejected { status: 401 })
        }
    }
}

fn navigator(state: AuthState) -> (Navigator, Arc<SingleTokenIdentity>) {
    let identity = Arc::new(SingleTokenIdentity { valid: "good", calls: AtomicUsize::new(0) });
    let nav = Navigator::new(SessionGatekeeper::new(identity.clone()), state);
    (nav, identity)
}

#[tokio::test]
async fn allowed_navigation_targets_requested_destination() {
    let (mut nav, _) = navigator(AuthState::with_token("good"));

    let result = nav.navigate(Destination::protected("Pages")).await;

    assert_eq!(result.decision, Decision::Allow);
    assert_eq!(result.target, Destination::protected("Pages"));
    assert!(nav.state().user().is_some());
}

#[tokio::test]
async fn denied_navigation_targets_login() {
    let (mut nav, identity) = navigator(AuthState::new());

    let result = nav.navigate(Destination::protected("Editor")).await;

    assert_eq!(result.decision, Decision::RedirectToLogin(Denial::UnauthenticatedAccess));
    assert_eq!(result.target, Destination::public(LOGIN_ROUTE));
    assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_token_redirects_and_later_login_recovers() {
    let (mut nav, _) = navigator(AuthState::with_token("stale"));

    let first = nav.navigate(Destination::protected("Pages")).await;
    assert_eq!(first.decision, Decision::RedirectToLogin(Denial::InvalidCredential));
    assert!(!nav.state().is_authenticated());

    nav.login_with("good");
    let second = nav.navigate(Destination::protected("Pages")).await;
    assert_eq!(second.decision, Decision::Allow);
    assert_eq!(second.target.route, "Pages");
}

#[tokio::test]
async fn logout_clears_session() {
    let (mut nav, _) = navigator(AuthState::with_token("good"));
    nav.navigate(Destination::public("Home")).await;
    assert!(nav.state().user().is_some());

    nav.logout();

    assert!(!nav.state().is_authenticated());
    assert!(nav.state().user().is_none());
    let result = nav.navigate(Destination::protected("Pages")).await;
    assert_eq!(result.target, Destination::public(LOGIN_ROUTE));
}

#[tokio::test]
async fn custom_login_destination_is_substituted() {
    let (nav, _) = navigator(AuthState::new());
    let mut nav = nav.with_login(Destination::public("SignIn"));

    let result = nav.navigate(Destination::protected("Pages")).await;

    assert_eq!(result.target.route, "SignIn");
    assert_eq!(nav.login().route, "SignIn");
}
