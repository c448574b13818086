use super::*;
use serde_json::json;

// =============================================================================
// AuthState
// =============================================================================

#[test]
fn new_state_is_unauthenticated() {
    let state = AuthState::new();
    assert!(!state.is_authenticated());
    assert_eq!(state.token(), None);
    assert!(state.user().is_none());
    assert!(state.validated_at().is_none());
}

#[test]
fn with_token_is_authenticated_without_user() {
    let state = AuthState::with_token("abc");
    assert!(state.is_authenticated());
    assert_eq!(state.token(), Some("abc"));
    assert!(state.user().is_none());
}

#[test]
fn clear_drops_token_and_user() {
    let mut state = AuthState::with_token("abc");
    state.record_validation(UserRecord::new(json!({"id": 1})), Instant::now());

    state.clear();

    assert!(!state.is_authenticated());
    assert_eq!(state.token(), None);
    assert!(state.user().is_none());
    assert!(state.validated_at().is_none());
}

#[test]
fn set_token_drops_user_of_previous_token() {
    let mut state = AuthState::with_token("old");
    state.record_validation(UserRecord::new(json!({"id": 1})), Instant::now());

    state.set_token("new");

    assert_eq!(state.token(), Some("new"));
    assert!(state.user().is_none());
    assert!(state.validated_at().is_none());
}

#[test]
fn record_validation_stores_user_and_stamp() {
    let mut state = AuthState::with_token("abc");
    let at = Instant::now();
    state.record_validation(UserRecord::new(json!({"id": 1, "name": "Al"})), at);

    assert_eq!(state.user().map(UserRecord::as_value), Some(&json!({"id": 1, "name": "Al"})));
    assert_eq!(state.validated_at(), Some(at));
}

// =============================================================================
// UserRecord
// =============================================================================

#[test]
fn user_record_deserializes_any_json_document() {
    let user: UserRecord = serde_json::from_str(r#"{"id":1,"name":"Al","roles":["admin"]}"#).unwrap();
    assert_eq!(user.into_value(), json!({"id": 1, "name": "Al", "roles": ["admin"]}));
}

#[test]
fn user_record_serializes_transparently() {
    let user = UserRecord::new(json!({"id": 7}));
    assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"id":7}"#);
}
