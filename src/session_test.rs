use super::*;
use crate::storage::MemoryStorage;

fn alice() -> User {
    User { id: "u1".to_owned(), name: "Alice".to_owned(), email: "alice@example.com".to_owned() }
}

fn store() -> (SessionStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    (SessionStore::new(storage.clone()), storage)
}

#[test]
fn empty_store_is_not_authenticated() {
    let (session, _) = store();
    assert!(!session.is_authenticated());
    assert_eq!(session.get_token(), None);
    assert_eq!(session.get_user(), None);
}

#[test]
fn any_non_empty_token_authenticates() {
    let (session, _) = store();
    for token in ["t", "demo-token-1", "eyJhbGciOiJIUzI1NiJ9.e30.sig", " "] {
        session.set_token(token).unwrap();
        assert!(session.is_authenticated(), "expected authenticated for {token:?}");
        session.clear_auth().unwrap();
        assert!(!session.is_authenticated(), "expected cleared for {token:?}");
    }
}

#[test]
fn empty_token_does_not_authenticate() {
    let (session, _) = store();
    session.set_token("").unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn token_is_stored_raw_under_token_key() {
    let (session, storage) = store();
    session.set_token("abc.def").unwrap();
    assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("abc.def"));
}

#[test]
fn user_round_trips_through_json_slot() {
    let (session, storage) = store();
    session.set_user(&alice()).unwrap();
    assert_eq!(session.get_user(), Some(alice()));

    let raw = storage.get_item(USER_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["email"], "alice@example.com");
}

#[test]
fn malformed_user_slot_reads_as_absent() {
    let (session, storage) = store();
    for raw in ["{not json", "", "null", "42", r#"{"id":"u1"}"#, "[]"] {
        storage.set_item(USER_KEY, raw).unwrap();
        assert_eq!(session.get_user(), None, "expected None for {raw:?}");
    }
}

#[test]
fn clear_auth_removes_both_slots() {
    let (session, storage) = store();
    session.establish("tok", &alice()).unwrap();
    assert!(session.is_authenticated());

    session.clear_auth().unwrap();
    assert_eq!(storage.get_item(TOKEN_KEY), None);
    assert_eq!(storage.get_item(USER_KEY), None);
    assert_eq!(session.snapshot(), Session::default());
}

#[test]
fn clones_observe_the_same_session() {
    let (session, _) = store();
    let other = session.clone();
    session.set_token("shared").unwrap();
    assert_eq!(other.get_token().as_deref(), Some("shared"));
}

#[test]
fn stale_user_without_token_is_unauthenticated() {
    let (session, _) = store();
    session.set_user(&alice()).unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(session.get_user(), Some(alice()));
}

#[test]
fn stores_over_one_shared_backend_agree() {
    let shared = MemoryStorage::new();
    let a = SessionStore::new(shared.clone());
    let b = SessionStore::new(shared);
    a.establish("tok", &alice()).unwrap();
    assert_eq!(b.snapshot(), Session { token: Some("tok".to_owned()), user: Some(alice()) });
    b.clear_auth().unwrap();
    assert!(!a.is_authenticated());
}
