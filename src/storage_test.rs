use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get_item("token"), None);

    storage.set_item("token", "abc").unwrap();
    assert_eq!(storage.get_item("token").as_deref(), Some("abc"));

    storage.remove_item("token").unwrap();
    assert_eq!(storage.get_item("token"), None);
}

#[test]
fn memory_storage_clones_share_items() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set_item("user", "{}").unwrap();
    assert_eq!(b.get_item("user").as_deref(), Some("{}"));
}

#[test]
fn memory_storage_remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove_item("nope").is_ok());
}

#[test]
fn file_storage_missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path().join("session.json")).unwrap();
    assert_eq!(storage.get_item("token"), None);
}

#[test]
fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let storage = FileStorage::open(&path).unwrap();
    storage.set_item("token", "t-1").unwrap();
    storage.set_item("user", r#"{"id":"1"}"#).unwrap();
    drop(storage);

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get_item("token").as_deref(), Some("t-1"));
    assert_eq!(reopened.get_item("user").as_deref(), Some(r#"{"id":"1"}"#));
}

#[test]
fn file_storage_removal_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let storage = FileStorage::open(&path).unwrap();
    storage.set_item("token", "t-1").unwrap();
    storage.remove_item("token").unwrap();
    drop(storage);

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get_item("token"), None);
}

#[test]
fn file_storage_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FileStorage::open(&path).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
}

#[test]
fn file_storage_empty_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "  \n").unwrap();

    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get_item("token"), None);
}

#[test]
fn file_storage_open_or_reset_recovers_from_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{\"token\": ").unwrap();

    let storage = FileStorage::open_or_reset(&path).unwrap();
    assert_eq!(storage.get_item("token"), None);

    // First write replaces the corrupt file with a valid one.
    storage.set_item("token", "fresh").unwrap();
    drop(storage);
    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get_item("token").as_deref(), Some("fresh"));
}

#[test]
fn file_storage_open_or_reset_keeps_good_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"token":"t-1"}"#).unwrap();

    let storage = FileStorage::open_or_reset(&path).unwrap();
    assert_eq!(storage.get_item("token").as_deref(), Some("t-1"));
}
