//! Blob round-trips through the file backend.

use campus_canteen_core::Username;
use campus_canteen_datastore::models::User;
use campus_canteen_datastore::DataStore;

#[test]
fn test_file_roundtrip_preserves_the_aggregate_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus_food_db.json");

    let store = DataStore::open(&path);
    let mut db = store.load();
    db.users
        .push(User::new(Username::parse("alice").unwrap(), "pw", false));
    store.save(&db).unwrap();

    // save(load()) must be a no-op on the next load.
    let loaded = store.load();
    store.save(&loaded).unwrap();
    let reloaded = store.load();

    assert_eq!(
        serde_json::to_value(&loaded).unwrap(),
        serde_json::to_value(&reloaded).unwrap()
    );
}

#[test]
fn test_fresh_path_loads_as_empty_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::open(dir.path().join("never_written.json"));

    let db = store.load();
    assert!(db.users.is_empty());
    assert!(db.stores.is_empty());
    assert!(db.dishes.is_empty());
    assert!(db.orders.is_empty());
    assert!(db.reviews.is_empty());
    assert!(db.sessions.is_empty());
}

#[test]
fn test_two_handles_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus_food_db.json");

    let writer = DataStore::open(&path);
    let reader = DataStore::open(&path);

    let mut db = writer.load();
    db.users
        .push(User::new(Username::parse("alice").unwrap(), "pw", false));
    writer.save(&db).unwrap();

    assert_eq!(reader.load().users.len(), 1);
}

#[test]
fn test_garbage_on_disk_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus_food_db.json");
    std::fs::write(&path, "]]] definitely not json").unwrap();

    let store = DataStore::open(&path);
    assert!(store.load().users.is_empty());
}

#[test]
fn test_wire_format_uses_camel_case_and_epoch_millis() {
    use campus_canteen_core::WindowId;
    use campus_canteen_datastore::models::ActiveSession;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus_food_db.json");
    let store = DataStore::open(&path);

    let mut db = store.load();
    db.users
        .push(User::new(Username::parse("alice").unwrap(), "pw", true));
    db.sessions.push(ActiveSession {
        window_id: WindowId::generate(),
        last_heartbeat: chrono::DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
    });
    store.save(&db).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["users"][0]["isMerchant"], true);
    assert!(raw["users"][0]["passwordHash"].is_string());
    assert_eq!(raw["sessions"][0]["lastHeartbeat"], 1_700_000_000_000_i64);
}
