//! Session liveness reconciliation.

use chrono::Utc;

use campus_canteen_core::WindowId;
use campus_canteen_datastore::models::ActiveSession;
use campus_canteen_datastore::{DataStore, SessionTracker};

#[test]
fn test_staleness_pruning_at_the_documented_thresholds() {
    let store = DataStore::in_memory();
    let tracker = SessionTracker::new(store.clone());
    let now = Utc::now();

    // One record 20 s old (past the 15 s window), one 10 s old.
    let stale = WindowId::generate();
    let fresh = WindowId::generate();
    let mut db = store.load();
    db.sessions.push(ActiveSession::stamped(
        stale,
        now - chrono::Duration::milliseconds(20_000),
    ));
    db.sessions.push(ActiveSession::stamped(
        fresh,
        now - chrono::Duration::milliseconds(10_000),
    ));
    store.save(&db).unwrap();

    tracker.tick_at(now);

    let db = store.load();
    assert!(db.session_for(stale).is_none());
    assert!(db.session_for(fresh).is_some());
}

#[test]
fn test_repeated_ticks_never_duplicate_a_session() {
    let store = DataStore::in_memory();
    let tracker = SessionTracker::new(store.clone());
    let window = tracker.register();

    let now = Utc::now();
    for i in 0..10 {
        tracker.tick_at(now + chrono::Duration::seconds(i * 5));
    }

    let db = store.load();
    assert_eq!(
        db.sessions
            .iter()
            .filter(|s| s.window_id == window.window_id())
            .count(),
        1
    );
}

#[test]
fn test_two_processes_converge_through_the_shared_table() {
    let store = DataStore::in_memory();

    // Two trackers over the same blob model two separate windows.
    let first = SessionTracker::new(store.clone());
    let second = SessionTracker::new(store.clone());
    let w1 = first.register();
    let w2 = second.register();

    let now = Utc::now();
    first.tick_at(now);
    second.tick_at(now + chrono::Duration::seconds(1));

    let db = store.load();
    assert_eq!(db.sessions.len(), 2);
    assert!(db.session_for(w1.window_id()).is_some());
    assert!(db.session_for(w2.window_id()).is_some());

    // The first window goes silent; it ages out of the second's view.
    drop(w1);
    second.tick_at(now + chrono::Duration::seconds(30));

    let db = store.load();
    assert!(db.session_for(w2.window_id()).is_some());
    assert_eq!(db.sessions.len(), 1);
}

#[test]
fn test_closing_a_window_removes_its_record_immediately() {
    let store = DataStore::in_memory();
    let tracker = SessionTracker::new(store.clone());

    let window = tracker.register();
    tracker.tick_at(Utc::now());
    let id = window.window_id();
    assert!(store.load().session_for(id).is_some());

    drop(window);
    assert!(store.load().session_for(id).is_none());
}

#[test]
fn test_ticks_leave_domain_collections_alone() {
    use campus_canteen_integration_tests::TestContext;

    let ctx = TestContext::new();
    let (_merchant, _store) = ctx.merchant_with_store("laowang", "Wang's");

    let tracker = SessionTracker::new(ctx.store.clone());
    let _window = tracker.register();
    tracker.tick_at(Utc::now());

    let db = ctx.store.load();
    assert_eq!(db.users.len(), 1);
    assert_eq!(db.stores.len(), 1);
    assert_eq!(db.sessions.len(), 1);
}
