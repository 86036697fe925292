use quicknote_core::{NoteServiceError, NoteStore, StoreConfig, UpgradePolicy};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn temp_store() -> (TempDir, NoteStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = NoteStore::new(StoreConfig::new(dir.path().join("notes.sqlite3")));
    (dir, store)
}

#[test]
fn created_note_reads_back_exact_text() {
    let (_dir, store) = temp_store();

    for text in ["Buy milk", "  leading and trailing  ", "multi\nline", "ünïcödé ✓"] {
        let id = store.create(text).unwrap();
        assert_eq!(store.get_by_id(id).unwrap().text, text);
    }
}

#[test]
fn deleted_note_is_not_found_and_delete_is_idempotent() {
    let (_dir, store) = temp_store();
    let id = store.create("temporary").unwrap();

    store.delete(id).unwrap();
    store.delete(id).unwrap();

    let err = store.get_by_id(id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(missing) if missing == id));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn list_all_is_newest_first_and_matches_count() {
    let (_dir, store) = temp_store();
    assert!(store.list_all().unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 0);

    for idx in 0..5 {
        store.create(&format!("note {idx}")).unwrap();
    }

    let notes = store.list_all().unwrap();
    assert_eq!(notes.len() as u64, store.count().unwrap());
    assert!(notes
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
    assert_eq!(notes[0].text, "note 4");
}

#[test]
fn update_replaces_text_and_keeps_created_at() {
    let (_dir, store) = temp_store();
    let id = store.create("before").unwrap();
    let created_at = store.get_by_id(id).unwrap().created_at;

    assert_eq!(store.update(id, "after").unwrap(), 1);

    let loaded = store.get_by_id(id).unwrap();
    assert_eq!(loaded.text, "after");
    assert_eq!(loaded.created_at, created_at);
}

#[test]
fn update_of_unknown_id_affects_nothing() {
    let (_dir, store) = temp_store();

    assert_eq!(store.update(12, "ghost").unwrap(), 0);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn whitespace_only_text_round_trips_unchanged() {
    let (_dir, store) = temp_store();

    for text in [" ", "\t", " \n "] {
        let id = store.create(text).unwrap();
        assert_eq!(store.get_by_id(id).unwrap().text, text);
        assert_eq!(store.update(id, "  ").unwrap(), 1);
        assert_eq!(store.get_by_id(id).unwrap().text, "  ");
    }
}

#[test]
fn empty_text_is_rejected_before_storage() {
    let (_dir, store) = temp_store();
    let id = store.create("keep me").unwrap();

    assert!(matches!(
        store.create("").unwrap_err(),
        NoteServiceError::Validation(_)
    ));
    assert!(matches!(
        store.update(id, "").unwrap_err(),
        NoteServiceError::Validation(_)
    ));
    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.get_by_id(id).unwrap().text, "keep me");
}

#[test]
fn buy_milk_scenario() {
    let (_dir, store) = temp_store();

    let milk = store.create("Buy milk").unwrap();
    let bob = store.create("Call Bob").unwrap();
    assert_eq!(milk, 1);
    assert_eq!(bob, 2);

    let listed = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|note| (note.id, note.text))
        .collect::<Vec<_>>();
    assert_eq!(
        listed,
        vec![(2, "Call Bob".to_string()), (1, "Buy milk".to_string())]
    );

    store.update(1, "Buy milk and eggs").unwrap();
    assert_eq!(store.get_by_id(1).unwrap().text, "Buy milk and eggs");

    store.delete(2).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn notes_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("reopen.sqlite3"));
    let id = NoteStore::new(config.clone()).create("durable").unwrap();

    let reopened = NoteStore::new(config.with_upgrade_policy(UpgradePolicy::Recreate));

    assert_eq!(reopened.get_by_id(id).unwrap().text, "durable");
}

#[test]
fn shared_store_serializes_concurrent_writers() {
    let (_dir, store) = temp_store();
    let store = Arc::new(store);

    let handles = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for idx in 0..10 {
                    store.create(&format!("worker {worker} note {idx}")).unwrap();
                }
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.count().unwrap(), 40);
    assert_eq!(store.list_all().unwrap().len(), 40);
}
