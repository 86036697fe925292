use quicknote_core::db::open_db_in_memory;
use quicknote_core::{NoteRepository, RepoError, SqliteNoteRepository};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.create_note("first note").unwrap();

    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.text, "first note");
    assert!(loaded.created_at_datetime().is_some());
}

#[test]
fn repository_stores_text_without_validation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo.create_note("").unwrap();

    assert_eq!(repo.get_note(id).unwrap().unwrap().text, "");
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    assert!(repo.get_note(404).unwrap().is_none());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let first = repo.create_note("a").unwrap();
    let second = repo.create_note("b").unwrap();
    assert_eq!(repo.delete_note(second).unwrap(), 1);
    let third = repo.create_note("c").unwrap();

    assert!(third > second);
    assert!(second > first);
}

#[test]
fn list_orders_by_timestamp_then_id_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let old = repo.create_note("old").unwrap();
    let tie_low = repo.create_note("tie low").unwrap();
    let tie_high = repo.create_note("tie high").unwrap();

    conn.execute(
        "UPDATE notes SET timestamp = '2019-12-14 08:00:00' WHERE id = ?1;",
        [old],
    )
    .unwrap();
    conn.execute(
        "UPDATE notes SET timestamp = '2020-01-01 00:00:00' WHERE id IN (?1, ?2);",
        [tie_low, tie_high],
    )
    .unwrap();

    let ids = repo
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![tie_high, tie_low, old]);
}

#[test]
fn update_changes_text_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let id = repo.create_note("draft").unwrap();
    conn.execute(
        "UPDATE notes SET timestamp = '2018-02-21 00:15:42' WHERE id = ?1;",
        [id],
    )
    .unwrap();

    assert_eq!(repo.update_note_text(id, "final").unwrap(), 1);

    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded.text, "final");
    assert_eq!(loaded.created_at, "2018-02-21 00:15:42");
}

#[test]
fn update_and_delete_missing_report_zero_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    assert_eq!(repo.update_note_text(9, "nothing").unwrap(), 0);
    assert_eq!(repo.delete_note(9).unwrap(), 0);
}

#[test]
fn count_tracks_inserts_and_deletes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    assert_eq!(repo.count_notes().unwrap(), 0);

    let id = repo.create_note("one").unwrap();
    repo.create_note("two").unwrap();
    assert_eq!(repo.count_notes().unwrap(), 2);

    repo.delete_note(id).unwrap();
    assert_eq!(repo.count_notes().unwrap(), 1);
}

#[test]
fn malformed_timestamp_is_rejected_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let id = repo.create_note("broken").unwrap();
    conn.execute(
        "UPDATE notes SET timestamp = 'last tuesday' WHERE id = ?1;",
        [id],
    )
    .unwrap();

    let err = repo.get_note(id).unwrap_err();

    assert!(matches!(err, RepoError::InvalidData(_)));
}
