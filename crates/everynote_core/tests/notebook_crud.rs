use everynote_core::db::open_db_in_memory;
use everynote_core::{
    MemoryNoteStore, Note, Notebook, NotebookError, NoteStore, NoteValidationError,
    SqliteNoteStore, StoreError,
};

#[test]
fn insert_assigns_sequential_ids_starting_at_one() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    assert_eq!(book.insert_note("buy milk", "General").unwrap(), 1);
    assert_eq!(book.insert_note("call dentist", "General").unwrap(), 2);

    let ids: Vec<i64> = book.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn every_insert_exceeds_all_live_ids() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    for i in 0..5 {
        let max_before = book.notes().iter().map(|n| n.id).max().unwrap_or(0);
        let id = book.insert_note(format!("note {i}"), "General").unwrap();
        assert!(id > max_before);
    }
}

#[test]
fn deleting_the_max_id_lets_its_id_be_reassigned() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    book.insert_note("first", "General").unwrap();
    let second = book.insert_note("second", "General").unwrap();
    book.delete_note(second).unwrap();

    // max is recomputed from the live set, so the freed id comes back.
    assert_eq!(book.insert_note("third", "General").unwrap(), second);
}

#[test]
fn home_screen_scenario() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let mut book = Notebook::load(&store).unwrap();
    assert!(book.notes().is_empty());

    let first = book.insert_note("buy milk", "General").unwrap();
    assert_eq!(first, 1);
    let second = book.insert_note("water plants", "General").unwrap();
    assert_eq!(second, 2);

    assert!(book.delete_note(first).unwrap());
    assert_eq!(book.notes().len(), 1);
    assert_eq!(book.notes()[0].id, 2);

    let ghost = Note {
        id: 99,
        content: "never inserted".to_string(),
        category: "General".to_string(),
        timestamp: 0,
    };
    assert!(!book.update_note(&ghost).unwrap());
    assert_eq!(book.notes().len(), 1);
}

#[test]
fn state_survives_reload_through_a_fresh_notebook() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    {
        let mut book = Notebook::load(&store).unwrap();
        book.insert_note("persisted", "General").unwrap();
    }

    let reloaded = Notebook::load(&store).unwrap();
    assert_eq!(reloaded.notes().len(), 1);
    assert_eq!(reloaded.notes()[0].content, "persisted");
}

#[test]
fn delete_removes_only_the_matching_id() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    let first = book.insert_note("keep me", "General").unwrap();
    let second = book.insert_note("drop me", "General").unwrap();

    assert!(book.delete_note(second).unwrap());
    assert_eq!(book.notes().len(), 1);
    assert_eq!(book.notes()[0].id, first);
}

#[test]
fn delete_of_unknown_id_is_a_noop() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();
    book.insert_note("only note", "General").unwrap();

    let revision_before = book.revision();
    assert!(!book.delete_note(42).unwrap());
    assert_eq!(book.notes().len(), 1);
    assert_eq!(book.revision(), revision_before);
}

#[test]
fn update_replaces_the_full_record_and_keeps_position() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    let id = book.insert_note("draft", "General").unwrap();
    book.insert_note("other", "General").unwrap();

    let mut edited = book.notes()[0].clone();
    assert_eq!(edited.id, id);
    edited.content = "final text".to_string();
    edited.category = "Work".to_string();

    assert!(book.update_note(&edited).unwrap());
    assert_eq!(book.notes()[0], edited);
    assert_eq!(book.notes()[1].content, "other");
}

#[test]
fn insert_rejects_blank_content() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    let err = book.insert_note("   ", "General").unwrap_err();
    assert!(matches!(
        err,
        NotebookError::Validation(NoteValidationError::EmptyContent)
    ));
    assert!(book.notes().is_empty());
}

#[test]
fn insert_stamps_creation_time() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    book.insert_note("stamped", "General").unwrap();
    assert!(book.notes()[0].timestamp > 0);
}

#[test]
fn revision_bumps_once_per_successful_mutation() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();
    assert_eq!(book.revision(), 0);

    let id = book.insert_note("one", "General").unwrap();
    assert_eq!(book.revision(), 1);

    book.add_category("Work").unwrap();
    assert_eq!(book.revision(), 2);

    // No-ops leave the counter alone.
    book.add_category("Work").unwrap();
    book.delete_note(999).unwrap();
    assert_eq!(book.revision(), 2);

    book.delete_note(id).unwrap();
    assert_eq!(book.revision(), 3);
}

#[test]
fn persist_failure_keeps_the_memory_mutation_and_surfaces_the_error() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    store.set_fail_saves(true);
    let err = book.insert_note("kept in memory", "General").unwrap_err();
    assert!(matches!(err, NotebookError::Store(StoreError::Unavailable(_))));

    // Session state is the source of truth; the snapshot write failed.
    assert_eq!(book.notes().len(), 1);
    store.set_fail_saves(false);
    assert!(store.load_notes().unwrap().is_empty());
}

#[test]
fn corrupt_snapshot_fails_load_instead_of_masking_as_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO note_prefs (name, value) VALUES ('notes', '[{\"id\":');",
        [],
    )
    .unwrap();

    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let err = Notebook::load(&store).unwrap_err();
    assert!(matches!(
        err,
        NotebookError::Store(StoreError::Corrupt { key: "notes", .. })
    ));
}

#[test]
fn filter_matches_category_and_case_insensitive_substring() {
    let store = MemoryNoteStore::new();
    let mut book = Notebook::load(&store).unwrap();

    book.insert_note("Buy MILK and eggs", "General").unwrap();
    book.insert_note("milk the deadline", "Work").unwrap();
    book.insert_note("water plants", "General").unwrap();

    let hits = book.filter_notes("General", "milk");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "Buy MILK and eggs");

    let all_general = book.filter_notes("General", "  ");
    assert_eq!(all_general.len(), 2);

    assert!(book.filter_notes("Errands", "milk").is_empty());
}
