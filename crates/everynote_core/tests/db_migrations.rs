use everynote_core::db::migrations::latest_version;
use everynote_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn table_exists(conn: &Connection, name: &str) -> bool {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [name],
            |row| row.get(0),
        )
        .unwrap();
    count == 1
}

fn stamped_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_database_carries_both_preference_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(stamped_version(&conn), latest_version());
    assert!(table_exists(&conn, "note_prefs"));
    assert!(table_exists(&conn, "user_prefs"));
}

#[test]
fn reopening_a_migrated_file_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("everynote.sqlite3");

    drop(open_db(&path).unwrap());

    let conn = open_db(&path).unwrap();
    assert_eq!(stamped_version(&conn), latest_version());
    assert!(table_exists(&conn, "note_prefs"));
}

#[test]
fn files_from_a_newer_build_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    {
        let conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", 1000).unwrap();
    }

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 1000);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}
