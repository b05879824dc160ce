//! Note/category store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the note collection and category list as whole-collection
//!   JSON snapshots under fixed keys in `note_prefs`.
//!
//! # Invariants
//! - An absent key reads as an empty collection; a present but
//!   unparseable value reads as `StoreError::Corrupt`.
//! - Saves overwrite the full snapshot; encode cost is O(n) per call
//!   regardless of how many records changed.

use crate::model::note::Note;
use crate::repo::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

const NOTES_KEY: &str = "notes";
const CATEGORIES_KEY: &str = "categories";

/// Store contract for the note collection and category list.
///
/// The state holder is generic over this trait so tests can inject
/// `MemoryNoteStore` in place of SQLite.
pub trait NoteStore {
    /// Reads the full note collection; absent snapshot yields empty.
    fn load_notes(&self) -> StoreResult<Vec<Note>>;
    /// Overwrites the persisted note collection with `notes`.
    fn save_notes(&self, notes: &[Note]) -> StoreResult<()>;
    /// Reads the category list; absent snapshot yields empty.
    fn load_categories(&self) -> StoreResult<Vec<String>>;
    /// Overwrites the persisted category list with `categories`.
    fn save_categories(&self, categories: &[String]) -> StoreResult<()>;
}

impl<T: NoteStore + ?Sized> NoteStore for &T {
    fn load_notes(&self) -> StoreResult<Vec<Note>> {
        (**self).load_notes()
    }

    fn save_notes(&self, notes: &[Note]) -> StoreResult<()> {
        (**self).save_notes(notes)
    }

    fn load_categories(&self) -> StoreResult<Vec<String>> {
        (**self).load_categories()
    }

    fn save_categories(&self, categories: &[String]) -> StoreResult<()> {
        (**self).save_categories(categories)
    }
}

/// SQLite-backed note/category store over the `note_prefs` table.
#[derive(Debug)]
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_table(conn, "note_prefs")?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn load_notes(&self) -> StoreResult<Vec<Note>> {
        match read_pref(self.conn, "note_prefs", NOTES_KEY)? {
            Some(text) => serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                key: NOTES_KEY,
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_notes(&self, notes: &[Note]) -> StoreResult<()> {
        let text = serde_json::to_string(notes).map_err(StoreError::Encode)?;
        write_pref(self.conn, "note_prefs", NOTES_KEY, &text)
    }

    fn load_categories(&self) -> StoreResult<Vec<String>> {
        match read_pref(self.conn, "note_prefs", CATEGORIES_KEY)? {
            Some(text) => serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                key: CATEGORIES_KEY,
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_categories(&self, categories: &[String]) -> StoreResult<()> {
        let text = serde_json::to_string(categories).map_err(StoreError::Encode)?;
        write_pref(self.conn, "note_prefs", CATEGORIES_KEY, &text)
    }
}

pub(crate) fn ensure_table(conn: &Connection, table: &str) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
         );",
        [table],
        |row| row.get(0),
    )?;

    if exists == 0 {
        return Err(StoreError::Unavailable(format!(
            "table `{table}` is missing; open the database through db::open_db"
        )));
    }

    Ok(())
}

pub(crate) fn read_pref(
    conn: &Connection,
    table: &str,
    name: &str,
) -> StoreResult<Option<String>> {
    let value = conn
        .query_row(
            &format!("SELECT value FROM {table} WHERE name = ?1;"),
            [name],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

pub(crate) fn write_pref(
    conn: &Connection,
    table: &str,
    name: &str,
    value: &str,
) -> StoreResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {table} (name, value) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value;"
        ),
        params![name, value],
    )?;
    Ok(())
}
