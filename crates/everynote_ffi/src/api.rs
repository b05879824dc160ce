//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the home-screen and profile use-cases to Dart via FRB.
//! - Keep error semantics simple for the UI: envelopes, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Responses never carry credential material; only a boolean flag
//!   says whether credentials exist.

use everynote_core::db::open_db;
use everynote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, Notebook, ProfileInput, ProfileSession, SqliteNoteStore, SqliteProfileStore,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "everynote.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking; never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking; never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; reconfiguration attempts
///   return an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => {
            log::info!("event=ffi_ready module=ffi status=ok");
            String::new()
        }
        Err(err) => err,
    }
}

/// Note row shaped for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub content: String,
    pub category: String,
    /// Creation instant in epoch milliseconds.
    pub timestamp: i64,
}

/// Response envelope for note list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    /// Matching notes in insertion order (empty on failure).
    pub items: Vec<NoteItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Response envelope for the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoriesResponse {
    pub items: Vec<String>,
    pub message: String,
}

/// Generic action response envelope for home-screen mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the affected note, when one was affected.
    pub note_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<i64>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Profile snapshot for the login screen. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub ok: bool,
    pub name: String,
    pub photo_url: String,
    pub email: String,
    /// True when a password hash is stored.
    pub has_credentials: bool,
    pub message: String,
}

/// Verification envelope for the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResponse {
    pub verified: bool,
    pub message: String,
}

/// Lists notes, optionally restricted to a category and a search text.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - `category = None` lists across all categories.
#[flutter_rust_bridge::frb(sync)]
pub fn home_list_notes(category: Option<String>, search: Option<String>) -> NotesResponse {
    let loaded = open_conn().and_then(|conn| {
        let store = SqliteNoteStore::try_new(&conn).map_err(|err| err.to_string())?;
        let book = Notebook::load(store).map_err(|err| err.to_string())?;

        let needle = search.unwrap_or_default();
        let items: Vec<NoteItem> = match category {
            Some(ref cat) => book
                .filter_notes(cat, &needle)
                .into_iter()
                .map(to_item)
                .collect(),
            None => {
                let lowered = needle.trim().to_lowercase();
                book.notes()
                    .iter()
                    .filter(|note| {
                        lowered.is_empty() || note.content.to_lowercase().contains(&lowered)
                    })
                    .map(to_item)
                    .collect()
            }
        };
        Ok(items)
    });

    match loaded {
        Ok(items) => {
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            NotesResponse { items, message }
        }
        Err(err) => NotesResponse {
            items: Vec::new(),
            message: format!("home_list_notes failed: {err}"),
        },
    }
}

/// Creates a note in the given category.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Returns the assigned note id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn home_insert_note(content: String, category: String) -> ActionResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteNoteStore::try_new(&conn).map_err(|err| err.to_string())?;
        let mut book = Notebook::load(store).map_err(|err| err.to_string())?;
        book.insert_note(content.trim().to_string(), category)
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(id) => ActionResponse::success("Note created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("home_insert_note failed: {err}")),
    }
}

/// Replaces the content/category of an existing note.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - A missing id is not an error; the response says nothing matched.
#[flutter_rust_bridge::frb(sync)]
pub fn home_update_note(id: i64, content: String, category: String) -> ActionResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteNoteStore::try_new(&conn).map_err(|err| err.to_string())?;
        let mut book = Notebook::load(store).map_err(|err| err.to_string())?;

        let Some(existing) = book.notes().iter().find(|note| note.id == id) else {
            return Ok(false);
        };
        let updated = Note {
            id,
            content,
            category,
            timestamp: existing.timestamp,
        };
        book.update_note(&updated).map_err(|err| err.to_string())
    });

    match result {
        Ok(true) => ActionResponse::success("Note updated.", Some(id)),
        Ok(false) => ActionResponse::success("No matching note.", None),
        Err(err) => ActionResponse::failure(format!("home_update_note failed: {err}")),
    }
}

/// Deletes a note by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Deleting an unknown id succeeds with a no-match message.
#[flutter_rust_bridge::frb(sync)]
pub fn home_delete_note(id: i64) -> ActionResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteNoteStore::try_new(&conn).map_err(|err| err.to_string())?;
        let mut book = Notebook::load(store).map_err(|err| err.to_string())?;
        book.delete_note(id).map_err(|err| err.to_string())
    });

    match result {
        Ok(true) => ActionResponse::success("Note deleted.", Some(id)),
        Ok(false) => ActionResponse::success("No matching note.", None),
        Err(err) => ActionResponse::failure(format!("home_delete_note failed: {err}")),
    }
}

/// Lists categories, oldest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Always contains at least the default category on success.
#[flutter_rust_bridge::frb(sync)]
pub fn home_list_categories() -> CategoriesResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteNoteStore::try_new(&conn).map_err(|err| err.to_string())?;
        let book = Notebook::load(store).map_err(|err| err.to_string())?;
        Ok(book.categories().to_vec())
    });

    match result {
        Ok(items) => CategoriesResponse {
            message: format!("{} categories.", items.len()),
            items,
        },
        Err(err) => CategoriesResponse {
            items: Vec::new(),
            message: format!("home_list_categories failed: {err}"),
        },
    }
}

/// Adds a category unless blank or already present.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn home_add_category(name: String) -> ActionResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteNoteStore::try_new(&conn).map_err(|err| err.to_string())?;
        let mut book = Notebook::load(store).map_err(|err| err.to_string())?;
        book.add_category(&name).map_err(|err| err.to_string())
    });

    match result {
        Ok(true) => ActionResponse::success("Category added.", None),
        Ok(false) => ActionResponse::success("Category already present.", None),
        Err(err) => ActionResponse::failure(format!("home_add_category failed: {err}")),
    }
}

/// Reads the stored profile for the login screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Never returns credential material.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_get() -> ProfileResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteProfileStore::try_new(&conn).map_err(|err| err.to_string())?;
        let session = ProfileSession::load(store).map_err(|err| err.to_string())?;
        Ok(session.profile().clone())
    });

    match result {
        Ok(profile) => ProfileResponse {
            ok: true,
            name: profile.name,
            photo_url: profile.photo_url,
            email: profile.email,
            has_credentials: !profile.password_hash.is_empty(),
            message: String::new(),
        },
        Err(err) => ProfileResponse {
            ok: false,
            name: String::new(),
            photo_url: String::new(),
            email: String::new(),
            has_credentials: false,
            message: format!("profile_get failed: {err}"),
        },
    }
}

/// Overwrites the stored profile from the login form.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - The password is hashed inside core; plaintext is never stored.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_save(
    name: String,
    photo_url: String,
    email: String,
    password: String,
) -> ActionResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteProfileStore::try_new(&conn).map_err(|err| err.to_string())?;
        let mut session = ProfileSession::load(store).map_err(|err| err.to_string())?;
        session
            .save(ProfileInput {
                name,
                photo_url,
                email,
                password,
            })
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(()) => ActionResponse::success("Profile saved.", None),
        Err(err) => ActionResponse::failure(format!("profile_save failed: {err}")),
    }
}

/// Checks a candidate password against the stored credentials.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - `verified=false` both for a wrong password and for missing
///   credentials; the message distinguishes the two.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_verify_password(password: String) -> VerifyResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteProfileStore::try_new(&conn).map_err(|err| err.to_string())?;
        let session = ProfileSession::load(store).map_err(|err| err.to_string())?;
        if !session.is_signed_in() {
            return Ok((false, "No stored credentials.".to_string()));
        }
        let verified = session.verify_password(&password);
        let message = if verified {
            "Password verified.".to_string()
        } else {
            "Password mismatch.".to_string()
        };
        Ok((verified, message))
    });

    match result {
        Ok((verified, message)) => VerifyResponse { verified, message },
        Err(err) => VerifyResponse {
            verified: false,
            message: format!("profile_verify_password failed: {err}"),
        },
    }
}

/// Signs out: clears every stored profile field.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_logout() -> ActionResponse {
    let result = open_conn().and_then(|conn| {
        let store = SqliteProfileStore::try_new(&conn).map_err(|err| err.to_string())?;
        let mut session = ProfileSession::load(store).map_err(|err| err.to_string())?;
        session.logout().map_err(|err| err.to_string())
    });

    match result {
        Ok(()) => ActionResponse::success("Signed out.", None),
        Err(err) => ActionResponse::failure(format!("profile_logout failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("EVERYNOTE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn open_conn() -> Result<Connection, String> {
    open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))
}

fn to_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id,
        content: note.content.clone(),
        category: note.category.clone(),
        timestamp: note.timestamp,
    }
}
