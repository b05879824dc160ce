//! Persistence helpers over the preference tables.
//!
//! # Responsibility
//! - Define store contracts for the note collection, category list and
//!   user profile.
//! - Keep SQL and wire-format details inside the persistence boundary.
//!
//! # Invariants
//! - Collections are persisted as whole-collection snapshots under fixed
//!   keys; there are no partial updates.
//! - A present but unparseable snapshot surfaces as `StoreError::Corrupt`,
//!   never as an empty collection.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod note_store;
pub mod profile_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for preference-store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying database failure.
    Db(DbError),
    /// Store is not usable (missing table, injected fault in fakes).
    Unavailable(String),
    /// Stored text under `key` is present but not decodable.
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Collection could not be encoded for storage.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "preference store unavailable: {message}"),
            Self::Corrupt { key, source } => {
                write!(f, "stored value under key `{key}` is corrupt: {source}")
            }
            Self::Encode(source) => write!(f, "failed to encode collection: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(source) => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
