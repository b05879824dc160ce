//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted in the preference store.
//! - Provide write-path validation for user-authored fields.
//!
//! # Invariants
//! - `id` is unique among live notes; `UNASSIGNED_ID` marks a note that
//!   has not yet been inserted.
//! - `timestamp` is the creation instant in epoch milliseconds and does
//!   not change on update.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier assigned to notes at insert time.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// Id value of a note that has not been inserted yet.
pub const UNASSIGNED_ID: NoteId = 0;

/// Fallback category applied when no category list was ever stored.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single user-authored text entry.
///
/// Serialized field names are the wire format of the persisted collection
/// blob and must stay stable across releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique id among live notes, `max(live ids) + 1` at insert.
    pub id: NoteId,
    /// Free-form note text.
    pub content: String,
    /// Free-text grouping label, not a foreign key.
    pub category: String,
    /// Creation instant in epoch milliseconds.
    pub timestamp: i64,
}

/// Validation failure for user-authored note fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyContent,
    EmptyCategory,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content must not be blank"),
            Self::EmptyCategory => write!(f, "note category must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates an unassigned note stamped with the current instant.
    pub fn new(content: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            content: content.into(),
            category: category.into(),
            timestamp: now_epoch_ms(),
        }
    }

    /// Checks user-authored fields before a write path accepts the note.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        if self.category.trim().is_empty() {
            return Err(NoteValidationError::EmptyCategory);
        }
        Ok(())
    }
}

/// Current wall-clock instant in epoch milliseconds.
///
/// Clamps to zero if the system clock reads before the Unix epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
