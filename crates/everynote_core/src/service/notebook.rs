//! Note/category state holder.
//!
//! # Responsibility
//! - Own the authoritative note and category collections for a session.
//! - Mediate insert/delete/update/add-category and write the full
//!   snapshot back through the injected store after each mutation.
//!
//! # Invariants
//! - Each instance has a single logical owner; mutation methods take
//!   `&mut self` and callers serialize access.
//! - A new note is visible to readers before its persistence call
//!   returns; on persistence failure the in-memory mutation is kept and
//!   the error is surfaced.
//! - `revision` strictly increases across successful mutations and is
//!   stable across no-ops.

use crate::model::note::{Note, NoteId, NoteValidationError, DEFAULT_CATEGORY};
use crate::repo::note_store::NoteStore;
use crate::repo::StoreError;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type NotebookResult<T> = Result<T, NotebookError>;

/// State-holder error for note/category operations.
#[derive(Debug)]
pub enum NotebookError {
    Validation(NoteValidationError),
    Store(StoreError),
}

impl Display for NotebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotebookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NotebookError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for NotebookError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owner of the session's note and category collections.
///
/// Readers observe state through [`notes`](Self::notes),
/// [`categories`](Self::categories) and the [`revision`](Self::revision)
/// counter; after each mutation the UI re-reads and the counter tells it
/// whether anything changed.
#[derive(Debug)]
pub struct Notebook<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    categories: Vec<String>,
    revision: u64,
}

impl<S: NoteStore> Notebook<S> {
    /// Loads session state from the injected store.
    ///
    /// An empty stored category list defaults to `["General"]` in memory;
    /// nothing is persisted until the first mutation. Corrupt snapshots
    /// propagate as errors rather than masking as empty collections.
    pub fn load(store: S) -> NotebookResult<Self> {
        let notes = store.load_notes()?;
        let mut categories = store.load_categories()?;
        if categories.is_empty() {
            categories.push(DEFAULT_CATEGORY.to_string());
        }

        Ok(Self {
            store,
            notes,
            categories,
            revision: 0,
        })
    }

    /// All live notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The category list, oldest first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Change counter; bumps exactly once per successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Inserts a new note and returns its assigned id.
    ///
    /// The id is `max(live ids) + 1`, so ids of deleted notes may be
    /// reassigned but never collide with a live note.
    pub fn insert_note(
        &mut self,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> NotebookResult<NoteId> {
        let mut note = Note::new(content, category);
        note.validate()?;
        note.id = self.next_id();

        let id = note.id;
        self.notes.push(note);
        self.revision += 1;
        debug!("event=note_insert module=notebook id={id}");
        self.persist_notes()?;
        Ok(id)
    }

    /// Deletes every note with the given id (expected exactly one).
    ///
    /// Returns `false` without touching storage when no note matched.
    pub fn delete_note(&mut self, id: NoteId) -> NotebookResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            debug!("event=note_delete module=notebook id={id} status=no_match");
            return Ok(false);
        }

        self.revision += 1;
        debug!("event=note_delete module=notebook id={id}");
        self.persist_notes()?;
        Ok(true)
    }

    /// Replaces the note with a matching id by full-record replacement.
    ///
    /// A missing id is a no-op returning `false`; no error is raised.
    pub fn update_note(&mut self, updated: &Note) -> NotebookResult<bool> {
        updated.validate()?;

        let Some(slot) = self.notes.iter_mut().find(|note| note.id == updated.id) else {
            debug!(
                "event=note_update module=notebook id={} status=no_match",
                updated.id
            );
            return Ok(false);
        };

        *slot = updated.clone();
        self.revision += 1;
        debug!("event=note_update module=notebook id={}", updated.id);
        self.persist_notes()?;
        Ok(true)
    }

    /// Appends a category unless it is blank or already present.
    ///
    /// Prior order is preserved; the add is idempotent.
    pub fn add_category(&mut self, name: &str) -> NotebookResult<bool> {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.categories.iter().any(|c| c == trimmed) {
            return Ok(false);
        }

        self.categories.push(trimmed.to_string());
        self.revision += 1;
        debug!("event=category_add module=notebook name={trimmed}");
        if let Err(err) = self.store.save_categories(&self.categories) {
            error!("event=categories_persist module=notebook status=error error={err}");
            return Err(err.into());
        }
        Ok(true)
    }

    /// Notes in `category` whose content contains `search`,
    /// case-insensitively. A blank search matches the whole category.
    pub fn filter_notes(&self, category: &str, search: &str) -> Vec<&Note> {
        let needle = search.trim().to_lowercase();
        self.notes
            .iter()
            .filter(|note| {
                note.category == category
                    && (needle.is_empty() || note.content.to_lowercase().contains(&needle))
            })
            .collect()
    }

    fn next_id(&self) -> NoteId {
        self.notes.iter().map(|note| note.id).max().unwrap_or(0) + 1
    }

    fn persist_notes(&self) -> NotebookResult<()> {
        if let Err(err) = self.store.save_notes(&self.notes) {
            error!("event=notes_persist module=notebook status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }
}
