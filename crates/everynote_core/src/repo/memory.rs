//! In-process store fakes for tests and tooling.
//!
//! These back the same contracts as the SQLite stores with mutex-guarded
//! state, so state-holder behavior can be exercised without a database.
//! A fault flag lets tests observe the persist-failure policy.

use crate::model::note::Note;
use crate::model::profile::UserProfile;
use crate::repo::note_store::NoteStore;
use crate::repo::profile_store::ProfileStore;
use crate::repo::{StoreError, StoreResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct NotesState {
    notes: Vec<Note>,
    categories: Vec<String>,
    fail_saves: bool,
}

/// Memory-backed note/category store.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    state: Mutex<NotesState>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the stored snapshots, as if a prior session had saved them.
    pub fn with_contents(notes: Vec<Note>, categories: Vec<String>) -> Self {
        Self {
            state: Mutex::new(NotesState {
                notes,
                categories,
                fail_saves: false,
            }),
        }
    }

    /// Makes every subsequent save fail with `StoreError::Unavailable`.
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> MutexGuard<'_, NotesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteStore for MemoryNoteStore {
    fn load_notes(&self) -> StoreResult<Vec<Note>> {
        Ok(self.lock().notes.clone())
    }

    fn save_notes(&self, notes: &[Note]) -> StoreResult<()> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(StoreError::Unavailable("injected save fault".to_string()));
        }
        state.notes = notes.to_vec();
        Ok(())
    }

    fn load_categories(&self) -> StoreResult<Vec<String>> {
        Ok(self.lock().categories.clone())
    }

    fn save_categories(&self, categories: &[String]) -> StoreResult<()> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(StoreError::Unavailable("injected save fault".to_string()));
        }
        state.categories = categories.to_vec();
        Ok(())
    }
}

/// Memory-backed profile store.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profile: Mutex<UserProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UserProfile> {
        self.profile.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load_profile(&self) -> StoreResult<UserProfile> {
        Ok(self.lock().clone())
    }

    fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        *self.lock() = profile.clone();
        Ok(())
    }

    fn clear_profile(&self) -> StoreResult<()> {
        *self.lock() = UserProfile::empty();
        Ok(())
    }
}
