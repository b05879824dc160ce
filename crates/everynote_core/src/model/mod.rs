//! Domain model for the note-taking core.
//!
//! # Responsibility
//! - Define the canonical data structures shared by persistence and the
//!   session state holders.
//!
//! # Invariants
//! - Note ids are unique within the live collection and assigned only by
//!   the state holder at insert time.
//! - The user profile is a singleton record, overwritten wholesale.

pub mod note;
pub mod profile;
