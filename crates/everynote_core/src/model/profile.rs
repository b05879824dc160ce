//! User profile domain model.
//!
//! # Invariants
//! - The profile is a singleton: saves overwrite every field, logout
//!   overwrites every field with empty strings.
//! - `password_hash` holds an Argon2 PHC string or is empty; plaintext
//!   credentials never reach this record.

use serde::{Deserialize, Serialize};

/// Locally stored user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// URI of the profile photo as picked on the device.
    pub photo_url: String,
    pub email: String,
    /// Argon2 PHC hash of the account password; empty when signed out.
    pub password_hash: String,
}

impl UserProfile {
    /// The signed-out profile: every field empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns whether every field is empty (signed-out state).
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.photo_url.is_empty()
            && self.email.is_empty()
            && self.password_hash.is_empty()
    }
}
