//! User profile session holder.
//!
//! # Responsibility
//! - Own the singleton profile for the active session with save, verify
//!   and logout operations.
//! - Hash credentials before anything reaches the store; plaintext
//!   passwords never leave this module.
//!
//! # Invariants
//! - Saves overwrite the whole profile record.
//! - Logout overwrites every field with empty strings, in memory and in
//!   the store.

use crate::model::profile::UserProfile;
use crate::repo::profile_store::ProfileStore;
use crate::repo::StoreError;
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub type ProfileResult<T> = Result<T, ProfileError>;

/// Session error for profile operations.
#[derive(Debug)]
pub enum ProfileError {
    /// Email is non-empty but not shaped like an address.
    InvalidEmail(String),
    /// Password hashing backend failure.
    Hash(argon2::password_hash::Error),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::Hash(err) => write!(f, "password hashing failed: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProfileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ProfileError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Profile fields as collected by the login form.
#[derive(Clone, Default)]
pub struct ProfileInput {
    pub name: String,
    pub photo_url: String,
    pub email: String,
    /// Plaintext password from the form; hashed before storage, empty
    /// means no credentials.
    pub password: String,
}

impl std::fmt::Debug for ProfileInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileInput")
            .field("name", &self.name)
            .field("photo_url", &self.photo_url)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Owner of the session's user profile.
pub struct ProfileSession<S: ProfileStore> {
    store: S,
    profile: UserProfile,
    revision: u64,
}

impl<S: ProfileStore> ProfileSession<S> {
    /// Loads the singleton profile from the injected store.
    pub fn load(store: S) -> ProfileResult<Self> {
        let profile = store.load_profile()?;
        Ok(Self {
            store,
            profile,
            revision: 0,
        })
    }

    /// The current profile snapshot.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Change counter; bumps exactly once per successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether any profile field is set.
    pub fn is_signed_in(&self) -> bool {
        !self.profile.is_empty()
    }

    /// Overwrites the whole profile from form input and persists it.
    ///
    /// A non-empty email must be shaped like an address; a non-empty
    /// password is stored as an Argon2id PHC hash.
    pub fn save(&mut self, input: ProfileInput) -> ProfileResult<()> {
        let email = input.email.trim().to_string();
        if !email.is_empty() && !EMAIL_RE.is_match(&email) {
            return Err(ProfileError::InvalidEmail(email));
        }

        let password_hash = if input.password.is_empty() {
            String::new()
        } else {
            hash_password(&input.password)?
        };

        self.profile = UserProfile {
            name: input.name,
            photo_url: input.photo_url,
            email,
            password_hash,
        };
        self.revision += 1;
        debug!("event=profile_save module=profile");

        if let Err(err) = self.store.save_profile(&self.profile) {
            error!("event=profile_persist module=profile status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }

    /// Checks a candidate password against the stored hash.
    ///
    /// Returns `false` when no credentials are stored or the stored hash
    /// is unparseable.
    pub fn verify_password(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.profile.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }

    /// Signs out: every field becomes the empty string, in memory and in
    /// the store.
    pub fn logout(&mut self) -> ProfileResult<()> {
        self.profile = UserProfile::empty();
        self.revision += 1;
        debug!("event=profile_logout module=profile");

        if let Err(err) = self.store.clear_profile() {
            error!("event=profile_persist module=profile status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }
}

fn hash_password(password: &str) -> ProfileResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(ProfileError::Hash)?;
    Ok(hash.to_string())
}
