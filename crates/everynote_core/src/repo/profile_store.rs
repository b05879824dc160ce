//! User profile store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the singleton user profile as individual named entries in
//!   `user_prefs`.
//!
//! # Invariants
//! - Saves overwrite every field; absent entries read as empty strings.
//! - Clearing writes empty strings rather than deleting rows, matching
//!   logout semantics.

use crate::model::profile::UserProfile;
use crate::repo::note_store::{ensure_table, read_pref, write_pref};
use crate::repo::StoreResult;
use rusqlite::Connection;

const NAME_KEY: &str = "name";
const PHOTO_URL_KEY: &str = "photo_url";
const EMAIL_KEY: &str = "email";
const PASSWORD_HASH_KEY: &str = "password_hash";

/// Store contract for the singleton user profile.
pub trait ProfileStore {
    /// Reads the profile; fields never stored read as empty strings.
    fn load_profile(&self) -> StoreResult<UserProfile>;
    /// Overwrites every profile field.
    fn save_profile(&self, profile: &UserProfile) -> StoreResult<()>;
    /// Overwrites every profile field with the empty string.
    fn clear_profile(&self) -> StoreResult<()>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for &T {
    fn load_profile(&self) -> StoreResult<UserProfile> {
        (**self).load_profile()
    }

    fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        (**self).save_profile(profile)
    }

    fn clear_profile(&self) -> StoreResult<()> {
        (**self).clear_profile()
    }
}

/// SQLite-backed profile store over the `user_prefs` table.
pub struct SqliteProfileStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_table(conn, "user_prefs")?;
        Ok(Self { conn })
    }

    fn read_field(&self, name: &str) -> StoreResult<String> {
        Ok(read_pref(self.conn, "user_prefs", name)?.unwrap_or_default())
    }
}

impl ProfileStore for SqliteProfileStore<'_> {
    fn load_profile(&self) -> StoreResult<UserProfile> {
        Ok(UserProfile {
            name: self.read_field(NAME_KEY)?,
            photo_url: self.read_field(PHOTO_URL_KEY)?,
            email: self.read_field(EMAIL_KEY)?,
            password_hash: self.read_field(PASSWORD_HASH_KEY)?,
        })
    }

    fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        write_pref(self.conn, "user_prefs", NAME_KEY, &profile.name)?;
        write_pref(self.conn, "user_prefs", PHOTO_URL_KEY, &profile.photo_url)?;
        write_pref(self.conn, "user_prefs", EMAIL_KEY, &profile.email)?;
        write_pref(
            self.conn,
            "user_prefs",
            PASSWORD_HASH_KEY,
            &profile.password_hash,
        )?;
        Ok(())
    }

    fn clear_profile(&self) -> StoreResult<()> {
        self.save_profile(&UserProfile::empty())
    }
}
