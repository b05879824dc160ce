//! Schema migration registry and executor.
//!
//! # Invariants
//! - Registered versions are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version`, so a
//!   database file always names the schema it carries.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(version, batch)` pairs, applied in order inside one transaction.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Latest schema version this binary understands.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings the connection's schema up to [`latest_version`].
///
/// A database stamped with a version newer than this binary supports is
/// rejected rather than partially interpreted.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let applied: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if applied > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: applied,
            latest_supported: latest,
        });
    }
    if applied == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, batch) in MIGRATIONS.iter().filter(|(version, _)| *version > applied) {
        tx.execute_batch(batch)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    Ok(())
}
