//! Schema migrations for the storage file
//!
//! The applied version lives in SQLite's `user_version` pragma. Each
//! migration runs in its own transaction together with the version bump.

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::Result;

pub struct Migration {
    /// Sequential, starting at 1
    pub version: u32,
    pub description: &'static str,
    pub sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "Local key-value storage",
    sql: r#"
            -- One row per storage key, values are JSON documents
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#,
}];

/// Version the file is currently at (0 for a new file)
pub fn schema_version(conn: &Connection) -> Result<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Apply every migration newer than the file's version
#[instrument(skip(conn))]
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let current = schema_version(conn)?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        // Pragmas take no bound parameters
        tx.execute_batch(&format!("PRAGMA user_version = {}", migration.version))?;
        tx.commit()?;

        info!(
            version = migration.version,
            description = migration.description,
            "Applied migration"
        );
    }

    Ok(())
}
