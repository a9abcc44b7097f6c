//! Key-value storage operations

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;

use super::parse::OptionalExt;
use crate::error::Result;

pub struct KvStore<'a> {
    conn: &'a Connection,
}

impl<'a> KvStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read the value stored under a key
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Write a value, replacing any previous one
    #[instrument(skip(self, value), fields(len = value.len()))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Remove a key; returns whether it existed
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(rows > 0)
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}
