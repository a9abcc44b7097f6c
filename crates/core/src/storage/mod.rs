//! SQLite-backed local storage for GuestHub

mod kv;
mod local;
mod migrations;
pub(crate) mod parse;
mod snapshot;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

use crate::error::Result;

pub use kv::KvStore;
pub use local::{LocalStorage, StorageEvent, StorageSubscription};
pub use snapshot::{GuestSnapshot, GUESTS_KEY, SESSION_KEY, SNAPSHOT_VERSION};
pub use traits::KeyValueStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        // Several handles may share one file across processes
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        migrations::run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migrations::run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn schema_version(&self) -> Result<u32> {
        migrations::schema_version(&self.conn)
    }

    /// Get the key-value store
    pub fn kv(&self) -> KvStore<'_> {
        KvStore::new(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.kv().get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.kv().set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        self.kv().remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.kv().keys()
    }
}
