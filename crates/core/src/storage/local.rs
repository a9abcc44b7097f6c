//! Shared local storage with change notification
//!
//! Every `LocalStorage` handle cloned with [`LocalStorage::new_tab`] shares
//! the same database but has its own origin. Writes are announced to the
//! subscriptions of every other origin, never to the writer itself.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument};
use uuid::Uuid;

use super::{Database, KeyValueStore};
use crate::error::Result;

/// A key changed through another handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub origin: Uuid,
}

struct Listener {
    origin: Uuid,
    tx: Sender<StorageEvent>,
}

/// Receiving end for storage change events
pub struct StorageSubscription {
    rx: Receiver<StorageEvent>,
}

impl StorageSubscription {
    /// Take every event delivered so far without blocking
    pub fn drain(&self) -> Vec<StorageEvent> {
        self.rx.try_iter().collect()
    }
}

/// Cloneable handle onto the local storage file
#[derive(Clone)]
pub struct LocalStorage {
    db: Arc<Mutex<Database>>,
    listeners: Arc<Mutex<Vec<Listener>>>,
    origin: Uuid,
}

impl LocalStorage {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            origin: Uuid::new_v4(),
        }
    }

    /// Open or create the storage file at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// In-memory storage (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Another handle on the same storage with a fresh origin
    pub fn new_tab(&self) -> Self {
        Self {
            db: self.db.clone(),
            listeners: self.listeners.clone(),
            origin: Uuid::new_v4(),
        }
    }

    pub fn origin(&self) -> Uuid {
        self.origin
    }

    /// Receive events for writes made through other handles
    pub fn subscribe(&self) -> StorageSubscription {
        let (tx, rx) = mpsc::channel();
        self.lock_listeners().push(Listener {
            origin: self.origin,
            tx,
        });
        StorageSubscription { rx }
    }

    fn lock_db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[instrument(skip(self), fields(origin = %self.origin))]
    fn notify(&self, key: &str) {
        let event = StorageEvent {
            key: key.to_string(),
            origin: self.origin,
        };
        let mut listeners = self.lock_listeners();
        // Dropped subscriptions fail to send and are pruned here
        listeners.retain(|l| l.origin == self.origin || l.tx.send(event.clone()).is_ok());
        debug!(listeners = listeners.len(), "Storage change announced");
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.lock_db().kv().get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock_db().kv().set(key, value)?;
        self.notify(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let existed = self.lock_db().kv().remove(key)?;
        if existed {
            self.notify(key);
        }
        Ok(existed)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.lock_db().kv().keys()
    }
}
