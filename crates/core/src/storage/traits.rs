//! Storage traits
//!
//! The booking and session stores only see this interface, so the backing
//! store can be the SQLite file, a shared handle, or a test double.

use crate::error::Result;

/// Durable string key-value storage
pub trait KeyValueStore {
    /// Read the value stored under a key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; returns whether it existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// All stored keys
    fn keys(&self) -> Result<Vec<String>>;
}
