//! In-memory storage backend.
//!
//! [`MemoryStorage`] is a `HashMap`-backed [`StorageEngine`] for tests and
//! ephemeral sessions. Clones share the same underlying map, so a test can
//! keep a handle to inspect (or pre-seed) state after handing a boxed clone
//! to the tracker.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::StorageEngine;
use crate::error::Result;

/// In-memory storage engine.
///
/// # Example
///
/// ```rust
/// use perftrack::storage::{MemoryStorage, StorageEngine};
///
/// let storage = MemoryStorage::new();
/// let inspector = storage.clone(); // shares the same map
///
/// storage.set("appTheme", "deep-ocean").unwrap();
/// assert_eq!(inspector.get("appTheme").unwrap().as_deref(), Some("deep-ocean"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the map, recovering from poisoning.
    ///
    /// The map holds plain strings, so a panic mid-operation can't leave it
    /// logically inconsistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageEngine for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
