//! Storage layer abstractions for PerfTrack.
//!
//! This module provides a trait-based abstraction over the storage engine,
//! allowing different backends to be used (redb for production, an in-memory
//! map for testing and ephemeral sessions).
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      Tracker                            │
//! │                         │                               │
//! │                         ▼                               │
//! │              ┌─────────────────────┐                   │
//! │              │   StorageEngine     │  ← Trait          │
//! │              └─────────────────────┘                   │
//! │                    ▲         ▲                         │
//! │                    │         │                         │
//! │         ┌─────────┴─┐   ┌───┴───────────┐             │
//! │         │RedbStorage│   │ MemoryStorage │             │
//! │         └───────────┘   └───────────────┘             │
//! │           (prod)           (test)                     │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The persistence model is deliberately simple: a handful of keyed string
//! entries, each written as an all-or-nothing replacement. There are no
//! partial writes and no retries.

pub mod memory;
pub mod redb;
pub mod schema;

pub use self::redb::RedbStorage;
pub use memory::MemoryStorage;
pub use schema::{RECORDS_KEY, SCHEMA_VERSION, THEME_KEY};

use std::path::Path;

use crate::error::Result;

/// Storage engine trait for PerfTrack.
///
/// This trait defines the contract that any storage backend must implement.
/// The primary implementation is [`RedbStorage`]; [`MemoryStorage`] backs
/// tests and ephemeral sessions, per the tracker's injected-storage design.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the tracker can be shared
/// across threads. The engine handles internal synchronization.
pub trait StorageEngine: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value wholesale.
    ///
    /// Each call opens and commits its own write transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns the path to the database file, if applicable.
    ///
    /// The in-memory backend has no path.
    fn path(&self) -> Option<&Path>;

    /// Closes the storage engine, flushing any pending writes.
    ///
    /// This method consumes the storage engine. After calling `close()`,
    /// the engine cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend supports reporting flush failures.
    /// Note: the redb backend flushes on drop (infallible), so this always
    /// returns `Ok(())` for [`RedbStorage`].
    fn close(self: Box<Self>) -> Result<()>;
}

/// Opens a storage engine at the given path.
///
/// This is a convenience function that creates a [`RedbStorage`] instance.
/// For more control, use `RedbStorage::open()` directly.
///
/// # Errors
///
/// Returns an error if:
/// - The database file is corrupted
/// - The database is locked by another process
/// - The schema version doesn't match
pub fn open_storage(path: impl AsRef<Path>) -> Result<Box<dyn StorageEngine>> {
    let storage = RedbStorage::open(path)?;
    Ok(Box::new(storage))
}
