//! redb storage engine implementation.
//!
//! This module provides the primary storage backend for PerfTrack using
//! [redb](https://docs.rs/redb), a pure Rust embedded key-value store.
//!
//! # Features
//!
//! - ACID transactions with MVCC
//! - Single-writer, multiple-reader concurrency
//! - Automatic crash recovery
//! - Zero external dependencies (pure Rust)
//!
//! # File Layout
//!
//! When you open a database at `./perf.db`, redb creates:
//! - `./perf.db` - Main database file
//! - `./perf.db.lock` - Lock file for writer coordination (may not be visible)

use std::path::{Path, PathBuf};

use ::redb::{Database, ReadableTable, TableError};
use tracing::{debug, info, instrument, warn};

use super::schema::{SCHEMA_VERSION, SCHEMA_VERSION_KEY, STATE_TABLE};
use super::StorageEngine;
use crate::error::{Result, StorageError, TrackerError};

/// redb storage engine wrapper.
///
/// Holds the redb database handle behind the single keyed-state table.
/// It implements [`StorageEngine`] for use with the tracker.
///
/// # Thread Safety
///
/// `RedbStorage` is `Send + Sync`. redb handles internal synchronization
/// using MVCC for readers and exclusive locking for writers.
#[derive(Debug)]
pub struct RedbStorage {
    /// The redb database handle.
    db: Database,

    /// Path to the database file.
    path: PathBuf,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// A new database is initialized with the current schema version; an
    /// existing one has its stored version checked against
    /// [`SCHEMA_VERSION`] and is refused on mismatch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file is corrupted
    /// - The database is locked by another process
    /// - The schema version doesn't match
    #[instrument(fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db_exists = path.exists();

        debug!(db_exists = db_exists, "Opening storage engine");

        // Note: redb doesn't expose a typed error variant for lock conflicts,
        // so we detect them via error message string matching. This may need
        // updating if redb changes its error messages in a future version.
        let db = Database::builder().create(path).map_err(|e| {
            if e.to_string().contains("locked") {
                StorageError::DatabaseLocked
            } else {
                StorageError::Redb(e.to_string())
            }
        })?;

        let storage = Self {
            db,
            path: path.to_path_buf(),
        };

        if db_exists {
            storage.check_schema_version()?;
        } else {
            storage.initialize_schema()?;
        }

        Ok(storage)
    }

    /// Writes the schema version into a fresh database.
    fn initialize_schema(&self) -> Result<()> {
        info!(schema_version = SCHEMA_VERSION, "Initializing new database");

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION.to_string().as_str())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        Ok(())
    }

    /// Validates the stored schema version of an existing database.
    fn check_schema_version(&self) -> Result<()> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;

        let table = match read_txn.open_table(STATE_TABLE) {
            Ok(table) => table,
            // A redb file created by something else entirely: no state table.
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StorageError::corrupted("Missing state table").into());
            }
            Err(e) => return Err(StorageError::from(e).into()),
        };

        let stored = table
            .get(SCHEMA_VERSION_KEY)
            .map_err(StorageError::from)?
            .ok_or_else(|| StorageError::corrupted("Missing schema version entry"))?;

        let found: u32 = stored
            .value()
            .parse()
            .map_err(|_| StorageError::corrupted("Unreadable schema version entry"))?;

        if found != SCHEMA_VERSION {
            warn!(
                expected = SCHEMA_VERSION,
                found = found,
                "Schema version mismatch"
            );
            return Err(TrackerError::Storage(StorageError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found,
            }));
        }

        debug!(schema_version = found, "Opened existing database");
        Ok(())
    }
}

impl StorageEngine for RedbStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;

        let table = match read_txn.open_table(STATE_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(StorageError::from(e).into()),
        };

        let value = table
            .get(key)
            .map_err(StorageError::from)?
            .map(|guard| guard.value().to_string());

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(key = key, bytes = value.len(), "Persisted state entry");
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn close(self: Box<Self>) -> Result<()> {
        // redb flushes durably on drop.
        Ok(())
    }
}
