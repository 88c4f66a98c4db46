//! Tracker main struct and lifecycle operations.
//!
//! The [`Tracker`] struct is the primary interface for the record store. It
//! provides methods for:
//!
//! - Opening and closing the tracker database
//! - Creating, updating and deleting records
//! - Deriving filtered/sorted views and aggregate statistics
//! - Importing and exporting JSON backups
//! - Reading and persisting the UI theme identifier
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use perftrack::{Tracker, Config, RecordInput};
//!
//! let tracker = Tracker::open("./perf.db", Config::default())?;
//!
//! tracker.create_record(RecordInput {
//!     test_name: "Mock Test 12".into(),
//!     test_type: "Mock".into(),
//!     score: 95.5,
//!     correct: 87,
//!     incorrect: 13,
//!     ..Default::default()
//! })?;
//!
//! tracker.close()?;
//! ```
//!
//! # Mutation discipline
//!
//! Every mutation builds the next collection, persists it, and only then
//! swaps it in. A failed persist therefore leaves memory and storage
//! agreeing on the previous state. The collection is re-sorted descending by
//! id after each mutation, so `records()[0]` is always the newest attempt.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crossbeam_channel::Receiver;
use tracing::{debug, info, instrument, warn};

use crate::backup;
use crate::config::Config;
use crate::error::{NotFoundError, Result, StorageError, TrackerError};
use crate::event::{EventHub, TrackerEvent};
use crate::query::{self, Averages, SortMode, TypeFilter};
use crate::record::{self, RecordInput, TestRecord};
use crate::storage::{open_storage, StorageEngine, RECORDS_KEY, THEME_KEY};
use crate::types::RecordId;

/// The main tracker handle.
///
/// This is the primary interface for all operations. Create an instance with
/// [`Tracker::open()`] (redb-backed) or [`Tracker::open_with_storage()`]
/// (any [`StorageEngine`]), and close it with [`Tracker::close()`].
///
/// # Ownership
///
/// The tracker exclusively owns the canonical in-memory collection and its
/// storage engine. All read APIs return defensive copies; the query engine
/// never sees the live collection.
pub struct Tracker {
    /// Storage engine (redb, or in-memory for testing).
    storage: Box<dyn StorageEngine>,

    /// The canonical record collection, sorted descending by id.
    records: RwLock<Vec<TestRecord>>,

    /// The persisted theme identifier.
    theme: RwLock<String>,

    /// Fan-out hub for notification events.
    events: EventHub,

    /// Configuration used to open this tracker.
    config: Config,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("config", &self.config)
            .field("record_count", &self.record_count())
            .finish_non_exhaustive()
    }
}

impl Tracker {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens or creates a tracker database at the specified path.
    ///
    /// Restores the record collection and theme from storage. Missing,
    /// unreadable or malformed persisted records degrade to an empty
    /// collection (logged, never fatal) — a corrupt history should not brick
    /// the tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration is invalid (see [`Config::validate`])
    /// - The database file is corrupted or locked by another process
    /// - The schema version doesn't match
    #[instrument(skip(config), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        config.validate().map_err(TrackerError::from)?;

        info!("Opening tracker");
        let storage = open_storage(&path)?;

        Self::restore(storage, config)
    }

    /// Opens a tracker over an injected storage engine.
    ///
    /// This is the seam for testing against
    /// [`MemoryStorage`](crate::storage::MemoryStorage) instead of a real
    /// database file, and for hosts that bring their own persistence.
    pub fn open_with_storage(storage: Box<dyn StorageEngine>, config: Config) -> Result<Self> {
        config.validate().map_err(TrackerError::from)?;
        Self::restore(storage, config)
    }

    /// Restores in-memory state from the storage engine.
    fn restore(storage: Box<dyn StorageEngine>, config: Config) -> Result<Self> {
        let mut records = match storage.get(RECORDS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<TestRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!(error = %e, "Stored records are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Could not read stored records, starting empty");
                Vec::new()
            }
        };
        record::sort_newest_first(&mut records);

        let theme = match storage.get(THEME_KEY) {
            Ok(Some(theme)) => theme,
            Ok(None) => config.default_theme.clone(),
            Err(e) => {
                warn!(error = %e, "Could not read stored theme, using default");
                config.default_theme.clone()
            }
        };

        info!(record_count = records.len(), theme = %theme, "Tracker opened");

        Ok(Self {
            storage,
            records: RwLock::new(records),
            theme: RwLock::new(theme),
            events: EventHub::new(config.event_capacity),
            config,
        })
    }

    /// Closes the tracker, flushing pending writes.
    ///
    /// Consumes the tracker; it cannot be used afterward. State is already
    /// persisted after every mutation, so close only flushes the engine.
    #[instrument(skip(self))]
    pub fn close(self) -> Result<()> {
        info!("Closing tracker");
        self.storage.close()
    }

    /// Returns a reference to the tracker configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a subscriber for notification events.
    ///
    /// Each subscriber gets its own bounded channel (capacity from
    /// [`Config::event_capacity`]); subscribers that fall behind miss events
    /// rather than blocking mutations.
    pub fn subscribe(&self) -> Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Record Store: mutations
    // =========================================================================

    /// Creates a record from the given input.
    ///
    /// Validates the question cap, derives `attempted`/`skipped`, assigns a
    /// fresh id (current Unix millis, bumped past the newest existing id on
    /// clock ties), inserts newest-first and persists.
    ///
    /// Publishes [`TrackerEvent::HighScore`] when the new score beats the
    /// previous best and that best was above zero — an empty or all-zero
    /// history never signals.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `correct + incorrect` exceeds the
    /// configured question total; the collection is left unchanged.
    #[instrument(skip(self, input), fields(test_name = %input.test_name))]
    pub fn create_record(&self, input: RecordInput) -> Result<TestRecord> {
        record::validate_input(&input, self.config.total_questions)?;

        let mut next = self.read().clone();

        let mut id = RecordId::now();
        if let Some(newest) = next.first() {
            if id <= newest.id {
                id = newest.id.next();
            }
        }

        // Best score among pre-existing records only; the new record must
        // not count toward its own comparison baseline.
        let previous_best = next
            .iter()
            .map(|r| r.score)
            .fold(f64::NEG_INFINITY, f64::max);

        let created = TestRecord::from_input(id, input, self.config.total_questions);
        next.insert(0, created.clone());
        record::sort_newest_first(&mut next);

        self.persist_and_commit(next)?;

        debug!(id = %created.id, score = created.score, "Record created");

        if previous_best > 0.0 && created.score > previous_best {
            self.events.publish(TrackerEvent::HighScore {
                score: created.score,
                previous_best,
            });
        }

        Ok(created)
    }

    /// Replaces the record with the given id, preserving the id.
    ///
    /// # Errors
    ///
    /// Returns a validation error on a question-cap violation, or a
    /// not-found error if no record has this id. Either way the collection
    /// is left unchanged.
    #[instrument(skip(self, input), fields(id = %id))]
    pub fn update_record(&self, id: RecordId, input: RecordInput) -> Result<TestRecord> {
        record::validate_input(&input, self.config.total_questions)?;

        let mut next = self.read().clone();

        let slot = next
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(NotFoundError::Record(id))?;
        let updated = TestRecord::from_input(id, input, self.config.total_questions);
        *slot = updated.clone();
        record::sort_newest_first(&mut next);

        self.persist_and_commit(next)?;

        debug!(id = %id, "Record updated");
        Ok(updated)
    }

    /// Deletes the record with the given id.
    ///
    /// Returns `Ok(false)` (not an error) when nothing matched; the caller
    /// decides whether "nothing removed" is worth telling the user.
    /// Publishes [`TrackerEvent::RecordDeleted`] on success.
    #[instrument(skip(self), fields(id = %id))]
    pub fn delete_record(&self, id: RecordId) -> Result<bool> {
        let mut next = self.read().clone();

        let before = next.len();
        next.retain(|r| r.id != id);
        if next.len() == before {
            debug!(id = %id, "Delete matched nothing");
            return Ok(false);
        }

        self.persist_and_commit(next)?;

        debug!(id = %id, "Record deleted");
        self.events.publish(TrackerEvent::RecordDeleted { id });
        Ok(true)
    }

    /// Replaces the entire collection (bulk import).
    ///
    /// Individual records are trusted as-is — no question-cap re-validation,
    /// matching the import contract. The collection is re-sorted to keep the
    /// newest-first invariant regardless of the input order.
    ///
    /// Publishes [`TrackerEvent::DataImported`] and returns the new count.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn replace_all(&self, mut records: Vec<TestRecord>) -> Result<usize> {
        record::sort_newest_first(&mut records);
        let count = records.len();

        self.persist_and_commit(records)?;

        info!(count = count, "Collection replaced by import");
        self.events.publish(TrackerEvent::DataImported { count });
        Ok(count)
    }

    // =========================================================================
    // Record Store: reads
    // =========================================================================

    /// Returns a defensive copy of the collection, newest first.
    pub fn records(&self) -> Vec<TestRecord> {
        self.read().clone()
    }

    /// Returns the record with the given id, if any.
    pub fn get_record(&self, id: RecordId) -> Option<TestRecord> {
        self.read().iter().find(|r| r.id == id).cloned()
    }

    /// Returns the number of records in the collection.
    pub fn record_count(&self) -> usize {
        self.read().len()
    }

    // =========================================================================
    // Query conveniences
    // =========================================================================

    /// The history view: current records filtered by type, then sorted.
    ///
    /// Recomputed from a snapshot on every call; see [`crate::query`].
    pub fn filtered_and_sorted(&self, filter: &TypeFilter, mode: SortMode) -> Vec<TestRecord> {
        query::filtered_and_sorted(&self.read(), filter, mode)
    }

    /// Aggregate statistics over the current collection.
    pub fn averages(&self) -> Averages {
        query::averages(&self.read())
    }

    // =========================================================================
    // Backup: import / export
    // =========================================================================

    /// Serializes the full collection as an indented JSON array.
    ///
    /// The output round-trips through [`Tracker::import_snapshot`]
    /// field-for-field.
    pub fn export_snapshot(&self) -> Result<String> {
        backup::export_snapshot(&self.read())
            .map_err(|e| StorageError::serialization(e.to_string()).into())
    }

    /// Parses backup data and replaces the collection wholesale.
    ///
    /// Accepts only a top-level JSON array of record-shaped objects. On any
    /// import error the existing collection is untouched.
    pub fn import_snapshot(&self, data: &str) -> Result<usize> {
        let records = backup::parse_import(data)?;
        self.replace_all(records)
    }

    /// Writes the export snapshot into `dir` under the conventional
    /// date-stamped filename, returning the full path.
    #[instrument(skip(self), fields(dir = %dir.as_ref().display()))]
    pub fn write_backup(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(backup::backup_file_name());
        std::fs::write(&path, self.export_snapshot()?)?;
        info!(path = %path.display(), "Backup written");
        Ok(path)
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Returns the current theme identifier.
    pub fn theme(&self) -> String {
        self.theme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persists a new theme identifier.
    pub fn set_theme(&self, theme: &str) -> Result<()> {
        self.storage.set(THEME_KEY, theme)?;
        *self.theme.write().unwrap_or_else(PoisonError::into_inner) = theme.to_string();
        debug!(theme = theme, "Theme updated");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Persists `next` to storage, then commits it as the canonical
    /// collection. On a persist failure the previous collection stays in
    /// place, keeping memory and storage consistent.
    fn persist_and_commit(&self, next: Vec<TestRecord>) -> Result<()> {
        let raw =
            serde_json::to_string(&next).map_err(|e| StorageError::serialization(e.to_string()))?;
        self.storage.set(RECORDS_KEY, &raw)?;
        *self.write() = next;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<TestRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<TestRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// Tracker is auto Send + Sync: Box<dyn StorageEngine + Send + Sync>, the
// RwLock-guarded collection, the event hub and Config are all Send + Sync.
