//! Error types for PerfTrack.
//!
//! PerfTrack uses a hierarchical error system:
//! - `TrackerError` is the top-level error returned by all public APIs
//! - Specific error types (`StorageError`, `ValidationError`, `ImportError`)
//!   provide detail
//!
//! No operation is retried automatically and no error is fatal: every failure
//! either aborts the single operation (validation, import, not-found) or is
//! recovered locally (malformed persisted state degrades to an empty
//! collection inside [`Tracker::open`](crate::Tracker::open), without
//! surfacing here).

use thiserror::Error;

use crate::types::RecordId;

/// Result type alias for PerfTrack operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Top-level error enum for all PerfTrack operations.
///
/// This is the only error type returned by public APIs.
/// Use pattern matching to handle specific error cases.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Storage layer error (I/O, corruption, transactions).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Requested record not found.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// Import data rejected.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of what's wrong with the configuration.
        reason: String,
    },

    /// General I/O error (backup file writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    /// Creates a configuration error with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a storage error.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if this is an import error.
    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_))
    }
}

/// Storage-related errors.
///
/// These errors indicate problems with the underlying storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database file or data is corrupted.
    #[error("Database corrupted: {0}")]
    Corrupted(String),

    /// Database is locked by another process.
    #[error("Database is locked by another writer")]
    DatabaseLocked,

    /// Transaction failed (commit, rollback, etc.).
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from the redb storage engine.
    #[error("Storage engine error: {0}")]
    Redb(String),

    /// Database schema version doesn't match expected version.
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch {
        /// Expected schema version.
        expected: u32,
        /// Actual schema version found in database.
        found: u32,
    },
}

impl StorageError {
    /// Creates a corruption error with the given message.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Creates a transaction error with the given message.
    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }

    /// Creates a serialization error with the given message.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a redb error with the given message.
    pub fn redb(msg: impl Into<String>) -> Self {
        Self::Redb(msg.into())
    }
}

// Conversions from redb error types
impl From<redb::Error> for StorageError {
    fn from(err: redb::Error) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(format!("Commit failed: {}", err))
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Redb(format!("Table error: {}", err))
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Redb(format!("Storage error: {}", err))
    }
}

// Also allow direct conversion to TrackerError for convenience
impl From<redb::Error> for TrackerError {
    fn from(err: redb::Error) -> Self {
        TrackerError::Storage(StorageError::from(err))
    }
}

impl From<redb::DatabaseError> for TrackerError {
    fn from(err: redb::DatabaseError) -> Self {
        TrackerError::Storage(StorageError::from(err))
    }
}

impl From<redb::TransactionError> for TrackerError {
    fn from(err: redb::TransactionError) -> Self {
        TrackerError::Storage(StorageError::from(err))
    }
}

impl From<redb::CommitError> for TrackerError {
    fn from(err: redb::CommitError) -> Self {
        TrackerError::Storage(StorageError::from(err))
    }
}

impl From<redb::TableError> for TrackerError {
    fn from(err: redb::TableError) -> Self {
        TrackerError::Storage(StorageError::from(err))
    }
}

impl From<redb::StorageError> for TrackerError {
    fn from(err: redb::StorageError) -> Self {
        TrackerError::Storage(StorageError::from(err))
    }
}

/// Validation errors for input data.
///
/// These errors indicate problems with data provided by the caller.
/// The only enforced rule is the question cap; everything else on a record
/// is free-form by design of the data model.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// `correct + incorrect` exceeds the configured question total.
    #[error("Correct + incorrect answers ({attempted}) cannot exceed {max} questions")]
    QuestionCapExceeded {
        /// `correct + incorrect` as provided.
        attempted: u64,
        /// The configured question total.
        max: u32,
    },

    /// A field has an invalid value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the invalid field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },
}

impl ValidationError {
    /// Creates a question cap error.
    pub fn question_cap_exceeded(attempted: u64, max: u32) -> Self {
        Self::QuestionCapExceeded { attempted, max }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Not found errors for record lookups.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// Record with the given id not found.
    #[error("Record not found: {0}")]
    Record(RecordId),
}

impl NotFoundError {
    /// Creates a record not found error.
    pub fn record(id: RecordId) -> Self {
        Self::Record(id)
    }
}

/// Import errors for externally supplied backup data.
///
/// Any import error leaves the existing collection untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Import data is not valid JSON at all.
    #[error("not valid JSON: {0}")]
    InvalidJson(String),

    /// Import data parsed, but the top-level value is not an array.
    #[error("top-level value must be a JSON array")]
    NotAnArray,

    /// An array element is not record-shaped.
    #[error("record at index {index} is malformed: {reason}")]
    MalformedRecord {
        /// Index of the offending element in the imported array.
        index: usize,
        /// Why the element could not be read as a record.
        reason: String,
    },
}
