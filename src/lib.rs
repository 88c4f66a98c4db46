//! # PerfTrack
//!
//! Embedded, local-first store for personal exam performance records.
//!
//! PerfTrack keeps one user's logged test attempts (score, rank, percentile,
//! accuracy, correct/incorrect/skipped counts) in an embedded key-value store,
//! and derives filtered, sorted and aggregated views over them on demand.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use perftrack::{Tracker, Config, RecordInput};
//!
//! // Open or create the tracker database
//! let tracker = Tracker::open("./perf.db", Config::default())?;
//!
//! // Log a test attempt
//! tracker.create_record(RecordInput {
//!     test_name: "Mock Test 12".into(),
//!     test_type: "Mock".into(),
//!     score: 95.5,
//!     total_score: 300.0,
//!     rank: 42,
//!     total_students: 12000,
//!     percentile: 99.2,
//!     accuracy: 87.0,
//!     correct: 87,
//!     incorrect: 13,
//! })?;
//!
//! // Derive the history view
//! let view = tracker.filtered_and_sorted(&"Mock".into(), perftrack::SortMode::Score);
//! let summary = tracker.averages();
//!
//! // Clean up
//! tracker.close()?;
//! ```
//!
//! ## Key Concepts
//!
//! ### Record
//!
//! A **record** is one logged test attempt. The `attempted` and `skipped`
//! fields are derived at write time from `correct` and `incorrect`; the only
//! enforced rule is that `correct + incorrect` may not exceed the configured
//! question total (120 by default).
//!
//! ### Collection
//!
//! The tracker owns the full record collection in memory, always sorted
//! newest-first (descending by id). Every mutation persists the whole
//! collection back to storage; reads hand out defensive copies.
//!
//! ### Queries
//!
//! The [`query`] module is a set of pure functions: filtering by test type,
//! sorting by recency/score/rank, and aggregate averages. Nothing is cached;
//! views are recomputed from the current collection on every call.
//!
//! ### Events
//!
//! Notable outcomes (a new high score, a deletion, a completed import) are
//! published as [`TrackerEvent`]s on bounded channels. Delivery is
//! best-effort and never blocks or fails a mutation.
//!
//! ## Thread Safety
//!
//! [`Tracker`] is `Send + Sync` and can be shared across threads using `Arc`.
//! The collection sits behind an `RwLock`; the intended usage remains a single
//! logical writer (a UI event loop).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ============================================================================
// Module declarations
// ============================================================================

mod config;
mod db;
mod error;
mod event;
mod types;

pub mod backup;
pub mod query;
pub mod storage;

// Domain modules
mod record;

// ============================================================================
// Public API re-exports
// ============================================================================

// Main tracker interface
pub use db::Tracker;

// Configuration
pub use config::{Config, DEFAULT_THEME, DEFAULT_TOTAL_QUESTIONS};

// Error handling
pub use error::{
    ImportError, NotFoundError, Result, StorageError, TrackerError, ValidationError,
};

// Core types
pub use types::RecordId;

// Domain types
pub use record::{RecordInput, TestRecord};

// Queries
pub use query::{Averages, SortMode, TypeFilter};

// Events
pub use event::TrackerEvent;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common PerfTrack usage.
///
/// ```rust
/// use perftrack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::db::Tracker;
    pub use crate::error::{Result, TrackerError};
    pub use crate::event::TrackerEvent;
    pub use crate::query::{Averages, SortMode, TypeFilter};
    pub use crate::record::{RecordInput, TestRecord};
    pub use crate::types::RecordId;
}
