//! Storage schema definitions and versioning.
//!
//! The tracker persists a small amount of keyed state: the serialized record
//! collection and the theme identifier. Everything lives in one redb table
//! of string keys to string values.
//!
//! # Schema Versioning
//!
//! The schema version is stored under its own key in the state table. When
//! opening an existing database we check the version and fail if it doesn't
//! match. Migration support is out of scope.
//!
//! # Table Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ STATE_TABLE                                               │
//! │   Key: &str                                               │
//! │   Value: &str                                             │
//! │   Entries:                                                │
//! │     "schemaVersion" -> "1"                                │
//! │     "testRecords"   -> compact JSON array of records      │
//! │     "appTheme"      -> theme identifier string            │
//! └──────────────────────────────────────────────────────────┘
//! ```

use redb::TableDefinition;

/// Current schema version.
///
/// Increment this when making breaking changes to the persisted layout.
/// The database will refuse to open if versions don't match.
pub const SCHEMA_VERSION: u32 = 1;

/// The single keyed-state table.
pub const STATE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("state");

/// Key holding the schema version (decimal string).
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// Key holding the serialized record collection (compact JSON array).
///
/// The key name predates this crate: it matches the original tracker's
/// persisted-state key so the layout stays recognizable in backups and dumps.
pub const RECORDS_KEY: &str = "testRecords";

/// Key holding the persisted theme identifier.
pub const THEME_KEY: &str = "appTheme";
