//! Configuration types for PerfTrack.
//!
//! The [`Config`] struct controls tracker behavior:
//! - The question total used to derive `skipped` and enforce the write cap
//! - The theme identifier used when no theme has been persisted yet
//! - The per-subscriber event channel capacity
//!
//! # Example
//! ```rust
//! use perftrack::Config;
//!
//! // Use defaults (120 questions, "cosmic-dark" theme)
//! let config = Config::default();
//!
//! // Customize for a shorter exam format
//! let config = Config {
//!     total_questions: 90,
//!     ..Default::default()
//! };
//! ```

use crate::error::ValidationError;

/// Default question total per test: the exam format the tracker was built for.
pub const DEFAULT_TOTAL_QUESTIONS: u32 = 120;

/// Default theme identifier used before the user picks one.
pub const DEFAULT_THEME: &str = "cosmic-dark";

/// Tracker configuration options.
///
/// All fields have sensible defaults. Use struct update syntax to override
/// specific settings:
///
/// ```rust
/// use perftrack::Config;
///
/// let config = Config {
///     event_capacity: 128,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Total questions per test.
    ///
    /// `correct + incorrect` may not exceed this, and `skipped` is derived
    /// as `total_questions - (correct + incorrect)`. Default: 120.
    pub total_questions: u32,

    /// Theme identifier returned before any theme has been persisted.
    pub default_theme: String,

    /// Capacity of each subscriber's event channel.
    ///
    /// Subscribers that fall this far behind miss events rather than
    /// blocking mutations. Default: 32.
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            default_theme: DEFAULT_THEME.to_string(),
            event_capacity: 32,
        }
    }
}

impl Config {
    /// Creates a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// Called automatically by `Tracker::open()`. You can also call this
    /// explicitly to check configuration before attempting to open.
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - `total_questions` is 0
    /// - `event_capacity` is 0
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_questions == 0 {
            return Err(ValidationError::invalid_field(
                "total_questions",
                "must be greater than 0",
            ));
        }

        if self.event_capacity == 0 {
            return Err(ValidationError::invalid_field(
                "event_capacity",
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}
