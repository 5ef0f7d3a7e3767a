//! Validated value types shared across the medtrack workspace.
//!
//! Every value that arrives from outside the core (REST bodies, AI gateway output, config) is
//! parsed into one of these types before it reaches the store, so malformed days, times or
//! statuses can never be stored.

mod medication;
mod schedule;
mod text;

pub use medication::{AdherenceStatus, MedicineIcon};
pub use schedule::{DayOfWeek, TimeOfDay};
pub use text::NonEmptyText;

/// Errors that can occur when constructing validated values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// Day index outside `0..=6`
    #[error("day must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    DayOutOfRange(u8),
    /// Time not in zero-padded 24-hour `HH:MM` form
    #[error("time must be zero-padded 24-hour HH:MM, got '{0}'")]
    InvalidTime(String),
    #[error("status must be 'taken' or 'skipped', got '{0}'")]
    UnknownStatus(String),
    #[error("icon must be one of pill, tablet, capsule, liquid, inhaler, got '{0}'")]
    UnknownIcon(String),
}
