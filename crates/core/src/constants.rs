//! Constants used throughout the medtrack core crate.

/// Heading of the medication section of the context snapshot.
pub const CONTEXT_MEDICATIONS_HEADING: &str = "CURRENT MEDICATIONS:";

/// Heading of the schedule section of the context snapshot.
pub const CONTEXT_SCHEDULE_HEADING: &str = "WEEKLY REMINDER SCHEDULE:";

/// Line rendered when no medicines are recorded.
pub const CONTEXT_NO_MEDICINES: &str = "- None";

/// Line rendered when no reminders are scheduled.
pub const CONTEXT_NO_REMINDERS: &str = "- No reminders set.";

/// Shown in place of an empty interaction list.
pub const NO_INTERACTIONS_SPECIFIED: &str = "None specified";

/// Number of day buckets in the weekly schedule.
pub const DAYS_PER_WEEK: usize = 7;
