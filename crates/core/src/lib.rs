//! # medtrack core
//!
//! Domain state and derived views for the medication tracker.
//!
//! This crate contains pure in-memory data operations only:
//! - [`MedicationStore`]: medicines, reminders and adherence logs with their mutation rules
//! - [`views`]: stateless projections (weekly schedule, today's adherence, skip counts)
//! - [`context`]: the deterministic text snapshot handed to the AI gateway
//!
//! **No I/O and no API concerns**: HTTP, the AI gateway and process configuration belong in
//! `medtrack-gateway`, `api-rest` and the `medtrack-run` binary.

pub mod clock;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod model;
pub mod store;
pub mod views;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CalendarBasis, CoreConfig};
pub use context::context_snapshot;
pub use error::{CoreError, CoreResult};
pub use model::{
    AdherenceLog, Medicine, MedicineFields, MedicineId, NewReminder, Reminder, ReminderId,
};
pub use store::MedicationStore;
pub use views::{AdherenceState, MedicineCard, WeeklyGrid, WeeklySchedule};

pub use medtrack_types::{
    AdherenceStatus, DayOfWeek, MedicineIcon, NonEmptyText, TimeOfDay, ValueError,
};
pub use medtrack_uuid::{IdGenerator, SequentialIdGenerator, UuidGenerator};
