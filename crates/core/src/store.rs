//! The in-memory medication store.
//!
//! Holds three insertion-ordered collections (medicines, reminders, adherence logs) and the
//! rules for changing them:
//!
//! - medicines are appended as given, with no de-duplication
//! - a reminder is only created for a medicine that exists, and captures that medicine's
//!   name at creation time
//! - adherence is recorded for "today" only, one log per `(reminder, date)`, last write wins
//!
//! Nothing is ever updated in place or deleted. References are only checked when a reminder
//! is created; stale references are tolerated afterwards.
//!
//! The store performs no locking. Callers that share it between tasks wrap it in a mutex so
//! that only one mutation is in flight at a time.

use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::context::context_snapshot;
use crate::model::{AdherenceLog, Medicine, MedicineId, NewReminder, Reminder, ReminderId};
use crate::views::{self, MedicineCard, WeeklyGrid, WeeklySchedule};
use chrono::NaiveDate;
use medtrack_types::AdherenceStatus;
use medtrack_uuid::{IdGenerator, UuidGenerator};
use std::sync::Arc;

pub struct MedicationStore {
    medicines: Vec<Medicine>,
    reminders: Vec<Reminder>,
    adherence_logs: Vec<AdherenceLog>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl MedicationStore {
    /// Creates an empty store reading "today" from `clock` and allocating reminder ids from
    /// `ids`.
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            medicines: Vec::new(),
            reminders: Vec::new(),
            adherence_logs: Vec::new(),
            clock,
            ids,
        }
    }

    /// Creates an empty store on the wall clock described by `cfg`, with random ids.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(Arc::new(cfg.clock()), Arc::new(UuidGenerator))
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Appends a medicine. Two medicines with the same name are distinct entities.
    pub fn add_medicine(&mut self, medicine: Medicine) {
        tracing::debug!(medicine_id = %medicine.id, "adding medicine");
        self.medicines.push(medicine);
    }

    /// Creates a reminder for an existing medicine.
    ///
    /// The reminder receives a fresh id and a copy of the medicine's current name.
    ///
    /// # Returns
    ///
    /// The stored reminder, or `None` if `new_reminder.medicine_id` names no medicine. In that
    /// case nothing is written and nothing is reported.
    pub fn add_reminder(&mut self, new_reminder: NewReminder) -> Option<Reminder> {
        let medicine_name = self.medicine(&new_reminder.medicine_id)?.name.clone();

        let reminder = Reminder {
            id: ReminderId::new(self.ids.next_id()),
            medicine_id: new_reminder.medicine_id,
            medicine_name,
            day: new_reminder.day,
            time: new_reminder.time,
        };
        tracing::debug!(
            reminder_id = %reminder.id,
            medicine_id = %reminder.medicine_id,
            day = %reminder.day,
            time = %reminder.time,
            "adding reminder"
        );
        self.reminders.push(reminder.clone());
        Some(reminder)
    }

    /// Records today's decision for a reminder, replacing any earlier decision for today.
    ///
    /// `reminder_id` is not checked against existing reminders.
    pub fn log_adherence(
        &mut self,
        reminder_id: &ReminderId,
        status: AdherenceStatus,
    ) -> AdherenceLog {
        let today = self.clock.today();
        self.adherence_logs.retain(|log| !log.is_for(reminder_id, today));

        let log = AdherenceLog {
            reminder_id: reminder_id.clone(),
            date: today,
            status,
        };
        tracing::debug!(reminder_id = %reminder_id, %today, %status, "logging adherence");
        self.adherence_logs.push(log.clone());
        log
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn adherence_logs(&self) -> &[AdherenceLog] {
        &self.adherence_logs
    }

    pub fn medicine(&self, id: &MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == *id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn weekly_schedule(&self) -> WeeklySchedule {
        views::weekly_schedule(&self.reminders)
    }

    pub fn skipped_count(&self, medicine_id: &MedicineId) -> usize {
        views::skipped_count(medicine_id, &self.reminders, &self.adherence_logs)
    }

    pub fn medicine_cards(&self) -> Vec<MedicineCard> {
        views::medicine_cards(&self.medicines, &self.reminders, &self.adherence_logs)
    }

    pub fn weekly_grid(&self) -> WeeklyGrid {
        views::weekly_grid(
            &self.medicines,
            &self.reminders,
            &self.adherence_logs,
            self.clock.today(),
        )
    }

    pub fn context_snapshot(&self) -> String {
        context_snapshot(&self.medicines, &self.reminders)
    }
}
