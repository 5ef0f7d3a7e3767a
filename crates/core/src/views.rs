//! Derived views over the store's collections.
//!
//! Every function here is a pure projection recomputed from the slices it is given. Nothing is
//! cached; state changes are human-paced and the collections are small.

use crate::constants::DAYS_PER_WEEK;
use crate::model::{AdherenceLog, Medicine, MedicineId, Reminder, ReminderId};
use chrono::NaiveDate;
use medtrack_types::{AdherenceStatus, DayOfWeek, MedicineIcon};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::ops::Index;

// ============================================================================
// WEEKLY SCHEDULE
// ============================================================================

/// Reminders partitioned into seven day buckets, each sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Vec<Reminder>; DAYS_PER_WEEK],
}

impl WeeklySchedule {
    /// Days in index order (Sunday first) with their reminders, including empty days.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &[Reminder])> + '_ {
        DayOfWeek::ALL
            .into_iter()
            .map(move |day| (day, self.days[day.index()].as_slice()))
    }
}

impl Index<usize> for WeeklySchedule {
    type Output = [Reminder];

    fn index(&self, index: usize) -> &Self::Output {
        &self.days[index]
    }
}

/// Partitions reminders by day and sorts each day by `HH:MM`.
///
/// The sort is stable, so reminders at the same time keep their insertion order.
pub fn weekly_schedule(reminders: &[Reminder]) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::default();
    for reminder in reminders {
        schedule.days[reminder.day.index()].push(reminder.clone());
    }
    for day in schedule.days.iter_mut() {
        day.sort_by(|a, b| a.time.cmp(&b.time));
    }
    schedule
}

// ============================================================================
// ADHERENCE
// ============================================================================

/// Today's decision for one reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdherenceState {
    Undecided,
    Taken,
    Skipped,
}

impl AdherenceState {
    pub fn as_str(self) -> &'static str {
        match self {
            AdherenceState::Undecided => "undecided",
            AdherenceState::Taken => "taken",
            AdherenceState::Skipped => "skipped",
        }
    }
}

impl From<Option<AdherenceStatus>> for AdherenceState {
    fn from(status: Option<AdherenceStatus>) -> Self {
        match status {
            None => AdherenceState::Undecided,
            Some(AdherenceStatus::Taken) => AdherenceState::Taken,
            Some(AdherenceStatus::Skipped) => AdherenceState::Skipped,
        }
    }
}

/// Looks up the log for `(reminder_id, today)`.
pub fn todays_adherence(
    reminder_id: &ReminderId,
    logs: &[AdherenceLog],
    today: NaiveDate,
) -> AdherenceState {
    logs.iter()
        .find(|log| log.is_for(reminder_id, today))
        .map(|log| log.status)
        .into()
}

/// All-time number of skipped logs for reminders belonging to `medicine_id`.
///
/// Logs whose reminder id matches no reminder are never counted.
pub fn skipped_count(
    medicine_id: &MedicineId,
    reminders: &[Reminder],
    logs: &[AdherenceLog],
) -> usize {
    let reminder_ids: HashSet<&ReminderId> = reminders
        .iter()
        .filter(|r| r.medicine_id == *medicine_id)
        .map(|r| &r.id)
        .collect();

    logs.iter()
        .filter(|log| log.status == AdherenceStatus::Skipped)
        .filter(|log| reminder_ids.contains(&log.reminder_id))
        .count()
}

// ============================================================================
// DISPLAY PROJECTIONS
// ============================================================================

/// A medicine as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineCard {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub display_icon: MedicineIcon,
    pub skipped_count: usize,
}

/// Dashboard cards in medicine insertion order.
pub fn medicine_cards(
    medicines: &[Medicine],
    reminders: &[Reminder],
    logs: &[AdherenceLog],
) -> Vec<MedicineCard> {
    medicines
        .iter()
        .map(|medicine| MedicineCard {
            medicine: medicine.clone(),
            display_icon: medicine.display_icon(),
            skipped_count: skipped_count(&medicine.id, reminders, logs),
        })
        .collect()
}

/// One reminder in the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCell {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub display_icon: MedicineIcon,
    /// Present only in today's column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<AdherenceState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub day: DayOfWeek,
    pub name: &'static str,
    pub is_today: bool,
    pub reminders: Vec<ReminderCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyGrid {
    pub days: Vec<DayColumn>,
}

/// The weekly view: seven columns, with adherence actions resolved for today's column only.
pub fn weekly_grid(
    medicines: &[Medicine],
    reminders: &[Reminder],
    logs: &[AdherenceLog],
    today: NaiveDate,
) -> WeeklyGrid {
    let today_day = DayOfWeek::of_date(today);
    let icons: HashMap<&MedicineId, MedicineIcon> = medicines
        .iter()
        .map(|m| (&m.id, m.display_icon()))
        .collect();

    let schedule = weekly_schedule(reminders);
    let days = schedule
        .iter()
        .map(|(day, day_reminders)| {
            let is_today = day == today_day;
            let cells = day_reminders
                .iter()
                .map(|reminder| ReminderCell {
                    display_icon: icons
                        .get(&reminder.medicine_id)
                        .copied()
                        .unwrap_or_default(),
                    today: is_today.then(|| todays_adherence(&reminder.id, logs, today)),
                    reminder: reminder.clone(),
                })
                .collect();
            DayColumn {
                day,
                name: day.name(),
                is_today,
                reminders: cells,
            }
        })
        .collect();

    WeeklyGrid { days }
}
