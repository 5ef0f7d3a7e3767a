//! Records held by the medication store.
//!
//! Field names serialise in camelCase, matching the shape the AI gateway returns for
//! [`MedicineFields`].

use crate::CoreResult;
use chrono::NaiveDate;
use medtrack_types::{AdherenceStatus, DayOfWeek, MedicineIcon, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Opaque, caller-assigned medicine identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(String);

/// Reminder identifier, allocated by the store.
///
/// Adherence logs may reference reminder ids the store never issued, so this is not
/// validated against any format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(MedicineId);
string_id!(ReminderId);

// ============================================================================
// MEDICINE
// ============================================================================

/// Structured medicine data as returned by an AI lookup.
///
/// Missing fields deserialise as blank rather than failing, so a partial answer still
/// produces a record the user can review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicineFields {
    pub name: String,
    pub description: String,
    pub active_ingredients: Vec<String>,
    pub interactions: Vec<String>,
    pub dosage: String,
}

/// A tracked medicine. Never mutated once added to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub description: String,
    pub active_ingredients: Vec<String>,
    pub interactions: Vec<String>,
    pub dosage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Stored as chosen; `None` is resolved to `pill` only for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MedicineIcon>,
}

impl Medicine {
    /// Combines lookup output with the identifier and icon chosen by the user.
    pub fn from_fields(id: MedicineId, fields: MedicineFields, icon: Option<MedicineIcon>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            active_ingredients: fields.active_ingredients,
            interactions: fields.interactions,
            dosage: fields.dosage,
            image_url: None,
            icon,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn display_icon(&self) -> MedicineIcon {
        MedicineIcon::or_default(self.icon)
    }
}

// ============================================================================
// REMINDER
// ============================================================================

/// A weekly occurrence for taking a medicine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub medicine_id: MedicineId,
    /// Copy of the medicine's name when the reminder was created.
    pub medicine_name: String,
    pub day: DayOfWeek,
    pub time: TimeOfDay,
}

/// Caller-supplied part of a reminder; the store fills in the id and medicine name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub medicine_id: MedicineId,
    pub day: DayOfWeek,
    pub time: TimeOfDay,
}

impl NewReminder {
    pub fn new(medicine_id: impl Into<MedicineId>, day: DayOfWeek, time: TimeOfDay) -> Self {
        Self {
            medicine_id: medicine_id.into(),
            day,
            time,
        }
    }

    /// Builds a reminder request from raw boundary values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Value` if `day` is outside `0..=6` or `time` is not `HH:MM`.
    pub fn parse(medicine_id: impl Into<MedicineId>, day: u8, time: &str) -> CoreResult<Self> {
        Ok(Self::new(
            medicine_id,
            DayOfWeek::from_index(day)?,
            TimeOfDay::parse(time)?,
        ))
    }
}

// ============================================================================
// ADHERENCE
// ============================================================================

/// The taken/skipped decision for one reminder on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceLog {
    pub reminder_id: ReminderId,
    /// Serialised as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub status: AdherenceStatus,
}

impl AdherenceLog {
    pub fn is_for(&self, reminder_id: &ReminderId, date: NaiveDate) -> bool {
        self.reminder_id == *reminder_id && self.date == date
    }
}
