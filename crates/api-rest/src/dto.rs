//! Request and response bodies for the REST API.
//!
//! These mirror the core types in a flat, documented shape for OpenAPI. Enumerations travel
//! as lowercase strings and days as `0..=6` with Sunday as 0.

use chrono::NaiveDate;
use medtrack_core::views::{DayColumn, ReminderCell};
use medtrack_core::{AdherenceLog, Medicine, MedicineCard, MedicineFields, Reminder, WeeklyGrid};
use medtrack_gateway::{ChatMessage, Sender};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

// ============================================================================
// MEDICINES
// ============================================================================

/// Lookup input. When both are given the image wins.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupReq {
    pub drug_name: Option<String>,
    /// Raw base64, or a `data:<mime>;base64,<data>` URL.
    pub image_base64: Option<String>,
    /// Required with `imageBase64` unless it is a data URL.
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicineFieldsRes {
    pub name: String,
    pub description: String,
    pub active_ingredients: Vec<String>,
    pub interactions: Vec<String>,
    pub dosage: String,
}

impl From<MedicineFields> for MedicineFieldsRes {
    fn from(f: MedicineFields) -> Self {
        Self {
            name: f.name,
            description: f.description,
            active_ingredients: f.active_ingredients,
            interactions: f.interactions,
            dosage: f.dosage,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddMedicineReq {
    pub name: String,
    pub description: String,
    pub active_ingredients: Vec<String>,
    pub interactions: Vec<String>,
    pub dosage: String,
    /// One of `pill`, `tablet`, `capsule`, `liquid`, `inhaler`.
    pub icon: Option<String>,
    pub image_url: Option<String>,
}

impl AddMedicineReq {
    pub fn fields(&self) -> MedicineFields {
        MedicineFields {
            name: self.name.clone(),
            description: self.description.clone(),
            active_ingredients: self.active_ingredients.clone(),
            interactions: self.interactions.clone(),
            dosage: self.dosage.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRes {
    pub id: String,
    pub name: String,
    pub description: String,
    pub active_ingredients: Vec<String>,
    pub interactions: Vec<String>,
    pub dosage: String,
    pub image_url: Option<String>,
    pub icon: Option<String>,
}

impl From<Medicine> for MedicineRes {
    fn from(m: Medicine) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            description: m.description,
            active_ingredients: m.active_ingredients,
            interactions: m.interactions,
            dosage: m.dosage,
            image_url: m.image_url,
            icon: m.icon.map(|i| i.as_str().to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineCardRes {
    pub medicine: MedicineRes,
    pub display_icon: String,
    /// All-time skipped doses across this medicine's reminders.
    pub skipped_count: usize,
}

impl From<MedicineCard> for MedicineCardRes {
    fn from(card: MedicineCard) -> Self {
        Self {
            display_icon: card.display_icon.as_str().to_string(),
            skipped_count: card.skipped_count,
            medicine: card.medicine.into(),
        }
    }
}

// ============================================================================
// REMINDERS & SCHEDULE
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddReminderReq {
    pub medicine_id: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day: u8,
    /// `HH:MM`, 24-hour
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRes {
    pub id: String,
    pub medicine_id: String,
    pub medicine_name: String,
    pub day: u8,
    pub day_name: String,
    pub time: String,
}

impl From<Reminder> for ReminderRes {
    fn from(r: Reminder) -> Self {
        Self {
            id: r.id.to_string(),
            medicine_id: r.medicine_id.to_string(),
            medicine_name: r.medicine_name,
            day: r.day.into(),
            day_name: r.day.name().to_string(),
            time: r.time.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCellRes {
    pub reminder: ReminderRes,
    pub display_icon: String,
    /// `undecided`, `taken` or `skipped`; only set in today's column.
    pub today: Option<String>,
}

impl From<ReminderCell> for ReminderCellRes {
    fn from(cell: ReminderCell) -> Self {
        Self {
            display_icon: cell.display_icon.as_str().to_string(),
            today: cell.today.map(|s| s.as_str().to_string()),
            reminder: cell.reminder.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayColumnRes {
    pub day: u8,
    pub name: String,
    pub is_today: bool,
    pub reminders: Vec<ReminderCellRes>,
}

impl From<DayColumn> for DayColumnRes {
    fn from(column: DayColumn) -> Self {
        Self {
            day: column.day.into(),
            name: column.name.to_string(),
            is_today: column.is_today,
            reminders: column.reminders.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduleRes {
    /// `YYYY-MM-DD`
    pub today: String,
    pub days: Vec<DayColumnRes>,
}

impl ScheduleRes {
    pub fn new(today: NaiveDate, grid: WeeklyGrid) -> Self {
        Self {
            today: today.to_string(),
            days: grid.days.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// ADHERENCE
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdherenceReq {
    /// `taken` or `skipped`
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceLogRes {
    pub reminder_id: String,
    pub date: String,
    pub status: String,
}

impl From<AdherenceLog> for AdherenceLogRes {
    fn from(log: AdherenceLog) -> Self {
        Self {
            reminder_id: log.reminder_id.to_string(),
            date: log.date.to_string(),
            status: log.status.as_str().to_string(),
        }
    }
}

// ============================================================================
// CHAT
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageRes {
    /// `user` or `ai`
    pub sender: String,
    pub text: String,
}

impl From<&ChatMessage> for ChatMessageRes {
    fn from(m: &ChatMessage) -> Self {
        let sender = match m.sender {
            Sender::User => "user",
            Sender::Ai => "ai",
        };
        Self {
            sender: sender.to_string(),
            text: m.text.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatSendReq {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatReplyRes {
    pub reply: String,
}
