//! Text snapshot of the store used to ground the AI chat assistant.
//!
//! The rendering is deterministic: identical collections always produce identical text.

use crate::constants::{
    CONTEXT_MEDICATIONS_HEADING, CONTEXT_NO_MEDICINES, CONTEXT_NO_REMINDERS,
    CONTEXT_SCHEDULE_HEADING, NO_INTERACTIONS_SPECIFIED,
};
use crate::model::{Medicine, Reminder};
use crate::views::weekly_schedule;

/// Renders the current medicines and the weekly reminder table.
///
/// Medicines appear in insertion order. The schedule lists only days that have reminders,
/// Sunday first, each day's entries ascending by time. Every line ends with `\n`.
pub fn context_snapshot(medicines: &[Medicine], reminders: &[Reminder]) -> String {
    let mut context = format!("{CONTEXT_MEDICATIONS_HEADING}\n");
    if medicines.is_empty() {
        context.push_str(CONTEXT_NO_MEDICINES);
        context.push('\n');
    } else {
        for medicine in medicines {
            context.push_str(&medicine_line(medicine));
        }
    }

    context.push('\n');
    context.push_str(CONTEXT_SCHEDULE_HEADING);
    context.push('\n');
    if reminders.is_empty() {
        context.push_str(CONTEXT_NO_REMINDERS);
        context.push('\n');
    } else {
        for (day, day_reminders) in weekly_schedule(reminders).iter() {
            if day_reminders.is_empty() {
                continue;
            }
            context.push_str(&format!("{}:\n", day.name()));
            for reminder in day_reminders {
                context.push_str(&format!(
                    "  - {}: Take {}\n",
                    reminder.time, reminder.medicine_name
                ));
            }
        }
    }

    context
}

fn medicine_line(medicine: &Medicine) -> String {
    let joined = medicine.interactions.join(", ");
    let interactions = if joined.is_empty() {
        NO_INTERACTIONS_SPECIFIED
    } else {
        joined.as_str()
    };
    format!(
        "- {}: Dosage is \"{}\". Key interactions to avoid: {}.\n",
        medicine.name, medicine.dosage, interactions
    )
}
