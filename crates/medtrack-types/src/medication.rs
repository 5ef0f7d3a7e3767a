//! Enumerated values attached to medicines and adherence logs.

use crate::ValueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome recorded for a reminder on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdherenceStatus {
    Taken,
    Skipped,
}

impl AdherenceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AdherenceStatus::Taken => "taken",
            AdherenceStatus::Skipped => "skipped",
        }
    }
}

impl FromStr for AdherenceStatus {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "taken" => Ok(AdherenceStatus::Taken),
            "skipped" => Ok(AdherenceStatus::Skipped),
            other => Err(ValueError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for AdherenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display icon chosen for a medicine.
///
/// A medicine may be stored without an icon; [`MedicineIcon::or_default`] applies the `pill`
/// fallback at display time only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicineIcon {
    #[default]
    Pill,
    Tablet,
    Capsule,
    Liquid,
    Inhaler,
}

impl MedicineIcon {
    pub const ALL: [MedicineIcon; 5] = [
        MedicineIcon::Pill,
        MedicineIcon::Tablet,
        MedicineIcon::Capsule,
        MedicineIcon::Liquid,
        MedicineIcon::Inhaler,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MedicineIcon::Pill => "pill",
            MedicineIcon::Tablet => "tablet",
            MedicineIcon::Capsule => "capsule",
            MedicineIcon::Liquid => "liquid",
            MedicineIcon::Inhaler => "inhaler",
        }
    }

    /// Resolves an optional stored icon to the one to display.
    pub fn or_default(icon: Option<MedicineIcon>) -> MedicineIcon {
        icon.unwrap_or_default()
    }
}

impl FromStr for MedicineIcon {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| ValueError::UnknownIcon(s.to_string()))
    }
}

impl fmt::Display for MedicineIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
