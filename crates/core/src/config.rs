//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::clock::SystemClock;
use crate::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Which calendar "today" is taken from when logging adherence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalendarBasis {
    /// The UTC calendar date.
    #[default]
    Utc,
    /// The host's local calendar date.
    Local,
}

impl FromStr for CalendarBasis {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(CalendarBasis::Utc),
            "local" => Ok(CalendarBasis::Local),
            other => Err(CoreError::InvalidInput(format!(
                "calendar basis must be 'utc' or 'local', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CalendarBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarBasis::Utc => f.write_str("utc"),
            CalendarBasis::Local => f.write_str("local"),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    calendar_basis: CalendarBasis,
}

impl CoreConfig {
    pub fn new(calendar_basis: CalendarBasis) -> Self {
        Self { calendar_basis }
    }

    pub fn calendar_basis(&self) -> CalendarBasis {
        self.calendar_basis
    }

    /// The wall clock matching this configuration.
    pub fn clock(&self) -> SystemClock {
        SystemClock::new(self.calendar_basis)
    }
}

/// Parse the calendar basis from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`CalendarBasis::Utc`].
pub fn calendar_basis_from_env_value(value: Option<String>) -> CoreResult<CalendarBasis> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<CalendarBasis>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_value_defaults_to_utc() {
        assert_eq!(calendar_basis_from_env_value(None).unwrap(), CalendarBasis::Utc);
        assert_eq!(
            calendar_basis_from_env_value(Some("   ".into())).unwrap(),
            CalendarBasis::Utc
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            calendar_basis_from_env_value(Some("Local".into())).unwrap(),
            CalendarBasis::Local
        );
        assert_eq!(
            calendar_basis_from_env_value(Some(" UTC ".into())).unwrap(),
            CalendarBasis::Utc
        );
    }

    #[test]
    fn rejects_unknown_basis() {
        let err = calendar_basis_from_env_value(Some("mars".into())).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("mars")));
    }
}
