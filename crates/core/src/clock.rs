//! The source of "today" for adherence logging and the weekly grid.

use crate::config::CalendarBasis;
use chrono::NaiveDate;
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time, read on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    basis: CalendarBasis,
}

impl SystemClock {
    pub fn new(basis: CalendarBasis) -> Self {
        Self { basis }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.basis {
            CalendarBasis::Utc => chrono::Utc::now().date_naive(),
            CalendarBasis::Local => chrono::Local::now().date_naive(),
        }
    }
}

/// A clock that stays on one date until told otherwise.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        let mut guard = self.date.lock().unwrap_or_else(|p| p.into_inner());
        *guard = date;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_the_date_it_was_given() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let clock = FixedClock::new(date);
        assert_eq!(clock.today(), date);

        let next = date.succ_opt().unwrap();
        clock.set(next);
        assert_eq!(clock.today(), next);
    }

    #[test]
    fn system_clock_utc_matches_chrono() {
        let clock = SystemClock::new(CalendarBasis::Utc);
        let before = chrono::Utc::now().date_naive();
        let today = clock.today();
        let after = chrono::Utc::now().date_naive();
        assert!(today >= before && today <= after);
    }
}
