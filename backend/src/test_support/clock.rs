//! Mutable clock shared by lifecycle and sweep tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use mockable::Clock;

/// Clock whose current instant can be moved forward by tests.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Create a clock pinned to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Create a clock pinned to midnight UTC on `date`.
    ///
    /// # Panics
    /// Panics when the date has no midnight representation, which cannot
    /// happen for valid calendar dates.
    pub fn at_midnight(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(0, 0, 0).expect("valid midnight").and_utc())
    }

    /// Advance the clock by whole days.
    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
