//! Day counter for the scheduler.
//!
//! The scheduler works in zero-based study days. A study day starts at the
//! configured reset hour, so reviews done shortly after midnight can still
//! count toward the previous day.

use crate::error::{Error, Result};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Calendar date of the study day containing `now`.
///
/// Before `daily_reset_hour` the study day is still the previous date.
pub fn study_date(now: NaiveDateTime, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date()
    } else {
        now.date()
    }
}

/// Zero-based study day number of `now`, counted from `start`.
pub fn study_day(start: NaiveDate, now: NaiveDateTime, daily_reset_hour: u32) -> Result<u64> {
    let day = study_date(now, daily_reset_hour);
    let elapsed = (day - start).num_days();
    u64::try_from(elapsed).map_err(|_| Error::BeforeStart { start, day })
}

/// Study day number for the local wall clock.
pub fn study_day_today(start: NaiveDate, daily_reset_hour: u32) -> Result<u64> {
    study_day(start, Local::now().naive_local(), daily_reset_hour)
}
