// Life position module
// Converts a birthdate and the current instant into a (year, week) cell of the calendar

use crate::error::DateError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Number of week rows in one year of life
pub const WEEKS_PER_YEAR: u32 = 52;

/// Number of year columns in the calendar
pub const YEARS: u32 = 80;

const DAYS_PER_WEEK: i64 = 7;
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Where "now" falls in a person's life, measured in calendar cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifePosition {
    /// Linear week-of-life index of the current week
    pub total_weeks_lived: u32,
    /// Completed years since birth
    pub current_year_of_life: u32,
    /// Weeks since the most recent birthday, in [0, 51]
    pub current_week_of_year: u32,
    /// Progress through the current Monday-based week, in [0, 1)
    pub week_progress: f64,
    pub weeks_until_next_birthday: u32,
}

impl LifePosition {
    /// Compute the position for `birth` as seen at `now`
    pub fn calculate(birth: NaiveDate, now: NaiveDateTime) -> Result<Self, DateError> {
        if now.date() < birth {
            return Err(DateError::BeforeBirth { birth, now });
        }

        let this_year = anniversary(birth, now.year());
        let reached = now >= midnight(this_year);
        let (cycle_start, next_birthday) = if reached {
            (this_year, anniversary(birth, now.year() + 1))
        } else {
            (anniversary(birth, now.year() - 1), this_year)
        };

        let days_since = (now - midnight(cycle_start))
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY);
        // 364 and 365 days past a birthday land on a 53rd week; keep them in the last row.
        let current_week_of_year =
            (days_since / DAYS_PER_WEEK).clamp(0, WEEKS_PER_YEAR as i64 - 1) as u32;

        let years = now.year() - birth.year() - if reached { 0 } else { 1 };
        let current_year_of_life = years.max(0) as u32;

        let seconds_until = (midnight(next_birthday) - now).num_seconds();
        let days_until = ceil_div(seconds_until, SECONDS_PER_DAY);
        let weeks_until_next_birthday = ceil_div(days_until, DAYS_PER_WEEK) as u32;

        let day_fraction = now.num_seconds_from_midnight() as f64 / SECONDS_PER_DAY as f64;
        let week_progress =
            (now.weekday().num_days_from_monday() as f64 + day_fraction) / DAYS_PER_WEEK as f64;

        Ok(Self {
            total_weeks_lived: current_year_of_life * WEEKS_PER_YEAR + current_week_of_year,
            current_year_of_life,
            current_week_of_year,
            week_progress,
            weeks_until_next_birthday,
        })
    }
}

/// Parse a birthdate in `YYYY-MM-DD` form
pub fn parse_birthdate(input: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| DateError::Parse {
        input: input.to_string(),
        source,
    })
}

/// Parse a "now" override: a full timestamp or a bare date meaning midnight
pub fn parse_instant(input: &str) -> Result<NaiveDateTime, DateError> {
    let trimmed = input.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(instant);
        }
    }
    parse_birthdate(trimmed).map(midnight)
}

/// The birthday falling in `year`; Feb 29 birthdays fall on Mar 1 in common years
fn anniversary(birth: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(birth)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1).div_euclid(divisor)
}
