// Quote selection module
// Picks the week's quote and attribution from the configured lists

use crate::life::LifePosition;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;

const SECONDS_PER_WEEK: i64 = 7 * 24 * 60 * 60;

/// Index of the anchor quote shown at the start of a calendar year or life year
pub const ANCHOR_QUOTE: usize = 0;

/// 1-based week of the calendar year: ceil(time since Jan 1 / 7 days)
pub fn calendar_week(now: NaiveDateTime) -> u32 {
    let jan_first = NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .unwrap_or(now);
    let elapsed = (now - jan_first).num_seconds();
    let week = (elapsed + SECONDS_PER_WEEK - 1).div_euclid(SECONDS_PER_WEEK);
    // Midnight on Jan 1 counts as the first week rather than week zero.
    week.max(1) as u32
}

/// Index into the quote list for this render
pub fn select_index(calendar_week: u32, position: &LifePosition, quote_count: usize) -> usize {
    if quote_count == 0 {
        return ANCHOR_QUOTE;
    }
    if calendar_week == 1 {
        debug!("Using anchor quote: first week of the calendar year");
        return ANCHOR_QUOTE;
    }
    if position.current_week_of_year == 0 {
        debug!("Using anchor quote: first week after a birthday");
        return ANCHOR_QUOTE;
    }
    let index = (calendar_week as usize - 1) % quote_count;
    debug!("Using quote #{} for calendar week {}", index + 1, calendar_week);
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::{parse_birthdate, parse_instant};

    fn position(birth: &str, now: &str) -> LifePosition {
        let birth = parse_birthdate(birth).unwrap();
        LifePosition::calculate(birth, parse_instant(now).unwrap()).unwrap()
    }

    #[test]
    fn calendar_week_counts_partial_weeks_up() {
        assert_eq!(calendar_week(parse_instant("2024-01-01").unwrap()), 1);
        assert_eq!(calendar_week(parse_instant("2024-01-01T09:00:00").unwrap()), 1);
        assert_eq!(calendar_week(parse_instant("2024-01-08").unwrap()), 1);
        assert_eq!(calendar_week(parse_instant("2024-01-08T00:00:01").unwrap()), 2);
        assert_eq!(calendar_week(parse_instant("2024-12-31T12:00:00").unwrap()), 53);
    }

    #[test]
    fn birthday_week_forces_anchor_quote() {
        let now = "2024-06-15";
        let pos = position("1990-06-15", now);
        let week = calendar_week(parse_instant(now).unwrap());
        assert!(week > 1);
        assert_eq!(select_index(week, &pos, 10), ANCHOR_QUOTE);
    }

    #[test]
    fn first_calendar_week_forces_anchor_quote() {
        let pos = position("1990-06-15", "2024-01-03");
        assert_ne!(pos.current_week_of_year, 0);
        assert_eq!(select_index(1, &pos, 10), ANCHOR_QUOTE);
    }

    #[test]
    fn other_weeks_cycle_through_quotes() {
        let pos = position("1990-06-15", "2024-03-20");
        assert_eq!(select_index(2, &pos, 10), 1);
        assert_eq!(select_index(10, &pos, 10), 9);
        assert_eq!(select_index(11, &pos, 10), 0);
        assert_eq!(select_index(14, &pos, 4), 1);
        assert_eq!(select_index(30, &pos, 1), 0);
    }
}
