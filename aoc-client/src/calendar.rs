//! Date questions asked when resolving a puzzle, answered for a given day.
//!
//! Callers pass today's date in, so resolution stays a pure function of its arguments.

use chrono::{Datelike, Local, NaiveDate};

/// The last day of an event that has a puzzle.
pub const LAST_PUZZLE_DAY: u8 = 25;

/// Today's date in the local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether the date falls inside the event month.
#[must_use]
pub fn is_december(date: NaiveDate) -> bool {
    date.month() == 12
}

/// Days left until the first of December of the date's year, `0` during December.
///
/// Counts calendar days, so November 30th is one day away whatever the time of day.
#[must_use]
pub fn days_until_december(date: NaiveDate) -> i64 {
    if is_december(date) {
        return 0;
    }
    NaiveDate::from_ymd_opt(date.year(), 12, 1)
        .map_or(0, |first| first.signed_duration_since(date).num_days())
}

/// The date's year as a puzzle year.
///
/// Years before the common era or past `u16::MAX` saturate; no puzzle exists for either.
#[must_use]
pub fn puzzle_year(date: NaiveDate) -> u16 {
    u16::try_from(date.year().max(0)).unwrap_or(u16::MAX)
}

/// The date's day of the month.
#[must_use]
pub fn day_of_month(date: NaiveDate) -> u8 {
    // day() is at most 31
    u8::try_from(date.day()).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    #[test]
    fn counts_days_until_december() {
        assert_eq!(days_until_december(date(2024, 11, 30)), 1);
        assert_eq!(days_until_december(date(2024, 1, 1)), 335);
        assert_eq!(days_until_december(date(2024, 7, 4)), 150);
        assert_eq!(days_until_december(date(2024, 12, 3)), 0);
    }

    #[test]
    fn december_is_the_event_month() {
        assert!(is_december(date(2023, 12, 1)));
        assert!(!is_december(date(2023, 11, 30)));
    }

    #[test]
    fn converts_date_parts() {
        assert_eq!(puzzle_year(date(2022, 5, 9)), 2022);
        assert_eq!(day_of_month(date(2022, 5, 9)), 9);
    }
}
