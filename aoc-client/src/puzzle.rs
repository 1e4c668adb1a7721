//! The current puzzle and how a command works out which puzzle it is about.

use aoc_framework::PartKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{self, LAST_PUZZLE_DAY};

/// One part of one day's puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleState {
    pub day: u8,
    pub year: u16,
    #[serde(with = "part_number")]
    pub part: PartKind,
}

impl PuzzleState {
    #[must_use]
    pub fn new(day: u8, year: u16, part: PartKind) -> Self {
        Self { day, year, part }
    }
}

/// Serializes a [`PartKind`] as its number, `1` or `2`.
mod part_number {
    use aoc_framework::PartKind;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(part: &PartKind, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(part.number())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PartKind, D::Error> {
        let number = u8::deserialize(deserializer)?;
        PartKind::try_from(number).map_err(D::Error::custom)
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub day: Option<u8>,
    pub year: Option<u16>,
    pub part: Option<PartKind>,
    /// Ask for the puzzle after today's.
    pub next: bool,
}

/// Something the user should hear about a resolution that still succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Outside December the year defaults to the last finished event.
    PreviousYear(u16),
}

/// A resolved puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub puzzle: PuzzleState,
    pub notice: Option<Notice>,
}

/// The options given don't determine a puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("'day' is required if it's not December! Only {days_until_december} days more to go!")]
    DayRequired { days_until_december: i64 },

    #[error("day {0} is out of range: puzzles run from day 1 to day 25")]
    DayOutOfRange(u8),
}

fn checked(resolution: Resolution) -> Result<Resolution, ResolveError> {
    let day = resolution.puzzle.day;
    if (1..=LAST_PUZZLE_DAY).contains(&day) {
        Ok(resolution)
    } else {
        Err(ResolveError::DayOutOfRange(day))
    }
}

/// Work out the puzzle a command is about.
///
/// With a `current` puzzle, explicit values replace its fields and nothing else changes.
/// Otherwise the puzzle is built from the explicit values and `today`:
///
/// - part defaults to 1;
/// - outside December, `next` means day 1 of this year's event, and a missing day is an error;
/// - in December, `next` means tomorrow;
/// - day defaults to today, year to this year, or last year outside December.
///
/// # Errors
///
/// [`ResolveError::DayRequired`] outside December without a day, and
/// [`ResolveError::DayOutOfRange`] if the resolved day has no puzzle.
pub fn resolve(
    current: Option<PuzzleState>,
    overrides: Overrides,
    today: NaiveDate,
) -> Result<Resolution, ResolveError> {
    if let Some(mut puzzle) = current {
        if let Some(day) = overrides.day {
            puzzle.day = day;
        }
        if let Some(year) = overrides.year {
            puzzle.year = year;
        }
        if let Some(part) = overrides.part {
            puzzle.part = part;
        }
        return checked(Resolution {
            puzzle,
            notice: None,
        });
    }

    let part = overrides.part.unwrap_or(PartKind::One);
    let this_year = calendar::puzzle_year(today);
    let december = calendar::is_december(today);

    if !december {
        if overrides.next {
            return checked(Resolution {
                puzzle: PuzzleState::new(1, this_year, part),
                notice: None,
            });
        }
        if overrides.day.is_none() {
            return Err(ResolveError::DayRequired {
                days_until_december: calendar::days_until_december(today),
            });
        }
    }

    if overrides.next {
        let tomorrow = calendar::day_of_month(today).saturating_add(1);
        return checked(Resolution {
            puzzle: PuzzleState::new(tomorrow, this_year, part),
            notice: None,
        });
    }

    let day = overrides
        .day
        .unwrap_or_else(|| calendar::day_of_month(today));
    let (year, notice) = match overrides.year {
        Some(year) => (year, None),
        None if december => (this_year, None),
        None => {
            let last_year = this_year.saturating_sub(1);
            (last_year, Some(Notice::PreviousYear(last_year)))
        }
    };

    checked(Resolution {
        puzzle: PuzzleState::new(day, year, part),
        notice,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    fn resolved(puzzle: PuzzleState) -> Result<Resolution, ResolveError> {
        Ok(Resolution {
            puzzle,
            notice: None,
        })
    }

    #[test]
    fn explicit_values_win_over_everything() {
        let overrides = Overrides {
            day: Some(7),
            year: Some(2017),
            part: Some(PartKind::Two),
            next: false,
        };
        let expected = PuzzleState::new(7, 2017, PartKind::Two);
        let current = PuzzleState::new(3, 2024, PartKind::One);

        for today in [date(2024, 7, 4), date(2024, 12, 10)] {
            for current in [None, Some(current)] {
                let resolution = resolve(current, overrides, today).map(|r| r.puzzle);
                assert_eq!(resolution, Ok(expected));
            }
        }
    }

    #[test]
    fn current_puzzle_keeps_fields_without_overrides() {
        let current = PuzzleState::new(3, 2024, PartKind::Two);
        let overrides = Overrides {
            day: Some(4),
            ..Overrides::default()
        };

        assert_eq!(
            resolve(Some(current), overrides, date(2025, 7, 4)),
            resolved(PuzzleState::new(4, 2024, PartKind::Two))
        );
    }

    #[test]
    fn current_puzzle_ignores_next() {
        let current = PuzzleState::new(3, 2024, PartKind::One);
        let overrides = Overrides {
            next: true,
            ..Overrides::default()
        };

        assert_eq!(
            resolve(Some(current), overrides, date(2024, 12, 10)),
            resolved(current)
        );
    }

    #[test]
    fn missing_day_outside_december_is_an_error() {
        assert_eq!(
            resolve(None, Overrides::default(), date(2024, 7, 4)),
            Err(ResolveError::DayRequired {
                days_until_december: 150
            })
        );
    }

    #[test]
    fn next_outside_december_is_day_one_of_this_year() {
        let overrides = Overrides {
            next: true,
            ..Overrides::default()
        };

        assert_eq!(
            resolve(None, overrides, date(2024, 11, 20)),
            resolved(PuzzleState::new(1, 2024, PartKind::One))
        );
    }

    #[test]
    fn next_in_december_is_tomorrow() {
        let overrides = Overrides {
            next: true,
            part: Some(PartKind::Two),
            ..Overrides::default()
        };

        assert_eq!(
            resolve(None, overrides, date(2024, 12, 9)),
            resolved(PuzzleState::new(10, 2024, PartKind::Two))
        );
    }

    #[test]
    fn next_after_the_last_day_is_out_of_range() {
        let overrides = Overrides {
            next: true,
            ..Overrides::default()
        };

        assert_eq!(
            resolve(None, overrides, date(2024, 12, 25)),
            Err(ResolveError::DayOutOfRange(26))
        );
    }

    #[test]
    fn defaults_to_today_in_december() {
        assert_eq!(
            resolve(None, Overrides::default(), date(2023, 12, 5)),
            resolved(PuzzleState::new(5, 2023, PartKind::One))
        );
    }

    #[test]
    fn defaults_to_last_year_outside_december() {
        let overrides = Overrides {
            day: Some(12),
            ..Overrides::default()
        };

        assert_eq!(
            resolve(None, overrides, date(2025, 3, 1)),
            Ok(Resolution {
                puzzle: PuzzleState::new(12, 2024, PartKind::One),
                notice: Some(Notice::PreviousYear(2024)),
            })
        );
    }

    #[test]
    fn explicit_day_out_of_range_is_rejected() {
        let overrides = Overrides {
            day: Some(0),
            year: Some(2020),
            ..Overrides::default()
        };

        assert_eq!(
            resolve(None, overrides, date(2024, 12, 1)),
            Err(ResolveError::DayOutOfRange(0))
        );
    }

    #[test]
    fn serializes_part_as_number() -> Result<(), serde_json::Error> {
        let puzzle = PuzzleState::new(1, 2020, PartKind::Two);
        let json = serde_json::to_string(&puzzle)?;
        assert_eq!(json, r#"{"day":1,"year":2020,"part":2}"#);
        assert_eq!(serde_json::from_str::<PuzzleState>(&json)?, puzzle);
        Ok(())
    }

    #[test]
    fn rejects_unknown_part_number() {
        let result = serde_json::from_str::<PuzzleState>(r#"{"day":1,"year":2020,"part":3}"#);
        assert!(result.is_err());
    }
}
