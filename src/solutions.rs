//! Solutions, dispatched by year and day.
//!
//! Steps to make a solution available to run (`aoc new` does all of them):
//! 1. Make a submodule `yearYYYY/dayDD.rs` holding the solution.
//! 2. Have the submodule implement [`AdventOfCode<YEAR, DAY>`] as a [`SolutionRunner`].
//! 3. Declare the submodule in `yearYYYY.rs`, and the year module below `IMPORT YEARS HERE`.
//! 4. List the puzzle below `REGISTER SOLUTIONS HERE`:
//!
//! ```ignore
//! (2024, 3),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, RunOutcome, RunRequest, SolutionRunner};
use thiserror::Error;

// --- IMPORT YEARS HERE ---
mod year2020;
mod year2024;

/// A structure collecting solutions by year and day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day with
/// [`#[solution_runner]`][aoc_framework::runner::solution_runner]:
///
/// ```ignore
/// #[solution_runner(name = "Day 1: Report Repair", part_one = Day01)]
/// impl crate::solutions::AdventOfCode<2020, 1> {}
/// ```
pub struct AdventOfCode<const YEAR: u16, const DAY: u8>;

/// A solution for a puzzle is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {day}, {year}")]
pub struct PuzzleNotAvailable {
    year: u16,
    day: u8,
}

/// Whether a solution for the puzzle is compiled in.
pub fn is_available(year: u16, day: u8) -> bool {
    AVAILABLE.contains(&(year, day))
}

/// Define [`AVAILABLE`] and [`run_puzzle`] from one list of `(year, day)` pairs.
macro_rules! solutions {
    ($(($year:tt, $day:tt)),* $(,)?) => {
        /// Puzzles with a solution, as `(year, day)`.
        pub const AVAILABLE: &[(u16, u8)] = &[$(($year, $day)),*];

        /// Run a solution based on the year and day.
        ///
        /// # Errors
        ///
        /// If the solution for the given puzzle is not available, a [`PuzzleNotAvailable`] error
        /// is returned.
        ///
        /// Any dynamically dispatched error from running the solution is propagated.
        pub fn run_puzzle(
            year: u16,
            day: u8,
            request: &RunRequest,
            handler: &mut dyn OutputHandler,
        ) -> DynamicResult<RunOutcome> {
            match (year, day) {
                $(($year, $day) => AdventOfCode::<$year, $day>::run(request, handler),)*
                _ => Err(PuzzleNotAvailable { year, day }.into()),
            }
        }
    };
}

solutions! {
    // --- REGISTER SOLUTIONS HERE ---
    (2020, 1),
    (2024, 1),
    (2024, 3),
}
