//! Framework of traits and a run/test harness for Advent of Code solutions.
//!
//! # Quick Start
//!
//! 1. Optionally define an input type and implement [`ParseData`]:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData};
//! #
//! struct Expenses(Vec<u32>);
//!
//! impl ParseData for Expenses {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let values = input
//!             .lines()
//!             .map(str::parse)
//!             .collect::<Result<Vec<_>, _>>()?;
//!         Ok(Self(values))
//!     }
//! }
//! ```
//!
//! 2. Implement [`Solution`] for each part:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData, PartOne, Solution};
//! #
//! # struct Expenses(Vec<u32>);
//! # impl ParseData for Expenses {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().map(str::parse).collect::<Result<Vec<_>, _>>()?))
//! #     }
//! # }
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = Expenses;
//!     type Output = u32;
//!
//!     fn solve(input: &Expenses) -> DynamicResult<u32> {
//!         Ok(input.0.iter().sum())
//!     }
//! }
//! ```
//!
//! 3. Wire the parts and their example fixtures into the [`runner`] harness with
//!    [`#[solution_runner]`][runner::solution_runner].
//!
//! # Output types
//!
//! [`Solution::Output`] is compared against fixture expectations with [`PartialEq`], so the
//! comparison is exact and typed: a solution returning `u64` is only ever checked against `u64`
//! fixtures, never against text that happens to print the same.
//!
//! ```
//! use aoc_framework::{DynamicResult, PartTwo, Solution};
//!
//! struct Day05;
//!
//! impl Solution<PartTwo> for Day05 {
//!     type Input = str;
//!     type Output = String;
//!
//!     fn solve(input: &str) -> DynamicResult<String> {
//!         Ok(input.lines().filter_map(|line| line.chars().next()).collect())
//!     }
//! }
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::{Debug, Display};

use thiserror::Error;

pub mod parsing;
pub mod runner;

mod private {
    /// Sealed marker, keeping [`Part`][super::Part] limited to the two parts of a puzzle.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// An enum to identify a solution part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    One,
    Two,
}

impl PartKind {
    /// The part's number as used by the puzzle site, `1` or `2`.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Part {}", self.number())
    }
}

/// A part number other than `1` or `2`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid part {0}: expected 1 or 2")]
pub struct InvalidPart(pub u8);

impl TryFrom<u8> for PartKind {
    type Error = InvalidPart;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(InvalidPart(other)),
        }
    }
}

impl From<PartKind> for u8 {
    fn from(part: PartKind) -> Self {
        part.number()
    }
}

/// A marker trait used to identify a part for a solution.
///
/// Types implementing this trait are used as generic parameters to [`Solution<P>`] to indicate
/// which part the solution implements.
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Indicates a [`Solution`] implements part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Indicates a [`Solution`] implements part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solution solving one [`Part`] of a puzzle.
///
/// It is expected solutions implement for the marker structs [`PartOne`] or [`PartTwo`].
pub trait Solution<P: Part> {
    /// The input data type passed to the solution.
    ///
    /// For direct string input, set to `str`. Otherwise set to a type implementing
    /// [`ParseData`].
    type Input: ?Sized;

    /// The answer type.
    ///
    /// Answers are printed with [`Display`] and checked against test fixtures with [`PartialEq`].
    type Output: Display + Debug + PartialEq;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// A solution can encounter varying errors while solving, like invalid input or a logical
    /// error. It is returned as a dynamically dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A trait for data structures that are created by parsing string input.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_numbers_convert_both_ways() -> Result<(), InvalidPart> {
        assert_eq!(PartKind::try_from(1)?, PartKind::One);
        assert_eq!(PartKind::try_from(2)?, PartKind::Two);
        assert_eq!(u8::from(PartKind::Two), 2);
        Ok(())
    }

    #[test]
    fn part_number_outside_range_is_rejected() {
        assert_eq!(PartKind::try_from(3), Err(InvalidPart(3)));
        assert_eq!(PartKind::try_from(0), Err(InvalidPart(0)));
    }

    #[test]
    fn part_displays_with_number() {
        assert_eq!(PartKind::One.to_string(), "Part 1");
        assert_eq!(PartKind::Two.to_string(), "Part 2");
    }
}
