//! Helpers for turning puzzle input text into values, with errors that point back at the text.

use std::str::FromStr;

use thiserror::Error;

use crate::{DynamicError, DynamicResult};

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice, keeping the string in the error.
///
/// # Errors
///
/// Returns a [`ParseContextError`] sourcing [`F::Err`][FromStr::Err] if the string does not parse.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// Zero based, displayed one based.
    line_index: usize,
    source: DynamicError,
}

/// Parse every line of `input` with `parser`.
///
/// # Errors
///
/// Each item is an [`InvalidLine`] error sourcing the parser's error for lines that fail.
pub fn parse_lines<T, F>(input: &str, parser: F) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(&str) -> DynamicResult<T>,
{
    parse_lines_with_offset(input, 0, parser)
}

/// Parse lines with a closure, reporting line numbers shifted by `offset`.
///
/// Useful when `input` is a later slice of the puzzle text and errors should still name the line
/// of the original input.
///
/// # Errors
///
/// Each item is an [`InvalidLine`] error sourcing the parser's error for lines that fail.
pub fn parse_lines_with_offset<T, F>(
    input: &str,
    offset: usize,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(&str) -> DynamicResult<T>,
{
    input.lines().enumerate().map(move |(index, line)| {
        parser(line).map_err(|source| InvalidLine {
            line_index: index.saturating_add(offset),
            source,
        })
    })
}

/// A line did not have the expected number of whitespace separated fields.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("expected {expected} fields, found {found}")]
pub struct FieldCount {
    pub expected: usize,
    pub found: usize,
}

/// Parse exactly `N` whitespace separated values from a line.
///
/// # Errors
///
/// Returns [`FieldCount`] when the line has a different number of fields, or the
/// [`ParseContextError`] of the first field that fails to parse.
pub fn parse_fields<F, const N: usize>(line: &str) -> DynamicResult<[F; N]>
where
    F: FromStr,
    F::Err: std::error::Error + Send + Sync + 'static,
{
    let fields: Vec<F> = line
        .split_whitespace()
        .map(parse_with_context)
        .collect::<Result<_, _>>()?;
    let found = fields.len();
    fields
        .try_into()
        .map_err(|_| FieldCount { expected: N, found }.into())
}
