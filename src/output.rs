//! Terminal output of solution runs.
//!
//! Answers for real input are the only thing written to stdout in input mode. Headers and timings
//! go to stderr, and test runs print their results table to stdout.

use std::fmt::Display;
use std::time::Duration;

use aoc_framework::PartKind;
use aoc_framework::runner::{OutputHandler, TestCaseResult, TestSummary};
use owo_colors::OwoColorize;

const TABLE_TITLE: &str = "TEST RESULTS";
const TABLE_MIN_WIDTH: usize = 80;
const HEADERS: [&str; 4] = ["TEST CASE", "RESULT", "EXPECTED", "PASS"];

pub struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
    /// Rows of the test run in progress.
    rows: Vec<TestCaseResult>,
}

impl CliOutputHandler {
    pub fn new(min_duration: Duration) -> Self {
        Self {
            min_duration,
            rows: Vec::new(),
        }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Format a duration, unless it's missing or shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        eprintln!("{}", format!("= {name} =").bright_black());
    }

    fn parse_start(&mut self) {
        // do nothing
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            eprintln!("Input parsed in {formatted_duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        eprintln!("{}", format!("-- {part} --").bright_black());
    }

    fn part_output(
        &mut self,
        _part: PartKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) {
        println!("{output}");
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            eprintln!("Solved in {formatted_duration}");
        }
    }

    fn test_case(&mut self, _part: PartKind, result: &TestCaseResult) {
        self.rows.push(result.clone());
    }

    fn test_summary(&mut self, part: PartKind, summary: &TestSummary) {
        let rows = std::mem::take(&mut self.rows);
        println!("{}", render_table(&rows));

        let counts = format!(
            "{part}: {} passed, {} failed",
            summary.passed, summary.failed
        );
        if summary.all_passed() {
            println!("{}", counts.green());
        } else {
            println!("{}", counts.red());
        }
    }
}

/// Text of the cells of a row, in column order.
fn cells(row: &TestCaseResult) -> [String; 4] {
    [
        row.index.to_string(),
        row.actual.clone(),
        row.expected.clone(),
        if row.passed { "PASS" } else { "FAIL" }.to_string(),
    ]
}

/// Column widths fitting the headers and every cell, widened to the table's minimum width.
fn column_widths(rows: &[[String; 4]]) -> [usize; 4] {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // columns are joined by " | "
    let total = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    if let Some(shortfall) = TABLE_MIN_WIDTH.checked_sub(total) {
        widths[1] += shortfall / 2;
        widths[2] += shortfall - shortfall / 2;
    }
    widths
}

fn pad(cell: &str, width: usize) -> String {
    format!("{cell:<width$}")
}

/// Render the test results table. Cells are padded before they are colored.
fn render_table(rows: &[TestCaseResult]) -> String {
    let cell_rows: Vec<[String; 4]> = rows.iter().map(cells).collect();
    let widths = column_widths(&cell_rows);
    let total_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

    let mut lines = vec![
        TABLE_TITLE.bold().to_string(),
        HEADERS
            .iter()
            .zip(widths)
            .map(|(header, width)| pad(header, width).bold().to_string())
            .collect::<Vec<_>>()
            .join(" | "),
        "-".repeat(total_width),
    ];

    for (row, cells) in rows.iter().zip(&cell_rows) {
        let [index, actual, expected, pass] = cells;
        let pass = if row.passed {
            pad(pass, widths[3]).green().to_string()
        } else {
            pad(pass, widths[3]).red().to_string()
        };
        lines.push(
            [
                pad(index, widths[0]),
                pad(actual, widths[1]).cyan().to_string(),
                pad(expected, widths[2]).yellow().to_string(),
                pass,
            ]
            .join(" | "),
        );
    }

    lines.join("\n")
}
