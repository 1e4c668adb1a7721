use aoc_framework::parsing::{parse_lines, parse_with_context};
use aoc_framework::runner::{TestCase, TestCaseSet, solution_runner};
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use thiserror::Error;

use crate::checked::CheckedProduct;

#[solution_runner(
    name = "Day 1: Report Repair",
    parsed = ExpenseReport,
    part_one = Day01,
    part_two = Day01,
    tests = test_cases()
)]
impl crate::solutions::AdventOfCode<2020, 1> {}

#[derive(Error, Debug)]
enum Day01Error {
    #[error("no {0} entries sum to 2020")]
    NoMatchingEntries(usize),
    #[error("product of entries overflowed")]
    ProductOverflow,
}

/*
Input is an expense report, one amount per line. The report is fixed by finding the entries that sum
to 2020 and multiplying them together: two entries for part 1, three for part 2.
*/

const TARGET_SUM: u64 = 2020;

struct ExpenseReport {
    entries: Vec<u64>,
}

impl ParseData for ExpenseReport {
    fn parse(input: &str) -> DynamicResult<Self> {
        let entries = parse_lines(input, |line| Ok(parse_with_context::<u64>(line.trim())?))
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }
}

/// Find `count` distinct entries summing to `target`. The first entry of the report is last.
fn find_entries(entries: &[u64], count: usize, target: u64) -> Option<Vec<u64>> {
    if count == 0 {
        return (target == 0).then(Vec::new);
    }
    entries.iter().enumerate().find_map(|(index, &entry)| {
        let remaining = target.checked_sub(entry)?;
        let mut found = find_entries(&entries[index + 1..], count - 1, remaining)?;
        found.push(entry);
        Some(found)
    })
}

fn repair(report: &ExpenseReport, count: usize) -> DynamicResult<u64> {
    let entries = find_entries(&report.entries, count, TARGET_SUM)
        .ok_or(Day01Error::NoMatchingEntries(count))?;
    let product = entries
        .into_iter()
        .checked_product()
        .ok_or(Day01Error::ProductOverflow)?;
    Ok(product)
}

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = ExpenseReport;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        repair(input, 2)
    }
}

impl Solution<PartTwo> for Day01 {
    type Input = ExpenseReport;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        repair(input, 3)
    }
}

const EXAMPLE_INPUT: &str = "1721\n979\n366\n299\n675\n1456";

fn test_cases() -> TestCaseSet<u64, u64> {
    TestCaseSet::new(
        vec![TestCase::new(EXAMPLE_INPUT, 514_579)],
        vec![TestCase::new(EXAMPLE_INPUT, 241_861_950)],
    )
}
