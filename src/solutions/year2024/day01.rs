use std::collections::HashMap;

use aoc_framework::parsing::{parse_fields, parse_lines};
use aoc_framework::runner::{TestCase, TestCaseSet, solution_runner};
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use thiserror::Error;

#[solution_runner(
    name = "Day 1: Historian Hysteria",
    parsed = LocationLists,
    part_one = Day01,
    part_two = Day01,
    tests = test_cases()
)]
impl crate::solutions::AdventOfCode<2024, 1> {}

#[derive(Error, Debug)]
#[error("integer overflow while totaling")]
struct Overflow;

/*
Input is two columns of location IDs, one pair per line.

For part 1, pair up the smallest of each list, then the second smallest, and so on. The answer is the
total distance between paired IDs.
*/

struct LocationLists {
    left: Vec<u64>,
    right: Vec<u64>,
}

impl ParseData for LocationLists {
    fn parse(input: &str) -> DynamicResult<Self> {
        let pairs: Vec<[u64; 2]> =
            parse_lines(input, parse_fields::<u64, 2>).collect::<Result<_, _>>()?;
        let (left, right) = pairs.into_iter().map(|[left, right]| (left, right)).unzip();
        Ok(Self { left, right })
    }
}

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = LocationLists;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut left = input.left.clone();
        let mut right = input.right.clone();
        left.sort_unstable();
        right.sort_unstable();

        let total = left
            .iter()
            .zip(&right)
            .map(|(l, r)| l.abs_diff(*r))
            .checked_sum()
            .ok_or(Overflow)?;
        Ok(total)
    }
}

/*
For part 2, each ID in the left list is weighted by how many times it appears in the right list. The
answer is the similarity score, the sum of those weighted IDs.
*/

impl Solution<PartTwo> for Day01 {
    type Input = LocationLists;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut counts: HashMap<u64, u64> = HashMap::new();
        for id in &input.right {
            *counts.entry(*id).or_default() += 1;
        }

        let mut weighted = Vec::with_capacity(input.left.len());
        for id in &input.left {
            let count = counts.get(id).copied().unwrap_or(0);
            weighted.push(id.checked_mul(count).ok_or(Overflow)?);
        }
        let score = weighted.into_iter().checked_sum().ok_or(Overflow)?;
        Ok(score)
    }
}

const EXAMPLE_INPUT: &str = r"3   4
4   3
2   5
1   3
3   9
3   3
";

fn test_cases() -> TestCaseSet<u64, u64> {
    TestCaseSet::new(
        vec![TestCase::new(EXAMPLE_INPUT, 11)],
        vec![TestCase::new(EXAMPLE_INPUT, 31)],
    )
}
