use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::{TestCase, TestCaseSet, solution_runner};
use aoc_framework::{DynamicResult, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::{Captures, Regex};

#[solution_runner(
    name = "Day 3: Mull It Over",
    part_one = Day03,
    part_two = Day03,
    tests = test_cases()
)]
impl crate::solutions::AdventOfCode<2024, 3> {}

/*
Input is corrupted program memory. Only well formed `mul(X,Y)` instructions count; everything else
is noise. Part 1 sums the products of all of them.
*/

const MUL_PATTERN: &str = r"mul\((\d+),(\d+)\)";

/// The product of a `mul` match's two captured operands.
fn product(captures: &Captures<'_>) -> DynamicResult<u64> {
    let operand = |index| -> DynamicResult<u64> {
        let text = captures.get(index).ok_or("missing mul operand")?.as_str();
        Ok(parse_with_context(text)?)
    };
    operand(1)?
        .checked_mul(operand(2)?)
        .ok_or_else(|| "mul overflowed".into())
}

fn sum(products: Vec<u64>) -> DynamicResult<u64> {
    Ok(products
        .into_iter()
        .checked_sum()
        .ok_or("sum of products overflowed")?)
}

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = str;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let re = Regex::new(MUL_PATTERN)?;
        let products = re
            .captures_iter(input)
            .map(|captures| product(&captures))
            .collect::<DynamicResult<Vec<_>>>()?;
        sum(products)
    }
}

/*
For part 2, `do()` and `don't()` switch later `mul` instructions on and off. Instructions start
enabled.
*/

impl Solution<PartTwo> for Day03 {
    type Input = str;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let re = Regex::new(&format!(r"{MUL_PATTERN}|do\(\)|don't\(\)"))?;

        let mut enabled = true;
        let mut products = Vec::new();
        for captures in re.captures_iter(input) {
            match captures.get(0).map(|m| m.as_str()) {
                Some("do()") => enabled = true,
                Some("don't()") => enabled = false,
                _ if enabled => products.push(product(&captures)?),
                _ => {}
            }
        }
        sum(products)
    }
}

fn test_cases() -> TestCaseSet<u64, u64> {
    TestCaseSet::new(
        vec![TestCase::new(
            "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))",
            161,
        )],
        vec![TestCase::new(
            "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))",
            48,
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_malformed_instructions() -> DynamicResult<()> {
        let result = <Day03 as Solution<PartOne>>::solve("mul(4*mul(6,9!?(12,34)mul ( 2 , 4 )")?;
        assert_eq!(result, 0);
        Ok(())
    }

    #[test]
    fn dont_disables_until_do() -> DynamicResult<()> {
        let result =
            <Day03 as Solution<PartTwo>>::solve("don't()mul(2,3)do()mul(4,5)don't()mul(1,1)")?;
        assert_eq!(result, 20);
        Ok(())
    }
}
