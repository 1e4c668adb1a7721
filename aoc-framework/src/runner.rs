//! The harness that runs a solution part against real input or against its example fixtures.
//!
//! # Quick Start
//!
//! A structure or impl-block can be annotated with the [`#[solution_runner]`][solution_runner]
//! attribute macro, naming the solution types and the fixtures to test them with:
//!
//! ```
//! # use aoc_framework::runner::{TestCase, TestCaseSet, solution_runner};
//! # use aoc_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(input.lines().count())
//! #    }
//! }
//!
//! fn test_cases() -> TestCaseSet<usize, std::convert::Infallible> {
//!     TestCaseSet::part_one_only(vec![TestCase::new("a\nb", 2)])
//! }
//!
//! #[solution_runner(name = "Day 1", part_one = Day01, tests = test_cases())]
//! struct Day01Runner;
//! ```
//!
//! # Modes
//!
//! A [`RunRequest`] selects one part and a [`RunMode`]:
//!
//! - [`RunMode::Input`] reads the input file, trims surrounding whitespace and solves it once.
//! - [`RunMode::Test`] solves every fixture of the part, in order, and reports each as a
//!   [`TestCaseResult`]. A fixture that fails is reported, never raised.

use std::convert::Infallible;
use std::fmt::{Debug, Display};
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use aoc_framework_macros::solution_runner;

/// Errors raised by the harness itself, as opposed to errors from solutions.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The real input file could not be read.
    #[error("could not read input file at: {}", .path.display())]
    MissingInput { path: PathBuf, source: io::Error },

    /// The selected part has no solution.
    #[error("{0} is not implemented for this solution")]
    PartNotImplemented(PartKind),
}

/// A trait for an output events handler.
///
/// Running a solution leads to events output through a handler as feedback and logging.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of running the solution.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished, with the duration taken if timed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts on real input.
    fn part_start(&mut self, part: PartKind);

    /// Called with the answer for real input, with the duration taken to solve if timed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);

    /// Called after each fixture of a test run.
    fn test_case(&mut self, part: PartKind, result: &TestCaseResult);

    /// Called once all fixtures of a test run are done.
    fn test_summary(&mut self, part: PartKind, summary: &TestSummary);
}

/// Measure the duration of an expression.
///
/// Returns a tuple of the expression's result and the elapsed [`Duration`].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// Evaluate an expression, measuring its duration only if `$timed` is true.
///
/// Returns a tuple of the expression's result and an optional [`Duration`].
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// A literal example input with the answer a part must produce for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase<T> {
    pub input: &'static str,
    pub expected: T,
}

impl<T> TestCase<T> {
    pub fn new(input: &'static str, expected: T) -> Self {
        Self { input, expected }
    }
}

/// The fixtures of both parts of a solution.
///
/// Cases are reported in order, numbered from 1.
#[derive(Debug, Clone)]
pub struct TestCaseSet<A, B> {
    pub part_one: Vec<TestCase<A>>,
    pub part_two: Vec<TestCase<B>>,
}

impl<A, B> TestCaseSet<A, B> {
    pub fn new(part_one: Vec<TestCase<A>>, part_two: Vec<TestCase<B>>) -> Self {
        Self { part_one, part_two }
    }

    /// Fixtures for a solution with no part two fixtures.
    pub fn part_one_only(part_one: Vec<TestCase<A>>) -> Self {
        Self::new(part_one, Vec::new())
    }
}

impl<A, B> Default for TestCaseSet<A, B> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// The outcome of solving one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseResult {
    /// One based position of the fixture in its part.
    pub index: usize,
    /// The displayed answer, or the solution's error message.
    pub actual: String,
    pub expected: String,
    pub passed: bool,
}

/// Counts of a finished test run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
}

impl TestSummary {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// What a run should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Solve the puzzle input read from this file.
    Input(PathBuf),
    /// Solve the part's fixtures and report each result.
    Test,
}

/// Which part to run, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub part: PartKind,
    pub mode: RunMode,
    /// Measure parse and solve durations and pass them to the handler.
    pub timed: bool,
}

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The answer for real input was passed to [`OutputHandler::part_output`].
    Answered,
    /// All fixtures were run.
    Tested(TestSummary),
}

/// An answer along with the time taken to solve it, if measured.
#[derive(Debug)]
pub struct Measured<T> {
    pub value: T,
    pub duration: Option<Duration>,
}

/// One part of a solution, solvable from raw input text.
///
/// Implemented by the adapters [`Unparsed`], [`Parsed`] and [`Unsolved`], which
/// [`#[solution_runner]`][solution_runner] picks between.
pub trait SolvePart<P: Part> {
    type Output: Display + Debug + PartialEq;

    /// Whether the part has a solution. Running an unimplemented part fails in every mode.
    const IMPLEMENTED: bool = true;

    /// Solve raw input text, parsing it first if the solution needs it.
    ///
    /// Parse events are sent to the handler; the returned duration covers solving only.
    ///
    /// # Errors
    ///
    /// Any error from parsing or solving is propagated.
    fn solve_text(
        input: &str,
        handler: &mut dyn OutputHandler,
        timed: bool,
    ) -> DynamicResult<Measured<Self::Output>>;
}

/// Adapter for a solution taking the input string as is.
pub struct Unparsed<S>(PhantomData<S>);

impl<P, S> SolvePart<P> for Unparsed<S>
where
    P: Part,
    S: Solution<P, Input = str>,
{
    type Output = S::Output;

    fn solve_text(
        input: &str,
        _handler: &mut dyn OutputHandler,
        timed: bool,
    ) -> DynamicResult<Measured<Self::Output>> {
        let (result, duration) = measure_with_optional_duration!(S::solve(input), timed);
        Ok(Measured {
            value: result?,
            duration,
        })
    }
}

/// Adapter for a solution taking input parsed into `D`.
pub struct Parsed<D, S>(PhantomData<(D, S)>);

impl<P, D, S> SolvePart<P> for Parsed<D, S>
where
    P: Part,
    D: ParseData,
    S: Solution<P, Input = D>,
{
    type Output = S::Output;

    fn solve_text(
        input: &str,
        handler: &mut dyn OutputHandler,
        timed: bool,
    ) -> DynamicResult<Measured<Self::Output>> {
        handler.parse_start();
        let (parsed, parse_duration) = measure_with_optional_duration!(D::parse(input), timed);
        let parsed = parsed?;
        handler.parse_end(parse_duration);

        let (result, duration) = measure_with_optional_duration!(S::solve(&parsed), timed);
        Ok(Measured {
            value: result?,
            duration,
        })
    }
}

/// Stand-in for a part that has no solution yet.
pub struct Unsolved;

impl<P: Part> SolvePart<P> for Unsolved {
    type Output = Infallible;

    const IMPLEMENTED: bool = false;

    fn solve_text(
        _input: &str,
        _handler: &mut dyn OutputHandler,
        _timed: bool,
    ) -> DynamicResult<Measured<Self::Output>> {
        Err(RunnerError::PartNotImplemented(P::kind()).into())
    }
}

/// Read a puzzle input file, trimming leading and trailing whitespace.
///
/// # Errors
///
/// Returns [`RunnerError::MissingInput`] if the file can't be read.
pub fn read_input(path: &Path) -> Result<String, RunnerError> {
    fs::read_to_string(path)
        .map(|text| text.trim().to_string())
        .map_err(|source| RunnerError::MissingInput {
            path: path.to_path_buf(),
            source,
        })
}

/// Solve a part once against the input file.
fn run_input<P, S>(path: &Path, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>
where
    P: Part,
    S: SolvePart<P>,
{
    let input = read_input(path)?;
    let part = P::kind();
    handler.part_start(part);
    let answer = S::solve_text(&input, handler, timed)?;
    handler.part_output(part, &answer.value, answer.duration);
    Ok(())
}

/// Solve every fixture of a part, reporting each one.
///
/// A fixture whose solution errors is reported as failed with the error as its result.
fn run_tests<P, S>(
    cases: &[TestCase<S::Output>],
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> TestSummary
where
    P: Part,
    S: SolvePart<P>,
{
    let part = P::kind();
    let mut summary = TestSummary::default();

    for (index, case) in cases.iter().enumerate() {
        let (actual, passed) = match S::solve_text(case.input, handler, timed) {
            Ok(answer) => (answer.value.to_string(), answer.value == case.expected),
            Err(error) => (format!("error: {error}"), false),
        };
        if passed {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        handler.test_case(
            part,
            &TestCaseResult {
                index: index + 1,
                actual,
                expected: case.expected.to_string(),
                passed,
            },
        );
    }

    handler.test_summary(part, &summary);
    summary
}

/// Run the requested part of a solution, against its input file or its fixtures.
///
/// # Errors
///
/// Returns [`RunnerError::PartNotImplemented`] in either mode if the part has no solution.
/// In input mode, a [`RunnerError::MissingInput`] or any error from the solution is propagated.
/// Failed fixtures are reported, not returned as errors.
pub fn run_solution<S1, S2>(
    name: &str,
    request: &RunRequest,
    tests: &TestCaseSet<S1::Output, S2::Output>,
    handler: &mut dyn OutputHandler,
) -> DynamicResult<RunOutcome>
where
    S1: SolvePart<PartOne>,
    S2: SolvePart<PartTwo>,
{
    let implemented = match request.part {
        PartKind::One => <S1 as SolvePart<PartOne>>::IMPLEMENTED,
        PartKind::Two => <S2 as SolvePart<PartTwo>>::IMPLEMENTED,
    };
    if !implemented {
        return Err(RunnerError::PartNotImplemented(request.part).into());
    }

    handler.solution_name(name);
    let timed = request.timed;
    match (&request.mode, request.part) {
        (RunMode::Input(path), PartKind::One) => {
            run_input::<PartOne, S1>(path, handler, timed).map(|()| RunOutcome::Answered)
        }
        (RunMode::Input(path), PartKind::Two) => {
            run_input::<PartTwo, S2>(path, handler, timed).map(|()| RunOutcome::Answered)
        }
        (RunMode::Test, PartKind::One) => Ok(RunOutcome::Tested(run_tests::<PartOne, S1>(
            &tests.part_one,
            handler,
            timed,
        ))),
        (RunMode::Test, PartKind::Two) => Ok(RunOutcome::Tested(run_tests::<PartTwo, S2>(
            &tests.part_two,
            handler,
            timed,
        ))),
    }
}

/// A trait for solutions that can be run.
///
/// The trait can be implemented with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run the solution for a request.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(request: &RunRequest, handler: &mut dyn OutputHandler) -> DynamicResult<RunOutcome>;
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Records events as text lines.
    #[derive(Default)]
    struct RecordingHandler {
        events: Vec<String>,
        rows: Vec<TestCaseResult>,
    }

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.events.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.events.push("parse start".to_string());
        }

        fn parse_end(&mut self, _duration_opt: Option<Duration>) {
            self.events.push("parse end".to_string());
        }

        fn part_start(&mut self, part: PartKind) {
            self.events.push(format!("start {part}"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            _duration_opt: Option<Duration>,
        ) {
            self.events.push(format!("output {part}: {output}"));
        }

        fn test_case(&mut self, _part: PartKind, result: &TestCaseResult) {
            self.rows.push(result.clone());
        }

        fn test_summary(&mut self, part: PartKind, summary: &TestSummary) {
            self.events.push(format!(
                "summary {part}: {} passed, {} failed",
                summary.passed, summary.failed
            ));
        }
    }

    /// Sums the lines as integers.
    struct LineSum;

    impl Solution<PartOne> for LineSum {
        type Input = str;
        type Output = i64;

        fn solve(input: &str) -> DynamicResult<i64> {
            input
                .lines()
                .map(|line| -> DynamicResult<i64> { Ok(line.trim().parse()?) })
                .sum()
        }
    }

    /// Echoes the input, to observe what the harness passes in.
    struct Echo;

    static ECHO_CALLS: AtomicUsize = AtomicUsize::new(0);

    impl Solution<PartTwo> for Echo {
        type Input = str;
        type Output = String;

        fn solve(input: &str) -> DynamicResult<String> {
            ECHO_CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(input.to_string())
        }
    }

    struct Words(Vec<String>);

    impl ParseData for Words {
        fn parse(input: &str) -> DynamicResult<Self> {
            Ok(Self(input.split_whitespace().map(String::from).collect()))
        }
    }

    struct WordCount;

    impl Solution<PartOne> for WordCount {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Words) -> DynamicResult<usize> {
            Ok(input.0.len())
        }
    }

    fn test_request(part: PartKind) -> RunRequest {
        RunRequest {
            part,
            mode: RunMode::Test,
            timed: false,
        }
    }

    fn input_file(contents: &str) -> DynamicResult<tempfile::NamedTempFile> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_mode_reports_pass_and_fail_in_order() -> DynamicResult<()> {
        let tests = TestCaseSet::<i64, Infallible>::part_one_only(vec![
            TestCase::new("1\n2\n3", 6),
            TestCase::new("10\n-4", 7),
        ]);
        let mut handler = RecordingHandler::default();

        let outcome = run_solution::<Unparsed<LineSum>, Unsolved>(
            "Sum",
            &test_request(PartKind::One),
            &tests,
            &mut handler,
        )?;

        assert_eq!(
            outcome,
            RunOutcome::Tested(TestSummary {
                passed: 1,
                failed: 1
            })
        );
        assert_eq!(
            handler.rows,
            vec![
                TestCaseResult {
                    index: 1,
                    actual: "6".to_string(),
                    expected: "6".to_string(),
                    passed: true,
                },
                TestCaseResult {
                    index: 2,
                    actual: "6".to_string(),
                    expected: "7".to_string(),
                    passed: false,
                },
            ]
        );
        assert_eq!(
            handler.events.last().map(String::as_str),
            Some("summary Part 1: 1 passed, 1 failed")
        );
        Ok(())
    }

    #[test]
    fn test_mode_reports_solution_errors_as_failures() -> DynamicResult<()> {
        let tests = TestCaseSet::<i64, Infallible>::part_one_only(vec![
            TestCase::new("1\nnope", 1),
            TestCase::new("4", 4),
        ]);
        let mut handler = RecordingHandler::default();

        let outcome = run_solution::<Unparsed<LineSum>, Unsolved>(
            "Sum",
            &test_request(PartKind::One),
            &tests,
            &mut handler,
        )?;

        assert_eq!(
            outcome,
            RunOutcome::Tested(TestSummary {
                passed: 1,
                failed: 1
            })
        );
        assert!(handler.rows[0].actual.starts_with("error: "));
        assert!(!handler.rows[0].passed);
        assert!(handler.rows[1].passed);
        Ok(())
    }

    #[test]
    fn test_mode_without_fixtures_reports_empty_summary() -> DynamicResult<()> {
        let tests = TestCaseSet::<i64, String>::default();
        let mut handler = RecordingHandler::default();

        let outcome = run_solution::<Unparsed<LineSum>, Unparsed<Echo>>(
            "Sum",
            &test_request(PartKind::Two),
            &tests,
            &mut handler,
        )?;

        assert_eq!(outcome, RunOutcome::Tested(TestSummary::default()));
        assert!(handler.rows.is_empty());
        Ok(())
    }

    #[test]
    fn unsolved_part_is_an_error_in_test_mode() {
        let tests = TestCaseSet::<i64, Infallible>::default();
        let mut handler = RecordingHandler::default();

        let result = run_solution::<Unparsed<LineSum>, Unsolved>(
            "Sum",
            &test_request(PartKind::Two),
            &tests,
            &mut handler,
        );

        assert!(matches!(
            result.as_ref().map_err(|error| error.downcast_ref::<RunnerError>()),
            Err(Some(RunnerError::PartNotImplemented(PartKind::Two)))
        ));
        assert!(handler.events.is_empty());
        assert!(handler.rows.is_empty());
    }

    #[test]
    fn test_mode_parses_each_fixture() -> DynamicResult<()> {
        let tests = TestCaseSet::<usize, Infallible>::part_one_only(vec![
            TestCase::new("a b c", 3),
            TestCase::new("", 0),
        ]);
        let mut handler = RecordingHandler::default();

        run_solution::<Parsed<Words, WordCount>, Unsolved>(
            "Words",
            &test_request(PartKind::One),
            &tests,
            &mut handler,
        )?;

        let parse_starts = handler
            .events
            .iter()
            .filter(|event| *event == "parse start")
            .count();
        assert_eq!(parse_starts, 2);
        assert!(handler.rows.iter().all(|row| row.passed));
        Ok(())
    }

    #[test]
    fn input_mode_solves_trimmed_input_once() -> DynamicResult<()> {
        let file = input_file("\n  first  line\n\nsecond line \n\n")?;
        let request = RunRequest {
            part: PartKind::Two,
            mode: RunMode::Input(file.path().to_path_buf()),
            timed: true,
        };
        let mut handler = RecordingHandler::default();
        let calls_before = ECHO_CALLS.load(Ordering::SeqCst);

        let outcome = run_solution::<Unsolved, Unparsed<Echo>>(
            "Echo",
            &request,
            &TestCaseSet::default(),
            &mut handler,
        )?;

        assert_eq!(outcome, RunOutcome::Answered);
        assert_eq!(ECHO_CALLS.load(Ordering::SeqCst) - calls_before, 1);
        assert_eq!(
            handler.events,
            vec![
                "name Echo".to_string(),
                "start Part 2".to_string(),
                "output Part 2: first  line\n\nsecond line".to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn input_mode_fails_on_missing_file() -> DynamicResult<()> {
        let dir = tempfile::tempdir()?;
        let request = RunRequest {
            part: PartKind::One,
            mode: RunMode::Input(dir.path().join("missing.txt")),
            timed: false,
        };
        let mut handler = RecordingHandler::default();

        let result = run_solution::<Unparsed<LineSum>, Unsolved>(
            "Sum",
            &request,
            &TestCaseSet::default(),
            &mut handler,
        );

        let error = result.err().ok_or("expected an error")?;
        assert!(matches!(
            error.downcast_ref::<RunnerError>(),
            Some(RunnerError::MissingInput { .. })
        ));
        Ok(())
    }

    #[test]
    fn unsolved_part_is_an_error_in_input_mode() -> DynamicResult<()> {
        let file = input_file("1")?;
        let request = RunRequest {
            part: PartKind::Two,
            mode: RunMode::Input(file.path().to_path_buf()),
            timed: false,
        };
        let mut handler = RecordingHandler::default();

        let result = run_solution::<Unparsed<LineSum>, Unsolved>(
            "Sum",
            &request,
            &TestCaseSet::default(),
            &mut handler,
        );

        let error = result.err().ok_or("expected an error")?;
        assert_eq!(error.to_string(), "Part 2 is not implemented for this solution");
        Ok(())
    }
}
