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
#![deny(clippy::unwrap_used)]

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use aoc_client::calendar;
use aoc_client::layout::Workspace;
use aoc_client::remote::ClientConfig;
use aoc_client::{FileStore, Overrides};
use aoc_framework::PartKind;
use clap::{ArgAction, Args, Parser, Subcommand};

mod checked;
mod commands;
mod logging;
mod output;
mod prompt;
mod scaffold;
mod solutions;

/// Advent of Code puzzle runner: solve, test, fetch inputs and submit answers.
#[derive(Parser, Debug)]
#[command(name = "aoc", version)]
struct Cli {
    /// Workspace directory holding the current puzzle, token, inputs and solutions.
    #[arg(long, global = true, env = "AOC_ROOT", value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Timeout for each request to the puzzle site.
    #[arg(
        long,
        global = true,
        env = "AOC_HTTP_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = 30
    )]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

/// Parse a part number, `1` or `2`.
fn parse_part(value: &str) -> Result<PartKind, String> {
    let number: u8 = value.parse().map_err(|_| format!("{value:?} is not a part number"))?;
    PartKind::try_from(number).map_err(|error| error.to_string())
}

/// A session token given on the command line, left out of debug output.
#[derive(Clone)]
struct Secret(String);

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl FromStr for Secret {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.to_string()))
    }
}

/// Explicit puzzle day and year.
#[derive(Args, Debug, Clone, Copy)]
struct PuzzleArgs {
    /// The day.
    #[arg(short, long)]
    day: Option<u8>,

    /// The year.
    #[arg(short, long)]
    year: Option<u16>,
}

impl PuzzleArgs {
    fn overrides(self) -> Overrides {
        Overrides {
            day: self.day,
            year: self.year,
            ..Overrides::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new token file.
    CreateToken {
        /// The session token; asked for if omitted.
        token: Option<Secret>,
    },

    /// Set the current puzzle.
    Set {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// The part of the solution.
        #[arg(short, long, value_parser = parse_part)]
        part: Option<PartKind>,

        /// Use next day.
        #[arg(long, action = ArgAction::SetTrue)]
        next: bool,
    },

    /// Set the current puzzle to part 1.
    Part1,

    /// Set the current puzzle to part 2.
    Part2,

    /// Clear the current puzzle.
    Clear,

    /// Preview the current puzzle.
    Preview {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// The part of the solution.
        #[arg(short, long, value_parser = parse_part)]
        part: Option<PartKind>,

        /// Use next day.
        #[arg(long, action = ArgAction::SetTrue)]
        next: bool,
    },

    /// Pull data for the current puzzle.
    Pull {
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },

    /// Create a new solution file and pull data.
    New {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Use next day.
        #[arg(long, action = ArgAction::SetTrue)]
        next: bool,
    },

    /// Run the current puzzle.
    Run {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// The part of the solution.
        #[arg(short, long, value_parser = parse_part)]
        part: Option<PartKind>,

        /// Run the example test cases instead of the input.
        #[arg(short, long, action = ArgAction::SetTrue)]
        test: bool,

        /// Submit the answer.
        #[arg(long, action = ArgAction::SetTrue)]
        submit: bool,
    },

    /// Solve one puzzle part with its registered solution.
    Solve {
        /// The puzzle's year (e.g. 2024).
        year: u16,

        /// The puzzle's day (e.g. 1, 2, etc).
        day: u8,

        /// The part of the solution.
        #[arg(short, long, value_parser = parse_part, default_value = "1")]
        part: PartKind,

        /// Run the example test cases instead of the input.
        #[arg(short, long, action = ArgAction::SetTrue)]
        test: bool,

        /// Sets an alternative input file to use over default input.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Measure and print the durations of parsing and solving.
        #[arg(long, action = ArgAction::SetTrue)]
        timed: bool,

        /// Minimum duration (in milliseconds) required to print timing.
        /// 0 = always print.
        #[arg(long, value_name = "NUMBER", default_value_t)]
        min_timing_ms: u64,

        /// Exit with an error if any test case fails.
        #[arg(long, action = ArgAction::SetTrue)]
        strict: bool,
    },

    /// Continuously run tests for the current puzzle.
    Dev,
}

fn main() -> Result<()> {
    logging::init();
    let args = Cli::parse();
    tracing::debug!(?args, "parsed arguments");

    let workspace = Workspace::new(args.root);
    let ctx = commands::Context {
        store: Box::new(FileStore::new(workspace.state_file())),
        workspace,
        client_config: ClientConfig {
            timeout: Duration::from_secs(args.timeout),
            ..ClientConfig::default()
        },
        today: calendar::today(),
    };

    match args.command {
        Command::CreateToken { token } => {
            commands::create_token(&ctx, token.map(|Secret(token)| token))
        }
        Command::Set { puzzle, part, next } => commands::set_puzzle(
            &ctx,
            Overrides {
                part,
                next,
                ..puzzle.overrides()
            },
        ),
        Command::Part1 => commands::set_part(&ctx, PartKind::One),
        Command::Part2 => commands::set_part(&ctx, PartKind::Two),
        Command::Clear => commands::clear(&ctx),
        Command::Preview { puzzle, part, next } => commands::preview(
            &ctx,
            Overrides {
                part,
                next,
                ..puzzle.overrides()
            },
        ),
        Command::Pull { puzzle } => commands::pull(&ctx, puzzle.overrides()),
        Command::New { puzzle, next } => commands::new_day(
            &ctx,
            Overrides {
                next,
                ..puzzle.overrides()
            },
        ),
        Command::Run {
            puzzle,
            part,
            test,
            submit,
        } => commands::run_day(
            &ctx,
            Overrides {
                part,
                ..puzzle.overrides()
            },
            test,
            submit,
        ),
        Command::Solve {
            year,
            day,
            part,
            test,
            input,
            timed,
            min_timing_ms,
            strict,
        } => commands::solve(
            &ctx.workspace,
            commands::SolveOptions {
                year,
                day,
                part,
                test,
                input,
                timed,
                min_timing: Duration::from_millis(min_timing_ms),
                strict,
            },
        ),
        Command::Dev => commands::dev(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn solve_defaults_to_part_one() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["aoc", "solve", "2024", "3"])?;
        assert!(matches!(
            cli.command,
            Command::Solve {
                year: 2024,
                day: 3,
                part: PartKind::One,
                test: false,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn token_is_redacted_from_debug_output() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["aoc", "create-token", "53616c7465645f5f"])?;
        let debug = format!("{cli:?}");
        assert!(!debug.contains("53616c7465645f5f"));
        assert!(debug.contains("<redacted>"));
        Ok(())
    }

    #[test]
    fn rejects_part_three() {
        assert!(Cli::try_parse_from(["aoc", "run", "--part", "3"]).is_err());
    }

    #[test]
    fn part_commands_are_numbered() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["aoc", "--root", "puzzles", "part2"])?;
        assert!(matches!(cli.command, Command::Part2));
        assert_eq!(cli.root, PathBuf::from("puzzles"));
        Ok(())
    }
}
