//! The `aoc` subcommands.

use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use aoc_client::layout::Workspace;
use aoc_client::remote::{
    self, ClientConfig, InputSource, RemoteClient, RetryPolicy, SubmissionStatus,
};
use aoc_client::{Notice, Overrides, PuzzleState, PuzzleStore, Resolution, token};
use aoc_framework::PartKind;
use aoc_framework::runner::{RunMode, RunOutcome, RunRequest};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::output::CliOutputHandler;
use crate::scaffold::{self, write_file};
use crate::{prompt, solutions};

/// What commands work with.
pub struct Context {
    pub workspace: Workspace,
    pub store: Box<dyn PuzzleStore>,
    pub client_config: ClientConfig,
    pub today: NaiveDate,
}

impl Context {
    /// Resolve a puzzle, telling the user about any assumption made.
    fn resolve(&self, current: Option<PuzzleState>, overrides: Overrides) -> Result<PuzzleState> {
        let Resolution { puzzle, notice } = aoc_client::resolve(current, overrides, self.today)?;
        if let Some(Notice::PreviousYear(year)) = notice {
            println!(
                "{}",
                format!("It's not December yet! Using previous year: {year}").yellow()
            );
        }
        Ok(puzzle)
    }

    fn client(&self) -> Result<RemoteClient> {
        let token = token::read_token(&self.workspace.token_file())?;
        Ok(RemoteClient::new(&token, &self.client_config)?)
    }
}

pub fn create_token(ctx: &Context, token: Option<String>) -> Result<()> {
    let path = ctx.workspace.token_file();

    if path.exists() {
        println!("{}", "Token already exists".yellow());
        if !prompt::confirm("Do you want to overwrite it?")? {
            println!("{}", "Exiting.".red());
            return Ok(());
        }
    }

    let token = match token {
        Some(token) => token,
        None => prompt::ask("Enter token value")?,
    };
    token::write_token(&path, &token)?;
    println!("{}", "Token created!".green());
    Ok(())
}

pub fn set_puzzle(ctx: &Context, overrides: Overrides) -> Result<()> {
    let puzzle = ctx.resolve(None, overrides)?;
    println!(
        "{}",
        format!(
            "Setting current puzzle to Day {}, {}, part {}...",
            puzzle.day,
            puzzle.year,
            puzzle.part.number()
        )
        .bright_cyan()
    );
    ctx.store.save(&puzzle)?;
    Ok(())
}

pub fn set_part(ctx: &Context, part: PartKind) -> Result<()> {
    let Some(mut puzzle) = ctx.store.load() else {
        bail!("No current puzzle set!");
    };

    println!(
        "{}",
        format!("Setting current puzzle to part {}...", part.number()).bright_cyan()
    );
    puzzle.part = part;
    ctx.store.save(&puzzle)?;
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<()> {
    println!("{}", "Clearing current puzzle...".bright_cyan());
    if ctx.store.load().is_some() {
        ctx.store.delete()?;
    }
    Ok(())
}

pub fn preview(ctx: &Context, overrides: Overrides) -> Result<()> {
    let puzzle = ctx.resolve(ctx.store.load(), overrides)?;
    println!(
        "{}",
        format!(
            "Advent of Code: Day {}, {}! (Part {})",
            puzzle.day,
            puzzle.year,
            puzzle.part.number()
        )
        .bright_green()
        .bold()
    );
    Ok(())
}

pub fn pull(ctx: &Context, overrides: Overrides) -> Result<()> {
    let puzzle = ctx.resolve(ctx.store.load(), overrides)?;
    let solution_file = ctx.workspace.solution_file(puzzle.year, puzzle.day);
    if !solution_file.exists() {
        bail!(
            "Solution file {} not found! Create it with `aoc new`",
            solution_file.display()
        );
    }

    let input_file = ctx.workspace.input_file(puzzle.year, puzzle.day);
    if input_file.exists() && !prompt::confirm("Do you want to overwrite it?")? {
        println!("{}", "Exiting.".red());
        return Ok(());
    }

    println!(
        "{}",
        format!("Pulling data for Day {}, {}...", puzzle.day, puzzle.year).bright_cyan()
    );
    let input = ctx.client()?.fetch_input(puzzle.year, puzzle.day)?;
    write_file(&input_file, &input)?;

    println!("{}", "Data pulled!".green());
    Ok(())
}

pub fn new_day(ctx: &Context, overrides: Overrides) -> Result<()> {
    let puzzle = ctx.resolve(None, overrides)?;
    ctx.store.save(&puzzle)?;

    let solution_file = ctx.workspace.solution_file(puzzle.year, puzzle.day);
    if solution_file.exists() {
        bail!("Solution file {} already exists!", solution_file.display());
    }

    println!("{}", "Pulling data...".bright_cyan());
    let client = ctx.client()?;
    let input =
        remote::fetch_input_with_retry(&client, puzzle.year, puzzle.day, &RetryPolicy::default())?;
    write_file(&ctx.workspace.input_file(puzzle.year, puzzle.day), &input)?;

    println!(
        "{}",
        format!("Creating solution file {}...", solution_file.display()).bright_cyan()
    );
    write_file(
        &solution_file,
        &scaffold::render_template(puzzle.year, puzzle.day),
    )?;
    scaffold::register(&ctx.workspace, puzzle.year, puzzle.day)?;

    println!(
        "{}",
        format!("Day {}, {} created!", puzzle.day, puzzle.year)
            .green()
            .bold()
    );
    println!("Run its tests with `aoc dev`, or rebuild `aoc` before `aoc run`.");
    Ok(())
}

/// This executable, re-invoked to solve one puzzle.
fn solve_command(workspace: &Workspace, puzzle: &PuzzleState, test: bool) -> Result<Command> {
    let exe = env::current_exe().context("could not locate the aoc executable")?;
    let mut command = Command::new(exe);
    command
        .arg("--root")
        .arg(workspace.root())
        .arg("solve")
        .arg(puzzle.year.to_string())
        .arg(puzzle.day.to_string())
        .arg("--part")
        .arg(puzzle.part.number().to_string());
    if test {
        command.arg("--test");
    }
    Ok(command)
}

pub fn run_day(ctx: &Context, overrides: Overrides, test: bool, submit: bool) -> Result<()> {
    let puzzle = ctx.resolve(ctx.store.load(), overrides)?;
    println!(
        "{}",
        format!(
            "Running Day {}, {}, part {}...",
            puzzle.day,
            puzzle.year,
            puzzle.part.number()
        )
        .bright_cyan()
    );

    if !solutions::is_available(puzzle.year, puzzle.day) {
        let solution_file = ctx.workspace.solution_file(puzzle.year, puzzle.day);
        if solution_file.exists() {
            bail!(
                "Solution for Day {}, {} is not part of this build of aoc! Rebuild it, e.g. with `cargo run -- run`",
                puzzle.day,
                puzzle.year
            );
        }
        bail!(
            "Solution file {} not found! Create it with `aoc new`",
            solution_file.display()
        );
    }

    let mut command = solve_command(&ctx.workspace, &puzzle, test)?;
    println!("{}\n", format!("{command:?}").bright_black());

    if test {
        let status = command.status().context("could not start solution")?;
        if !status.success() {
            bail!("solution exited with {status}");
        }
        return Ok(());
    }

    let output = command
        .stderr(Stdio::inherit())
        .output()
        .context("could not start solution")?;
    if !output.status.success() {
        bail!("solution exited with {}", output.status);
    }
    let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
    println!("Result: {answer}");

    if submit {
        if answer.is_empty() {
            bail!("No answer to submit!");
        }
        let status = ctx
            .client()?
            .submit_answer(puzzle.year, puzzle.day, puzzle.part, &answer)?;
        debug!(?status, "submission finished");
        match status {
            SubmissionStatus::Correct => println!("{}", "Correct!".green().bold()),
            SubmissionStatus::AlreadyCompleted => {
                println!("{}", "Already completed!".yellow().bold());
            }
            other => println!("{}", format!("{other:?}").red().bold()),
        }
    }
    Ok(())
}

/// Re-run the current puzzle's tests whenever a source file or the current puzzle changes.
pub fn dev(ctx: &Context) -> Result<()> {
    let root = ctx.workspace.root();
    let mut command = Command::new("watchexec");
    command
        .arg("-w")
        .arg(root.join("src"))
        .arg("-w")
        .arg(ctx.workspace.state_file())
        .args(["--", "cargo", "run", "--quiet", "--manifest-path"])
        .arg(root.join("Cargo.toml"))
        .args(["--bin", "aoc", "--", "--root"])
        .arg(root)
        .args(["run", "--test"]);
    println!("{}\n", format!("{command:?}").bright_black());

    let status = command
        .status()
        .context("could not start watchexec, is it installed?")?;
    if !status.success() {
        bail!("watchexec exited with {status}");
    }
    Ok(())
}

/// Options of the `solve` command.
pub struct SolveOptions {
    pub year: u16,
    pub day: u8,
    pub part: PartKind,
    pub test: bool,
    /// Input file to use instead of the workspace's input for the puzzle.
    pub input: Option<PathBuf>,
    pub timed: bool,
    pub min_timing: Duration,
    /// Fail when any test case fails.
    pub strict: bool,
}

pub fn solve(workspace: &Workspace, options: SolveOptions) -> Result<()> {
    let mode = if options.test {
        RunMode::Test
    } else {
        RunMode::Input(
            options
                .input
                .unwrap_or_else(|| workspace.input_file(options.year, options.day)),
        )
    };
    let request = RunRequest {
        part: options.part,
        mode,
        timed: options.timed,
    };
    let mut handler = CliOutputHandler::new(options.min_timing);

    let outcome = solutions::run_puzzle(options.year, options.day, &request, &mut handler)
        .map_err(|dyn_error| {
            let anyhow_error = anyhow::Error::from_boxed(dyn_error);
            anyhow_error.context("failed to run solution")
        })?;

    if let RunOutcome::Tested(summary) = outcome
        && options.strict
        && !summary.all_passed()
    {
        bail!(
            "{} of {} test cases failed",
            summary.failed,
            summary.passed + summary.failed
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use aoc_client::MemoryStore;

    use super::*;

    fn context(dir: &Path, current: Option<PuzzleState>, today: NaiveDate) -> Context {
        Context {
            workspace: Workspace::new(dir),
            store: Box::new(MemoryStore::new(current)),
            client_config: ClientConfig::default(),
            today,
        }
    }

    fn december(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap_or_default()
    }

    #[test]
    fn set_saves_resolved_puzzle() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let ctx = context(dir.path(), None, december(6));

        set_puzzle(&ctx, Overrides::default())?;

        assert_eq!(
            ctx.store.load(),
            Some(PuzzleState::new(6, 2024, PartKind::One))
        );
        Ok(())
    }

    #[test]
    fn failed_resolution_saves_nothing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let july = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap_or_default();
        let ctx = context(dir.path(), None, july);

        assert!(set_puzzle(&ctx, Overrides::default()).is_err());
        assert_eq!(ctx.store.load(), None);
        Ok(())
    }

    #[test]
    fn set_part_requires_current_puzzle() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let ctx = context(dir.path(), None, december(6));

        let error = set_part(&ctx, PartKind::Two).err();

        assert_eq!(
            error.map(|error| error.to_string()).as_deref(),
            Some("No current puzzle set!")
        );
        Ok(())
    }

    #[test]
    fn set_part_switches_current_puzzle() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let current = PuzzleState::new(3, 2023, PartKind::One);
        let ctx = context(dir.path(), Some(current), december(6));

        set_part(&ctx, PartKind::Two)?;

        assert_eq!(
            ctx.store.load(),
            Some(PuzzleState::new(3, 2023, PartKind::Two))
        );
        Ok(())
    }

    #[test]
    fn clear_without_puzzle_succeeds() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let ctx = context(dir.path(), None, december(6));

        clear(&ctx)?;
        assert_eq!(ctx.store.load(), None);
        Ok(())
    }

    #[test]
    fn pull_requires_solution_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let ctx = context(dir.path(), None, december(6));

        let error = pull(&ctx, Overrides::default()).err();

        assert!(
            error
                .map(|error| error.to_string())
                .is_some_and(|message| message.contains("not found"))
        );
        Ok(())
    }

    #[test]
    fn new_day_refuses_existing_solution() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let ctx = context(dir.path(), None, december(6));
        write_file(&ctx.workspace.solution_file(2024, 6), "")?;

        let error = new_day(&ctx, Overrides::default()).err();

        assert!(
            error
                .map(|error| error.to_string())
                .is_some_and(|message| message.contains("already exists"))
        );
        Ok(())
    }

    #[test]
    fn run_points_at_missing_solution_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let current = PuzzleState::new(6, 2024, PartKind::One);
        let ctx = context(dir.path(), Some(current), december(6));

        let error = run_day(&ctx, Overrides::default(), true, false).err();

        assert!(
            error
                .map(|error| error.to_string())
                .is_some_and(|message| message.contains("Create it with `aoc new`"))
        );
        Ok(())
    }

    #[test]
    fn run_asks_for_rebuild_of_new_solution() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let current = PuzzleState::new(6, 2024, PartKind::One);
        let ctx = context(dir.path(), Some(current), december(6));
        write_file(&ctx.workspace.solution_file(2024, 6), "")?;

        let error = run_day(&ctx, Overrides::default(), true, false).err();

        assert!(
            error
                .map(|error| error.to_string())
                .is_some_and(|message| message.contains("not part of this build"))
        );
        Ok(())
    }

    #[test]
    fn solve_tests_registered_solution() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let options = SolveOptions {
            year: 2020,
            day: 1,
            part: PartKind::One,
            test: true,
            input: None,
            timed: false,
            min_timing: Duration::ZERO,
            strict: true,
        };

        solve(&Workspace::new(dir.path()), options)
    }

    #[test]
    fn solve_reports_missing_input() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let options = SolveOptions {
            year: 2024,
            day: 1,
            part: PartKind::Two,
            test: false,
            input: None,
            timed: false,
            min_timing: Duration::ZERO,
            strict: false,
        };

        let error = solve(&Workspace::new(dir.path()), options).err();

        let chain = error.map(|error| format!("{error:#}"));
        assert!(chain.is_some_and(|message| message.contains("could not read input file")));
        Ok(())
    }

    #[test]
    fn solve_answers_from_input_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let workspace = Workspace::new(dir.path());
        write_file(&workspace.input_file(2024, 3), "mul(3,4)don't()mul(5,5)\n")?;
        let options = SolveOptions {
            year: 2024,
            day: 3,
            part: PartKind::Two,
            test: false,
            input: None,
            timed: true,
            min_timing: Duration::ZERO,
            strict: false,
        };

        solve(&workspace, options)
    }
}
