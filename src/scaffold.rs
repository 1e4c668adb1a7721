//! Writing a new day's solution and registering it in the solutions module.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use aoc_client::layout::Workspace;
use tracing::debug;

const SOLUTION_TEMPLATE: &str = include_str!("../templates/solution.rs.tmpl");

/// Line in `src/solutions.rs` followed by the year module declarations.
const YEAR_IMPORTS_MARKER: &str = "// --- IMPORT YEARS HERE ---";
/// Line in `src/solutions.rs` followed by the registered `(year, day)` pairs.
const REGISTRY_MARKER: &str = "// --- REGISTER SOLUTIONS HERE ---";

/// Write a file, creating its directory first.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("could not write file: {}", path.display()))
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read file: {}", path.display()))
}

/// Fill the solution template in for a puzzle.
pub fn render_template(year: u16, day: u8) -> String {
    SOLUTION_TEMPLATE
        .replace("{{YEAR}}", &year.to_string())
        .replace("{{DAY_PADDED}}", &format!("{day:02}"))
        .replace("{{DAY}}", &day.to_string())
}

/// Insert `line` right after the line holding `marker`, with the marker's indentation.
///
/// Returns `None` if `source` already has the line.
fn insert_after_marker(source: &str, marker: &str, line: &str) -> Result<Option<String>> {
    if source.lines().any(|existing| existing.trim() == line) {
        return Ok(None);
    }
    let Some(at) = source.find(marker) else {
        bail!("could not find the `{marker}` line");
    };

    let line_start = source[..at].rfind('\n').map_or(0, |newline| newline + 1);
    let indent = &source[line_start..at];
    let line_end = source[at..]
        .find('\n')
        .map_or(source.len(), |newline| at + newline + 1);

    let mut edited = String::with_capacity(source.len() + indent.len() + line.len() + 2);
    edited.push_str(&source[..line_end]);
    if !edited.ends_with('\n') {
        edited.push('\n');
    }
    edited.push_str(indent);
    edited.push_str(line);
    edited.push('\n');
    edited.push_str(&source[line_end..]);
    Ok(Some(edited))
}

/// Make a solution file part of the build: declare it in its year module, declare a new year
/// module, and list the puzzle among the available solutions.
pub fn register(workspace: &Workspace, year: u16, day: u8) -> Result<()> {
    let day_module = format!("mod day{day:02};");
    let year_module_path = workspace.year_module(year);
    let new_year = !year_module_path.exists();

    if new_year {
        write_file(
            &year_module_path,
            &format!("//! Advent of Code {year}.\n\n{day_module}\n"),
        )?;
    } else {
        let mut source = read_file(&year_module_path)?;
        if !source.lines().any(|existing| existing.trim() == day_module) {
            if !source.is_empty() && !source.ends_with('\n') {
                source.push('\n');
            }
            source.push_str(&day_module);
            source.push('\n');
            write_file(&year_module_path, &source)?;
        }
    }

    let solutions_path = workspace.solutions_module();
    let original = read_file(&solutions_path)?;
    let mut source = original.clone();
    let insertions = [
        (YEAR_IMPORTS_MARKER, format!("mod year{year};")),
        (REGISTRY_MARKER, format!("({year}, {day}),")),
    ];
    for (marker, line) in insertions {
        if let Some(edited) = insert_after_marker(&source, marker, &line)? {
            source = edited;
        }
    }
    if source != original {
        write_file(&solutions_path, &source)?;
    }

    debug!(year, day, new_year, "registered solution");
    Ok(())
}
