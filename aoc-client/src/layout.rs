//! Where a workspace keeps its state, token, inputs and solutions.

use std::path::{Path, PathBuf};

/// File name of the current puzzle, at the workspace root.
pub const STATE_FILE: &str = ".current_puzzle";
/// File name of the session token, at the workspace root.
pub const TOKEN_FILE: &str = ".token";

/// Paths of a workspace, all relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    #[must_use]
    pub fn token_file(&self) -> PathBuf {
        self.root.join(TOKEN_FILE)
    }

    /// `inputs/<year>/dayDD.txt`
    #[must_use]
    pub fn input_file(&self, year: u16, day: u8) -> PathBuf {
        self.root
            .join("inputs")
            .join(year.to_string())
            .join(format!("day{day:02}.txt"))
    }

    /// Directory holding the solution modules.
    #[must_use]
    pub fn solutions_dir(&self) -> PathBuf {
        self.root.join("src").join("solutions")
    }

    /// `src/solutions.rs`, declaring the year modules and registering every solution.
    #[must_use]
    pub fn solutions_module(&self) -> PathBuf {
        self.root.join("src").join("solutions.rs")
    }

    /// `src/solutions/year<year>.rs`, declaring the year's day modules.
    #[must_use]
    pub fn year_module(&self, year: u16) -> PathBuf {
        self.solutions_dir().join(format!("year{year}.rs"))
    }

    /// `src/solutions/year<year>/dayDD.rs`
    #[must_use]
    pub fn solution_file(&self, year: u16, day: u8) -> PathBuf {
        self.solutions_dir()
            .join(format!("year{year}"))
            .join(format!("day{day:02}.rs"))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(".")
    }
}
