//! Persistence of the current puzzle.
//!
//! There is at most one current puzzle. [`FileStore`] keeps it as JSON in a single file and
//! [`MemoryStore`] keeps it in memory, for tests and dry runs.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::puzzle::PuzzleState;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no current puzzle is set")]
    NoCurrentPuzzle,

    #[error("could not access current puzzle file at: {}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("could not serialize current puzzle")]
    Serialize(#[from] serde_json::Error),
}

/// Load, save and delete the single current puzzle.
pub trait PuzzleStore {
    /// The current puzzle, or `None` if there is none or it can't be read.
    fn load(&self) -> Option<PuzzleState>;

    /// Replace the current puzzle.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the puzzle can't be written.
    fn save(&self, puzzle: &PuzzleState) -> Result<(), StoreError>;

    /// Remove the current puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoCurrentPuzzle`] if there is none to remove.
    fn delete(&self) -> Result<(), StoreError>;
}

/// A current puzzle stored as JSON in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PuzzleStore for FileStore {
    fn load(&self) -> Option<PuzzleState> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "could not read current puzzle");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(puzzle) => Some(puzzle),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable current puzzle");
                None
            }
        }
    }

    fn save(&self, puzzle: &PuzzleState) -> Result<(), StoreError> {
        let json = serde_json::to_string(puzzle)?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), ?puzzle, "saved current puzzle");
        Ok(())
    }

    fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "deleted current puzzle");
                Ok(())
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NoCurrentPuzzle)
            }
            Err(error) => Err(self.io_error(error)),
        }
    }
}

/// A current puzzle held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    puzzle: Cell<Option<PuzzleState>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(puzzle: Option<PuzzleState>) -> Self {
        Self {
            puzzle: Cell::new(puzzle),
        }
    }
}

impl PuzzleStore for MemoryStore {
    fn load(&self) -> Option<PuzzleState> {
        self.puzzle.get()
    }

    fn save(&self, puzzle: &PuzzleState) -> Result<(), StoreError> {
        self.puzzle.set(Some(*puzzle));
        Ok(())
    }

    fn delete(&self) -> Result<(), StoreError> {
        self.puzzle
            .take()
            .map(|_| ())
            .ok_or(StoreError::NoCurrentPuzzle)
    }
}
