//! The session token used to authenticate with the puzzle site.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token not found at: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("could not access token file at: {}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Read the session token, without surrounding whitespace.
///
/// # Errors
///
/// Returns [`TokenError::Missing`] if there is no token file.
pub fn read_token(path: &Path) -> Result<String, TokenError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text.trim().to_string()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Err(TokenError::Missing {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(TokenError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write the session token, replacing any previous one.
///
/// # Errors
///
/// Returns [`TokenError::Io`] if the file can't be written.
pub fn write_token(path: &Path, token: &str) -> Result<(), TokenError> {
    fs::write(path, token.trim()).map_err(|source| TokenError::Io {
        path: path.to_path_buf(),
        source,
    })
}
