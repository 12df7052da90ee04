//! Error types shared across the library.

use std::path::PathBuf;

use thiserror::Error;

use crate::pattern::PatternError;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during a search.
///
/// Display strings for the file variants follow the `<path>: <reason>` shape
/// so the CLI can prefix them with the program name, grep style.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("{0}: No such file or directory")]
    FileNotFound(PathBuf),
    #[error("{0}: Permission denied")]
    PermissionDenied(PathBuf),
    #[error("{0}: Is a directory")]
    IsADirectory(PathBuf),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn is_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::IsADirectory(path.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
