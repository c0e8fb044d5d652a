//! Error types for deadwood core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for deadwood operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a run before analysis starts.
///
/// Per-file failures never surface here; they are recorded on the affected
/// [`FileRecord`](crate::FileRecord) and in the report's error list.
#[derive(Debug, Error)]
pub enum Error {
    /// No project root was provided.
    #[error("No project directory selected")]
    NoProjectRoot,

    /// The project root does not exist.
    #[error("Project root not found: {path}")]
    ProjectRootNotFound {
        /// Path that was given as the root.
        path: PathBuf,
    },

    /// The project root exists but is not a directory.
    #[error("Project root is not a directory: {path}")]
    NotADirectory {
        /// Path that was given as the root.
        path: PathBuf,
    },

    /// Scan options are invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pattern compilation error.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
