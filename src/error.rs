//! # Error Handling
//!
//! This module defines the centralized error type for the `kitpack` library.
//! It uses `thiserror` to derive a single `Error` enum covering every failure
//! mode of the packaging workflow and the duplicate scanner.
//!
//! Every error is fatal: nothing in the library retries or cleans up after a
//! failure. The binary converts these into `anyhow` reports at the top level.
//!
//! - **`Error`**: all failures, most carrying the path involved.
//! - **`Result<T>`**: alias for `std::result::Result<T, Error>`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pack::PackPhase;

/// Main error type for kitpack operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed or holds invalid values.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error on a specific path.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error without path context.
    #[error("I/O error: {0}")]
    IoBare(#[from] std::io::Error),

    /// A directory traversal failed.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Writing a zip archive failed.
    #[error("Archive error on '{}': {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A JSON report could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A path under a walked root could not be expressed relative to it.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// The duplicate scanner's source directory does not exist.
    #[error("src folder not found at: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A packaging step failed; `completed` is the last phase that finished.
    #[error("pack aborted after {completed}: {source}")]
    PackAborted {
        completed: PackPhase,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an `io::Error` with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a `ZipError` with the archive it happened on.
    pub fn archive(path: impl AsRef<Path>, source: zip::result::ZipError) -> Self {
        Error::Archive {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
