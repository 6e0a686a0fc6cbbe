//! Unified Error Type System
//!
//! Centralized error type for the whole crate.
//!
//! ## Error Classes
//!
//! - **Recoverable** conditions (missing optional sheet, malformed row) never
//!   become errors; they are logged by the component that meets them.
//! - **Fatal** conditions (workbook, filesystem, external tool, config) are
//!   variants of [`DepDocsError`] and abort the run.

use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum DepDocsError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure with the path that caused it
    #[error("Filesystem error at {}: {source}", .path.display())]
    Fs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Cannot read workbook {}: {message}", .path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    Config(String),

    /// Group that would place a model outside the models directory
    #[error("Object {object}: group {group:?} is not a valid directory name")]
    InvalidGroup { object: String, group: String },

    // -------------------------------------------------------------------------
    // External Tool Errors
    // -------------------------------------------------------------------------
    #[error("Failed to launch '{program}': {source}. Is it installed?")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed with {}", exit_description(.code))]
    ToolFailed { command: String, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, DepDocsError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl DepDocsError {
    /// Create a workbook error
    pub fn workbook(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Path context extension for filesystem results
pub trait ResultExt<T> {
    /// Attach the path that the failed operation touched
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| DepDocsError::Fs {
            path: path.to_path_buf(),
            source,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
