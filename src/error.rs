//! Error types for command execution and export.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single command did not produce a successful outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command was blank after trimming; nothing was spawned.
    #[error("Command is empty.")]
    EmptyCommand,

    /// The process ran and exited non-zero. Carries the captured output.
    #[error("Command failed: {0}")]
    ExecutionFailed(String),

    /// The shell could not be launched at all.
    #[error("Command failed: {0}")]
    SpawnFailed(String),
}

impl CommandError {
    /// True for both non-zero exits and launch failures.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, CommandError::ExecutionFailed(_) | CommandError::SpawnFailed(_))
    }
}

/// Failure while writing an export bundle.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("could not determine the home directory for exports")]
    HomeDirUnavailable,

    #[error("IO error: {} - {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}
