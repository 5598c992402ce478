//! Error types for the runner module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for install operations.
pub type InstallResult<T> = Result<T, InstallError>;

/// Errors that can occur while installing dependencies.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Project directory does not exist: {}", .0.display())]
    TargetMissing(PathBuf),

    #[error("Failed to start {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed with exit code {code}")]
    Failed { command: String, code: i32 },

    #[error("{command} was terminated by a signal")]
    Terminated { command: String },
}

impl InstallError {
    /// Exit code of the package manager, when it exited on its own.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => Some(*code),
            _ => None,
        }
    }
}
