//! Error handling module for roledoc
//!
//! Only the run orchestrator returns these errors. The individual readers
//! degrade missing or malformed input into warnings (see [`crate::run_log`])
//! and never fail the run.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a successful run (warnings included)
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for I/O failures while producing the report
pub const EXIT_IO_FAILURE: i32 = 1;

/// Exit code for invalid invocations (matches clap's usage error code)
pub const EXIT_INVOCATION: i32 = 2;

/// Fatal errors that terminate a documentation run
#[derive(Error, Debug)]
pub enum DocgenError {
    /// The role root does not exist or cannot be inspected
    #[error("cannot read role directory {}: {source}", path.display())]
    RoleRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The role root exists but is not a directory
    #[error("role path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// The report could not be written to its destination
    #[error("failed to write documentation to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for roledoc operations
pub type Result<T> = std::result::Result<T, DocgenError>;

impl DocgenError {
    /// Create a role root error
    pub fn role_root(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RoleRoot {
            path: path.into(),
            source,
        }
    }

    /// Create a write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors caused by how the tool was invoked
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            Self::RoleRoot { .. } | Self::NotADirectory { .. } | Self::Config(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_invocation_error() {
            EXIT_INVOCATION
        } else {
            EXIT_IO_FAILURE
        }
    }
}
