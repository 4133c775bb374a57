//! Error types for build orchestration.
//!
//! Every failure the core can surface is a variant of [`Error`]. Skipped
//! arguments (an empty scheme, an empty action) are not errors and never
//! reach this module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for xcforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all xcforge operations
#[derive(Error, Debug)]
pub enum Error {
    /// The shell ran the command and it exited unsuccessfully
    #[error("command failed ({}): {command}\n{stderr}", exit_label(.code))]
    CommandFailed {
        /// Full command line handed to the shell
        command: String,
        /// Exit code, `None` when the process was killed by a signal
        code: Option<i32>,
        /// Trimmed standard error captured from the process
        stderr: String,
    },

    /// The shell itself could not be started
    #[error("failed to start shell for `{command}`: {source}")]
    Spawn {
        /// Command line that was about to run
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or is inconsistent
    #[error("invalid configuration {}: {reason}", path.display())]
    Config {
        /// Path of the offending configuration file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Regex compilation errors
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Release preconditions were not met
    #[error("{reason}")]
    Release {
        /// Human readable explanation
        reason: String,
    },

    /// A required external tool is not on PATH
    #[error("required tool `{tool}` not found on PATH")]
    MissingTool {
        /// Executable name
        tool: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Whether this error came from an external process run by the shell.
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Error::CommandFailed { .. } | Error::Spawn { .. })
    }
}
