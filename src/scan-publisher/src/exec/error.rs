//! Command execution error types.

use super::CommandOutput;
use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The process could not be started.
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{command} failed: {}", .output.combined().trim())]
    Failed {
        command: String,
        output: CommandOutput,
    },
}

