//! Pull request error types.

use crate::exec::ExecError;
use thiserror::Error;

/// Errors that can occur during PR operations.
#[derive(Debug, Error)]
pub enum PrError {
    /// `gh pr create` could not be started.
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// `gh pr create` exited unsuccessfully.
    #[error("Failed to create pull request (exit code {code:?}): {output}")]
    CreationFailed { code: Option<i32>, output: String },
}
