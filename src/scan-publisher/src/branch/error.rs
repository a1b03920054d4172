//! Branch naming error types.

use thiserror::Error;

/// Errors that can occur while building a branch name.
#[derive(Debug, Error)]
pub enum BranchError {
    /// The generated name is not a valid git reference.
    #[error("Invalid branch name '{name}': {message}")]
    InvalidName { name: String, message: String },
}
