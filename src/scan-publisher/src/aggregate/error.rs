//! Aggregation error types.

use thiserror::Error;

/// Errors that can occur while merging results or writing the summary.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Failed to read or write a file.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A results file is not valid JSON in the `{"scanner": [...]}` shape.
    #[error("Invalid results file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An organization or repository name cannot be used in a file name.
    #[error("Invalid {what}: '{value}'")]
    InvalidName { what: &'static str, value: String },
}
