//! Target repository error types.

use thiserror::Error;

/// Errors that can occur while parsing a target repository reference.
#[derive(Debug, Error)]
pub enum TargetError {
    /// The reference is not a URL or `owner/name` pair.
    #[error("'{input}' is not a repository URL: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL uses a scheme other than http(s).
    #[error("'{input}' must use http or https")]
    UnsupportedScheme { input: String },

    /// The URL path is not `/owner/name`.
    #[error("'{input}' does not point at a repository (expected /owner/name)")]
    NotARepository { input: String },

    /// Owner or name contains characters GitHub does not allow.
    #[error("'{input}' contains an invalid {part}: '{value}'")]
    InvalidSegment {
        input: String,
        part: &'static str,
        value: String,
    },
}
