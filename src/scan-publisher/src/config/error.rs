//! Publisher config errors.

use thiserror::Error;

/// Why `publisher.toml` or a template it names could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config or a body template could not be read.
    #[error("Cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `publisher.toml` is not valid TOML or has unknown keys.
    #[error("Invalid publisher config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value.
    #[error("{path}: {message}")]
    Invalid { path: String, message: String },

    /// The config file given explicitly does not exist.
    #[error("Publisher config not found: {path}")]
    NotFound { path: String },

    /// A PR body template contains only whitespace.
    #[error("PR body template is empty: {path}")]
    EmptyTemplate { path: String },
}
