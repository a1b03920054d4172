//! Pull request status types.

use serde::Serialize;

/// Status of a PR creation operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrStatus {
    /// PR successfully created.
    Created {
        /// PR number, when it could be read from the URL.
        number: Option<u64>,
        /// PR URL as printed by `gh`.
        url: String,
    },

    /// PR creation skipped.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },
}

impl PrStatus {
    /// Returns the status as a string for display.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Skipped { .. } => "skipped",
        }
    }

    /// Returns the PR URL if created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Created { url, .. } => Some(url),
            Self::Skipped { .. } => None,
        }
    }

    /// Returns the PR number if it is known.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Created { number, .. } => *number,
            Self::Skipped { .. } => None,
        }
    }
}
