//! Run outcome types.

use serde::Serialize;

/// How a publishing run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing to publish; no branch, commit or PR was made.
    NoChanges,

    /// The branch was pushed and a PR opened.
    Published,

    /// The plan was rendered but no command was run.
    DryRun,
}

impl RunOutcome {
    /// Returns the outcome as a string for display.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoChanges => "no changes",
            Self::Published => "published",
            Self::DryRun => "dry run",
        }
    }
}
