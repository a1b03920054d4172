//! Steps of the publishing sequence.

use serde::Serialize;
use std::fmt;

/// A fatal step of the publishing sequence.
///
/// Runs move through these in declaration order; a failure at any of them
/// ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// `git status` for the scan flow's change check.
    CheckChanges,
    /// `git config user.name` / `user.email`.
    ConfigureIdentity,
    /// `git checkout -b`.
    CreateBranch,
    /// `git add`.
    StagePaths,
    /// `git commit`.
    Commit,
    /// `git push`.
    Push,
}

impl Stage {
    /// Returns the stage as a string for display.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckChanges => "check for changes",
            Self::ConfigureIdentity => "configure commit identity",
            Self::CreateBranch => "create branch",
            Self::StagePaths => "stage paths",
            Self::Commit => "commit",
            Self::Push => "push branch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
