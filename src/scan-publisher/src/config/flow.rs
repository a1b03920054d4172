//! Per-flow publishing settings.

use super::labels::LabelSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which publishing flow a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Commits the regenerated summary file.
    Summary,

    /// Commits scan results for a target repository.
    ScanResults,
}

impl FlowKind {
    /// Returns the flow's config section name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::ScanResults => "scan",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional per-flow overrides as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct FlowOverrides {
    pub branch_prefix: Option<String>,
    pub paths: Option<Vec<String>>,
    pub labels: Option<String>,
    pub pr_title_format: Option<String>,
    pub commit_message_format: Option<String>,
    pub pr_body_template: Option<PathBuf>,
}

/// Fully resolved settings for one flow.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Branch name prefix, followed by the optional target slug and timestamp.
    pub branch_prefix: String,

    /// Paths staged for the commit.
    pub paths: Vec<String>,

    /// Labels attached to the PR, in order.
    pub labels: Vec<LabelSpec>,

    /// Handlebars format for the PR title.
    pub pr_title_format: String,

    /// Handlebars format for the commit message.
    pub commit_message_format: String,

    /// Handlebars template for the PR body.
    pub pr_body_template: String,
}
