//! PR creation request and result.

use regex::Regex;
use std::sync::LazyLock;

static PR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/pull/(\d+)").expect("PR number pattern is valid"));

/// Parameters for `gh pr create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    /// PR title.
    pub title: String,

    /// Rendered PR body.
    pub body: String,

    /// Branch to merge into.
    pub base: String,

    /// Branch containing the changes.
    pub head: String,

    /// Login to assign, if any.
    pub assignee: Option<String>,
}

impl PullRequestRequest {
    /// Builds the `gh` argument list.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "pr".to_string(),
            "create".to_string(),
            "--title".to_string(),
            self.title.clone(),
            "--body".to_string(),
            self.body.clone(),
            "--base".to_string(),
            self.base.clone(),
            "--head".to_string(),
            self.head.clone(),
        ];
        if let Some(assignee) = &self.assignee {
            args.push("--assignee".to_string());
            args.push(assignee.clone());
        }
        args
    }
}

/// A PR created by `gh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// URL printed by `gh`.
    pub url: String,

    /// Number parsed from the URL; `None` if the output had no `/pull/<n>`.
    pub number: Option<u64>,
}

impl CreatedPullRequest {
    /// Interprets the standard output of a successful `gh pr create`.
    #[must_use]
    pub fn from_output(stdout: &str) -> Self {
        let url = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .unwrap_or_default()
            .to_string();
        Self {
            number: extract_pr_number(stdout),
            url,
        }
    }
}

/// Finds the PR number in text containing `/pull/<number>`.
#[must_use]
pub fn extract_pr_number(text: &str) -> Option<u64> {
    PR_NUMBER
        .captures(text)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
