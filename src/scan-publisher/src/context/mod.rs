//! Run metadata supplied by the CI environment.
//!
//! GitHub Actions exposes the triggering actor, event, repository and run
//! through `GITHUB_*` variables. They are read once into a [`RunContext`] that
//! is passed explicitly to the publishing flows.

use serde::Serialize;

/// Triggering user or app.
pub const ENV_ACTOR: &str = "GITHUB_ACTOR";
/// Name of the event that started the workflow.
pub const ENV_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
/// Owner of the repository running the workflow.
pub const ENV_REPOSITORY_OWNER: &str = "GITHUB_REPOSITORY_OWNER";
/// `owner/name` of the repository running the workflow.
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
/// Workflow name.
pub const ENV_WORKFLOW: &str = "GITHUB_WORKFLOW";
/// Unique run identifier.
pub const ENV_RUN_ID: &str = "GITHUB_RUN_ID";
/// Base URL of the GitHub server.
pub const ENV_SERVER_URL: &str = "GITHUB_SERVER_URL";

/// Event name GitHub uses for cron-triggered runs.
pub const SCHEDULE_EVENT: &str = "schedule";

const DEFAULT_SERVER_URL: &str = "https://github.com";
const UNKNOWN: &str = "unknown";

/// Environment-derived description of the current workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunContext {
    /// Triggering actor, if the environment supplied one.
    pub actor: Option<String>,

    /// Triggering event (`push`, `schedule`, ...).
    pub event_name: String,

    /// Owner of the repository the workflow runs in.
    pub repository_owner: Option<String>,

    /// `owner/name` of the repository the workflow runs in.
    pub repository: Option<String>,

    /// Workflow name.
    pub workflow: String,

    /// Run identifier.
    pub run_id: Option<String>,

    /// GitHub server base URL.
    pub server_url: String,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl RunContext {
    /// Reads the context from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the context from an arbitrary variable lookup.
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            actor: get(ENV_ACTOR),
            event_name: get(ENV_EVENT_NAME).unwrap_or_else(|| UNKNOWN.to_string()),
            repository_owner: get(ENV_REPOSITORY_OWNER),
            repository: get(ENV_REPOSITORY),
            workflow: get(ENV_WORKFLOW).unwrap_or_else(|| UNKNOWN.to_string()),
            run_id: get(ENV_RUN_ID),
            server_url: get(ENV_SERVER_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
        }
    }

    /// Returns true for cron-triggered runs, which have no human actor.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.event_name == SCHEDULE_EVENT
    }

    /// Link to the workflow run, when repository and run id are known.
    #[must_use]
    pub fn run_url(&self) -> Option<String> {
        match (&self.repository, &self.run_id) {
            (Some(repository), Some(run_id)) => Some(format!(
                "{}/{repository}/actions/runs/{run_id}",
                self.server_url
            )),
            _ => None,
        }
    }
}
