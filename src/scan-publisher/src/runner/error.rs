//! Runner error types.

use super::stage::Stage;
use crate::exec::ExecError;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The scan target could not be parsed.
    #[error(transparent)]
    Target(#[from] crate::target::TargetError),

    /// The rendered branch name is not a valid ref.
    #[error(transparent)]
    Branch(#[from] crate::branch::BranchError),

    /// A title, message or body template failed to render.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// `gh pr create` failed.
    #[error(transparent)]
    Pr(#[from] crate::pull_requests::PrError),

    /// Result aggregation failed.
    #[error(transparent)]
    Aggregate(#[from] crate::aggregate::AggregateError),

    /// A git step failed.
    #[error("Failed to {stage}: {source}")]
    Step {
        stage: Stage,
        #[source]
        source: ExecError,
    },
}
