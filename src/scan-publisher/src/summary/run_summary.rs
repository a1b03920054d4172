//! Run summary types.

use super::result::RunOutcome;
use crate::config::FlowKind;
use crate::identity::ActorIdentity;
use crate::labels::LabelOutcome;
use crate::pull_requests::PrStatus;
use serde::Serialize;

/// Summary of a complete publishing run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Flow that was executed.
    pub flow: FlowKind,

    /// How the run ended.
    pub outcome: RunOutcome,

    /// Commit author; `None` when the run stopped before resolving it.
    pub identity: Option<ActorIdentity>,

    /// Branch that was (or would be) pushed.
    pub branch: Option<String>,

    /// PR creation status.
    pub pr: Option<PrStatus>,

    /// Per-label results, in configured order.
    pub labels: Vec<LabelOutcome>,

    /// Non-fatal problems encountered during the run.
    pub warnings: Vec<String>,
}

impl RunSummary {
    /// Creates a summary for a run that found nothing to publish.
    #[must_use]
    pub fn no_changes(flow: FlowKind) -> Self {
        Self {
            flow,
            outcome: RunOutcome::NoChanges,
            identity: None,
            branch: None,
            pr: None,
            labels: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a summary for a run that reached the publishing stage.
    #[must_use]
    pub fn new(flow: FlowKind, outcome: RunOutcome, identity: ActorIdentity, branch: String) -> Self {
        Self {
            flow,
            outcome,
            identity: Some(identity),
            branch: Some(branch),
            pr: None,
            labels: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Records label outcomes and folds their failures into the warnings.
    pub fn record_labels(&mut self, labels: Vec<LabelOutcome>) {
        self.warnings
            .extend(labels.iter().flat_map(LabelOutcome::warnings));
        self.labels = labels;
    }

    /// Returns true if a PR was opened.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.outcome == RunOutcome::Published
    }

    /// Returns true if any non-fatal problem was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
