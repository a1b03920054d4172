//! Per-label results.

use serde::Serialize;

/// Result of one best-effort label step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The step succeeded.
    Done,

    /// Label creation failed because the label already exists.
    AlreadyExists,

    /// The step failed; the run continues.
    Failed {
        /// Captured output or spawn error.
        error: String,
    },
}

impl StepOutcome {
    /// Returns true unless the step failed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Outcome of creating and attaching one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelOutcome {
    /// Label name.
    pub label: String,

    /// Result of `gh label create`.
    pub created: StepOutcome,

    /// Result of `gh pr edit --add-label`.
    pub attached: StepOutcome,
}

impl LabelOutcome {
    /// Human-readable warnings for the failed steps of this label.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let StepOutcome::Failed { error } = &self.created {
            warnings.push(format!("could not create label '{}': {error}", self.label));
        }
        if let StepOutcome::Failed { error } = &self.attached {
            warnings.push(format!("could not attach label '{}': {error}", self.label));
        }
        warnings
    }
}
