//! Best-effort PR labelling.
//!
//! Labels are cosmetic: every failure is logged and recorded, never propagated.

mod outcome;

pub use outcome::{LabelOutcome, StepOutcome};

use crate::config::LabelSpec;
use crate::exec::{CommandRunner, Invocation};
use std::path::Path;
use tracing::{debug, info, info_span, warn, Instrument};

/// Creates each label if missing and attaches it to PR `pr_number`.
///
/// Labels are processed in order; a failure on one label does not affect the
/// others.
pub async fn annotate_pull_request(
    runner: &dyn CommandRunner,
    dir: &Path,
    pr_number: u64,
    labels: &[LabelSpec],
) -> Vec<LabelOutcome> {
    let span = info_span!("annotate_pr", pr_number);

    async {
        let mut outcomes = Vec::with_capacity(labels.len());
        for label in labels {
            let created = create_label(runner, dir, label).await;
            let attached = attach_label(runner, dir, pr_number, &label.name).await;
            outcomes.push(LabelOutcome {
                label: label.name.clone(),
                created,
                attached,
            });
        }

        let attached = outcomes.iter().filter(|o| o.attached.is_ok()).count();
        info!(attached, total = outcomes.len(), "Labels processed");
        outcomes
    }
    .instrument(span)
    .await
}

/// Runs `gh label create`, treating "already exists" as success.
async fn create_label(runner: &dyn CommandRunner, dir: &Path, label: &LabelSpec) -> StepOutcome {
    let invocation = Invocation::gh([
        "label",
        "create",
        label.name.as_str(),
        "--description",
        label.description.as_str(),
        "--color",
        label.color.as_str(),
    ])
    .in_dir(dir);

    match runner.run(&invocation).await {
        Ok(output) if output.is_success() => {
            debug!(label = %label.name, "Label created");
            StepOutcome::Done
        }
        Ok(output) if output.combined().to_lowercase().contains("already exists") => {
            debug!(label = %label.name, "Label already exists");
            StepOutcome::AlreadyExists
        }
        Ok(output) => {
            let error = output.combined().trim().to_string();
            warn!(label = %label.name, error = %error, "Failed to create label");
            StepOutcome::Failed { error }
        }
        Err(e) => {
            warn!(label = %label.name, error = %e, "Failed to create label");
            StepOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Runs `gh pr edit --add-label`.
async fn attach_label(
    runner: &dyn CommandRunner,
    dir: &Path,
    pr_number: u64,
    label: &str,
) -> StepOutcome {
    let number = pr_number.to_string();
    let invocation =
        Invocation::gh(["pr", "edit", number.as_str(), "--add-label", label]).in_dir(dir);

    match runner.run(&invocation).await {
        Ok(output) if output.is_success() => {
            debug!(label, "Label attached");
            StepOutcome::Done
        }
        Ok(output) => {
            let error = output.combined().trim().to_string();
            warn!(label, error = %error, "Failed to attach label");
            StepOutcome::Failed { error }
        }
        Err(e) => {
            warn!(label, error = %e, "Failed to attach label");
            StepOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
