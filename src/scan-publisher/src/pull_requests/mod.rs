//! Pull request creation through the GitHub CLI.

mod error;
mod request;
mod status;

pub use error::PrError;
pub use request::{extract_pr_number, CreatedPullRequest, PullRequestRequest};
pub use status::PrStatus;

use crate::exec::{CommandRunner, Invocation};
use std::path::Path;
use tracing::{error, info, info_span, warn, Instrument};

/// Opens a PR with `gh pr create`.
///
/// Creation is not retried; a failure usually means missing permissions or
/// an existing PR for the branch.
///
/// # Arguments
///
/// * `runner` - Command runner used to invoke `gh`
/// * `dir` - Repository working directory
/// * `request` - Title, body, branches and assignee
///
/// # Returns
///
/// The created PR. Its number is `None` if the output did not contain a
/// recognizable PR URL.
///
/// # Errors
///
/// Returns [`PrError`] if `gh` cannot be started or exits unsuccessfully.
pub async fn create_pull_request(
    runner: &dyn CommandRunner,
    dir: &Path,
    request: &PullRequestRequest,
) -> Result<CreatedPullRequest, PrError> {
    let span = info_span!("create_pr", head = %request.head, base = %request.base);

    async {
        info!(
            title = %request.title,
            assignee = request.assignee.as_deref().unwrap_or("-"),
            "Creating pull request"
        );

        let invocation = Invocation::gh(request.to_args()).in_dir(dir);
        let output = runner.run(&invocation).await?;

        if !output.is_success() {
            let combined = output.combined();
            error!(code = ?output.code, output = %combined.trim(), "PR creation failed");
            return Err(PrError::CreationFailed {
                code: output.code,
                output: combined.trim().to_string(),
            });
        }

        let created = CreatedPullRequest::from_output(&output.stdout);
        match created.number {
            Some(number) => info!(pr_number = number, url = %created.url, "PR created successfully"),
            None => warn!(
                output = %output.stdout.trim(),
                "PR created but its number could not be determined"
            ),
        }

        Ok(created)
    }
    .instrument(span)
    .await
}
