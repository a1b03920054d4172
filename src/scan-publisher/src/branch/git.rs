//! Local repository operations: identity, branch, stage, commit, push.
//!
//! Every failure here is fatal for the run.

use crate::exec::{run_checked, CommandRunner, ExecError, Invocation};
use crate::identity::ActorIdentity;
use std::path::Path;
use tracing::debug;

/// Sets `user.name` and `user.email` for commits in `dir`.
///
/// # Errors
///
/// Returns [`ExecError`] if either `git config` call fails.
pub async fn configure_identity(
    runner: &dyn CommandRunner,
    dir: &Path,
    identity: &ActorIdentity,
) -> Result<(), ExecError> {
    debug!(identity = %identity, "Configuring commit identity");
    run_git(runner, dir, &["config", "user.name", identity.name.as_str()]).await?;
    run_git(runner, dir, &["config", "user.email", identity.email.as_str()]).await
}

/// Creates and checks out a new branch.
///
/// # Errors
///
/// Returns [`ExecError`] if `git checkout -b` fails.
pub async fn create_branch(
    runner: &dyn CommandRunner,
    dir: &Path,
    branch_name: &str,
) -> Result<(), ExecError> {
    debug!(branch = %branch_name, "Creating branch");
    run_git(runner, dir, &["checkout", "-b", branch_name]).await
}

/// Stages `paths`.
///
/// # Errors
///
/// Returns [`ExecError`] if `git add` fails.
pub async fn stage_paths(
    runner: &dyn CommandRunner,
    dir: &Path,
    paths: &[String],
) -> Result<(), ExecError> {
    debug!(paths = ?paths, "Staging paths");
    let mut args = vec!["add", "--"];
    args.extend(paths.iter().map(String::as_str));
    run_git(runner, dir, &args).await
}

/// Commits the staged changes.
///
/// # Errors
///
/// Returns [`ExecError`] if `git commit` fails, including when nothing is staged.
pub async fn commit(runner: &dyn CommandRunner, dir: &Path, message: &str) -> Result<(), ExecError> {
    debug!("Committing changes");
    run_git(runner, dir, &["commit", "-m", message]).await
}

/// Pushes `branch_name` to `remote` and sets it as upstream.
///
/// # Errors
///
/// Returns [`ExecError`] if `git push` fails.
pub async fn push(
    runner: &dyn CommandRunner,
    dir: &Path,
    remote: &str,
    branch_name: &str,
) -> Result<(), ExecError> {
    debug!(remote = %remote, branch = %branch_name, "Pushing branch");
    run_git(runner, dir, &["push", "--set-upstream", remote, branch_name]).await
}

/// Checks whether `paths` have modified, staged or untracked content.
///
/// # Errors
///
/// Returns [`ExecError`] if `git status` fails.
pub async fn has_changes(
    runner: &dyn CommandRunner,
    dir: &Path,
    paths: &[String],
) -> Result<bool, ExecError> {
    let mut args = vec!["status", "--porcelain", "--untracked-files=all", "--"];
    args.extend(paths.iter().map(String::as_str));

    let output = run_checked(runner, &Invocation::git(args).in_dir(dir)).await?;
    Ok(!output.stdout.trim().is_empty())
}

/// Runs a git command.
async fn run_git(runner: &dyn CommandRunner, dir: &Path, args: &[&str]) -> Result<(), ExecError> {
    run_checked(runner, &Invocation::git(args.iter().copied()).in_dir(dir)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{CommandOutput, ScriptedRunner};

    #[tokio::test]
    async fn configures_both_identity_fields() {
        let runner = ScriptedRunner::new();
        let identity = ActorIdentity::for_name("alice");

        configure_identity(&runner, Path::new("/repo"), &identity)
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].args, ["config", "user.name", "alice"]);
        assert_eq!(
            calls[1].args,
            ["config", "user.email", "alice@users.noreply.github.com"]
        );
        assert_eq!(calls[0].cwd.as_deref(), Some(Path::new("/repo")));
    }

    #[tokio::test]
    async fn stages_only_configured_paths() {
        let runner = ScriptedRunner::new();
        let paths = vec!["results".to_string(), "SCAN_RESULTS.md".to_string()];

        stage_paths(&runner, Path::new("."), &paths).await.unwrap();

        assert_eq!(runner.calls()[0].args, ["add", "--", "results", "SCAN_RESULTS.md"]);
    }

    #[tokio::test]
    async fn clean_status_means_no_changes() {
        let runner = ScriptedRunner::new();
        let changed = has_changes(&runner, Path::new("."), &["results".to_string()])
            .await
            .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn untracked_files_count_as_changes() {
        let runner = ScriptedRunner::new().on(
            "git",
            &["status"],
            CommandOutput::success("?? results/octo-app-violations.json\n"),
        );
        let changed = has_changes(&runner, Path::new("."), &["results".to_string()])
            .await
            .unwrap();
        assert!(changed);
    }

    #[tokio::test]
    async fn push_failure_is_fatal() {
        let runner = ScriptedRunner::new().on(
            "git",
            &["push"],
            CommandOutput::failure(1, "remote rejected"),
        );

        let result = push(&runner, Path::new("."), "origin", "scan-results-1").await;

        assert!(matches!(result, Err(ExecError::Failed { .. })));
        assert_eq!(
            runner.calls()[0].args,
            ["push", "--set-upstream", "origin", "scan-results-1"]
        );
    }
}
