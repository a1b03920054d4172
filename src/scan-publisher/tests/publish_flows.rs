use std::path::{Path, PathBuf};
use std::sync::Arc;

use scan_publisher::{
    CommandOutput, Invocation, PrError, PublisherConfig, RunContext, RunOutcome, Runner,
    RunnerConfig, RunnerError, ScriptedRunner, StepOutcome,
};

const TIMESTAMP: u64 = 1_700_000_000;
const PR_URL: &str = "https://github.com/acme/scans/pull/42";

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn context(actor: &str, event: &str, owner: &str) -> RunContext {
    let vars = [
        ("GITHUB_ACTOR", actor),
        ("GITHUB_EVENT_NAME", event),
        ("GITHUB_REPOSITORY_OWNER", owner),
        ("GITHUB_REPOSITORY", "acme/scans"),
        ("GITHUB_WORKFLOW", "Security Scan"),
        ("GITHUB_RUN_ID", "7"),
    ];
    RunContext::from_lookup(|key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_string())
    })
}

/// A repository with pending changes and a `gh` that prints a PR URL.
fn dirty_repo() -> ScriptedRunner {
    ScriptedRunner::new()
        .on(
            "git",
            &["status"],
            CommandOutput::success("?? results/octo-app-violations.json\n"),
        )
        .on("gh", &["pr", "create"], CommandOutput::success(format!("{PR_URL}\n")))
}

fn runner(commands: &Arc<ScriptedRunner>, publisher: PublisherConfig, context: RunContext) -> Runner {
    let config = RunnerConfig::new(PathBuf::from("."), false, publisher, context);
    Runner::with_command_runner(config, commands.clone()).with_clock(|| TIMESTAMP)
}

fn arg_after<'a>(call: &'a Invocation, flag: &str) -> Option<&'a str> {
    call.args
        .iter()
        .position(|arg| arg == flag)
        .and_then(|i| call.args.get(i + 1))
        .map(String::as_str)
}

fn single_call(commands: &ScriptedRunner, program: &str, prefix: &[&str]) -> Invocation {
    let calls = commands.calls_to(program, prefix);
    assert_eq!(calls.len(), 1, "expected one {program} {prefix:?} call");
    calls.into_iter().next().unwrap()
}

#[tokio::test]
async fn human_push_is_assigned_to_the_actor() {
    let commands = Arc::new(dirty_repo());
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );

    let summary = runner.publish_summary().await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Published);
    let identity = summary.identity.unwrap();
    assert_eq!(identity.name, "alice");
    assert_eq!(identity.email, "alice@users.noreply.github.com");

    let email = single_call(&commands, "git", &["config", "user.email"]);
    assert_eq!(email.args[2], "alice@users.noreply.github.com");

    let pr = single_call(&commands, "gh", &["pr", "create"]);
    assert_eq!(arg_after(&pr, "--assignee"), Some("alice"));
    assert_eq!(arg_after(&pr, "--head"), Some("update-readme-1700000000"));
    assert_eq!(arg_after(&pr, "--base"), Some("main"));
}

#[tokio::test]
async fn scheduled_bot_run_acts_as_repository_owner() {
    let commands = Arc::new(dirty_repo());
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("github-actions[bot]", "schedule", "acme"),
    );

    let summary = runner
        .publish_scan_results("https://github.com/octo/app")
        .await
        .unwrap();

    let identity = summary.identity.unwrap();
    assert_eq!(identity.name, "acme");
    assert_eq!(identity.email, "acme@users.noreply.github.com");

    let pr = single_call(&commands, "gh", &["pr", "create"]);
    assert_eq!(arg_after(&pr, "--assignee"), Some("acme"));
    assert!(arg_after(&pr, "--body")
        .unwrap()
        .contains("triggered by the schedule"));
}

#[tokio::test]
async fn bot_actor_is_never_assigned() {
    let commands = Arc::new(dirty_repo());
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("dependabot[bot]", "push", "acme"),
    );

    runner.publish_summary().await.unwrap();

    let email = single_call(&commands, "git", &["config", "user.email"]);
    assert_eq!(
        email.args[2],
        "41898282+dependabot[bot]@users.noreply.github.com"
    );
    let pr = single_call(&commands, "gh", &["pr", "create"]);
    assert_eq!(arg_after(&pr, "--assignee"), None);
}

#[tokio::test]
async fn scan_flow_runs_git_steps_in_order() {
    let commands = Arc::new(dirty_repo());
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );

    runner
        .publish_scan_results("https://github.com/octo/app")
        .await
        .unwrap();

    let git: Vec<String> = commands
        .calls()
        .iter()
        .filter(|call| call.program == "git")
        .map(|call| call.args[0].clone())
        .collect();
    assert_eq!(
        git,
        ["status", "config", "config", "checkout", "add", "commit", "push"]
    );

    let push = single_call(&commands, "git", &["push"]);
    assert_eq!(
        push.args,
        [
            "push",
            "--set-upstream",
            "origin",
            "scan-results-octo-app-1700000000"
        ]
    );

    let commit = single_call(&commands, "git", &["commit"]);
    assert!(commit.args[2].contains("octo/app"));
    assert!(commit.args[2].contains("results/octo-app-violations.json"));
}

#[tokio::test]
async fn clean_tree_publishes_nothing() {
    let commands = Arc::new(ScriptedRunner::new().on("git", &["status"], CommandOutput::success("")));
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );

    let summary = runner
        .publish_scan_results("https://github.com/octo/app")
        .await
        .unwrap();

    assert_eq!(summary.outcome, RunOutcome::NoChanges);
    assert!(!commands.was_called("git", &["commit"]));
    assert!(!commands.was_called("gh", &["pr", "create"]));
}

#[tokio::test]
async fn missing_pr_number_skips_labels() {
    let commands = Arc::new(
        ScriptedRunner::new()
            .on("git", &["status"], CommandOutput::success(" M SCAN_RESULTS.md\n"))
            .on("gh", &["pr", "create"], CommandOutput::success("Created pull request\n")),
    );
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );

    let summary = runner
        .publish_scan_results("https://github.com/octo/app")
        .await
        .unwrap();

    assert_eq!(summary.outcome, RunOutcome::Published);
    assert_eq!(summary.pr.unwrap().number(), None);
    assert!(summary.labels.is_empty());
    assert_eq!(summary.warnings.len(), 1);
    assert!(!commands.was_called("gh", &["label"]));
    assert!(!commands.was_called("gh", &["pr", "edit"]));
}

#[tokio::test]
async fn existing_label_does_not_stop_attachments() {
    let commands = Arc::new(
        dirty_repo()
            .on(
                "gh",
                &["label", "create", "security"],
                CommandOutput::failure(1, "label with name \"security\" already exists"),
            )
            .on(
                "gh",
                &["pr", "edit", "42", "--add-label", "vulnerability-scan"],
                CommandOutput::failure(1, "could not add label"),
            ),
    );
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );

    let summary = runner
        .publish_scan_results("https://github.com/octo/app")
        .await
        .unwrap();

    assert_eq!(commands.calls_to("gh", &["label", "create"]).len(), 3);
    assert_eq!(commands.calls_to("gh", &["pr", "edit", "42"]).len(), 3);

    assert_eq!(summary.labels[0].created, StepOutcome::AlreadyExists);
    assert_eq!(summary.labels[0].attached, StepOutcome::Done);
    assert!(!summary.labels[1].attached.is_ok());
    assert!(summary.labels[2].attached.is_ok());
    assert_eq!(summary.warnings.len(), 1);
    assert!(summary.warnings[0].contains("vulnerability-scan"));
}

#[tokio::test]
async fn pr_creation_failure_is_fatal() {
    let commands = Arc::new(ScriptedRunner::new().on(
        "gh",
        &["pr", "create"],
        CommandOutput::failure(1, "a pull request for branch already exists"),
    ));
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );

    let result = runner.publish_summary().await;

    match result {
        Err(RunnerError::Pr(PrError::CreationFailed { code, output })) => {
            assert_eq!(code, Some(1));
            assert!(output.contains("already exists"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!commands.was_called("gh", &["label"]));
}

#[tokio::test]
async fn push_failure_stops_before_pr() {
    let commands = Arc::new(
        dirty_repo().on("git", &["push"], CommandOutput::failure(128, "permission denied")),
    );
    let runner = runner(
        &commands,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );

    let result = runner
        .publish_scan_results("https://github.com/octo/app")
        .await;

    assert!(matches!(result, Err(RunnerError::Step { .. })));
    assert!(!commands.was_called("gh", &["pr", "create"]));
}

#[tokio::test]
async fn config_file_overrides_scan_flow() {
    let publisher =
        PublisherConfig::load(&fixtures_root().join("config/publisher.toml")).unwrap();
    let commands = Arc::new(dirty_repo());
    let runner = runner(&commands, publisher, context("alice", "push", "acme"));

    let summary = runner
        .publish_scan_results("octo/app")
        .await
        .unwrap();

    assert_eq!(
        summary.branch.as_deref(),
        Some("security-scan-octo-app-1700000000")
    );

    let pr = single_call(&commands, "gh", &["pr", "create"]);
    assert_eq!(arg_after(&pr, "--base"), Some("develop"));
    assert_eq!(
        arg_after(&pr, "--body").map(str::trim),
        Some(
            "Results for octo/app in `results/octo-app-violations.json`.\n\n\
             Opened from `security-scan-octo-app-1700000000` by @alice."
        )
    );

    let labels = commands.calls_to("gh", &["label", "create"]);
    assert_eq!(labels.len(), 2);
    assert_eq!(arg_after(&labels[0], "--color"), Some("0e8a16"));
}

#[test]
fn plan_does_not_touch_the_working_directory() {
    let commands = Arc::new(ScriptedRunner::new());
    let config = RunnerConfig::new(
        Path::new("/nonexistent").to_path_buf(),
        true,
        PublisherConfig::default(),
        context("alice", "push", "acme"),
    );
    let runner = Runner::with_command_runner(config, commands.clone()).with_clock(|| TIMESTAMP);

    let plan = runner
        .plan(scan_publisher::FlowKind::Summary, None)
        .unwrap();

    assert_eq!(plan.paths, ["README.md"]);
    assert!(commands.calls().is_empty());
}
