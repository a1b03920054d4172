//! Orchestrates the publishing flows.
//!
//! A run moves through identity resolution, branch creation, commit, push,
//! PR creation and labelling in that order. Git steps and PR creation are
//! fatal; labelling only produces warnings.

mod config;
mod error;
mod plan;
mod stage;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use plan::PublishPlan;
pub use stage::Stage;

use crate::aggregate::{preview_aggregation, run_aggregation, AggregateReport};
use crate::branch::{self, unix_timestamp, BranchDescriptor};
use crate::config::FlowKind;
use crate::exec::{CommandRunner, ExecError, SystemRunner};
use crate::identity::resolve_identity;
use crate::labels::annotate_pull_request;
use crate::pull_requests::{create_pull_request, PrStatus, PullRequestRequest};
use crate::summary::{RunOutcome, RunSummary};
use crate::target::TargetRepository;
use crate::templates::{TemplateData, TemplateRenderer};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

/// Runs publishing flows against a working directory.
pub struct Runner {
    config: RunnerConfig,
    commands: Arc<dyn CommandRunner>,
    renderer: TemplateRenderer,
    clock: Clock,
}

impl Runner {
    /// Builds a runner that spawns real `git` and `gh` processes.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_command_runner(config, Arc::new(SystemRunner))
    }

    /// Builds a runner that sends commands to `commands`.
    #[must_use]
    pub fn with_command_runner(config: RunnerConfig, commands: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            commands,
            renderer: TemplateRenderer::new(),
            clock: Box::new(unix_timestamp),
        }
    }

    /// Replaces the timestamp source used for branch names.
    #[must_use]
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Publishes the summary file.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if rendering, a git step or PR creation fails.
    pub async fn publish_summary(&self) -> Result<RunSummary, RunnerError> {
        self.publish(FlowKind::Summary, None).await
    }

    /// Publishes scan results for the repository at `target_url`.
    ///
    /// Ends successfully with [`RunOutcome::NoChanges`] when the result paths
    /// are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the URL is invalid, rendering, a git step
    /// or PR creation fails.
    pub async fn publish_scan_results(&self, target_url: &str) -> Result<RunSummary, RunnerError> {
        let target = TargetRepository::parse(target_url)?;
        self.publish(FlowKind::ScanResults, Some(target)).await
    }

    /// Merges scanner output for `org/repo` and rewrites the summary table.
    ///
    /// `results_dir` and the configured summary file are resolved against the
    /// working directory. In dry-run mode the table is printed and nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Aggregate`] on invalid names or file errors.
    pub fn aggregate(
        &self,
        org: &str,
        repo: &str,
        results_dir: &Path,
    ) -> Result<AggregateReport, RunnerError> {
        let publisher = self.config.publisher();
        let workdir = self.config.workdir();
        let results_dir = workdir.join(results_dir);
        let summary_file = workdir.join(&publisher.summary_file);

        if !self.config.dry_run() {
            return Ok(run_aggregation(
                org,
                repo,
                &results_dir,
                &summary_file,
                &publisher.scanners,
            )?);
        }

        let (report, table) =
            preview_aggregation(org, repo, &results_dir, &summary_file, &publisher.scanners)?;
        println!("\n[DRY RUN] Would write {}:\n", report.summary_file.display());
        for line in table.lines() {
            println!("  {line}");
        }
        println!();
        Ok(report)
    }

    /// Renders everything a run of `kind` would do.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the branch name is invalid or a template
    /// fails to render.
    pub fn plan(
        &self,
        kind: FlowKind,
        target: Option<&TargetRepository>,
    ) -> Result<PublishPlan, RunnerError> {
        let publisher = self.config.publisher();
        let context = self.config.context();
        let flow = publisher.flow(kind);

        let identity = resolve_identity(context);
        info!(identity = %identity, event = %context.event_name, "Resolved identity");

        let timestamp = (self.clock)();
        let branch = BranchDescriptor::new(
            &flow.branch_prefix,
            target.map(|t| t.slug.as_str()),
            timestamp,
        )
        .to_branch_name()?;

        let mut data = TemplateData::new(kind, context, &identity);
        data.branch = branch.clone();
        data.base_branch = publisher.base_branch.clone();
        data.paths = flow.paths.clone();
        data.labels = flow.labels.iter().map(|l| l.name.clone()).collect();
        data.summary_file = publisher.summary_file.display().to_string();
        data.results_file = target.map(|t| {
            publisher
                .results_dir
                .join(t.results_file_name())
                .display()
                .to_string()
        });
        data.target = target.cloned();
        data.timestamp = timestamp;

        let commit_message = self
            .renderer
            .render_commit_message(&flow.commit_message_format, &data)?;
        let pull_request = PullRequestRequest {
            title: self.renderer.render_pr_title(&flow.pr_title_format, &data)?,
            body: self.renderer.render_pr_body(&flow.pr_body_template, &data)?,
            base: publisher.base_branch.clone(),
            head: branch.clone(),
            assignee: identity.assignee().map(str::to_string),
        };

        Ok(PublishPlan {
            flow: kind,
            identity,
            branch,
            remote: publisher.remote.clone(),
            paths: flow.paths.clone(),
            commit_message,
            pull_request,
            labels: flow.labels.clone(),
        })
    }

    async fn publish(
        &self,
        kind: FlowKind,
        target: Option<TargetRepository>,
    ) -> Result<RunSummary, RunnerError> {
        let span = info_span!(
            "publish",
            flow = %kind,
            target = target.as_ref().map_or("-", |t| t.full_name.as_str())
        );

        async {
            let dir = self.config.workdir();
            let commands = self.commands.as_ref();
            let flow = self.config.publisher().flow(kind);

            if kind == FlowKind::ScanResults && !self.config.dry_run() {
                let changed = branch::has_changes(commands, dir, &flow.paths)
                    .await
                    .map_err(step(Stage::CheckChanges))?;
                if !changed {
                    info!(paths = ?flow.paths, "No changes to publish");
                    return Ok(RunSummary::no_changes(kind));
                }
            }

            let plan = self.plan(kind, target.as_ref())?;

            if self.config.dry_run() {
                plan.print_preview();
                let mut summary =
                    RunSummary::new(kind, RunOutcome::DryRun, plan.identity, plan.branch);
                summary.pr = Some(PrStatus::Skipped {
                    reason: "dry run".to_string(),
                });
                return Ok(summary);
            }

            branch::configure_identity(commands, dir, &plan.identity)
                .await
                .map_err(step(Stage::ConfigureIdentity))?;
            branch::create_branch(commands, dir, &plan.branch)
                .await
                .map_err(step(Stage::CreateBranch))?;
            branch::stage_paths(commands, dir, &plan.paths)
                .await
                .map_err(step(Stage::StagePaths))?;
            branch::commit(commands, dir, &plan.commit_message)
                .await
                .map_err(step(Stage::Commit))?;
            branch::push(commands, dir, &plan.remote, &plan.branch)
                .await
                .map_err(step(Stage::Push))?;
            info!(branch = %plan.branch, "Branch pushed");

            let created = create_pull_request(commands, dir, &plan.pull_request).await?;

            let mut summary = RunSummary::new(
                kind,
                RunOutcome::Published,
                plan.identity.clone(),
                plan.branch.clone(),
            );
            summary.pr = Some(PrStatus::Created {
                number: created.number,
                url: created.url.clone(),
            });

            match created.number {
                Some(number) => {
                    let outcomes = annotate_pull_request(commands, dir, number, &plan.labels).await;
                    summary.record_labels(outcomes);
                }
                None if !plan.labels.is_empty() => {
                    warn!("PR number unknown, skipping labels");
                    summary
                        .warnings
                        .push("PR number could not be determined; labels were not applied".to_string());
                }
                None => {}
            }

            Ok(summary)
        }
        .instrument(span)
        .await
    }
}

fn step(stage: Stage) -> impl FnOnce(ExecError) -> RunnerError {
    move |source| RunnerError::Step { stage, source }
}
