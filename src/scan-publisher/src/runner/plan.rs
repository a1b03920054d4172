//! Rendered publishing plan.

use crate::config::{FlowKind, LabelSpec};
use crate::identity::ActorIdentity;
use crate::pull_requests::PullRequestRequest;

/// Everything a run will do, rendered before any command is issued.
#[derive(Debug, Clone)]
pub struct PublishPlan {
    /// Flow being executed.
    pub flow: FlowKind,

    /// Commit author and PR assignee source.
    pub identity: ActorIdentity,

    /// Branch to create and push.
    pub branch: String,

    /// Remote the branch is pushed to.
    pub remote: String,

    /// Paths to stage.
    pub paths: Vec<String>,

    /// Rendered commit message.
    pub commit_message: String,

    /// PR to open.
    pub pull_request: PullRequestRequest,

    /// Labels to create and attach.
    pub labels: Vec<LabelSpec>,
}

impl PublishPlan {
    /// Prints the plan for a dry run.
    pub fn print_preview(&self) {
        println!("\n[DRY RUN] Flow: {}", self.flow);
        println!("  Identity: {}", self.identity);
        println!("  Would create branch: {}", self.branch);
        println!("  Would stage: {}", self.paths.join(", "));
        println!("  Would push to: {}", self.remote);
        println!("  Commit message:");
        for line in self.commit_message.lines() {
            println!("    {line}");
        }
        println!(
            "  Would create PR: \"{}\" ({} <- {})",
            self.pull_request.title, self.pull_request.base, self.pull_request.head
        );
        println!(
            "  Assignee: {}",
            self.pull_request.assignee.as_deref().unwrap_or("none")
        );
        let labels: Vec<&str> = self.labels.iter().map(|l| l.name.as_str()).collect();
        println!("  Labels: {}", labels.join(", "));

        println!("\n  PR body:");
        for line in self.pull_request.body.lines().take(10) {
            println!("    {line}");
        }
        if self.pull_request.body.lines().count() > 10 {
            println!("    ...");
        }
        println!();
    }
}
