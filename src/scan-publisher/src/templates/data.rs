//! Values exposed to templates.

use crate::config::FlowKind;
use crate::context::RunContext;
use crate::identity::ActorIdentity;
use crate::target::TargetRepository;
use serde::Serialize;

/// Variables available to title, commit message and PR body templates.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    pub flow: FlowKind,
    pub event_name: String,
    pub actor: String,
    pub workflow: String,
    pub run_id: Option<String>,
    pub run_url: Option<String>,
    pub repository: Option<String>,
    pub server_url: String,
    pub branch: String,
    pub base_branch: String,
    pub paths: Vec<String>,
    pub labels: Vec<String>,
    pub summary_file: String,
    pub target: Option<TargetRepository>,
    pub results_file: Option<String>,
    pub timestamp: u64,
}

impl TemplateData {
    /// Collects template variables for one run.
    #[must_use]
    pub fn new(flow: FlowKind, context: &RunContext, identity: &ActorIdentity) -> Self {
        Self {
            flow,
            event_name: context.event_name.clone(),
            actor: identity.name.clone(),
            workflow: context.workflow.clone(),
            run_id: context.run_id.clone(),
            run_url: context.run_url(),
            repository: context.repository.clone(),
            server_url: context.server_url.clone(),
            branch: String::new(),
            base_branch: String::new(),
            paths: Vec::new(),
            labels: Vec::new(),
            summary_file: String::new(),
            target: None,
            results_file: None,
            timestamp: 0,
        }
    }
}
