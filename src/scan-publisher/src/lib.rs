#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod aggregate;
pub mod branch;
pub mod config;
pub mod context;
pub mod exec;
pub mod identity;
pub mod labels;
pub mod pull_requests;
pub mod runner;
pub mod summary;
pub mod target;
pub mod templates;

pub use aggregate::{run_aggregation, AggregateError, AggregateReport};
pub use branch::{BranchDescriptor, BranchError};
pub use config::{ConfigError, FlowConfig, FlowKind, LabelSpec, PublisherConfig};
pub use context::RunContext;
pub use exec::{CommandOutput, CommandRunner, ExecError, Invocation, ScriptedRunner, SystemRunner};
pub use identity::{resolve_identity, ActorIdentity};
pub use labels::{annotate_pull_request, LabelOutcome, StepOutcome};
pub use pull_requests::{create_pull_request, PrError, PrStatus, PullRequestRequest};
pub use runner::{PublishPlan, Runner, RunnerConfig, RunnerError, Stage};
pub use summary::{RunOutcome, RunSummary};
pub use target::{TargetError, TargetRepository};
pub use templates::{TemplateData, TemplateError, TemplateRenderer};
