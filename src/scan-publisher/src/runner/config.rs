//! Runner configuration.

use crate::config::PublisherConfig;
use crate::context::RunContext;
use std::path::{Path, PathBuf};

/// Configuration for a publishing run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repository working directory all commands run in.
    workdir: PathBuf,
    /// Whether to render the plan without running commands.
    dry_run: bool,
    /// Publisher settings.
    publisher: PublisherConfig,
    /// CI environment inputs.
    context: RunContext,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    #[must_use]
    pub fn new(
        workdir: PathBuf,
        dry_run: bool,
        publisher: PublisherConfig,
        context: RunContext,
    ) -> Self {
        Self {
            workdir,
            dry_run,
            publisher,
            context,
        }
    }

    /// Returns the working directory.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Returns whether dry-run mode is enabled.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the publisher settings.
    #[must_use]
    pub fn publisher(&self) -> &PublisherConfig {
        &self.publisher
    }

    /// Returns the CI environment inputs.
    #[must_use]
    pub fn context(&self) -> &RunContext {
        &self.context
    }
}
