//! External command execution.
//!
//! Every `git` and `gh` call goes through the [`CommandRunner`] trait so the
//! publishing flows can be driven by [`SystemRunner`] in CI and by
//! [`ScriptedRunner`] in tests.

mod error;
mod invocation;
mod scripted;
mod system;

pub use error::ExecError;
pub use invocation::{CommandOutput, Invocation};
pub use scripted::ScriptedRunner;
pub use system::SystemRunner;

use async_trait::async_trait;

/// Runs external commands and captures their output.
///
/// Implementations report a non-zero exit through [`CommandOutput::code`], not
/// as an error. Only failure to start the process is an [`ExecError`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion.
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError>;
}

/// Runs `invocation` and turns a non-zero exit into [`ExecError::Failed`].
///
/// # Errors
///
/// Returns [`ExecError`] if the command cannot start or exits unsuccessfully.
pub async fn run_checked(
    runner: &dyn CommandRunner,
    invocation: &Invocation,
) -> Result<CommandOutput, ExecError> {
    let output = runner.run(invocation).await?;
    if !output.is_success() {
        return Err(ExecError::Failed {
            command: invocation.to_string(),
            output,
        });
    }
    Ok(output)
}
