//! A [`CommandRunner`] that answers from a script instead of spawning processes.

use super::{CommandOutput, CommandRunner, ExecError, Invocation};
use async_trait::async_trait;
use std::sync::Mutex;

struct Rule {
    program: String,
    prefix: Vec<String>,
    output: CommandOutput,
}

impl Rule {
    fn answers(&self, invocation: &Invocation) -> bool {
        let prefix: Vec<&str> = self.prefix.iter().map(String::as_str).collect();
        invocation.matches(&self.program, &prefix)
    }
}

/// Replays canned outputs and records every invocation it receives.
///
/// Rules are matched in insertion order on program name and argument prefix.
/// Invocations without a matching rule succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    /// Creates a runner where every command succeeds silently.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers invocations of `program` whose arguments start with `prefix`.
    #[must_use]
    pub fn on(mut self, program: &str, prefix: &[&str], output: CommandOutput) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            prefix: prefix.iter().map(|s| (*s).to_string()).collect(),
            output,
        });
        self
    }

    /// Returns every invocation received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Returns the invocations matching `program` and `prefix`.
    #[must_use]
    pub fn calls_to(&self, program: &str, prefix: &[&str]) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|call| call.matches(program, prefix))
            .collect()
    }

    /// Returns true if any invocation matched `program` and `prefix`.
    #[must_use]
    pub fn was_called(&self, program: &str, prefix: &[&str]) -> bool {
        !self.calls_to(program, prefix).is_empty()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        let output = self
            .rules
            .iter()
            .find(|rule| rule.answers(invocation))
            .map(|rule| rule.output.clone())
            .unwrap_or_else(|| CommandOutput::success(""));

        Ok(output)
    }
}
