//! Commit author identity resolution.
//!
//! Scheduled runs have no human actor, so the repository owner stands in for
//! them. Bot accounts get the numeric-prefixed noreply address GitHub expects
//! for app commits.

use crate::context::RunContext;
use serde::Serialize;
use std::fmt;

/// Suffix GitHub appends to app account names.
pub const BOT_SUFFIX: &str = "[bot]";

/// Account id of `github-actions[bot]`, used as the noreply prefix for bots.
pub const BOT_ACCOUNT_ID: u64 = 41_898_282;

/// Identity used when the environment names nobody.
pub const FALLBACK_ACTOR: &str = "github-actions[bot]";

const NOREPLY_DOMAIN: &str = "users.noreply.github.com";

/// Name and email attributed to commits and used for PR assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorIdentity {
    /// Actor login.
    pub name: String,

    /// Synthesized noreply email.
    pub email: String,
}

impl ActorIdentity {
    /// Builds the identity for `name`, synthesizing its email.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        let email = if is_bot_name(name) {
            format!("{BOT_ACCOUNT_ID}+{name}@{NOREPLY_DOMAIN}")
        } else {
            format!("{name}@{NOREPLY_DOMAIN}")
        };
        Self {
            name: name.to_string(),
            email,
        }
    }

    /// Returns true for app accounts.
    #[must_use]
    pub fn is_bot(&self) -> bool {
        is_bot_name(&self.name)
    }

    /// Login to request as PR assignee. Bots are never assigned.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        (!self.is_bot()).then_some(self.name.as_str())
    }
}

impl fmt::Display for ActorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Returns true if `name` carries the bot suffix.
#[must_use]
pub fn is_bot_name(name: &str) -> bool {
    name.ends_with(BOT_SUFFIX)
}

/// Resolves the commit identity for a run. Never fails.
#[must_use]
pub fn resolve_identity(context: &RunContext) -> ActorIdentity {
    let name = if context.is_scheduled() {
        context
            .repository_owner
            .as_deref()
            .or(context.actor.as_deref())
    } else {
        context.actor.as_deref()
    };
    ActorIdentity::for_name(name.unwrap_or(FALLBACK_ACTOR))
}
