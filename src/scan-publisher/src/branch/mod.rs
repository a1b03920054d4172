//! Branch naming and the local commit sequence.
//!
//! Branch names are `<prefix>[-<slug>]-<unix seconds>`. Two runs started in
//! the same second with the same prefix and slug collide; that race is accepted.

mod error;
mod git;

pub use error::BranchError;
pub use git::{commit, configure_identity, create_branch, has_changes, push, stage_paths};

use bstr::ByteSlice;
use serde::Serialize;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Components of a publishing branch name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchDescriptor {
    /// Fixed per-flow prefix.
    pub prefix: String,

    /// Optional identifier of the scanned repository.
    pub target_slug: Option<String>,

    /// Creation time in seconds since the Unix epoch.
    pub timestamp: u64,
}

impl BranchDescriptor {
    /// Creates a descriptor; the slug is sanitized for use in a ref name.
    #[must_use]
    pub fn new(prefix: &str, target_slug: Option<&str>, timestamp: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            target_slug: target_slug.map(sanitize_slug).filter(|s| !s.is_empty()),
            timestamp,
        }
    }

    /// Renders and validates the branch name.
    ///
    /// # Errors
    ///
    /// Returns [`BranchError::InvalidName`] if the result is not a valid git ref.
    pub fn to_branch_name(&self) -> Result<String, BranchError> {
        let name = self.to_string();
        validate_branch_name(&name)?;
        Ok(name)
    }
}

impl fmt::Display for BranchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target_slug {
            Some(slug) => write!(f, "{}-{slug}-{}", self.prefix, self.timestamp),
            None => write!(f, "{}-{}", self.prefix, self.timestamp),
        }
    }
}

/// Checks that `name` is usable as a branch name.
///
/// # Errors
///
/// Returns [`BranchError::InvalidName`] describing the first violation.
pub fn validate_branch_name(name: &str) -> Result<(), BranchError> {
    if name.trim().is_empty() {
        return Err(BranchError::InvalidName {
            name: name.to_string(),
            message: "name is empty".to_string(),
        });
    }
    gix_validate::reference::name_partial(name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| BranchError::InvalidName {
            name: name.to_string(),
            message: e.to_string(),
        })
}

/// Current time in seconds since the Unix epoch.
#[must_use]
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Replaces characters that are awkward in ref names with `-`.
fn sanitize_slug(slug: &str) -> String {
    let replaced: String = slug
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    replaced.trim_matches('-').to_string()
}
