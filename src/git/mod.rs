//! Git operations abstraction layer
//!
//! The release workflow never talks to git directly. It goes through the
//! [Repository] trait, which has two implementations:
//!
//! - [system::SystemGit]: runs the `git` binary as a blocking subprocess
//! - [mock::MockRepository]: scripted state that records every call, for tests
//!
//! Query methods return [crate::error::Result] and fail with
//! [crate::error::ReleaseError::Git]. The two mutating methods return a
//! [GitOutput] instead, so the caller decides which typed error a failure
//! becomes and the collaborator's exit status survives for passthrough.

pub mod mock;
pub mod system;

pub use mock::{GitCall, MockRepository};
pub use system::SystemGit;

use crate::error::Result;
use std::path::Path;

/// Outcome of a mutating git command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether the command reported success
    pub success: bool,
    /// Exit status, when the process ran to completion
    pub status: Option<i32>,
    /// Captured standard output (empty when output went to the terminal)
    pub output: String,
    /// Human-readable reason for a failure
    pub failure_reason: Option<String>,
}

impl GitOutput {
    /// A successful command with the given output
    pub fn ok(output: impl Into<String>) -> Self {
        GitOutput {
            success: true,
            status: Some(0),
            output: output.into(),
            failure_reason: None,
        }
    }

    /// A failed command
    pub fn failed(status: Option<i32>, reason: impl Into<String>) -> Self {
        GitOutput {
            success: false,
            status,
            output: String::new(),
            failure_reason: Some(reason.into()),
        }
    }

    /// Failure reason, or a generic one derived from the status
    pub fn reason(&self) -> String {
        match (&self.failure_reason, self.status) {
            (Some(reason), _) => reason.clone(),
            (None, Some(code)) => format!("exit status {}", code),
            (None, None) => "terminated without an exit status".to_string(),
        }
    }
}

/// Version-control collaborator used by the release workflow
///
/// Every call is blocking. Nothing is cached: each call reflects the
/// repository as it is at the moment of the call.
pub trait Repository: Send + Sync {
    /// Root of the working tree; configured version files are relative to it
    fn workdir(&self) -> &Path;

    /// Nearest tag reachable from HEAD (`git describe --tags --abbrev=0`)
    ///
    /// Returns `Ok(None)` when HEAD has no reachable tag at all.
    fn nearest_tag(&self) -> Result<Option<String>>;

    /// Every tag reachable from HEAD, most recently created first
    fn reachable_tags_by_recency(&self) -> Result<Vec<String>>;

    /// Whether `refs/tags/<name>` exists
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Whether the index differs from HEAD
    fn has_staged_changes(&self) -> Result<bool>;

    /// Whether the working tree holds modifications outside the index,
    /// untracked files included
    fn is_working_tree_dirty(&self) -> Result<bool>;

    /// Create a commit from the staged content
    fn commit(&self, message: &str) -> GitOutput;

    /// Create a lightweight tag pointing at HEAD
    fn create_tag(&self, name: &str) -> GitOutput;
}
