use crate::release::consistency::ConsistencyReport;
use thiserror::Error;

/// Unified error type for release operations
///
/// Every variant is terminal for a run. `exit_code` maps each one to a
/// distinct process status so calling automation can tell them apart.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Not inside a usable git repository: {0}")]
    Environment(String),

    #[error("No reachable tag matching x.y.z (or vX.Y.Z) was found")]
    Discovery,

    #[error("Tag {tag} already exists")]
    Collision { tag: String },

    #[error("No staged changes to commit")]
    NothingStaged,

    #[error("Embedded version mismatch in {} file(s)", .report.len())]
    Validation {
        expected: String,
        report: ConsistencyReport,
    },

    #[error("git commit failed: {reason}")]
    CommitFailed { status: Option<i32>, reason: String },

    #[error("git tag {tag} failed after the commit was created: {reason}")]
    TagFailed {
        tag: String,
        status: Option<i32>,
        reason: String,
    },

    #[error("`{command}` failed: {reason}")]
    Git {
        command: String,
        status: Option<i32>,
        reason: String,
    },

    #[error("Invalid bump level '{0}': expected major, minor or patch")]
    InvalidLevel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

/// Convenience type alias for Results in git-release-tag
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        ReleaseError::Environment(msg.into())
    }

    /// Get the process exit status for this error.
    ///
    /// Commit and tag failures pass the collaborator's own status through
    /// when it reported one.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Environment(_) => 2,
            ReleaseError::Discovery => 3,
            ReleaseError::NothingStaged => 4,
            ReleaseError::Collision { .. } => 5,
            ReleaseError::CommitFailed { status, .. } => passthrough(*status, 6),
            ReleaseError::TagFailed { status, .. } => passthrough(*status, 7),
            ReleaseError::Validation { .. } => 8,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with the next step to take
    pub fn display_with_suggestions(&self) -> String {
        match self {
            ReleaseError::Discovery => format!(
                "{}\n\nCreate one first, e.g. `git tag v0.1.0`.",
                self
            ),
            ReleaseError::NothingStaged => format!(
                "{}\n\nStage files first (e.g. `git add -A`).",
                self
            ),
            ReleaseError::Collision { tag } => format!(
                "{}\n\nNothing was committed. Pick another bump level or delete the tag with `git tag -d {}`.",
                self, tag
            ),
            ReleaseError::Validation { expected, report } => format!(
                "{}\nExpected version: {}\nProblems:\n{}\nFix the file(s) above and retry.",
                self, expected, report
            ),
            ReleaseError::TagFailed { tag, .. } => format!(
                "{}\n\nThe commit was kept. Tag it manually with `git tag {}`.",
                self, tag
            ),
            ReleaseError::InvalidLevel(_) => format!(
                "{}\n\nValid levels: major (1), minor (2), patch (3).",
                self
            ),
            _ => self.to_string(),
        }
    }
}

/// Statuses 0 or unknown would hide the failure, so fall back to `default`.
fn passthrough(status: Option<i32>, default: i32) -> i32 {
    match status {
        Some(code) if code != 0 => code,
        _ => default,
    }
}
