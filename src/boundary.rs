use std::fmt;

/// Non-fatal conditions noticed during a release run.
/// These are reported to the user; only some need confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The nearest tag is not a version, so an older reachable tag was used
    NonVersionNearestTag { nearest: String, used: String },
    /// Modifications or untracked files exist outside the staging area
    DirtyWorkingTree,
}

impl BoundaryWarning {
    /// Whether the operator must confirm before the run continues
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, BoundaryWarning::DirtyWorkingTree)
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NonVersionNearestTag { nearest, used } => {
                write!(
                    f,
                    "Nearest tag '{}' is not a version; using '{}' instead",
                    nearest, used
                )
            }
            BoundaryWarning::DirtyWorkingTree => write!(
                f,
                "Working tree has unstaged/uncommitted changes. \
                 Only staged changes will be committed."
            ),
        }
    }
}
