//! Repository state checks that must pass before anything is committed.

use crate::domain::Tag;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// Snapshot of the repository taken right before a decision
///
/// Never reuse a snapshot across a prompt: the operator may stage or
/// tag things in another terminal while this process waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoState {
    pub target_tag_exists: bool,
    pub has_staged_changes: bool,
    pub working_tree_dirty: bool,
}

impl RepoState {
    /// Query the collaborator for a fresh snapshot
    pub fn capture<R: Repository + ?Sized>(repo: &R, target: &Tag) -> Result<Self> {
        Ok(RepoState {
            target_tag_exists: repo.tag_exists(target.as_str())?,
            has_staged_changes: repo.has_staged_changes()?,
            working_tree_dirty: repo.is_working_tree_dirty()?,
        })
    }

    /// Advisory only: a dirty tree needs operator confirmation, not an abort
    pub fn is_working_tree_dirty(&self) -> bool {
        self.working_tree_dirty
    }
}

/// Fail with `Collision` when the target tag is already taken.
pub fn ensure_tag_available(target: &Tag, state: &RepoState) -> Result<()> {
    if state.target_tag_exists {
        return Err(ReleaseError::Collision {
            tag: target.name.clone(),
        });
    }
    Ok(())
}

/// Fatal pre-commit checks, in order: tag collision, then nothing staged.
///
/// The dirty-tree advisory sits between the two and is handled by the
/// caller, since resolving it needs the operator.
pub fn check(target: &Tag, state: &RepoState) -> Result<()> {
    ensure_tag_available(target, state)?;

    if !state.has_staged_changes {
        return Err(ReleaseError::NothingStaged);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{GitCall, MockRepository};

    fn state(exists: bool, staged: bool, dirty: bool) -> RepoState {
        RepoState {
            target_tag_exists: exists,
            has_staged_changes: staged,
            working_tree_dirty: dirty,
        }
    }

    #[test]
    fn test_check_passes() {
        let tag = Tag::new("v1.3.0");
        assert!(check(&tag, &state(false, true, false)).is_ok());
        assert!(check(&tag, &state(false, true, true)).is_ok());
    }

    #[test]
    fn test_collision_is_checked_first() {
        let tag = Tag::new("v1.3.0");
        let err = check(&tag, &state(true, false, false)).unwrap_err();
        assert!(matches!(err, ReleaseError::Collision { ref tag } if tag == "v1.3.0"));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_nothing_staged() {
        let err = check(&Tag::new("v1.3.0"), &state(false, false, false)).unwrap_err();
        assert!(matches!(err, ReleaseError::NothingStaged));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_capture_queries_collaborator() {
        let repo = MockRepository::new()
            .with_existing_tag("v2.0.0")
            .with_staged_changes(true)
            .with_dirty_working_tree(true);

        let snapshot = RepoState::capture(&repo, &Tag::new("v2.0.0")).unwrap();
        assert_eq!(snapshot, state(true, true, true));
        assert!(snapshot.is_working_tree_dirty());
        assert_eq!(
            repo.calls(),
            vec![
                GitCall::TagExists("v2.0.0".to_string()),
                GitCall::HasStagedChanges,
                GitCall::IsWorkingTreeDirty,
            ]
        );
    }

    #[test]
    fn test_capture_is_never_cached() {
        let repo = MockRepository::new();
        let tag = Tag::new("v0.2.0");

        assert!(!RepoState::capture(&repo, &tag).unwrap().has_staged_changes);
        repo.set_staged_changes(true);
        assert!(RepoState::capture(&repo, &tag).unwrap().has_staged_changes);
    }
}
