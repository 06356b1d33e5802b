//! Commit-then-tag sequencing.

use crate::domain::Tag;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use log::info;

/// Result of a completed commit + tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub tag: Tag,
    pub message: String,
}

/// Commit the staged content, then tag the new commit.
///
/// A failed commit stops everything: no tag call is made. A failed tag
/// leaves the commit in place and reports `TagFailed` so the operator can
/// tag by hand. There is no rollback.
pub fn execute<R: Repository + ?Sized>(repo: &R, message: &str, tag: &Tag) -> Result<Committed> {
    let commit = repo.commit(message);
    if !commit.success {
        return Err(ReleaseError::CommitFailed {
            status: commit.status,
            reason: commit.reason(),
        });
    }
    info!("commit created");

    let tagged = repo.create_tag(tag.as_str());
    if !tagged.success {
        return Err(ReleaseError::TagFailed {
            tag: tag.name.clone(),
            status: tagged.status,
            reason: tagged.reason(),
        });
    }
    info!("tagged HEAD with {}", tag);

    Ok(Committed {
        tag: tag.clone(),
        message: message.to_string(),
    })
}
