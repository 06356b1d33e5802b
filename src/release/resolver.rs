//! Latest release tag discovery.

use crate::domain::{Tag, Version};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use log::{debug, warn};

/// Where the resolved tag came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The nearest reachable tag was already a version
    Nearest,
    /// The nearest tag was `skipped`; the newest reachable version tag was used
    Fallback { skipped: Option<String> },
}

/// A release tag together with its parsed version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub tag: Tag,
    pub version: Version,
    pub resolution: Resolution,
}

/// Find the latest version tag reachable from HEAD.
///
/// The nearest tag wins when it parses as a version. Otherwise every
/// reachable tag is scanned, newest first, and the first version tag is
/// taken. A marker tag sitting on top of history therefore never hides
/// the most recent release behind an older one.
pub fn resolve<R: Repository + ?Sized>(repo: &R) -> Result<ResolvedTag> {
    let nearest = repo.nearest_tag()?;

    if let Some(name) = &nearest {
        let tag = Tag::new(name.trim());
        if let Some(version) = tag.version() {
            debug!("nearest tag {} is a release tag", tag);
            return Ok(ResolvedTag {
                tag,
                version,
                resolution: Resolution::Nearest,
            });
        }
        debug!("nearest tag {} is not a version, scanning reachable tags", name);
    }

    let candidates = match repo.reachable_tags_by_recency() {
        Ok(tags) => tags,
        Err(e) => {
            warn!("could not list reachable tags: {}", e);
            Vec::new()
        }
    };

    candidates
        .iter()
        .map(|name| Tag::new(name.trim()))
        .find_map(|tag| {
            tag.version().map(|version| ResolvedTag {
                tag,
                version,
                resolution: Resolution::Fallback {
                    skipped: nearest.clone(),
                },
            })
        })
        .ok_or(ReleaseError::Discovery)
}
