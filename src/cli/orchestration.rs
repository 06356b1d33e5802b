//! Main workflow orchestration logic
//!
//! Runs one release from tag discovery to the final tag, talking to git
//! only through [Repository] and to the operator only through
//! [AnswerSource]. `main.rs` just wires in the real implementations.

use log::info;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::Tag;
use crate::error::Result;
use crate::git::Repository;
use crate::release::{consistency, guard, resolver, transaction, Committed, RepoState, Resolution};
use crate::ui::{self, AnswerSource, Question};

/// Options for one release run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Stop before the commit and tag calls
    pub dry_run: bool,
}

/// How a release run ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Commit and tag were both created
    Released(Committed),
    /// Dry run: everything checked out, nothing was written
    Planned { tag: Tag, message: String },
    /// The operator declined, or input ran out, before any mutation
    Cancelled,
}

/// Main release workflow
///
/// 1. Resolve the latest release tag
/// 2. Ask for a bump level and compute the next version
/// 3. Refuse early if the next tag already exists
/// 4. Check embedded versions in every configured file
/// 5. Ask for a commit message
/// 6. Confirm a dirty working tree
/// 7. Re-check collision and staging on a fresh snapshot
/// 8. Commit, then tag
pub fn run_release_workflow<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    answers: &mut dyn AnswerSource,
    options: ReleaseOptions,
) -> Result<ReleaseOutcome> {
    let latest = resolver::resolve(repo)?;
    if let Resolution::Fallback {
        skipped: Some(nearest),
    } = &latest.resolution
    {
        ui::display_boundary_warning(&BoundaryWarning::NonVersionNearestTag {
            nearest: nearest.clone(),
            used: latest.tag.name.clone(),
        });
    }
    ui::display_latest_tag(&latest.tag, &latest.version);

    let Some(level) = ui::prompt_bump_level(answers)? else {
        return Ok(cancelled());
    };
    let next = latest.version.bump(level);
    let next_tag = Tag::for_version(&next);
    ui::display_proposed_tag(&latest.tag, &next_tag);

    // Cheap fatal check before bothering the operator any further.
    guard::ensure_tag_available(&next_tag, &RepoState::capture(repo, &next_tag)?)?;

    let marker = config.version_marker()?;
    consistency::ensure_consistent(&next, repo.workdir(), &config.version_files, &marker)?;
    info!(
        "{} version file(s) embed {}",
        config.version_files.len(),
        next.marker_text()
    );

    let Some(message) = ui::prompt_commit_message(answers)? else {
        return Ok(cancelled());
    };

    if repo.is_working_tree_dirty()? {
        let warning = BoundaryWarning::DirtyWorkingTree;
        ui::display_boundary_warning(&warning);
        if warning.needs_confirmation() && !ui::confirm(answers, Question::ConfirmDirtyTree)? {
            return Ok(cancelled());
        }
    }

    // Prompts above may have waited a while; look again. No input is read
    // between this check and the commit.
    guard::check(&next_tag, &RepoState::capture(repo, &next_tag)?)?;

    if options.dry_run {
        ui::display_plan(&message, &next_tag);
        return Ok(ReleaseOutcome::Planned {
            tag: next_tag,
            message,
        });
    }

    ui::display_status("Running: git commit -m <message>");
    let committed = transaction::execute(repo, &message, &next_tag)?;
    ui::display_success(&format!("Tagged HEAD with {}", committed.tag));

    Ok(ReleaseOutcome::Released(committed))
}

fn cancelled() -> ReleaseOutcome {
    println!("Aborted.");
    ReleaseOutcome::Cancelled
}
