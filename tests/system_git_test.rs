//! Runs the real `git` binary against scratch repositories.

use git_release_tag::cli::{run_release_workflow, ReleaseOptions, ReleaseOutcome};
use git_release_tag::config::Config;
use git_release_tag::domain::{Tag, Version};
use git_release_tag::git::{Repository, SystemGit};
use git_release_tag::release::{resolve, RepoState, Resolution};
use git_release_tag::ui::ScriptedAnswers;
use git_release_tag::ReleaseError;

mod common;
use common::{span, Fixture};

#[test]
fn test_nearest_version_tag() {
    let fx = Fixture::new();
    let first = fx.commit_at("README.md", "one\n", "first", 1_000);
    fx.tag("v1.0.0", first);
    let second = fx.commit_at("README.md", "two\n", "second", 2_000);
    fx.tag("v1.2.3", second);

    let git = SystemGit::discover(fx.path()).unwrap();
    let resolved = resolve(&git).unwrap();

    assert_eq!(resolved.tag.name, "v1.2.3");
    assert_eq!(resolved.resolution, Resolution::Nearest);
}

#[test]
fn test_untagged_head_uses_nearest_ancestor_tag() {
    let fx = Fixture::new();
    let first = fx.commit_at("README.md", "one\n", "first", 1_000);
    fx.tag("v0.3.1", first);
    fx.commit_at("README.md", "two\n", "second", 2_000);

    let git = SystemGit::discover(fx.path()).unwrap();
    assert_eq!(resolve(&git).unwrap().version, Version::new(0, 3, 1));
}

#[test]
fn test_marker_tag_falls_back_to_most_recent_version() {
    let fx = Fixture::new();
    let first = fx.commit_at("README.md", "one\n", "first", 1_000);
    fx.tag("v2.0.0", first);
    let second = fx.commit_at("README.md", "two\n", "second", 2_000);
    fx.tag("v1.5.0", second);
    let third = fx.commit_at("README.md", "three\n", "third", 3_000);
    fx.tag("deploy-marker", third);

    let git = SystemGit::discover(fx.path()).unwrap();
    let resolved = resolve(&git).unwrap();

    // most recent wins, not highest
    assert_eq!(resolved.tag.name, "v1.5.0");
    assert_eq!(
        resolved.resolution,
        Resolution::Fallback {
            skipped: Some("deploy-marker".to_string())
        }
    );
}

#[test]
fn test_repository_without_tags() {
    let fx = Fixture::new();
    fx.commit_at("README.md", "one\n", "first", 1_000);

    let git = SystemGit::discover(fx.path()).unwrap();
    let err = resolve(&git).unwrap_err();
    assert!(matches!(err, ReleaseError::Discovery));
}

#[test]
fn test_discover_from_subdirectory() {
    let fx = Fixture::new();
    fx.commit_at("web/index.html", "<html></html>\n", "first", 1_000);

    let git = SystemGit::discover(fx.path().join("web")).unwrap();
    assert_eq!(
        git.workdir().canonicalize().unwrap(),
        fx.path().canonicalize().unwrap()
    );
}

#[test]
fn test_repo_state_queries() {
    let fx = Fixture::new();
    let first = fx.commit_at("README.md", "one\n", "first", 1_000);
    fx.tag("v1.0.0", first);

    let git = SystemGit::discover(fx.path()).unwrap();
    assert!(git.tag_exists("v1.0.0").unwrap());
    assert!(!git.tag_exists("v1.0.1").unwrap());
    assert!(!git.has_staged_changes().unwrap());
    assert!(!git.is_working_tree_dirty().unwrap());

    fx.stage("notes.txt", "staged\n");
    let state = RepoState::capture(&git, &Tag::new("v1.0.1")).unwrap();
    assert!(state.has_staged_changes);
    assert!(!state.working_tree_dirty);

    fx.write_unstaged("README.md", "edited\n");
    assert!(git.is_working_tree_dirty().unwrap());
}

#[test]
fn test_untracked_file_makes_tree_dirty() {
    let fx = Fixture::new();
    fx.commit_at("README.md", "one\n", "first", 1_000);
    fx.write_unstaged("scratch.txt", "untracked\n");

    let git = SystemGit::discover(fx.path()).unwrap();
    assert!(git.is_working_tree_dirty().unwrap());
    assert!(!git.has_staged_changes().unwrap());
}

#[test]
fn test_full_release_creates_commit_and_tag() {
    let fx = Fixture::new();
    let base = fx.commit_at("dashboard.html", &span("v1.2.3"), "dashboard", 1_000);
    fx.tag("v1.2.3", base);

    fx.stage("dashboard.html", &span("v1.3.0"));
    fx.stage("dev/dashboard.html", &span("v1.3.0"));

    let git = SystemGit::discover(fx.path()).unwrap();
    let mut answers = ScriptedAnswers::new(["minor", "Release dashboard 1.3.0"]);
    let outcome =
        run_release_workflow(&git, &Config::default(), &mut answers, ReleaseOptions::default())
            .unwrap();

    assert!(matches!(outcome, ReleaseOutcome::Released(_)));
    let head = fx.head();
    assert_ne!(head, base);
    assert_eq!(fx.head_message().trim(), "Release dashboard 1.3.0");
    assert_eq!(fx.tag_target("v1.3.0"), Some(head));
    assert!(!git.has_staged_changes().unwrap());
}

#[test]
fn test_nothing_staged_leaves_history_alone() {
    let fx = Fixture::new();
    fx.commit_at("dashboard.html", &span("v1.2.4"), "dashboard", 1_000);
    let base = fx.commit_at("dev/dashboard.html", &span("v1.2.4"), "dev dashboard", 1_500);
    fx.tag("v1.2.3", base);

    let git = SystemGit::discover(fx.path()).unwrap();
    let mut answers = ScriptedAnswers::new(["patch", "msg"]);
    let err =
        run_release_workflow(&git, &Config::default(), &mut answers, ReleaseOptions::default())
            .unwrap_err();

    assert!(matches!(err, ReleaseError::NothingStaged));
    assert_eq!(fx.head(), base);
    assert_eq!(fx.tag_target("v1.2.4"), None);
}

#[test]
fn test_existing_tag_blocks_release() {
    let fx = Fixture::new();
    let base = fx.commit_at("dashboard.html", &span("v1.0.0"), "dashboard", 1_000);
    fx.tag("v1.0.0", base);
    // v1.1.0 already exists on a commit HEAD cannot reach
    let side = fx.commit_detached(base, "side.txt", "side\n", "side work", 1_500);
    fx.tag("v1.1.0", side);

    fx.stage("dashboard.html", &span("v1.1.0"));
    fx.stage("dev/dashboard.html", &span("v1.1.0"));

    let git = SystemGit::discover(fx.path()).unwrap();
    let mut answers = ScriptedAnswers::new(["minor", "msg"]);
    let err =
        run_release_workflow(&git, &Config::default(), &mut answers, ReleaseOptions::default())
            .unwrap_err();

    assert!(matches!(err, ReleaseError::Collision { .. }));
    assert_eq!(fx.head(), base);
}
