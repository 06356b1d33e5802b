use crate::error::Result;
use crate::git::{GitOutput, Repository};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A collaborator call, as recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    NearestTag,
    ReachableTags,
    TagExists(String),
    HasStagedChanges,
    IsWorkingTreeDirty,
    Commit(String),
    CreateTag(String),
}

#[derive(Debug, Default)]
struct MockState {
    existing_tags: HashSet<String>,
    staged: bool,
    dirty: bool,
    calls: Vec<GitCall>,
}

/// Mock repository for testing without actual git operations
///
/// Holds scripted repository state and records every call. A successful
/// commit clears the staged flag; a successful tag is added to the
/// existing tags, so repeated queries see the updated state.
pub struct MockRepository {
    workdir: PathBuf,
    nearest_tag: Option<String>,
    reachable_tags: Vec<String>,
    commit_failure: Option<GitOutput>,
    tag_failure: Option<GitOutput>,
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository rooted at `.`
    pub fn new() -> Self {
        MockRepository {
            workdir: PathBuf::from("."),
            nearest_tag: None,
            reachable_tags: Vec::new(),
            commit_failure: None,
            tag_failure: None,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Root used for resolving version files
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Tag returned by the nearest-tag query
    pub fn with_nearest_tag(mut self, tag: impl Into<String>) -> Self {
        self.nearest_tag = Some(tag.into());
        self
    }

    /// Reachable tags, most recent first. They also count as existing tags.
    pub fn with_reachable_tags(mut self, tags: &[&str]) -> Self {
        self.reachable_tags = tags.iter().map(|t| t.to_string()).collect();
        self.lock().existing_tags.extend(self.reachable_tags.clone());
        self
    }

    /// A tag that exists but is not reachable from HEAD
    pub fn with_existing_tag(self, tag: impl Into<String>) -> Self {
        self.lock().existing_tags.insert(tag.into());
        self
    }

    pub fn with_staged_changes(self, staged: bool) -> Self {
        self.lock().staged = staged;
        self
    }

    pub fn with_dirty_working_tree(self, dirty: bool) -> Self {
        self.lock().dirty = dirty;
        self
    }

    /// Make the commit call fail with the given status
    pub fn failing_commit(mut self, status: Option<i32>, reason: impl Into<String>) -> Self {
        self.commit_failure = Some(GitOutput::failed(status, reason));
        self
    }

    /// Make the tag call fail with the given status
    pub fn failing_tag(mut self, status: Option<i32>, reason: impl Into<String>) -> Self {
        self.tag_failure = Some(GitOutput::failed(status, reason));
        self
    }

    /// Change the staged flag between calls
    pub fn set_staged_changes(&self, staged: bool) {
        self.lock().staged = staged;
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.lock().calls.clone()
    }

    /// Only the mutating calls (commit and tag), in order
    pub fn mutations(&self) -> Vec<GitCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, GitCall::Commit(_) | GitCall::CreateTag(_)))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: GitCall) -> MutexGuard<'_, MockState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn nearest_tag(&self) -> Result<Option<String>> {
        self.record(GitCall::NearestTag);
        Ok(self.nearest_tag.clone())
    }

    fn reachable_tags_by_recency(&self) -> Result<Vec<String>> {
        self.record(GitCall::ReachableTags);
        Ok(self.reachable_tags.clone())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let state = self.record(GitCall::TagExists(name.to_string()));
        Ok(state.existing_tags.contains(name))
    }

    fn has_staged_changes(&self) -> Result<bool> {
        let state = self.record(GitCall::HasStagedChanges);
        Ok(state.staged)
    }

    fn is_working_tree_dirty(&self) -> Result<bool> {
        let state = self.record(GitCall::IsWorkingTreeDirty);
        Ok(state.dirty)
    }

    fn commit(&self, message: &str) -> GitOutput {
        let mut state = self.record(GitCall::Commit(message.to_string()));
        match &self.commit_failure {
            Some(failure) => failure.clone(),
            None => {
                state.staged = false;
                GitOutput::ok("")
            }
        }
    }

    fn create_tag(&self, name: &str) -> GitOutput {
        let mut state = self.record(GitCall::CreateTag(name.to_string()));
        match &self.tag_failure {
            Some(failure) => failure.clone(),
            None => {
                state.existing_tags.insert(name.to_string());
                GitOutput::ok("")
            }
        }
    }
}
