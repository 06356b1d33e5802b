#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Marker span as it appears in the dashboard files
pub fn span(version: &str) -> String {
    format!(
        "<html><body><footer><span id=\"version\">{}</span></footer></body></html>\n",
        version
    )
}

/// Scratch git repository built with git2, so commit times are controlled
pub struct Fixture {
    pub dir: TempDir,
    pub repo: Repository,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Could not disable commit signing");
            config
                .set_bool("tag.gpgsign", false)
                .expect("Could not disable tag signing");
        }

        Fixture { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file and add it to the index
    pub fn stage(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Could not create parent dir");
        }
        fs::write(&path, content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(name))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
    }

    /// Write a file without staging it
    pub fn write_unstaged(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).expect("Could not write file");
    }

    /// Stage `name` and commit it at `seconds` since the epoch
    pub fn commit_at(&self, name: &str, content: &str, message: &str, seconds: i64) -> Oid {
        self.stage(name, content);

        let mut index = self.repo.index().expect("Could not get index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("Could not create signature");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    /// Commit on top of `parent` without moving HEAD or the index
    pub fn commit_detached(
        &self,
        parent: Oid,
        name: &str,
        content: &str,
        message: &str,
        seconds: i64,
    ) -> Oid {
        let parent = self.repo.find_commit(parent).expect("Could not find parent");
        let blob = self
            .repo
            .blob(content.as_bytes())
            .expect("Could not write blob");
        let mut builder = self
            .repo
            .treebuilder(Some(&parent.tree().expect("Could not read parent tree")))
            .expect("Could not create tree builder");
        builder
            .insert(name, blob, 0o100644)
            .expect("Could not insert blob");
        let tree = self
            .repo
            .find_tree(builder.write().expect("Could not write tree"))
            .expect("Could not find tree");
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("Could not create signature");

        self.repo
            .commit(None, &sig, &sig, message, &tree, &[&parent])
            .expect("Could not create commit")
    }

    /// Lightweight tag on `oid`
    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find commit");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn head(&self) -> Oid {
        self.repo
            .head()
            .expect("Could not read HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit")
            .id()
    }

    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .expect("Could not read HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit")
            .message()
            .unwrap_or("")
            .to_string()
    }

    /// Commit the tag points at, if the tag exists
    pub fn tag_target(&self, name: &str) -> Option<Oid> {
        self.repo
            .find_reference(&format!("refs/tags/{}", name))
            .ok()
            .and_then(|r| r.peel_to_commit().ok())
            .map(|c| c.id())
    }
}
