use crate::error::{ReleaseError, Result};
use crate::git::GitOutput;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Git backend that shells out to the system `git` binary
///
/// Commits and tags go through the real command so hooks, signing and user
/// configuration behave exactly as they would for `git commit`.
pub struct SystemGit {
    work_tree: PathBuf,
}

impl SystemGit {
    /// Discover the repository containing `path`.
    ///
    /// Fails with `Environment` outside a repository or in a bare one.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = git2::Repository::discover(path.as_ref())
            .map_err(|e| ReleaseError::environment(e.message().to_string()))?;

        let work_tree = repo
            .workdir()
            .ok_or_else(|| ReleaseError::environment("bare repositories have no working tree"))?
            .to_path_buf();

        debug!("using work tree {}", work_tree.display());
        Ok(SystemGit { work_tree })
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.work_tree);
        cmd
    }

    /// Run a query with captured output
    fn query(&self, args: &[&str]) -> Result<Output> {
        debug!("running git {}", args.join(" "));
        let output = self
            .git_cmd()
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ReleaseError::Git {
                command: format!("git {}", args.join(" ")),
                status: None,
                reason: e.to_string(),
            })?;
        debug!("git {} exited with {:?}", args[0], output.status.code());
        Ok(output)
    }

    /// Run a mutating command with the terminal attached
    fn run_attached(&self, args: &[&str]) -> GitOutput {
        debug!("running git {}", args.join(" "));
        match self.git_cmd().args(args).status() {
            Ok(status) if status.success() => GitOutput::ok(""),
            Ok(status) => {
                debug!("git {} exited with {:?}", args[0], status.code());
                let reason = match status.code() {
                    Some(code) => format!("git {} exited with status {}", args[0], code),
                    None => format!("git {} was terminated by a signal", args[0]),
                };
                GitOutput::failed(status.code(), reason)
            }
            Err(e) => GitOutput::failed(None, format!("could not run git: {}", e)),
        }
    }
}

fn query_failed(command: &str, output: &Output) -> ReleaseError {
    ReleaseError::Git {
        command: command.to_string(),
        status: output.status.code(),
        reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl super::Repository for SystemGit {
    fn workdir(&self) -> &Path {
        &self.work_tree
    }

    fn nearest_tag(&self) -> Result<Option<String>> {
        let output = self.query(&["describe", "--tags", "--abbrev=0"])?;
        if !output.status.success() {
            // describe fails when no tag is reachable at all
            return Ok(None);
        }

        let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if tag.is_empty() { None } else { Some(tag) })
    }

    fn reachable_tags_by_recency(&self) -> Result<Vec<String>> {
        let output = self.query(&["tag", "--merged", "HEAD", "--sort=-creatordate"])?;
        if !output.status.success() {
            return Err(query_failed("git tag --merged HEAD", &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/tags/{}", name);
        let output = self.query(&["rev-parse", "-q", "--verify", &reference])?;
        Ok(output.status.success())
    }

    fn has_staged_changes(&self) -> Result<bool> {
        let output = self.query(&["diff", "--cached", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(query_failed("git diff --cached --quiet", &output)),
        }
    }

    fn is_working_tree_dirty(&self) -> Result<bool> {
        let output = self.query(&["status", "--porcelain"])?;
        if !output.status.success() {
            return Err(query_failed("git status --porcelain", &output));
        }

        Ok(has_unstaged_entries(&String::from_utf8_lossy(&output.stdout)))
    }

    fn commit(&self, message: &str) -> GitOutput {
        self.run_attached(&["commit", "-m", message])
    }

    fn create_tag(&self, name: &str) -> GitOutput {
        self.run_attached(&["tag", name])
    }
}

/// Porcelain lines are `XY path`; Y is the working-tree column.
fn has_unstaged_entries(porcelain: &str) -> bool {
    porcelain
        .lines()
        .any(|line| line.as_bytes().get(1).is_some_and(|&y| y != b' '))
}
