//! Embedded version consistency checks.
//!
//! Each configured file must carry exactly one distinct version inside the
//! version marker, and it must be the version being released.

use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default marker: `<span id="version">vX.Y.Z</span>`
pub const DEFAULT_MARKER_PATTERN: &str =
    r#"<span\s+id=['"]version['"]>\s*(v\d+\.\d+\.\d+)\s*</span>"#;

/// Compiled marker locating embedded version tokens
///
/// The pattern's single capture group is the version token. Only text
/// inside the marker counts; other version-shaped strings are ignored.
#[derive(Debug, Clone)]
pub struct VersionMarker {
    pattern: Regex,
}

impl VersionMarker {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| ReleaseError::config(format!("invalid marker_pattern: {}", e)))?;

        // group 0 is the whole match
        if pattern.captures_len() != 2 {
            return Err(ReleaseError::config(format!(
                "marker_pattern must have exactly one capture group, found {}",
                pattern.captures_len() - 1
            )));
        }

        Ok(VersionMarker { pattern })
    }

    /// Distinct version tokens found inside markers, sorted
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// What is wrong with one version file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    FileNotFound,
    Unreadable(String),
    NoVersionFound,
    MultipleVersions(Vec<String>),
    Mismatch { found: String, expected: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::FileNotFound => write!(f, "file not found"),
            Problem::Unreadable(reason) => write!(f, "could not read file: {}", reason),
            Problem::NoVersionFound => write!(f, "no version like vX.Y.Z found"),
            Problem::MultipleVersions(found) => {
                write!(f, "multiple versions found: {}", found.join(", "))
            }
            Problem::Mismatch { found, expected } => {
                write!(f, "found {} (expected {})", found, expected)
            }
        }
    }
}

/// Problems for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProblems {
    pub path: PathBuf,
    pub problems: Vec<Problem>,
}

/// Every problem found across all checked files, in check order
///
/// Files without problems have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    entries: Vec<FileProblems>,
}

impl ConsistencyReport {
    /// Add a problem for `path`, grouping it with earlier problems for the same file
    pub fn record(&mut self, path: impl Into<PathBuf>, problem: Problem) {
        let path = path.into();
        match self.entries.iter_mut().find(|e| e.path == path) {
            Some(entry) => entry.problems.push(problem),
            None => self.entries.push(FileProblems {
                path,
                problems: vec![problem],
            }),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files with at least one problem
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileProblems] {
        &self.entries
    }

    pub fn problems_for(&self, path: impl AsRef<Path>) -> Option<&[Problem]> {
        self.entries
            .iter()
            .find(|e| e.path == path.as_ref())
            .map(|e| e.problems.as_slice())
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            for problem in &entry.problems {
                writeln!(f, "- {}: {}", entry.path.display(), problem)?;
            }
        }
        Ok(())
    }
}

/// Check every file in `files` (relative to `root`) against `expected`.
///
/// All files are checked before returning; one bad file never hides
/// the next.
pub fn validate(
    expected: &Version,
    root: &Path,
    files: &[PathBuf],
    marker: &VersionMarker,
) -> ConsistencyReport {
    let mut report = ConsistencyReport::default();

    for rel_path in files {
        if let Some(problem) = check_file(expected, &root.join(rel_path), marker) {
            debug!("{}: {}", rel_path.display(), problem);
            report.record(rel_path.clone(), problem);
        }
    }

    report
}

/// Like [validate], but a report with problems becomes `ReleaseError::Validation`.
pub fn ensure_consistent(
    expected: &Version,
    root: &Path,
    files: &[PathBuf],
    marker: &VersionMarker,
) -> Result<()> {
    let report = validate(expected, root, files, marker);
    if report.is_clean() {
        Ok(())
    } else {
        Err(ReleaseError::Validation {
            expected: expected.marker_text(),
            report,
        })
    }
}

fn check_file(expected: &Version, path: &Path, marker: &VersionMarker) -> Option<Problem> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Some(Problem::FileNotFound),
        Err(e) => return Some(Problem::Unreadable(e.to_string())),
    };

    let found = marker.extract(&String::from_utf8_lossy(&bytes));
    let mut tokens = found.into_iter();

    match (tokens.next(), tokens.next()) {
        (None, _) => Some(Problem::NoVersionFound),
        (Some(first), Some(second)) => {
            let mut all = vec![first, second];
            all.extend(tokens);
            Some(Problem::MultipleVersions(all))
        }
        (Some(only), None) => match Version::parse(&only) {
            Some(v) if v.same_release(expected) => None,
            _ => Some(Problem::Mismatch {
                found: only,
                expected: expected.marker_text(),
            }),
        },
    }
}
