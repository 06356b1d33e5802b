use crate::domain::version::Version;
use std::fmt;

/// Represents a git tag label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// The tag that marks `version`
    pub fn for_version(version: &Version) -> Self {
        Tag::new(version.tag_text())
    }

    /// Parse the tag text as a canonical version, if it is one
    pub fn version(&self) -> Option<Version> {
        Version::parse(&self.name)
    }

    /// Only tags whose text is a canonical version can be release tags
    pub fn is_admissible(&self) -> bool {
        self.version().is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
