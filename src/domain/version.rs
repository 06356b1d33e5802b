use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Canonical tag form: optional `v`, then three components without leading zeros.
const CANONICAL_VERSION: &str = r"^(v)?(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)$";

/// One numeric version component, kept as canonical decimal digits
///
/// Components have no upper bound. The digit string never has a leading
/// zero, so equal numbers always have equal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component(String);

impl Component {
    /// Parse canonical digits: `0`, or digits without a leading zero
    pub fn parse(digits: &str) -> Option<Self> {
        let canonical = digits == "0"
            || (!digits.is_empty()
                && !digits.starts_with('0')
                && digits.bytes().all(|b| b.is_ascii_digit()));
        canonical.then(|| Component(digits.to_string()))
    }

    pub fn zero() -> Self {
        Component("0".to_string())
    }

    /// The next integer, carrying through as many digits as needed
    pub fn increment(&self) -> Self {
        let mut digits = self.0.clone().into_bytes();
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                return Component(String::from_utf8_lossy(&digits).into_owned());
            }
        }
        // every digit was a 9
        digits.insert(0, b'1');
        Component(String::from_utf8_lossy(&digits).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Component {
    fn from(n: u64) -> Self {
        Component(n.to_string())
    }
}

impl PartialEq<u64> for Component {
    fn eq(&self, other: &u64) -> bool {
        self.0 == other.to_string()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic version representation
///
/// `prefixed` remembers whether the tag this version came from carried a
/// leading `v`, so the next tag is written the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: Component,
    pub minor: Component,
    pub patch: Component,
    pub prefixed: bool,
}

impl Version {
    /// Create a new `v`-prefixed version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major: major.into(),
            minor: minor.into(),
            patch: patch.into(),
            prefixed: true,
        }
    }

    /// Create a version whose tag text carries no prefix
    pub fn unprefixed(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            prefixed: false,
            ..Version::new(major, minor, patch)
        }
    }

    /// Parse a canonical version (e.g., "v1.2.3" or "1.2.3").
    ///
    /// Returns `None` for anything else, including "V1.2.3", "01.2.3" and
    /// pre-release suffixes. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let re = Regex::new(CANONICAL_VERSION).ok()?;
        let caps = re.captures(text.trim())?;

        Some(Version {
            major: Component::parse(&caps[2])?,
            minor: Component::parse(&caps[3])?,
            patch: Component::parse(&caps[4])?,
            prefixed: caps.get(1).is_some(),
        })
    }

    /// Bump version according to the requested level
    pub fn bump(&self, level: BumpLevel) -> Self {
        match level {
            BumpLevel::Major => Version {
                major: self.major.increment(),
                minor: Component::zero(),
                patch: Component::zero(),
                prefixed: self.prefixed,
            },
            BumpLevel::Minor => Version {
                major: self.major.clone(),
                minor: self.minor.increment(),
                patch: Component::zero(),
                prefixed: self.prefixed,
            },
            BumpLevel::Patch => Version {
                patch: self.patch.increment(),
                ..self.clone()
            },
        }
    }

    /// Numeric form without any prefix ("1.2.3")
    pub fn plain(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Text used for the version tag, honoring `prefixed`
    pub fn tag_text(&self) -> String {
        if self.prefixed {
            format!("v{}", self.plain())
        } else {
            self.plain()
        }
    }

    /// Text expected inside embedded version markers, always `vX.Y.Z`
    pub fn marker_text(&self) -> String {
        format!("v{}", self.plain())
    }

    /// Compare the numeric triple, ignoring the prefix flag
    pub fn same_release(&self, other: &Version) -> bool {
        (&self.major, &self.minor, &self.patch) == (&other.major, &other.minor, &other.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}

/// Semantic version bump level chosen by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
}

impl FromStr for BumpLevel {
    type Err = ReleaseError;

    /// Accepts the level names or their menu numbers, case-insensitive.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" | "1" => Ok(BumpLevel::Major),
            "minor" | "2" => Ok(BumpLevel::Minor),
            "patch" | "3" => Ok(BumpLevel::Patch),
            other => Err(ReleaseError::InvalidLevel(other.to_string())),
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
        };
        write!(f, "{}", name)
    }
}

/// Bump `version` by a textual level, failing with `InvalidLevel` for
/// anything other than major/minor/patch (or 1/2/3).
pub fn bump(version: &Version, level: &str) -> Result<Version> {
    let level: BumpLevel = level.parse()?;
    Ok(version.bump(level))
}
