use crate::error::Result;
use crate::release::consistency::{VersionMarker, DEFAULT_MARKER_PATTERN};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the repository root and the user config directory
pub const CONFIG_FILE_NAME: &str = "release-tag.toml";

/// Represents the complete configuration for git-release-tag.
///
/// Every key is optional; missing keys fall back to the defaults below.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Files that must embed the released version, relative to the repository root
    #[serde(default = "default_version_files")]
    pub version_files: Vec<PathBuf>,

    /// Regex locating the embedded version; its one capture group is the token
    #[serde(default = "default_marker_pattern")]
    pub marker_pattern: String,

    /// Remote named in the push hint printed after a release
    #[serde(default = "default_push_remote")]
    pub push_remote: String,
}

fn default_version_files() -> Vec<PathBuf> {
    vec![
        PathBuf::from("dev/dashboard.html"),
        PathBuf::from("dashboard.html"),
    ]
}

fn default_marker_pattern() -> String {
    DEFAULT_MARKER_PATTERN.to_string()
}

fn default_push_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_files: default_version_files(),
            marker_pattern: default_marker_pattern(),
            push_remote: default_push_remote(),
        }
    }
}

impl Config {
    /// Compile the configured marker pattern
    pub fn version_marker(&self) -> Result<VersionMarker> {
        VersionMarker::new(&self.marker_pattern)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-tag.toml` in the repository root
/// 3. `release-tag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Working tree root of the repository being released
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or its
///   marker pattern does not compile
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    let local = repo_root.join(CONFIG_FILE_NAME);
    let global = dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME));

    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None if local.exists() => local,
        None => match global.filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(Config::default());
            }
        },
    };

    debug!("loading config from {}", path.display());
    let config: Config = toml::from_str(&fs::read_to_string(&path)?)?;
    config.version_marker()?;
    Ok(config)
}
