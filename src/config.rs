use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::merge::MergeOptions;

/// Top-level directories that hold steering documents.
pub const DEFAULT_TARGET_DIRS: &[&str] = &[
    "code-formatting",
    "code-quality",
    "testing",
    "security",
    "frameworks",
    "languages",
    "workflows",
    "architecture",
    "documentation",
    "performance",
    "api-design",
    "accessibility",
];

/// Directory names never descended into.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".backup",
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "target",
    "dist",
    "build",
    "_site",
];

/// Navigational files that are not steering documents.
pub const DEFAULT_EXCLUDED_FILES: &[&str] =
    &["README.md", "CONTRIBUTING.md", "LICENSE.md", "CHANGELOG.md"];

/// Optional `.steerdoc.toml`. Every field falls back to the built-in default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub target_dirs: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub excluded_files: Vec<String>,
    /// Document file extension, without the dot.
    pub extension: String,
    /// Name of the sibling directory that receives pre-write snapshots.
    pub backup_dir: String,
    pub merge: MergeSection,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MergeSection {
    pub preserve_existing: bool,
    pub overwrite_tags: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_dirs: to_owned(DEFAULT_TARGET_DIRS),
            skip_dirs: to_owned(DEFAULT_SKIP_DIRS),
            excluded_files: to_owned(DEFAULT_EXCLUDED_FILES),
            extension: "md".to_string(),
            backup_dir: ".backup".to_string(),
            merge: MergeSection::default(),
        }
    }
}

impl Default for MergeSection {
    fn default() -> Self {
        let defaults = MergeOptions::default();
        MergeSection {
            preserve_existing: defaults.preserve_existing,
            overwrite_tags: defaults.overwrite_tags,
        }
    }
}

impl MergeSection {
    pub fn options(&self) -> MergeOptions {
        MergeOptions {
            preserve_existing: self.preserve_existing,
            overwrite_tags: self.overwrite_tags,
        }
    }
}

impl Config {
    /// Load the config file if it exists. A missing file yields defaults; a
    /// file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;

        if config.extension.trim().is_empty() {
            return Err(format!("invalid config {}: extension must not be empty", path.display()).into());
        }

        tracing::debug!(
            "loaded config from {} ({} target dirs)",
            path.display(),
            config.target_dirs.len()
        );
        Ok(config)
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
