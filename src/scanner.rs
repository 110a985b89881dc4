use ignore::{DirEntry, Walk, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use crate::config::Config;
use crate::error::SteerError;

/// Directory-name keywords that refine a document's category. The first
/// keyword (in this order) found inside any directory segment wins.
pub const SUBCATEGORY_KEYWORDS: &[&str] = &[
    "languages",
    "frameworks",
    "testing",
    "security",
    "code-quality",
    "code-formatting",
    "workflows",
    "architecture",
    "performance",
    "documentation",
];

/// An eligible document found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub path: PathBuf,
    /// Path relative to the scan root, used for rule matching and output.
    pub relative_path: PathBuf,
    pub category: String,
    pub subcategory: Option<String>,
}

impl DocumentLocation {
    /// Relative path with `/` separators regardless of platform.
    pub fn display_path(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The scan root this location was found under.
    pub fn root(&self) -> &Path {
        self.path
            .ancestors()
            .nth(self.relative_path.components().count())
            .unwrap_or_else(|| Path::new(""))
    }
}

/// Lazy, one-shot walk over the configured target directories.
pub struct Scan {
    root: PathBuf,
    targets: vec::IntoIter<String>,
    category: String,
    walk: Option<Walk>,
    skip_dirs: Vec<String>,
    excluded_files: Vec<String>,
    extension: String,
}

/// Start a scan of `root`. Fails only if the root itself cannot be read;
/// everything below it degrades to warnings.
pub fn scan(root: &Path, config: &Config) -> Result<Scan, SteerError> {
    fs::read_dir(root).map_err(|e| SteerError::file_access(root, e))?;

    Ok(Scan {
        root: root.to_path_buf(),
        targets: config.target_dirs.clone().into_iter(),
        category: String::new(),
        walk: None,
        skip_dirs: config.skip_dirs.clone(),
        excluded_files: config.excluded_files.clone(),
        extension: config.extension.trim_start_matches('.').to_lowercase(),
    })
}

impl Scan {
    fn open_target(&mut self, target: String) {
        let dir = self.root.join(&target);
        if !dir.is_dir() {
            tracing::warn!("target directory {} not found, skipping", dir.display());
            return;
        }

        let skip = self.skip_dirs.clone();
        let mut builder = WalkBuilder::new(&dir);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| !is_skipped_dir(entry, &skip));

        tracing::debug!("scanning {}", dir.display());
        self.category = target;
        self.walk = Some(builder.build());
    }

    fn locate(&self, entry: &DirEntry) -> Option<DocumentLocation> {
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            return None;
        }

        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if ext != self.extension {
            return None;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if self.excluded_files.iter().any(|f| f == name) {
            return None;
        }

        let relative_path = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
        let segments: Vec<String> = relative_path
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .skip(1)
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        Some(DocumentLocation {
            path: path.to_path_buf(),
            relative_path,
            category: self.category.clone(),
            subcategory: infer_subcategory(&segments),
        })
    }
}

impl Iterator for Scan {
    type Item = DocumentLocation;

    fn next(&mut self) -> Option<DocumentLocation> {
        loop {
            let next = match self.walk.as_mut() {
                Some(walk) => walk.next(),
                None => {
                    let target = self.targets.next()?;
                    self.open_target(target);
                    continue;
                }
            };

            match next {
                Some(Ok(entry)) => {
                    if let Some(location) = self.locate(&entry) {
                        return Some(location);
                    }
                }
                Some(Err(err)) => tracing::warn!("skipping unreadable entry: {}", err),
                None => self.walk = None,
            }
        }
    }
}

fn is_skipped_dir(entry: &DirEntry, skip: &[String]) -> bool {
    let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
    is_dir
        && entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| skip.iter().any(|s| s == name))
            .unwrap_or(false)
}

/// Match directory segments below the category against the keyword list.
pub fn infer_subcategory(segments: &[String]) -> Option<String> {
    let lowered: Vec<String> = segments.iter().map(|s| s.to_lowercase()).collect();
    SUBCATEGORY_KEYWORDS
        .iter()
        .find(|kw| lowered.iter().any(|seg| seg.contains(*kw)))
        .map(|kw| kw.to_string())
}
