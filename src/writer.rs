use chrono::Utc;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{SteerError, ValidationFailure};
use crate::frontmatter::{self, as_list, non_empty_str};

pub const BACKUP_EXTENSION: &str = "bak";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Snapshot of the previous contents, if one was taken.
    pub backup: Option<PathBuf>,
}

/// The only component that mutates the corpus. Every write is gated by
/// [`check_header`] and preceded by a best-effort snapshot.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    backup_dir: String,
}

impl DocumentWriter {
    pub fn new(backup_dir: impl Into<String>) -> Self {
        DocumentWriter {
            backup_dir: backup_dir.into(),
        }
    }

    /// Check the merged header and return the serialized document. Touches
    /// nothing on disk.
    pub fn validate(&self, path: &Path, metadata: &Mapping, body: &str) -> Result<String, SteerError> {
        let mut failures = Vec::new();
        let text = match frontmatter::stringify(metadata, body) {
            Ok(text) => {
                failures.extend(round_trip_failure(&text, metadata, body));
                Some(text)
            }
            Err(e) => {
                failures.push(ValidationFailure::RoundTrip(e.to_string()));
                None
            }
        };
        failures.extend(check_header(metadata));

        match text {
            Some(text) if failures.is_empty() => Ok(text),
            _ => Err(SteerError::ConflictingMetadata {
                path: path.to_path_buf(),
                failures,
            }),
        }
    }

    /// Validate, snapshot the current file, then overwrite it.
    pub fn write(&self, path: &Path, metadata: &Mapping, body: &str) -> Result<WriteOutcome, SteerError> {
        let text = self.validate(path, metadata, body)?;

        let backup = match self.backup(path) {
            Ok(backup) => backup,
            Err(e) => {
                tracing::warn!("could not back up {}: {}", path.display(), e);
                None
            }
        };

        fs::write(path, text).map_err(|e| SteerError::file_access(path, e))?;
        tracing::debug!("wrote {}", path.display());

        Ok(WriteOutcome { backup })
    }

    /// Copy `path` into the sibling backup directory. A file that does not
    /// exist yet has nothing to snapshot.
    fn backup(&self, path: &Path) -> io::Result<Option<PathBuf>> {
        if !path.exists() {
            return Ok(None);
        }

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;

        let dir = parent.join(&self.backup_dir);
        fs::create_dir_all(&dir)?;

        let target = dir.join(backup_file_name(file_name, &timestamp()));
        fs::copy(path, &target)?;
        tracing::debug!("backed up {} to {}", path.display(), target.display());
        Ok(Some(target))
    }
}

fn round_trip_failure(text: &str, metadata: &Mapping, body: &str) -> Option<ValidationFailure> {
    let reparsed = frontmatter::parse(text);
    let reason = if !reparsed.header_valid {
        reparsed
            .header_error
            .unwrap_or_else(|| "header not found after serialization".to_string())
    } else if &reparsed.metadata != metadata {
        "re-parsed header differs from the merged header".to_string()
    } else if reparsed.body != body {
        "re-parsed body differs from the original body".to_string()
    } else {
        return None;
    };
    Some(ValidationFailure::RoundTrip(reason))
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H-%M-%S%.3fZ").to_string()
}

pub fn backup_file_name(file_name: &str, timestamp: &str) -> String {
    format!("{}.{}.{}", file_name, timestamp, BACKUP_EXTENSION)
}

/// Field invariants a persisted header must satisfy.
pub fn check_header(metadata: &Mapping) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if non_empty_str(metadata, "title").is_none() {
        failures.push(ValidationFailure::EmptyTitle);
    }
    if non_empty_str(metadata, "description").is_none() {
        failures.push(ValidationFailure::EmptyDescription);
    }

    match metadata.get("tags") {
        Some(Value::Sequence(tags)) if tags.len() >= 2 => {}
        Some(other) => failures.push(ValidationFailure::TooFewTags {
            found: as_list(other).len(),
        }),
        None => failures.push(ValidationFailure::TooFewTags { found: 0 }),
    }

    failures
}
