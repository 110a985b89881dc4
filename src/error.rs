use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Per-document failure classes. Each variant names exactly one kind of
/// failure; the entry procedures record them against a single document.
#[derive(Error, Debug)]
pub enum SteerError {
    /// Delimiters are present but the block between them is not a YAML mapping.
    #[error("invalid frontmatter in {}: {reason}", path.display())]
    InvalidHeader { path: PathBuf, reason: String },

    /// No frontmatter at all. Not raised: the document is treated as plain
    /// text and reported through the writer's field checks instead.
    #[allow(dead_code)]
    #[error("no frontmatter in {}", path.display())]
    MissingHeader { path: PathBuf },

    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reserved for category disambiguation; the scanner never raises it.
    #[allow(dead_code)]
    #[error("ambiguous category for {}: {}", path.display(), candidates.join(", "))]
    AmbiguousCategory {
        path: PathBuf,
        candidates: Vec<String>,
    },

    /// The merged header failed the pre-write checks.
    #[error("conflicting metadata in {}: {}", path.display(), join_failures(failures))]
    ConflictingMetadata {
        path: PathBuf,
        failures: Vec<ValidationFailure>,
    },
}

impl SteerError {
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SteerError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Human-readable reasons for the run summary, one per line.
    pub fn reasons(&self) -> Vec<String> {
        match self {
            SteerError::ConflictingMetadata { failures, .. } => {
                failures.iter().map(|f| f.to_string()).collect()
            }
            SteerError::InvalidHeader { reason, .. } => {
                vec![format!("invalid frontmatter: {}", reason)]
            }
            SteerError::MissingHeader { .. } => vec!["no frontmatter".to_string()],
            SteerError::FileAccess { source, .. } => vec![format!("file access: {}", source)],
            SteerError::AmbiguousCategory { candidates, .. } => {
                vec![format!("ambiguous category: {}", candidates.join(", "))]
            }
        }
    }
}

/// A single invariant the writer refused to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    RoundTrip(String),
    EmptyTitle,
    EmptyDescription,
    TooFewTags { found: usize },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::RoundTrip(reason) => {
                write!(f, "header does not survive a serialize/parse round trip: {}", reason)
            }
            ValidationFailure::EmptyTitle => write!(f, "title must be a non-empty string"),
            ValidationFailure::EmptyDescription => {
                write!(f, "description must be a non-empty string")
            }
            ValidationFailure::TooFewTags { found } => {
                write!(f, "tags must list at least 2 entries (found {})", found)
            }
        }
    }
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
