use colored::Colorize;
use globset::Glob;
use serde::Serialize;
use serde_yaml::Value;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::frontmatter::{self, as_list, non_empty_str, ParsedDocument};
use crate::rules::{mentioned_frameworks, ProjectType, PYTHON_FRAMEWORKS};
use crate::scanner::DocumentLocation;

pub const INCLUSION_VALUES: &[&str] = &["always", "fileMatch", "manual"];

/// A single failed assertion about a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    Unreadable { reason: String },
    MissingHeader,
    MalformedHeader { reason: String },
    EmptyTitle,
    EmptyDescription,
    TooFewTags { found: usize },
    MissingDependencies { frameworks: Vec<String> },
    NonStringTag,
    InvalidInclusion { value: String },
    UnknownProjectType { value: String },
    InvalidFilePattern { pattern: String, reason: String },
    EmptyBody,
    MissingFileReference { reference: String },
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Unreadable { reason } => write!(f, "cannot read file: {}", reason),
            Check::MissingHeader => write!(f, "missing frontmatter"),
            Check::MalformedHeader { reason } => write!(f, "malformed frontmatter: {}", reason),
            Check::EmptyTitle => write!(f, "title is missing or empty"),
            Check::EmptyDescription => write!(f, "description is missing or empty"),
            Check::TooFewTags { found } => write!(f, "needs at least 2 tags (found {})", found),
            Check::MissingDependencies { frameworks } => write!(
                f,
                "framework document ({}) must declare requiredDependencies",
                frameworks.join(", ")
            ),
            Check::NonStringTag => write!(f, "all tags must be strings"),
            Check::InvalidInclusion { value } => write!(
                f,
                "inclusion '{}' is not one of: {}",
                value,
                INCLUSION_VALUES.join(", ")
            ),
            Check::UnknownProjectType { value } => {
                write!(f, "applicableTo has unknown project type '{}'", value)
            }
            Check::InvalidFilePattern { pattern, reason } => {
                write!(f, "filePatterns entry '{}' is not a valid glob: {}", pattern, reason)
            }
            Check::EmptyBody => write!(f, "document body is empty"),
            Check::MissingFileReference { reference } => {
                write!(f, "referenced file '{}' does not exist", reference)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: String,
    pub passed: bool,
    pub failed_checks: Vec<Check>,
}

#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub documents: Vec<DocumentReport>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.documents.iter().all(|d| d.passed)
    }

    pub fn failed(&self) -> usize {
        self.documents.iter().filter(|d| !d.passed).count()
    }
}

/// Run the fixed checklist over a parsed document. Field checks are only
/// attempted when the header is present and well-formed. `file_references`
/// entries are looked up in each of `reference_dirs`, in order.
pub fn check_document(display_path: &str, doc: &ParsedDocument, reference_dirs: &[&Path]) -> Vec<Check> {
    if let Some(reason) = &doc.header_error {
        return vec![Check::MalformedHeader {
            reason: reason.clone(),
        }];
    }
    if !doc.header_valid {
        return vec![Check::MissingHeader];
    }

    let metadata = &doc.metadata;
    let mut failed = Vec::new();

    if non_empty_str(metadata, "title").is_none() {
        failed.push(Check::EmptyTitle);
    }
    if non_empty_str(metadata, "description").is_none() {
        failed.push(Check::EmptyDescription);
    }

    let tags = metadata.get("tags").map(as_list).unwrap_or_default();
    if tags.len() < 2 {
        failed.push(Check::TooFewTags { found: tags.len() });
    }
    if tags.iter().any(|t| !t.is_string()) {
        failed.push(Check::NonStringTag);
    }

    let tag_texts: Vec<&str> = tags.iter().filter_map(Value::as_str).collect();
    let frameworks = mentioned_frameworks(std::iter::once(display_path).chain(tag_texts));
    let needs_dependencies = frameworks
        .iter()
        .any(|fw| !PYTHON_FRAMEWORKS.contains(fw));
    if needs_dependencies && !declares_dependencies(metadata.get("requiredDependencies")) {
        failed.push(Check::MissingDependencies {
            frameworks: frameworks.iter().map(|fw| fw.to_string()).collect(),
        });
    }

    if let Some(value) = metadata.get("inclusion") {
        let text = scalar_text(value);
        if !INCLUSION_VALUES.contains(&text.as_str()) {
            failed.push(Check::InvalidInclusion { value: text });
        }
    }

    if let Some(value) = metadata.get("applicableTo") {
        for entry in as_list(value) {
            let text = scalar_text(&entry);
            if ProjectType::from_name(&text).is_none() {
                failed.push(Check::UnknownProjectType { value: text });
            }
        }
    }

    if let Some(value) = metadata.get("filePatterns") {
        for entry in as_list(value) {
            let pattern = scalar_text(&entry);
            if let Err(e) = Glob::new(&pattern) {
                failed.push(Check::InvalidFilePattern {
                    pattern,
                    reason: e.kind().to_string(),
                });
            }
        }
    }

    if let Some(value) = metadata.get("file_references") {
        for entry in as_list(value) {
            let Some(reference) = entry.as_str() else {
                continue;
            };
            if !reference_dirs.iter().any(|dir| dir.join(reference).exists()) {
                failed.push(Check::MissingFileReference {
                    reference: reference.to_string(),
                });
            }
        }
    }

    if doc.body.trim().is_empty() {
        failed.push(Check::EmptyBody);
    }

    failed
}

fn declares_dependencies(value: Option<&Value>) -> bool {
    value.map(|v| !as_list(v).is_empty()).unwrap_or(false)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => frontmatter::value_kind(other).to_string(),
    }
}

pub fn validate_location(location: &DocumentLocation) -> DocumentReport {
    let path = location.display_path();
    let failed_checks = match fs::read_to_string(&location.path) {
        Ok(raw) => {
            let doc_dir = location.path.parent().unwrap_or_else(|| Path::new(""));
            check_document(&path, &frontmatter::parse(&raw), &[doc_dir, location.root()])
        }
        Err(e) => vec![Check::Unreadable {
            reason: e.to_string(),
        }],
    };

    DocumentReport {
        path,
        passed: failed_checks.is_empty(),
        failed_checks,
    }
}

/// Check every location in order. Progress lines are printed unless `quiet`.
pub fn run(locations: impl IntoIterator<Item = DocumentLocation>, quiet: bool) -> ValidationReport {
    let mut report = ValidationReport::default();

    for location in locations {
        let doc = validate_location(&location);
        if !quiet {
            print_document(&doc);
        }
        report.documents.push(doc);
    }

    report
}

fn print_document(doc: &DocumentReport) {
    if doc.passed {
        println!("{} {}", "✓".green(), doc.path);
        return;
    }
    println!("{} {}", "✗".red(), doc.path);
    for check in &doc.failed_checks {
        println!("    {} {}", "-".dimmed(), check);
    }
}

pub fn print_summary(report: &ValidationReport) {
    println!();
    println!("{}", "Validation Summary".green().bold());
    println!("  Documents checked: {}", report.documents.len().to_string().cyan());
    println!(
        "  Passed:            {}",
        (report.documents.len() - report.failed()).to_string().cyan()
    );

    if report.all_passed() {
        println!("  Failed:            {}", "0".cyan());
        return;
    }

    println!("  Failed:            {}", report.failed().to_string().red());
    println!();
    println!("{}", "Failed Checks".red().bold());
    for doc in report.documents.iter().filter(|d| !d.passed) {
        println!("  {}", doc.path.yellow());
        for check in &doc.failed_checks {
            println!("    {} {}", "-".dimmed(), check);
        }
    }
}
