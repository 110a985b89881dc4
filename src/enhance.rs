use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::analyzer::analyze;
use crate::config::Config;
use crate::error::SteerError;
use crate::frontmatter;
use crate::merge::{merge, MergeOptions};
use crate::rules::{matching_rules, AnalysisContext};
use crate::scanner::DocumentLocation;
use crate::writer::DocumentWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Written { backup: Option<PathBuf> },
    /// Dry run: the merged document passed validation but was not written.
    Previewed,
    /// The merged document is byte-identical to what is on disk.
    Unchanged,
}

impl Status {
    fn label(&self) -> &'static str {
        match self {
            Status::Written { .. } => "updated",
            Status::Previewed => "would update",
            Status::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: usize,
    pub previewed: usize,
    pub unchanged: usize,
    /// Document path and the reasons it failed.
    pub failures: Vec<(String, Vec<String>)>,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.written + self.previewed + self.unchanged + self.failures.len()
    }

    pub fn succeeded(&self) -> usize {
        self.written + self.previewed + self.unchanged
    }

    fn record(&mut self, path: String, result: &Result<Status, SteerError>) {
        match result {
            Ok(Status::Written { .. }) => self.written += 1,
            Ok(Status::Previewed) => self.previewed += 1,
            Ok(Status::Unchanged) => self.unchanged += 1,
            Err(e) => self.failures.push((path, e.reasons())),
        }
    }
}

/// Runs parse → analyze → merge → write for one document at a time.
pub struct Enhancer {
    writer: DocumentWriter,
    options: MergeOptions,
    dry_run: bool,
}

impl Enhancer {
    pub fn new(config: &Config, options: MergeOptions, dry_run: bool) -> Self {
        Enhancer {
            writer: DocumentWriter::new(config.backup_dir.clone()),
            options,
            dry_run,
        }
    }

    pub fn enhance_document(&self, location: &DocumentLocation) -> Result<Status, SteerError> {
        let raw = fs::read_to_string(&location.path)
            .map_err(|e| SteerError::file_access(&location.path, e))?;

        let doc = frontmatter::parse(&raw);
        if let Some(reason) = doc.header_error {
            return Err(SteerError::InvalidHeader {
                path: location.path.clone(),
                reason,
            });
        }
        if !doc.header_valid {
            tracing::debug!("no frontmatter in {}, treating as plain text", location.path.display());
        }

        let display_path = location.display_path();
        let ctx = AnalysisContext::new(
            &display_path,
            &location.category,
            location.subcategory.as_deref(),
            &doc.metadata,
            &doc.body,
        );
        tracing::debug!("{} [{}]: rules {:?}", ctx.document_path, ctx.category, matching_rules(&ctx));

        let inferred = analyze(&ctx);
        let merged = merge(&doc.metadata, &inferred, self.options);
        let text = self.writer.validate(&location.path, &merged, &doc.body)?;

        if text == raw {
            return Ok(Status::Unchanged);
        }
        if self.dry_run {
            return Ok(Status::Previewed);
        }

        let outcome = self.writer.write(&location.path, &merged, &doc.body)?;
        Ok(Status::Written {
            backup: outcome.backup,
        })
    }

    /// Process every location in order, printing a progress line for each.
    /// Per-document failures are recorded, never propagated.
    pub fn run(&self, locations: impl IntoIterator<Item = DocumentLocation>, quiet: bool) -> RunSummary {
        let mut summary = RunSummary::default();

        for location in locations {
            let path = location.display_path();
            let result = self.enhance_document(&location);

            if !quiet {
                match &result {
                    Ok(status) => println!("{} {} {}", "✓".green(), path, status.label().dimmed()),
                    Err(_) => println!("{} {}", "✗".red(), path),
                }
            }
            if let Err(e) = &result {
                tracing::debug!("{}", e);
            }

            summary.record(path, &result);
        }

        summary
    }
}

pub fn print_summary(summary: &RunSummary, dry_run: bool) {
    println!();
    let heading = if dry_run {
        "Enhancement Summary (dry run)"
    } else {
        "Enhancement Summary"
    };
    println!("{}", heading.green().bold());
    println!("  Documents processed: {}", summary.processed().to_string().cyan());
    if dry_run {
        println!("  Would update:        {}", summary.previewed.to_string().cyan());
    } else {
        println!("  Updated:             {}", summary.written.to_string().cyan());
    }
    println!("  Unchanged:           {}", summary.unchanged.to_string().cyan());

    let failed = summary.failures.len().to_string();
    if summary.failures.is_empty() {
        println!("  Failed:              {}", failed.cyan());
        return;
    }
    println!("  Failed:              {}", failed.red());
    println!();
    println!("{}", "Failures".red().bold());
    for (path, reasons) in &summary.failures {
        println!("  {}", path.yellow());
        for reason in reasons {
            println!("    {} {}", "-".dimmed(), reason);
        }
    }
}
