use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod analyzer;
mod config;
mod enhance;
mod error;
mod frontmatter;
mod merge;
mod rules;
mod scanner;
mod validate;
mod writer;

use config::Config;
use enhance::Enhancer;

/// steerdoc - Metadata enhancer and validator for steering documents
#[derive(Parser)]
#[command(name = "steerdoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (relative paths resolve against the scan root)
    #[arg(short, long, global = true, default_value = ".steerdoc.toml")]
    config: PathBuf,

    /// Quiet mode - suppress per-document progress lines
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer metadata and merge it into each document's frontmatter
    Enhance {
        /// Run the full pipeline but write nothing
        #[arg(long)]
        dry_run: bool,

        /// Repository root to scan
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Replace existing tags with the reconciled tag list
        #[arg(long)]
        overwrite_tags: bool,
    },

    /// Check every document's frontmatter without modifying anything
    Validate {
        /// Repository root to scan
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match cli.command {
        Commands::Enhance { dry_run, path, overwrite_tags } => {
            cmd_enhance(&path, &cli.config, dry_run, overwrite_tags, cli.quiet)
        }
        Commands::Validate { path, json } => cmd_validate(&path, &cli.config, json, cli.quiet),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(root: &Path, config_path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let path = if config_path.is_absolute() {
        config_path.to_path_buf()
    } else {
        root.join(config_path)
    };
    Config::load(&path)
}

/// Returns `Ok(true)` once every document has been attempted; individual
/// failures are reported in the summary, not through the exit code.
fn cmd_enhance(
    root: &Path,
    config_path: &Path,
    dry_run: bool,
    overwrite_tags: bool,
    quiet: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let config = load_config(root, config_path)?;

    let mut options = config.merge.options();
    if overwrite_tags {
        options.overwrite_tags = true;
    }

    if !quiet {
        let verb = if dry_run { "Previewing" } else { "Enhancing" };
        println!("{} {}", verb.cyan().bold(), root.display());
    }

    let locations = scanner::scan(root, &config)?;
    let summary = Enhancer::new(&config, options, dry_run).run(locations, quiet);

    enhance::print_summary(&summary, dry_run);
    if !quiet {
        println!("  Time elapsed:        {:.2?}", start.elapsed());
    }
    tracing::info!(
        "{} of {} documents succeeded",
        summary.succeeded(),
        summary.processed()
    );

    Ok(true)
}

/// Returns `Ok(false)` if any document fails any check.
fn cmd_validate(
    root: &Path,
    config_path: &Path,
    json: bool,
    quiet: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_config(root, config_path)?;

    if !quiet && !json {
        println!("{} {}", "Validating".cyan().bold(), root.display());
    }

    let locations = scanner::scan(root, &config)?;
    let report = validate::run(locations, quiet || json);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        validate::print_summary(&report);
    }

    Ok(report.all_passed())
}
