use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use tabledrift_core::{DriftReport, FieldOutcome, TableSchema};
use tabledrift_engine::compare;

/// tabledrift - DDL schema drift detection
#[derive(Parser)]
#[command(name = "tabledrift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a reference DDL file against a current DDL file
    Compare {
        /// Path to the reference (expected) DDL file
        #[arg(short, long)]
        reference: PathBuf,

        /// Path to the current (observed) DDL file
        #[arg(short = 'u', long)]
        current: PathBuf,

        /// Output file for the JSON drift report
        #[arg(short, long, default_value = "drift-report.json")]
        output: PathBuf,
    },

    /// Parse a DDL file and print the extracted schema as JSON
    Parse {
        /// Path to the DDL file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Compare {
            reference,
            current,
            output,
        } => compare_command(&reference, &current, &output, cli.verbose),
        Commands::Parse { file } => parse_command(&file),
    }
}

fn load_schema(path: &Path, side: &str) -> Result<TableSchema> {
    let ddl = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {} DDL from {}", side, path.display()))?;
    tabledrift_ddl::parse(&ddl)
        .with_context(|| format!("failed to parse {} DDL from {}", side, path.display()))
}

fn compare_command(reference: &Path, current: &Path, output: &Path, verbose: bool) -> Result<()> {
    let reference_schema = load_schema(reference, "reference")?;
    let current_schema = load_schema(current, "current")?;

    let report = compare(&reference_schema, &current_schema);
    print_summary(&report);

    std::fs::write(output, report.to_json()?)
        .with_context(|| format!("failed to write report to {}", output.display()))?;
    if verbose {
        eprintln!("{} {}", "Report written to".cyan(), output.display());
    }

    if report.passed() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn print_summary(report: &DriftReport) {
    for check in &report.field_results {
        match &check.outcome {
            FieldOutcome::Matched => {
                eprintln!("  {} {}", "ok".green(), check.field);
            }
            FieldOutcome::Diverged(d) => {
                eprintln!("  {} {}", "drift".red().bold(), check.field);
                eprintln!("      reference: {}", d.reference);
                eprintln!("      current:   {}", d.current);
                for entry in &d.added_entries {
                    eprintln!("      {} {}", "added:".yellow(), entry);
                }
            }
        }
    }

    if report.passed() {
        eprintln!("{}", "No drift detected".green().bold());
    } else {
        eprintln!("{}", "Schema drift detected".red().bold());
    }
}

fn parse_command(file: &Path) -> Result<()> {
    let schema = load_schema(file, "input")?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
