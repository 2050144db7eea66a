//! Rename command - rename every bill in a directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use recibo_core::batch::{BatchRenamer, BatchReport, FileOutcome, FileReport, SkipReason, list_pdfs};
use recibo_core::pdf::PdfTextSource;

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Directory holding the bills (default: input_dir from config)
    dir: Option<PathBuf>,

    /// Show what would be renamed without renaming
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Also write a summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Re-inspect files that already carry a canonical name
    #[arg(long)]
    no_skip_canonical: bool,

    /// Additional file name prefix marking files as already processed
    #[arg(long = "skip-prefix")]
    skip_prefixes: Vec<String>,
}

pub fn run(args: RenameArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::config::load(config_path)?;
    let dir = args.dir.unwrap_or(config.input_dir);
    if args.dry_run {
        config.rename.dry_run = true;
    }
    if args.no_skip_canonical {
        config.rename.skip_canonical = false;
    }
    config.rename.skip_prefixes.extend(args.skip_prefixes);
    let dry_run = config.rename.dry_run;

    let files = list_pdfs(&dir)?;
    if files.is_empty() {
        println!(
            "{} No PDF files in {}",
            style("⚠").yellow(),
            dir.display()
        );
        return Ok(());
    }

    println!(
        "{} Analyzing {} files in {}",
        style("ℹ").blue(),
        files.len(),
        dir.display()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let renamer = BatchRenamer::new(config.rename, PdfTextSource::new());
    let report = renamer.process_files(files, |file| {
        // println on a hidden bar is a no-op, so print while suspended
        pb.suspend(|| {
            for line in report_lines(file) {
                println!("{}", line);
            }
        });
        pb.inc(1);
    });
    pb.finish_and_clear();

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &report)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Done. Files {}: {}",
        style("✓").green(),
        if dry_run { "to rename" } else { "renamed" },
        style(report.renamed()).green()
    );
    println!(
        "   {} skipped, {} rejected, {} collisions, {} failed",
        report.skipped(),
        style(report.rejected()).red(),
        style(report.collisions()).yellow(),
        style(report.failed()).red()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Console lines for one processed file. Silent outcomes yield nothing.
fn report_lines(file: &FileReport) -> Vec<String> {
    let name = file_name(&file.path);
    let mut lines: Vec<String> = file
        .outcome
        .warnings()
        .iter()
        .map(|w| format!("   {} {}: {}", style("!").yellow(), name, w))
        .collect();

    match &file.outcome {
        FileOutcome::Renamed { target, .. } => {
            lines.push(format!("{} {} -> {}", style("✓").green(), name, file_name(target)));
        }
        FileOutcome::WouldRename { target, .. } => {
            lines.push(format!("{} {} -> {} (dry run)", style("→").cyan(), name, file_name(target)));
        }
        FileOutcome::Collision { target, .. } => {
            lines.push(format!(
                "   {} Target already exists: {}",
                style("⚠").yellow(),
                file_name(target)
            ));
        }
        FileOutcome::Rejected(e) => {
            lines.push(format!("   {} {}: {}", style("✗").red(), name, e));
        }
        FileOutcome::Failed(e) => {
            lines.push(format!("   {} {}: {}", style("✗").red(), name, e));
        }
        FileOutcome::AlreadyNamed | FileOutcome::Skipped(_) => {}
    }

    lines
}

fn outcome_detail(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Rejected(e) => e.to_string(),
        FileOutcome::Failed(e) => e.to_string(),
        FileOutcome::Skipped(SkipReason::Prefix(p)) => format!("prefix {}", p),
        FileOutcome::Skipped(SkipReason::Canonical) => "canonical name".to_string(),
        other => other.warnings().join("; "),
    }
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "target", "detail"])?;

    for file in &report.files {
        wtr.write_record([
            file_name(&file.path),
            file.outcome.status().to_string(),
            file.outcome.target().map(file_name).unwrap_or_default(),
            outcome_detail(&file.outcome),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
