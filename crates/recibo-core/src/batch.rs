//! Directory batch renaming.
//!
//! The directory listing is taken once per run. Each file is handled
//! independently: a failure is recorded in its [`FileOutcome`] and the batch
//! moves on to the next file.

use std::collections::HashSet;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::bill::{BillParser, CfeBillParser};
use crate::error::{ExtractionError, PdfError, ReciboError};
use crate::models::config::RenameConfig;
use crate::models::record::ExtractedRecord;
use crate::pdf::{TextSource, panic_message};

/// Why a file was not inspected at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name starts with one of the configured prefixes.
    Prefix(String),
    /// Name is already a canonical bill name.
    Canonical,
}

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// File was renamed.
    Renamed { target: PathBuf, warnings: Vec<String> },
    /// Dry run: file would have been renamed.
    WouldRename { target: PathBuf, warnings: Vec<String> },
    /// The file already carries its canonical name.
    AlreadyNamed,
    /// Another file already holds the target name; nothing was touched.
    Collision { target: PathBuf, warnings: Vec<String> },
    /// File was not inspected.
    Skipped(SkipReason),
    /// No record could be produced from the text.
    Rejected(ExtractionError),
    /// Reading the document or renaming it failed.
    Failed(ReciboError),
}

impl FileOutcome {
    /// Short status label used in reports.
    pub fn status(&self) -> &'static str {
        match self {
            FileOutcome::Renamed { .. } => "renamed",
            FileOutcome::WouldRename { .. } => "would_rename",
            FileOutcome::AlreadyNamed => "already_named",
            FileOutcome::Collision { .. } => "collision",
            FileOutcome::Skipped(_) => "skipped",
            FileOutcome::Rejected(_) => "rejected",
            FileOutcome::Failed(_) => "failed",
        }
    }

    /// Destination path, when one was computed.
    pub fn target(&self) -> Option<&Path> {
        match self {
            FileOutcome::Renamed { target, .. }
            | FileOutcome::WouldRename { target, .. }
            | FileOutcome::Collision { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Extraction warnings attached to the outcome.
    pub fn warnings(&self) -> &[String] {
        match self {
            FileOutcome::Renamed { warnings, .. }
            | FileOutcome::WouldRename { warnings, .. }
            | FileOutcome::Collision { warnings, .. } => warnings,
            _ => &[],
        }
    }
}

/// Outcome of a single file in a batch.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Outcomes of a whole batch, in listing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Renamed { .. } | FileOutcome::WouldRename { .. }))
    }

    pub fn collisions(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Collision { .. }))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Rejected(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped(_) | FileOutcome::AlreadyNamed))
    }
}

/// List the `*.pdf` files of a directory, sorted by path.
///
/// The extension is matched case-insensitively.
pub fn list_pdfs(dir: &Path) -> crate::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReciboError::Config(format!(
            "input directory does not exist: {}",
            dir.display()
        )));
    }

    let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files: Vec<PathBuf> = glob::glob_with(&pattern, options)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Unreadable directory entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    debug!("Found {} PDF files in {}", files.len(), dir.display());
    Ok(files)
}

/// Renames bills in place using the fields extracted from their first page.
pub struct BatchRenamer<S: TextSource> {
    config: RenameConfig,
    source: S,
    parser: CfeBillParser,
}

impl<S: TextSource> BatchRenamer<S> {
    pub fn new(config: RenameConfig, source: S) -> Self {
        Self {
            config,
            source,
            parser: CfeBillParser::new(),
        }
    }

    /// Process every PDF of `dir`. Only an unreadable directory is an error.
    pub fn run(&self, dir: &Path) -> crate::Result<BatchReport> {
        self.run_with(dir, |_| {})
    }

    /// Like [`BatchRenamer::run`], calling `on_file` after each file.
    pub fn run_with(
        &self,
        dir: &Path,
        on_file: impl FnMut(&FileReport),
    ) -> crate::Result<BatchReport> {
        let files = list_pdfs(dir)?;
        Ok(self.process_files(files, on_file))
    }

    /// Process an already listed set of files in order.
    pub fn process_files(
        &self,
        files: Vec<PathBuf>,
        mut on_file: impl FnMut(&FileReport),
    ) -> BatchReport {
        let mut report = BatchReport {
            files: Vec::with_capacity(files.len()),
        };
        let mut claimed = HashSet::new();

        for path in files {
            let outcome = self.process_claimed(&path, &mut claimed);
            let file_report = FileReport { path, outcome };
            on_file(&file_report);
            report.files.push(file_report);
        }

        info!(
            "Batch finished: {} renamed, {} rejected, {} failed",
            report.renamed(),
            report.rejected(),
            report.failed()
        );
        report
    }

    /// Extract, validate and rename a single file.
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        self.process_claimed(path, &mut HashSet::new())
    }

    /// `claimed` holds the targets already handed out in this run, so a dry
    /// run reports the same collisions a real run would hit.
    fn process_claimed(&self, path: &Path, claimed: &mut HashSet<PathBuf>) -> FileOutcome {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(reason) = self.skip_reason(&file_name) {
            debug!("Skipping {}: {:?}", file_name, reason);
            return FileOutcome::Skipped(reason);
        }

        let text = match self.read_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", file_name, e);
                return FileOutcome::Failed(e);
            }
        };

        let result = match self.parser.parse(text.as_deref()) {
            Ok(result) => result,
            Err(e) => {
                warn!("No record for {}: {}", file_name, e);
                return FileOutcome::Rejected(e);
            }
        };

        let target = path.with_file_name(result.record.file_name());
        let warnings = result.warnings;

        if target == path || same_file(path, &target) {
            return FileOutcome::AlreadyNamed;
        }

        if target.exists() || claimed.contains(&target) {
            warn!("Target already exists: {}", target.display());
            return FileOutcome::Collision { target, warnings };
        }

        if self.config.dry_run {
            claimed.insert(target.clone());
            return FileOutcome::WouldRename { target, warnings };
        }

        match fs::rename(path, &target) {
            Ok(()) => {
                info!("Renamed {} -> {}", file_name, target.display());
                claimed.insert(target.clone());
                FileOutcome::Renamed { target, warnings }
            }
            Err(e) => {
                warn!("Failed to rename {}: {}", file_name, e);
                FileOutcome::Failed(e.into())
            }
        }
    }

    /// Read the first page, containing any panic raised by the PDF stack.
    fn read_text(&self, path: &Path) -> crate::Result<Option<String>> {
        panic::catch_unwind(AssertUnwindSafe(|| self.source.first_page_text(path)))
            .unwrap_or_else(|payload| {
                Err(PdfError::TextExtraction(format!(
                    "reader panicked: {}",
                    panic_message(payload.as_ref())
                ))
                .into())
            })
    }

    fn skip_reason(&self, file_name: &str) -> Option<SkipReason> {
        if let Some(prefix) = self
            .config
            .skip_prefixes
            .iter()
            .find(|p| !p.is_empty() && file_name.starts_with(p.as_str()))
        {
            return Some(SkipReason::Prefix(prefix.clone()));
        }

        if self.config.skip_canonical && ExtractedRecord::from_file_name(file_name).is_some() {
            return Some(SkipReason::Canonical);
        }

        None
    }
}

/// Whether two paths name the same file on disk, e.g. through a hard link
/// or a case-insensitive file system.
fn same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        matches!((fs::canonicalize(a), fs::canonicalize(b)), (Ok(a), Ok(b)) if a == b)
    }
}
