//! Manifest application: rename and delete, dry-run or live.
//!
//! The apply pipeline reads a previously generated (and hand-edited)
//! manifest and carries out each row: delete the original, or rename it to
//! the target. Dry-run mode feeds the planned actions to the preview table
//! instead of the filesystem. Live runs record every performed operation in
//! a JSON journal next to the manifest, so even a run that aborts midway
//! leaves a record of what actually happened.

use crate::manifest::{self, DELETED, ManifestError, ManifestRow};
use crate::output::OutputFormatter;
use crate::writer::{ManifestWriter, TableWriter};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Whether apply touches the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Report intended actions without performing them.
    DryRun,
    /// Perform renames and deletions.
    Live,
}

/// What to do when a row fails to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the remaining manifest on the first failure.
    Stop,
    /// Record the failure and continue with the next row.
    KeepGoing,
}

/// Outcome of an apply run.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Rows renamed successfully.
    pub renamed: usize,
    /// Rows deleted successfully.
    pub deleted: usize,
    /// Rows that failed, as `(original, reason)`. Populated only under
    /// [`ErrorPolicy::KeepGoing`]; under `Stop` the first failure is the
    /// returned error instead.
    pub failed: Vec<(String, String)>,
}

impl ApplyReport {
    /// True when every row applied cleanly.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Errors that can occur while applying a manifest.
#[derive(Debug)]
pub enum ApplyError {
    /// The manifest could not be read.
    Manifest(ManifestError),
    /// A row's original file could not be deleted.
    Delete { path: String, source: io::Error },
    /// A row's original file could not be renamed to its target.
    Rename {
        from: String,
        to: String,
        source: io::Error,
    },
    /// The apply journal could not be written.
    Journal { path: PathBuf, source: io::Error },
    /// The dry-run preview could not be rendered.
    Preview { source: io::Error },
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manifest(source) => source.fmt(f),
            Self::Delete { path, source } => {
                write!(f, "Failed to delete {}: {}", path, source)
            }
            Self::Rename { from, to, source } => {
                write!(f, "Failed to rename {} to {}: {}", from, to, source)
            }
            Self::Journal { path, source } => {
                write!(f, "Failed to write journal {}: {}", path.display(), source)
            }
            Self::Preview { source } => write!(f, "Failed to render preview: {}", source),
        }
    }
}

impl std::error::Error for ApplyError {}

impl From<ManifestError> for ApplyError {
    fn from(source: ManifestError) -> Self {
        Self::Manifest(source)
    }
}

/// How a performed operation is recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalAction {
    Renamed,
    Deleted,
}

/// One performed operation, as recorded in the apply journal.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub original: String,
    pub target: String,
    pub action: JournalAction,
}

#[derive(Serialize)]
struct Journal<'a> {
    timestamp: String,
    manifest: String,
    operations: &'a [JournalEntry],
}

/// Path of the journal written for a live apply of `manifest`.
///
/// `rename.csv` journals to `rename.applied.json`.
pub fn journal_path(manifest: &Path) -> PathBuf {
    manifest.with_extension("applied.json")
}

/// Applies the manifest at `manifest_path`.
///
/// Reads the manifest (header skipped), normalizes each row's target, and
/// either previews or performs the resulting action. Rows whose original
/// contains the manifest's own path are skipped entirely, since a generated
/// manifest that landed inside a scanned directory lists itself.
///
/// # Errors
///
/// Manifest read errors always abort. Per-row filesystem failures abort
/// under [`ErrorPolicy::Stop`] (the journal of already-performed operations
/// is still written first) and are collected into the report under
/// [`ErrorPolicy::KeepGoing`].
pub fn apply(
    manifest_path: &Path,
    mode: ApplyMode,
    policy: ErrorPolicy,
) -> Result<ApplyReport, ApplyError> {
    OutputFormatter::info(&format!("read file: {}", manifest_path.display()));
    if mode == ApplyMode::DryRun {
        OutputFormatter::warning("This is a dry run!");
    }

    let rows = manifest::read_rows(manifest_path)?;
    let own_path = manifest_path.to_string_lossy();

    let mut report = ApplyReport::default();
    let mut journal = Vec::new();
    let mut preview = TableWriter::new();

    for row in &rows {
        if row.original.contains(own_path.as_ref()) {
            continue;
        }

        let target = row.normalized_target().to_string();

        if mode == ApplyMode::DryRun {
            preview
                .write(&row.original, &target)
                .map_err(|e| ApplyError::Preview { source: e })?;
            continue;
        }

        OutputFormatter::info(&format!("Original File: {}", row.original));
        OutputFormatter::info(&format!("New File: {}", target));

        match perform(row, &target) {
            Ok(entry) => {
                match entry.action {
                    JournalAction::Renamed => report.renamed += 1,
                    JournalAction::Deleted => report.deleted += 1,
                }
                journal.push(entry);
            }
            Err(error) => match policy {
                ErrorPolicy::KeepGoing => {
                    OutputFormatter::error(&error.to_string());
                    report.failed.push((row.original.clone(), error.to_string()));
                }
                ErrorPolicy::Stop => {
                    // Keep the record of what already happened before aborting.
                    if let Err(journal_error) = write_journal(manifest_path, &journal) {
                        OutputFormatter::warning(&format!(
                            "Could not save journal: {}",
                            journal_error
                        ));
                    }
                    return Err(error);
                }
            },
        }
    }

    match mode {
        ApplyMode::DryRun => {
            preview
                .flush()
                .map_err(|e| ApplyError::Preview { source: e })?;
            OutputFormatter::dry_run_notice("No files were modified.");
        }
        ApplyMode::Live => write_journal(manifest_path, &journal)?,
    }

    Ok(report)
}

/// Carries out a single live row.
fn perform(row: &ManifestRow, target: &str) -> Result<JournalEntry, ApplyError> {
    if target == DELETED {
        fs::remove_file(&row.original).map_err(|e| ApplyError::Delete {
            path: row.original.clone(),
            source: e,
        })?;

        return Ok(JournalEntry {
            original: row.original.clone(),
            target: DELETED.to_string(),
            action: JournalAction::Deleted,
        });
    }

    fs::rename(&row.original, target).map_err(|e| ApplyError::Rename {
        from: row.original.clone(),
        to: target.to_string(),
        source: e,
    })?;

    Ok(JournalEntry {
        original: row.original.clone(),
        target: target.to_string(),
        action: JournalAction::Renamed,
    })
}

/// Saves the journal of performed operations next to the manifest.
fn write_journal(manifest_path: &Path, operations: &[JournalEntry]) -> Result<(), ApplyError> {
    let path = journal_path(manifest_path);
    let journal = Journal {
        timestamp: chrono::Utc::now().to_rfc3339(),
        manifest: manifest_path.to_string_lossy().to_string(),
        operations,
    };

    let json = serde_json::to_string_pretty(&journal).map_err(|e| ApplyError::Journal {
        path: path.clone(),
        source: io::Error::new(
            io::ErrorKind::InvalidData,
            format!("JSON serialization failed: {}", e),
        ),
    })?;

    fs::write(&path, json).map_err(|e| ApplyError::Journal {
        path: path.clone(),
        source: e,
    })
}
