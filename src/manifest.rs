//! Manifest data model and reading.
//!
//! A manifest is a CSV file pairing each discovered file with its proposed
//! fate: a destination path, or a delete marker. The generate pipeline writes
//! one, the user hand-edits the second column, and the apply pipeline reads
//! it back. The first row is always the column header and is skipped on read.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Column headers of the persisted manifest.
pub const MANIFEST_COLUMNS: [&str; 2] = ["Original Name", "Rename To"];

/// Sentinel target marking a row for deletion.
pub const DELETED: &str = "Deleted";

/// One manifest row: a file and its proposed fate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    /// Path of the file as discovered at generation time.
    pub original: String,
    /// Destination path, or a delete marker after hand-editing.
    pub target: String,
}

impl ManifestRow {
    /// Normalizes the hand-edited target column.
    ///
    /// `d` and `delete` in any casing collapse to the [`DELETED`] sentinel;
    /// everything else is taken verbatim as a destination path.
    pub fn normalized_target(&self) -> &str {
        if self.target.eq_ignore_ascii_case("d") || self.target.eq_ignore_ascii_case("delete") {
            DELETED
        } else {
            &self.target
        }
    }

    /// True when this row asks for the original file to be deleted.
    pub fn is_delete(&self) -> bool {
        self.normalized_target() == DELETED
    }
}

/// Errors raised while reading a manifest file.
#[derive(Debug)]
pub enum ManifestError {
    /// The manifest file could not be opened.
    Open { path: PathBuf, source: io::Error },
    /// A record could not be parsed out of the manifest.
    Read { path: PathBuf, source: csv::Error },
    /// A data row carries fewer than the two expected columns.
    MalformedRow { line: usize },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Failed to open manifest {}: {}", path.display(), source)
            }
            Self::Read { path, source } => {
                write!(f, "Failed to read manifest {}: {}", path.display(), source)
            }
            Self::MalformedRow { line } => {
                write!(
                    f,
                    "Malformed manifest row at line {}: expected two columns",
                    line
                )
            }
        }
    }
}

impl std::error::Error for ManifestError {}

/// Reads the data rows of the manifest at `path`, skipping the header row.
///
/// Row order is preserved. Extra columns beyond the two expected ones are
/// ignored; rows with fewer than two are rejected with the offending line
/// number.
pub fn read_rows(path: &Path) -> Result<Vec<ManifestRow>, ManifestError> {
    let file = File::open(path).map_err(|e| ManifestError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        match (record.get(0), record.get(1)) {
            (Some(original), Some(target)) => rows.push(ManifestRow {
                original: original.to_string(),
                target: target.to_string(),
            }),
            // +2: one for the header row, one for 1-based numbering
            _ => return Err(ManifestError::MalformedRow { line: index + 2 }),
        }
    }

    Ok(rows)
}
