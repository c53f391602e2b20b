//! Candidate discovery and manifest generation.
//!
//! The generate pipeline: resolved locations are listed one by one, each
//! entry runs through the filter chain, and every survivor becomes the
//! manifest row `(path, path)`: the generated manifest proposes no change;
//! the user edits the second column before applying.

use crate::filters::FilterChain;
use crate::locations::ScanError;
use crate::output::OutputFormatter;
use crate::writer::ManifestWriter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised by the generate pipeline.
#[derive(Debug)]
pub enum GenerateError {
    /// A location could not be listed.
    Scan(ScanError),
    /// The output sink rejected a row or failed to finalize.
    Write(io::Error),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scan(source) => source.fmt(f),
            Self::Write(source) => write!(f, "Failed to write manifest: {}", source),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<ScanError> for GenerateError {
    fn from(source: ScanError) -> Self {
        Self::Scan(source)
    }
}

impl From<io::Error> for GenerateError {
    fn from(source: io::Error) -> Self {
        Self::Write(source)
    }
}

/// Lists the files in `location` that pass the filter chain.
///
/// Non-recursive; paths come back in directory-listing order, unsorted.
pub fn list_files(location: &Path, filters: &FilterChain) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(location).map_err(|e| ScanError::ReadDir {
        path: location.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if filters.passes(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Runs the generate pipeline over `locations` in input order.
///
/// Every surviving candidate is logged and written to the sink as the row
/// `(path, path)`. An unreadable location aborts the run with the propagated
/// error; nothing is retried.
pub fn generate(
    locations: &[PathBuf],
    filters: &FilterChain,
    writer: &mut dyn ManifestWriter,
) -> Result<(), GenerateError> {
    for location in locations {
        OutputFormatter::info(&format!(
            "Adding files from '{}' to list",
            location.display()
        ));
        for file in list_files(location, filters)? {
            let path = file.to_string_lossy();
            OutputFormatter::info(&format!("File added: {}", path));
            writer.write(&path, &path)?;
        }
    }

    writer.flush()?;
    Ok(())
}
