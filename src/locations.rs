//! Scan-scope resolution.
//!
//! A "location" is a directory included in the scan. The resolver descends
//! from a root directory to a configurable depth and returns the reachable
//! directories as an explicit list; callers that already know their locations
//! bypass resolution entirely and pass their own list downstream.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while resolving or listing scan locations.
#[derive(Debug)]
pub enum ScanError {
    /// A directory could not be read.
    ReadDir { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDir { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Resolves the set of directories to scan from `root`.
///
/// With `levels` of 1 (or 0) the result is `[root]` alone. Deeper limits
/// return `root` followed by the resolution of each immediate subdirectory at
/// `levels - 1`, depth-first, in directory-listing order. Directory trees are
/// acyclic, so no cycle detection is performed.
///
/// # Errors
///
/// Returns `ScanError::ReadDir` if a directory within the depth bound cannot
/// be listed. A missing root with `levels` of 1 is not an error here; it
/// surfaces later when the location itself is listed.
pub fn resolve(root: &Path, levels: u32) -> Result<Vec<PathBuf>, ScanError> {
    let mut locations = Vec::new();
    collect(root, levels, &mut locations)?;
    Ok(locations)
}

fn collect(dir: &Path, levels: u32, locations: &mut Vec<PathBuf>) -> Result<(), ScanError> {
    locations.push(dir.to_path_buf());
    if levels <= 1 {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|e| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, levels - 1, locations)?;
        }
    }

    Ok(())
}
