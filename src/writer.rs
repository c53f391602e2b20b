//! Output sinks for manifest rows.
//!
//! Two sinks share one interface: an in-memory table for human review and a
//! persistent CSV file for the edit-then-apply workflow. The sink is chosen
//! once at startup from the requested action and threaded through the
//! pipeline as a `&mut dyn ManifestWriter`.

use crate::manifest::MANIFEST_COLUMNS;
use crate::output::OutputFormatter;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// A sink that receives manifest rows one at a time.
pub trait ManifestWriter {
    /// Appends one row to the sink.
    fn write(&mut self, original: &str, target: &str) -> io::Result<()>;

    /// Finalizes the sink and reports completion.
    fn flush(&mut self) -> io::Result<()>;
}

/// Accumulates rows in memory and renders them as a table on flush.
///
/// Used for human review; never persists to disk.
#[derive(Debug, Default)]
pub struct TableWriter {
    rows: Vec<(String, String)>,
}

impl TableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows accumulated so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ManifestWriter for TableWriter {
    fn write(&mut self, original: &str, target: &str) -> io::Result<()> {
        self.rows.push((original.to_string(), target.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        OutputFormatter::preview_table(&MANIFEST_COLUMNS, &self.rows);
        Ok(())
    }
}

/// Writes rows to a CSV file, header first.
///
/// Fields containing the delimiter, quotes, or newlines are quoted per the
/// usual CSV rules, so arbitrary paths survive the round trip.
pub struct CsvFileWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvFileWriter {
    /// Opens `path` for writing and emits the header row.
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut writer = csv::Writer::from_path(path).map_err(into_io_error)?;
        writer.write_record(MANIFEST_COLUMNS).map_err(into_io_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }
}

impl ManifestWriter for CsvFileWriter {
    fn write(&mut self, original: &str, target: &str) -> io::Result<()> {
        self.writer
            .write_record([original, target])
            .map_err(into_io_error)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        OutputFormatter::success(&format!("{} written.", self.path.display()));
        Ok(())
    }
}

fn into_io_error(error: csv::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_table_writer_accumulates_rows() {
        let mut writer = TableWriter::new();
        writer.write("/a/x.txt", "/a/x.txt").expect("Write failed");
        writer.write("/a/y.jpg", "Deleted").expect("Write failed");

        assert_eq!(writer.len(), 2);
        writer.flush().expect("Flush failed");
    }

    #[test]
    fn test_csv_writer_emits_header_and_rows() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("rename.csv");

        let mut writer = CsvFileWriter::create(&path).expect("Create failed");
        writer.write("/a/x.txt", "/a/x.txt").expect("Write failed");
        writer.flush().expect("Flush failed");

        let content = fs::read_to_string(&path).expect("Failed to read manifest");
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Original Name,Rename To"));
        assert_eq!(lines.next(), Some("/a/x.txt,/a/x.txt"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_writer_quotes_awkward_paths() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("rename.csv");
        let awkward = "/a/with, comma.txt";

        let mut writer = CsvFileWriter::create(&path).expect("Create failed");
        writer.write(awkward, awkward).expect("Write failed");
        writer.flush().expect("Flush failed");

        // Reading back through the manifest reader restores the field intact.
        let rows = manifest::read_rows(&path).expect("Read failed");
        assert_eq!(rows[0].original, awkward);
        assert_eq!(rows[0].target, awkward);
    }

    #[test]
    fn test_csv_writer_unwritable_path_fails() {
        let result = CsvFileWriter::create(Path::new("/non/existent/dir/rename.csv"));
        assert!(result.is_err());
    }
}
