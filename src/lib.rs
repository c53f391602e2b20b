//! renamo - a file auditing and batch-renaming utility
//!
//! This library walks a directory tree to a configurable depth, lists the
//! files that pass the configured filters, and writes an editable CSV
//! manifest pairing original names with proposed new names. Applying the
//! edited manifest renames or deletes the files, in preview (dry-run) or
//! live mode.

pub mod apply;
pub mod cli;
pub mod config;
pub mod filters;
pub mod locations;
pub mod manifest;
pub mod output;
pub mod scanner;
pub mod writer;

pub use apply::{ApplyMode, ApplyReport, ErrorPolicy};
pub use config::{CompiledRules, Config, ConfigError};
pub use filters::FilterChain;
pub use manifest::{ManifestError, ManifestRow};
pub use writer::{CsvFileWriter, ManifestWriter, TableWriter};

pub use cli::{Action, Args, run_cli};
