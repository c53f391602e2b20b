//! Command-line interface module for renamo.
//!
//! This module handles all CLI-related functionality including:
//! - Flag parsing and validation
//! - Configuration loading and default resolution
//! - Wiring the generate and apply pipelines together

use crate::apply::{self, ApplyMode, ErrorPolicy};
use crate::config::Config;
use crate::filters::FilterChain;
use crate::locations;
use crate::output::OutputFormatter;
use crate::scanner;
use crate::writer::CsvFileWriter;
use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;

/// Audit and batch-rename files through an editable CSV manifest.
#[derive(Parser, Debug)]
#[command(
    name = "renamo",
    version,
    about = "Audit and batch-rename files through an editable CSV manifest",
    long_about = "renamo walks a directory tree, lists the files that pass your\n\
                  extension filters, and writes a CSV manifest pairing each file\n\
                  with a proposed new name. Edit the second column, then apply\n\
                  the manifest to rename or delete the files; preview first\n\
                  with the default dry_run action."
)]
pub struct Args {
    /// Where do you want to start the search (default: current working directory)
    #[arg(long, value_name = "DIR")]
    pub location: Option<PathBuf>,

    /// Only list files with the given extension
    #[arg(long, value_name = "EXT")]
    pub only_extension: Option<String>,

    /// Which extensions should be ignored; separate multiple extensions with space
    #[arg(long, num_args = 1.., value_name = "EXT")]
    pub exclude_extensions: Vec<String>,

    /// Action to take when executing the tool
    #[arg(long, value_enum, default_value = "dry_run")]
    pub action: Action,

    /// Delete any empty folders (accepted for compatibility; currently has no effect)
    #[arg(long)]
    pub delete_empty_folders: bool,

    /// How many nested levels to iterate from the root folder
    #[arg(long, value_name = "N")]
    pub levels: Option<u32>,

    /// Run on explicit locations instead of traversing from --location;
    /// separate multiple locations with space
    #[arg(long, num_args = 1.., value_name = "DIR")]
    pub custom_locations: Vec<PathBuf>,

    /// What do you want to name the output file
    #[arg(long, value_name = "FILE")]
    pub file_name: Option<PathBuf>,

    /// Read file with modified locations (must be a CSV file created by this program)
    #[arg(long, value_name = "FILE")]
    pub read_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep applying rows after a failure and report at the end
    #[arg(long)]
    pub keep_going: bool,
}

/// The pipeline to run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum Action {
    /// Generate the manifest you then edit for renaming
    Generate,
    /// Read the edited manifest and rename based on the edit
    Rename,
    /// Output what the rename process will do
    DryRun,
}

/// Runs the CLI application with the given arguments.
///
/// This is the main entry point. Validation failures and propagated pipeline
/// errors come back as the `Err` message; the caller reports it and exits
/// non-zero.
pub fn run_cli(args: Args) -> Result<(), String> {
    let config = Config::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let rules = config
        .compile()
        .map_err(|e| format!("Error compiling exclusion rules: {}", e))?;

    let exclude_extensions = if args.exclude_extensions.is_empty() {
        config.defaults.exclude_extensions.clone()
    } else {
        args.exclude_extensions.clone()
    };
    let filters = FilterChain::new(args.only_extension.as_deref(), &exclude_extensions, rules);

    match args.action {
        Action::Generate => run_generate(&args, &config, &filters),
        Action::Rename => run_apply(&args, ApplyMode::Live),
        Action::DryRun => run_apply(&args, ApplyMode::DryRun),
    }
}

/// Resolves the scan scope and runs the generate pipeline into a CSV sink.
fn run_generate(args: &Args, config: &Config, filters: &FilterChain) -> Result<(), String> {
    let locations = if args.custom_locations.is_empty() {
        let root = match &args.location {
            Some(dir) => dir.clone(),
            None => env::current_dir()
                .map_err(|e| format!("Cannot determine current directory: {}", e))?,
        };
        let levels = args.levels.or(config.defaults.levels).unwrap_or(1);
        locations::resolve(&root, levels).map_err(|e| e.to_string())?
    } else {
        args.custom_locations.clone()
    };

    let file_name = args
        .file_name
        .clone()
        .or_else(|| config.defaults.file_name.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("rename.csv"));

    OutputFormatter::info(&format!("Generating {}", file_name.display()));

    let mut writer = CsvFileWriter::create(&file_name)
        .map_err(|e| format!("Cannot create {}: {}", file_name.display(), e))?;

    scanner::generate(&locations, filters, &mut writer).map_err(|e| e.to_string())
}

/// Validates `--read-file` and runs the apply pipeline.
fn run_apply(args: &Args, mode: ApplyMode) -> Result<(), String> {
    let Some(read_file) = &args.read_file else {
        return Err("--read-file option not set!".to_string());
    };

    let policy = if args.keep_going {
        ErrorPolicy::KeepGoing
    } else {
        ErrorPolicy::Stop
    };

    let report = apply::apply(read_file, mode, policy).map_err(|e| e.to_string())?;

    if mode == ApplyMode::Live {
        OutputFormatter::success(&format!(
            "Applied: {} renamed, {} deleted",
            report.renamed, report.deleted
        ));

        if !report.is_complete_success() {
            OutputFormatter::plain(&format!("  Failed: {}", report.failed.len()));
            for (path, reason) in &report.failed {
                OutputFormatter::error(&format!("  - {}: {}", path, reason));
            }
            return Err(format!("{} row(s) could not be applied", report.failed.len()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("Arguments should parse")
    }

    #[test]
    fn test_action_defaults_to_dry_run() {
        let args = parse(&["renamo"]);
        assert_eq!(args.action, Action::DryRun);
    }

    #[test]
    fn test_action_values_use_snake_case() {
        assert_eq!(
            parse(&["renamo", "--action", "generate"]).action,
            Action::Generate
        );
        assert_eq!(
            parse(&["renamo", "--action", "rename"]).action,
            Action::Rename
        );
        assert_eq!(
            parse(&["renamo", "--action", "dry_run"]).action,
            Action::DryRun
        );
    }

    #[test]
    fn test_exclude_extensions_take_multiple_values() {
        let args = parse(&["renamo", "--exclude-extensions", "tmp", "bak", "log"]);
        assert_eq!(args.exclude_extensions, vec!["tmp", "bak", "log"]);
    }

    #[test]
    fn test_custom_locations_take_multiple_values() {
        let args = parse(&["renamo", "--custom-locations", "/a", "/b"]);
        assert_eq!(
            args.custom_locations,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_delete_empty_folders_is_accepted() {
        // Declared but intentionally unwired; parsing it must still work.
        let args = parse(&["renamo", "--delete-empty-folders"]);
        assert!(args.delete_empty_folders);
    }

    #[test]
    fn test_apply_actions_require_read_file() {
        let args = parse(&["renamo", "--action", "dry_run"]);
        let result = run_cli(args);
        assert_eq!(result, Err("--read-file option not set!".to_string()));

        let args = parse(&["renamo", "--action", "rename"]);
        let result = run_cli(args);
        assert_eq!(result, Err("--read-file option not set!".to_string()));
    }
}
