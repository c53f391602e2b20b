//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored
//! status messages and the manifest preview table. Keeping every print behind
//! this module makes it easy to change formatting globally.

use colored::*;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - The two-column manifest preview table
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use renamo::output::OutputFormatter;
    /// OutputFormatter::success("rename.csv written.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use renamo::output::OutputFormatter;
    /// OutputFormatter::error("--read-file option not set!");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Renders accumulated manifest rows as an aligned two-column table.
    ///
    /// Used by the preview sink when reviewing what an apply run would do;
    /// nothing here touches disk.
    pub fn preview_table(columns: &[&str; 2], rows: &[(String, String)]) {
        let left_width = rows
            .iter()
            .map(|(original, _)| original.len())
            .max()
            .unwrap_or(0)
            .max(columns[0].len());
        let right_width = rows
            .iter()
            .map(|(_, target)| target.len())
            .max()
            .unwrap_or(0)
            .max(columns[1].len());

        println!(
            "{:<left$} | {}",
            columns[0].bold(),
            columns[1].bold(),
            left = left_width
        );
        println!("{}", "-".repeat(left_width + right_width + 3));

        for (original, target) in rows {
            println!("{:<left$} | {}", original, target, left = left_width);
        }

        println!("{}", "-".repeat(left_width + right_width + 3));
        println!(
            "{} {}",
            rows.len(),
            if rows.len() == 1 { "row" } else { "rows" }
        );
    }
}
