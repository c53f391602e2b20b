//! Optional TOML configuration.
//!
//! Two tables are recognized. `[defaults]` supplies fallback values for flags
//! the user left off the command line; `[rules]` supplies extra exclusion
//! predicates that join the filter chain:
//! - Exact filename matching
//! - Glob pattern matching
//! - Regex pattern matching
//!
//! # Configuration File Format
//!
//! ```toml
//! [defaults]
//! levels = 2
//! file-name = "rename.csv"
//! exclude-extensions = ["tmp", "bak"]
//!
//! [rules]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.lock"]
//! regex = []
//! ```
//!
//! With no configuration file present, every table is empty and the tool
//! behaves exactly as its command-line flags describe.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading and rule compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Root configuration structure, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fallback flag values, used only when the flag is absent.
    #[serde(default)]
    pub defaults: Defaults,

    /// Extra exclusion rules applied by the filter chain.
    #[serde(default)]
    pub rules: Rules,
}

/// Fallback values for command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Defaults {
    /// Traversal depth used when `--levels` is absent.
    #[serde(default)]
    pub levels: Option<u32>,

    /// Manifest name used when `--file-name` is absent.
    #[serde(default)]
    pub file_name: Option<String>,

    /// Extensions excluded when `--exclude-extensions` is absent.
    #[serde(default)]
    pub exclude_extensions: Vec<String>,
}

/// Exclusion rules joined into the filter chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rules {
    /// Exact filenames to exclude (e.g., ".DS_Store", "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*.lock").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns to exclude, matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl Config {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.renamo.toml` in the current directory
    /// 3. Look for `~/.config/renamo/config.toml` in the home directory
    /// 4. Fall back to the empty default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        // If explicitly specified, load from that path
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try current directory
        let local_config = PathBuf::from(".renamo.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try home directory
        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("renamo")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile the exclusion rules into matchers for the filter chain.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid, before any
    /// scanning has started.
    pub fn compile(&self) -> Result<CompiledRules, ConfigError> {
        CompiledRules::new(&self.rules)
    }
}

/// Pre-compiled exclusion rules for efficient per-file matching.
#[derive(Debug, Default)]
pub struct CompiledRules {
    filenames: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl CompiledRules {
    fn new(rules: &Rules) -> Result<Self, ConfigError> {
        let patterns = rules
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filenames: rules.filenames.iter().cloned().collect(),
            patterns,
            regexes,
        })
    }

    /// True when no exclusion rule matches the candidate.
    pub fn allows(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.filenames.contains(file_name.as_ref()) {
            return false;
        }

        if self
            .patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return false;
        }

        if self.regexes.iter().any(|regex| regex.is_match(&file_name)) {
            return false;
        }

        true
    }
}
