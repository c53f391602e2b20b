//! Candidate-file filtering.
//!
//! A candidate survives the chain only if every configured predicate holds:
//! it must be a regular file, its extension must not be excluded, it must
//! carry the requested extension when one is set, and no configured exclusion
//! rule may match it. Predicates are pure, so evaluation order is purely an
//! implementation detail.

use crate::config::CompiledRules;
use std::collections::HashSet;
use std::path::Path;

/// Returns the extension used for filtering decisions, lowercased.
///
/// The extension is the text after the final `.` of the file name. A name
/// with no `.` yields the whole name: `file_extension` of `Makefile` is
/// `"makefile"`. Historical behavior, relied on by existing manifests; tests
/// pin it so nobody corrects it by accident.
pub fn file_extension(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.rsplit('.').next().unwrap_or_default().to_lowercase()
}

/// The AND-composed set of predicates applied to every candidate path.
#[derive(Debug, Default)]
pub struct FilterChain {
    only_extension: Option<String>,
    exclude_extensions: HashSet<String>,
    rules: CompiledRules,
}

impl FilterChain {
    /// Builds a chain from the configured extension filters and compiled
    /// exclusion rules. Extension comparisons are case-insensitive.
    pub fn new(
        only_extension: Option<&str>,
        exclude_extensions: &[String],
        rules: CompiledRules,
    ) -> Self {
        Self {
            only_extension: only_extension.map(|ext| ext.to_lowercase()),
            exclude_extensions: exclude_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            rules,
        }
    }

    /// True when `path` passes every configured filter.
    pub fn passes(&self, path: &Path) -> bool {
        // Directories and non-regular files never qualify.
        if !path.is_file() {
            return false;
        }

        let extension = file_extension(path);

        if self.exclude_extensions.contains(&extension) {
            return false;
        }

        if let Some(only) = &self.only_extension
            && extension != *only
        {
            return false;
        }

        self.rules.allows(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn chain(only: Option<&str>, exclude: &[&str]) -> FilterChain {
        let exclude: Vec<String> = exclude.iter().map(|e| e.to_string()).collect();
        FilterChain::new(only, &exclude, CompiledRules::default())
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(file_extension(Path::new("A.TXT")), "txt");
        assert_eq!(file_extension(Path::new("a.txt")), "txt");
    }

    #[test]
    fn test_extension_takes_last_segment() {
        assert_eq!(file_extension(Path::new("archive.tar.gz")), "gz");
    }

    #[test]
    fn test_dotless_name_is_its_own_extension() {
        // The whole filename stands in for the extension. Preserved quirk.
        assert_eq!(file_extension(Path::new("Makefile")), "makefile");
        assert_eq!(file_extension(Path::new("/some/dir.d/README")), "readme");
    }

    #[test]
    fn test_leading_dot_name_yields_trailing_segment() {
        assert_eq!(file_extension(Path::new(".gitignore")), "gitignore");
    }

    #[test]
    fn test_directories_never_pass() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let subdir = temp_dir.path().join("sub");
        fs::create_dir(&subdir).expect("Failed to create subdirectory");

        assert!(!chain(None, &[]).passes(&subdir));
    }

    #[test]
    fn test_missing_paths_never_pass() {
        assert!(!chain(None, &[]).passes(Path::new("/non/existent/file.txt")));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let upper = temp_dir.path().join("photo.JPG");
        let lower = temp_dir.path().join("notes.txt");
        fs::write(&upper, "x").expect("Failed to write file");
        fs::write(&lower, "x").expect("Failed to write file");

        let chain = chain(None, &["jpg"]);
        assert!(!chain.passes(&upper));
        assert!(chain.passes(&lower));
    }

    #[test]
    fn test_only_extension_restricts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let txt = temp_dir.path().join("notes.txt");
        let jpg = temp_dir.path().join("photo.jpg");
        fs::write(&txt, "x").expect("Failed to write file");
        fs::write(&jpg, "x").expect("Failed to write file");

        let chain = chain(Some("TXT"), &[]);
        assert!(chain.passes(&txt));
        assert!(!chain.passes(&jpg));
    }

    #[test]
    fn test_contradictory_filters_pass_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let txt = temp_dir.path().join("notes.txt");
        let jpg = temp_dir.path().join("photo.jpg");
        fs::write(&txt, "x").expect("Failed to write file");
        fs::write(&jpg, "x").expect("Failed to write file");

        // only txt AND exclude txt: the conjunction is unsatisfiable
        let chain = chain(Some("txt"), &["txt"]);
        assert!(!chain.passes(&txt));
        assert!(!chain.passes(&jpg));
    }

    #[test]
    fn test_filter_order_is_irrelevant() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("photo.jpg");
        fs::write(&file, "x").expect("Failed to write file");

        // Same predicates, either way of stating them: identical verdicts.
        let a = chain(Some("jpg"), &["png"]);
        let b = chain(Some("jpg"), &["png"]);
        assert_eq!(a.passes(&file), b.passes(&file));

        let c = chain(Some("png"), &["jpg"]);
        let d = chain(Some("png"), &["jpg"]);
        assert_eq!(c.passes(&file), d.passes(&file));
    }

    #[test]
    fn test_config_rules_join_the_chain() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let lock = temp_dir.path().join("Cargo.lock");
        let toml = temp_dir.path().join("Cargo.toml");
        fs::write(&lock, "x").expect("Failed to write file");
        fs::write(&toml, "x").expect("Failed to write file");

        let config: Config = toml::from_str(
            r#"
            [rules]
            patterns = ["*.lock"]
        "#,
        )
        .expect("Failed to parse config");
        let chain = FilterChain::new(None, &[], config.compile().unwrap());

        assert!(!chain.passes(&lock));
        assert!(chain.passes(&toml));
    }
}
