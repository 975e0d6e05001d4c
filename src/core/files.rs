//! Source file discovery.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Which files under the source root are scanned.
#[derive(Debug, Clone)]
pub struct SourceFilter<'a> {
    pub extensions: &'a [String],
    /// File name suffixes of generated code, e.g. `.g.dart`.
    pub generated_suffixes: &'a [String],
    pub ignores: &'a [String],
}

impl SourceFilter<'_> {
    fn is_source_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));
        has_extension && !self.generated_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted file paths.
    pub files: Vec<String>,
    /// Entries that could not be read.
    pub skipped_count: usize,
}

pub fn scan_source_files(source_root: &Path, filter: &SourceFilter<'_>) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in filter.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(source_root.join(p));
        }
    }

    for entry in WalkDir::new(source_root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!(error = %e, "cannot access path");
                continue;
            }
        };
        let path = entry.path();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        let path_str = path.to_string_lossy();
        let relative = path.strip_prefix(source_root).unwrap_or(path).to_string_lossy();
        if glob_patterns
            .iter()
            .any(|p| p.matches(&path_str) || p.matches(&relative))
        {
            continue;
        }

        if entry.file_type().is_file() && filter.is_source_file(path) {
            files.push(path_str.into_owned());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}
