//! Locale resource files (`<locale>.json` under the resources root).

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Result, bail};

use crate::{
    core::{
        data::{MessageContext, MessageLocation},
        tree::{FlatMap, TranslationTree, TreeError},
    },
    utils::{build_line_index, offset_to_line},
};

/// One loaded locale file.
#[derive(Debug, Clone)]
pub struct LocaleResource {
    pub locale: String,
    pub file_path: String,
    /// Raw file content, kept for key line lookups in reports.
    pub content: String,
    pub tree: TranslationTree,
}

impl LocaleResource {
    pub fn load(path: &Path, locale: &str) -> Result<Self, TreeError> {
        let content = fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tree = TranslationTree::parse(&content).map_err(|message| TreeError::Parse {
            path: path.display().to_string(),
            message,
        })?;
        Ok(Self {
            locale: locale.to_string(),
            file_path: path.to_string_lossy().to_string(),
            content,
            tree,
        })
    }

    /// An empty locale that does not exist on disk yet.
    pub fn empty(dir: &Path, locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            file_path: dir.join(format!("{}.json", locale)).to_string_lossy().to_string(),
            content: String::new(),
            tree: TranslationTree::new(),
        }
    }

    pub fn flatten(&self) -> FlatMap {
        self.tree.flatten()
    }

    /// Contexts for a set of keys, with their line in the file.
    pub fn contexts<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Vec<MessageContext> {
        let line_index = build_line_index(&self.content);
        keys.into_iter()
            .map(|key| {
                let line = find_key_line(&self.content, key, &line_index);
                MessageContext::new(
                    MessageLocation::with_line(self.file_path.clone(), line),
                    key,
                    self.tree.get(key).unwrap_or_default(),
                )
            })
            .collect()
    }
}

/// A locale file that could not be loaded.
#[derive(Debug, Clone)]
pub struct ResourceScanWarning {
    pub locale: String,
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanResourcesResult {
    /// Successfully loaded locales, by locale id.
    pub locales: BTreeMap<String, LocaleResource>,
    pub warnings: Vec<ResourceScanWarning>,
}

/// Find the line number where a key appears in the JSON content.
///
/// Searches for each key part in sequence so `common.submit` finds the
/// `"submit"` after `"common"`, not one under another branch. Only matches
/// followed by `:` count as keys.
pub fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();
            if remaining[after_pattern..].trim_start().starts_with(':') {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}

/// Extracts locale from filename.
///
/// - "en.json" -> Some("en")
/// - "/path/to/translations/pt-BR.json" -> Some("pt-BR")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

pub fn scan_resource_files(resources_dir: impl AsRef<Path>) -> Result<ScanResourcesResult> {
    let resources_dir = resources_dir.as_ref();
    let mut result = ScanResourcesResult::default();

    if !resources_dir.exists() {
        bail!(
            "Resources directory '{}' does not exist.\n\
             Hint: Check your .trsyncrc.json 'resourcesRoot' setting.",
            resources_dir.display()
        );
    }

    if !resources_dir.is_dir() {
        bail!("'{}' is not a directory.", resources_dir.display());
    }

    for entry in fs::read_dir(resources_dir)? {
        let path = entry?.path();

        if path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = extract_locale(&path)
        {
            match LocaleResource::load(&path, &locale) {
                Ok(resource) => {
                    result.locales.insert(locale, resource);
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "skipping unreadable locale file");
                    result.warnings.push(ResourceScanWarning {
                        locale,
                        file_path: path.to_string_lossy().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(result)
}
