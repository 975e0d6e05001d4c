use std::{
    cell::OnceCell,
    collections::BTreeMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow, bail};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        files::{SourceFilter, scan_source_files},
        patterns::PatternTable,
        pipeline::SourceFile,
        resources::{LocaleResource, ResourceScanWarning, scan_resource_files},
    },
    issues::{IoErrorIssue, ParseErrorIssue},
};

/// Source files read into memory, plus the ones that could not be read.
#[derive(Debug, Default)]
pub struct SourceData {
    pub files: Vec<SourceFile>,
    pub errors: Vec<IoErrorIssue>,
}

/// All locale files, split into the reference locale and the rest.
#[derive(Debug)]
pub struct ResourceSet {
    pub reference: LocaleResource,
    /// True when the reference file does not exist yet.
    pub reference_is_new: bool,
    /// Every other locale, by locale id.
    pub others: BTreeMap<String, LocaleResource>,
    /// Non-reference locale files that failed to load.
    pub parse_errors: Vec<ParseErrorIssue>,
}

impl ResourceSet {
    pub fn locale_count(&self) -> usize {
        self.others.len() + usize::from(!self.reference_is_new)
    }

    /// True when `<locale>.json` exists but could not be loaded.
    pub fn failed_to_load(&self, locale: &str) -> bool {
        self.parse_errors
            .iter()
            .any(|e| Path::new(&e.file_path).file_stem() == Some(OsStr::new(locale)))
    }
}

/// Everything a command needs about the project.
///
/// Configuration priority: CLI arguments, then `.trsyncrc.json`, then
/// defaults. Source files are read lazily on first access.
pub struct ProjectContext {
    pub config: Config,
    pub table: PatternTable,
    pub source_dir: PathBuf,
    pub resources_dir: PathBuf,
    /// Sorted source file paths.
    pub files: Vec<String>,
    sources: OnceCell<SourceData>,
}

impl ProjectContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let config_result = load_config(Path::new("."))?;
        if !config_result.from_file {
            tracing::debug!("no .trsyncrc.json found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(source_root) = &common_args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        if let Some(resources_root) = &common_args.resources_root {
            config.resources_root = resources_root.to_string_lossy().to_string();
        }
        if let Some(locale) = &common_args.reference_locale {
            config.reference_locale = locale.clone();
        }
        config.validate()?;

        let source_dir = PathBuf::from(&config.source_root);
        let resources_dir = PathBuf::from(&config.resources_root);

        if !source_dir.is_dir() {
            bail!(
                "Source directory '{}' does not exist.\n\
                 Hint: Check your .trsyncrc.json 'sourceRoot' setting or pass --source-root.",
                source_dir.display()
            );
        }

        let filter = SourceFilter {
            extensions: &config.source_extensions,
            generated_suffixes: &config.generated_suffixes,
            ignores: &config.ignores,
        };
        let scan = scan_source_files(&source_dir, &filter);
        if scan.skipped_count > 0 {
            tracing::warn!(
                count = scan.skipped_count,
                "path(s) skipped due to access errors"
            );
        }
        tracing::debug!(files = scan.files.len(), dir = %source_dir.display(), "source files found");

        let table = PatternTable::from_config(&config);

        Ok(Self {
            config,
            table,
            source_dir,
            resources_dir,
            files: scan.files,
            sources: OnceCell::new(),
        })
    }

    pub fn reference_locale(&self) -> &str {
        &self.config.reference_locale
    }

    /// Narrow the file set to one file (`rewrite --file`).
    pub fn restrict_to(&mut self, file: &Path) -> Result<()> {
        if !file.is_file() {
            bail!("File '{}' does not exist.", file.display());
        }
        let wanted = fs::canonicalize(file)?;
        self.files.retain(|f| {
            fs::canonicalize(f)
                .map(|p| p == wanted)
                .unwrap_or(false)
        });
        if self.files.is_empty() {
            self.files.push(file.to_string_lossy().to_string());
        }
        self.sources = OnceCell::new();
        Ok(())
    }

    /// Read all source files in parallel (lazy).
    pub fn sources(&self) -> &SourceData {
        self.sources.get_or_init(|| {
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|path| (path.clone(), fs::read_to_string(path)))
                .collect();

            let mut data = SourceData::default();
            for (path, result) in results {
                match result {
                    Ok(content) => data.files.push(SourceFile { path, content }),
                    Err(e) => {
                        tracing::warn!(file = %path, error = %e, "cannot read source file");
                        data.errors.push(IoErrorIssue {
                            file_path: path,
                            error: e.to_string(),
                        });
                    }
                }
            }
            data
        })
    }

    /// Load every locale file.
    ///
    /// A reference locale that fails to parse is fatal. A missing reference
    /// locale (or resources directory) is fatal unless `allow_new_reference`
    /// is set, in which case an empty reference is returned.
    pub fn load_resources(&self, allow_new_reference: bool) -> Result<ResourceSet> {
        let reference_locale = self.reference_locale();

        if allow_new_reference && !self.resources_dir.exists() {
            return Ok(ResourceSet {
                reference: LocaleResource::empty(&self.resources_dir, reference_locale),
                reference_is_new: true,
                others: BTreeMap::new(),
                parse_errors: Vec::new(),
            });
        }

        let scan = scan_resource_files(&self.resources_dir)?;
        let mut locales = scan.locales;

        if let Some(warning) = scan
            .warnings
            .iter()
            .find(|w| w.locale == reference_locale)
        {
            bail!(
                "Reference locale '{}' could not be loaded: {}",
                reference_locale,
                warning.error
            );
        }

        let (reference, reference_is_new) = match locales.remove(reference_locale) {
            Some(resource) => (resource, false),
            None if allow_new_reference => (
                LocaleResource::empty(&self.resources_dir, reference_locale),
                true,
            ),
            None => {
                return Err(anyhow!(
                    "Reference locale '{}' not found in '{}'",
                    reference_locale,
                    self.resources_dir.display()
                ));
            }
        };

        Ok(ResourceSet {
            reference,
            reference_is_new,
            others: locales,
            parse_errors: scan.warnings.into_iter().map(parse_error).collect(),
        })
    }
}

fn parse_error(warning: ResourceScanWarning) -> ParseErrorIssue {
    ParseErrorIssue {
        file_path: warning.file_path,
        error: warning.error,
    }
}
