use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::patterns::{
    DEFAULT_CATEGORIES, DEFAULT_DISPLAY_CALLS, DEFAULT_MAX_SLUG_LENGTH, DEFAULT_MIN_LENGTH,
    DEFAULT_NAMED_FIELDS,
};

pub const CONFIG_FILE_NAME: &str = ".trsyncrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_resources_root")]
    pub resources_root: String,
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default = "default_generated_suffixes")]
    pub generated_suffixes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_display_calls")]
    pub display_calls: Vec<String>,
    #[serde(default = "default_named_fields")]
    pub named_fields: Vec<String>,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_slug_length")]
    pub max_slug_length: usize,
    #[serde(default)]
    pub sort_keys: bool,
    #[serde(default = "default_preserve_terms")]
    pub preserve_terms: Vec<String>,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// A key category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryConfig {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_source_root() -> String {
    "lib".to_string()
}

fn default_resources_root() -> String {
    "assets/translations".to_string()
}

fn default_reference_locale() -> String {
    "en".to_string()
}

fn default_source_extensions() -> Vec<String> {
    vec!["dart".to_string()]
}

fn default_generated_suffixes() -> Vec<String> {
    [".g.dart", ".freezed.dart"].map(String::from).to_vec()
}

fn default_display_calls() -> Vec<String> {
    DEFAULT_DISPLAY_CALLS.iter().map(|s| s.to_string()).collect()
}

fn default_named_fields() -> Vec<String> {
    DEFAULT_NAMED_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_categories() -> Vec<CategoryConfig> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, keywords)| CategoryConfig {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_max_slug_length() -> usize {
    DEFAULT_MAX_SLUG_LENGTH
}

fn default_preserve_terms() -> Vec<String> {
    vec!["CrowdWave".to_string()]
}

fn default_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_TRANSLATE_API_KEY".to_string()
}

fn default_batch_size() -> usize {
    50
}

fn default_min_interval_ms() -> u64 {
    100
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    500
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            batch_size: default_batch_size(),
            min_interval_ms: default_min_interval_ms(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            resources_root: default_resources_root(),
            reference_locale: default_reference_locale(),
            source_extensions: default_source_extensions(),
            generated_suffixes: default_generated_suffixes(),
            ignores: Vec::new(),
            display_calls: default_display_calls(),
            named_fields: default_named_fields(),
            categories: default_categories(),
            min_length: default_min_length(),
            max_slug_length: default_max_slug_length(),
            sort_keys: false,
            preserve_terms: default_preserve_terms(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid `ignores` globs, unusable category names and a zero
    /// provider batch size.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for category in &self.categories {
            if category.name.is_empty() || category.name.contains('.') {
                bail!(
                    "Invalid category name in 'categories': \"{}\" (must be non-empty and contain no '.')",
                    category.name
                );
            }
        }

        if self.reference_locale.is_empty() {
            bail!("'referenceLocale' must not be empty");
        }

        if self.provider.batch_size == 0 {
            bail!("'provider.batchSize' must be greater than 0");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
