//! Policy around a `TranslationProvider`: what gets sent, in which batch
//! sizes, how fast, and what happens when the provider fails.

use std::time::Duration;

use tokio::time::{Instant, sleep};

use super::{ProviderError, TranslationProvider};
use crate::{
    config::Config,
    core::{
        consistency::diff,
        tree::{FlatMap, MergePolicy, TranslationTree},
    },
    utils::is_placeholder_only,
};

#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    pub batch_size: usize,
    /// Minimum time between two provider requests.
    pub min_interval: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    /// Brand names and other terms that must never be translated.
    pub preserve_terms: Vec<String>,
}

impl TranslatorOptions {
    pub fn from_config(config: &Config) -> Self {
        let provider = &config.provider;
        Self {
            batch_size: provider.batch_size.max(1),
            min_interval: Duration::from_millis(provider.min_interval_ms),
            max_retries: provider.max_retries,
            initial_backoff: Duration::from_millis(provider.initial_backoff_ms),
            preserve_terms: config.preserve_terms.clone(),
        }
    }
}

/// Result of translating a list of texts. `texts` is aligned with the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub texts: Vec<String>,
    pub translated: usize,
    pub passed_through: usize,
    /// Texts left untranslated because the provider kept failing.
    pub failed: usize,
    pub warnings: Vec<String>,
}

pub struct Translator<P> {
    provider: P,
    options: TranslatorOptions,
    last_request: Option<Instant>,
}

impl<P: TranslationProvider> Translator<P> {
    pub fn new(provider: P, options: TranslatorOptions) -> Self {
        Self {
            provider,
            options,
            last_request: None,
        }
    }

    /// Blank, wordless, placeholder-only and brand texts are never sent.
    pub fn should_translate(&self, text: &str) -> bool {
        if text.trim().is_empty() || is_placeholder_only(text) {
            return false;
        }
        let lower = text.to_lowercase();
        !self
            .options
            .preserve_terms
            .iter()
            .any(|term| lower.contains(&term.to_lowercase()))
    }

    /// Translate `texts`; failures degrade to pass-through, never to an error.
    pub async fn translate(
        &mut self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> TranslationOutcome {
        let mut outcome = TranslationOutcome {
            texts: texts.to_vec(),
            ..Default::default()
        };
        let pending: Vec<usize> = (0..texts.len())
            .filter(|&i| self.should_translate(&texts[i]))
            .collect();
        outcome.passed_through = texts.len() - pending.len();

        for chunk in pending.chunks(self.options.batch_size) {
            let batch: Vec<String> = chunk.iter().map(|&i| texts[i].clone()).collect();
            match self.request(&batch, source_locale, target_locale).await {
                Ok(results) => {
                    for (&i, translated) in chunk.iter().zip(results) {
                        outcome.texts[i] =
                            restore_terms(&texts[i], translated, &self.options.preserve_terms);
                        outcome.translated += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        target_locale,
                        batch = batch.len(),
                        error = %e,
                        "ProviderError: keeping source text for this batch"
                    );
                    outcome.failed += chunk.len();
                    outcome.warnings.push(format!(
                        "{}: {} text(s) left untranslated: {}",
                        target_locale,
                        chunk.len(),
                        e
                    ));
                }
            }
        }

        outcome
    }

    /// One batch, with rate limiting and exponential backoff on transient errors.
    async fn request(
        &mut self,
        batch: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let mut backoff = self.options.initial_backoff;
        let mut attempt = 0;
        loop {
            self.throttle().await;
            match self
                .provider
                .translate_batch(batch, source_locale, target_locale)
                .await
            {
                Ok(results) if results.len() == batch.len() => return Ok(results),
                Ok(results) => {
                    return Err(ProviderError::Malformed(format!(
                        "expected {} translations, got {}",
                        batch.len(),
                        results.len()
                    )));
                }
                Err(e) if e.is_transient() && attempt < self.options.max_retries => {
                    attempt += 1;
                    tracing::debug!(attempt, backoff_ms = backoff.as_millis() as u64, error = %e, "retrying");
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.options.min_interval {
                sleep(self.options.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Put back preserve terms that the provider translated or re-cased.
fn restore_terms(source: &str, mut translated: String, terms: &[String]) -> String {
    for term in terms {
        if source.contains(term.as_str()) && !translated.contains(term.as_str()) {
            translated = translated.replace(&term.to_lowercase(), term);
        }
    }
    translated
}

/// Result of `fill_missing` for one locale.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub locale: String,
    /// Keys added to the locale.
    pub filled: Vec<String>,
    pub translated: usize,
    pub passed_through: usize,
    pub failed: usize,
    /// Keys skipped because of a structural conflict in the target tree.
    pub conflicts: Vec<String>,
    pub warnings: Vec<String>,
}

/// Add every reference key missing from `target`, translated from the
/// reference value. Existing values are never touched.
pub async fn fill_missing<P: TranslationProvider>(
    reference: &FlatMap,
    reference_locale: &str,
    target: &mut TranslationTree,
    target_locale: &str,
    translator: &mut Translator<P>,
) -> FillReport {
    let missing = diff(reference, &target.flatten()).missing;
    let mut report = FillReport {
        locale: target_locale.to_string(),
        ..Default::default()
    };
    if missing.is_empty() {
        return report;
    }

    // Keep reference order so new keys land in the same order as the reference.
    let keys: Vec<&String> = reference.keys().filter(|k| missing.contains(k)).collect();
    let texts: Vec<String> = keys.iter().map(|k| reference[k.as_str()].clone()).collect();

    let outcome = translator
        .translate(&texts, reference_locale, target_locale)
        .await;

    let entries: FlatMap = keys
        .iter()
        .map(|k| k.to_string())
        .zip(outcome.texts)
        .collect();
    let merge = target.merge_flat(&entries, MergePolicy::KeepExisting);

    report.filled = merge.added;
    report.conflicts = merge.conflicts;
    report.translated = outcome.translated;
    report.passed_through = outcome.passed_through;
    report.failed = outcome.failed;
    report.warnings = outcome.warnings;
    report
}
