use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::super::args::TranslateCommand;
use super::{
    CommandKind, CommandResult, CommandSummary, TranslateSummary,
    check::run_checks,
    helper::{Counts, finish, source_issues, store_locale},
};
use crate::{
    core::{consistency::diff, context::ProjectContext, resources::LocaleResource},
    provider::{GoogleTranslateProvider, Translator, TranslatorOptions, fill_missing},
};

/// Fill the keys each target locale is missing, then check.
///
/// Locales are filled one after another through a single translator so the
/// request rate limit holds across locales. Writes happen after all fills,
/// in parallel, and the check only starts once every write is done.
pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let mut resources = ctx.load_resources(false)?;
    let reference_locale = ctx.reference_locale().to_string();

    let requested: Vec<String> = if cmd.locales.is_empty() {
        resources.others.keys().cloned().collect()
    } else {
        cmd.locales.clone()
    };
    let mut targets = Vec::with_capacity(requested.len());
    for locale in requested {
        if locale == reference_locale {
            bail!(
                "Cannot translate into the reference locale '{}'.",
                reference_locale
            );
        }
        // An unparsable file is never replaced by a fresh one.
        if resources.failed_to_load(&locale) {
            tracing::warn!(locale = %locale, "locale file could not be parsed, skipping it");
            continue;
        }
        resources
            .others
            .entry(locale.clone())
            .or_insert_with(|| LocaleResource::empty(&ctx.resources_dir, &locale));
        targets.push(locale);
    }
    if targets.is_empty() {
        tracing::warn!("no target locales found, nothing to translate");
    }

    let reference_flat = resources.reference.flatten();
    let mut summary = TranslateSummary {
        is_apply: !cmd.dry_run,
        ..Default::default()
    };

    if cmd.dry_run {
        summary.pending = targets
            .iter()
            .map(|locale| {
                let missing = resources
                    .others
                    .get(locale)
                    .map(|r| diff(&reference_flat, &r.flatten()).missing.len())
                    .unwrap_or_default();
                (locale.clone(), missing)
            })
            .collect();
    } else {
        let provider = GoogleTranslateProvider::from_config(&ctx.config.provider)?;
        let mut translator = Translator::new(provider, TranslatorOptions::from_config(&ctx.config));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        summary.fills = runtime.block_on(async {
            let mut fills = Vec::with_capacity(targets.len());
            for locale in &targets {
                let Some(resource) = resources.others.get_mut(locale) else {
                    continue;
                };
                let fill = fill_missing(
                    &reference_flat,
                    &reference_locale,
                    &mut resource.tree,
                    locale,
                    &mut translator,
                )
                .await;
                tracing::debug!(
                    locale = %locale,
                    filled = fill.filled.len(),
                    failed = fill.failed,
                    "locale filled"
                );
                fills.push(fill);
            }
            fills
        });

        let changed: Vec<&str> = summary
            .fills
            .iter()
            .filter(|f| !f.filled.is_empty())
            .map(|f| f.locale.as_str())
            .collect();
        let sort_keys = ctx.config.sort_keys;
        resources
            .others
            .par_iter_mut()
            .filter(|(locale, _)| changed.contains(&locale.as_str()))
            .try_for_each(|(_, resource)| store_locale(resource, sort_keys, true))?;
    }

    let sources = ctx.sources();
    let (check, check_issues) = run_checks(&ctx, &resources, &sources.files);
    summary.check = check;

    let mut issues = source_issues(&sources.errors);
    issues.extend(check_issues);

    Ok(finish(
        CommandKind::Translate,
        CommandSummary::Translate(summary),
        issues,
        Counts {
            source_files: sources.files.len(),
            locale_files: resources.locale_count(),
        },
        true,
    ))
}
