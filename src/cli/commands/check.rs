use anyhow::Result;

use super::super::args::CheckCommand;
use super::{
    CheckSummary, CommandKind, CommandResult, CommandSummary, LocaleSummary,
    helper::{Counts, finish, source_issues},
};
use crate::{
    core::{
        consistency::diff,
        context::{ProjectContext, ResourceSet},
        pipeline::{SourceFile, collect_key_usages},
    },
    issues::Issue,
    rules::{
        build_key_usage_map, extra::check_extra_keys, missing::check_missing_keys,
        unknown_key::check_unknown_keys, untranslated::check_untranslated,
    },
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let resources = ctx.load_resources(false)?;
    let sources = ctx.sources();

    let (summary, check_issues) = run_checks(&ctx, &resources, &sources.files);
    let mut issues = source_issues(&sources.errors);
    issues.extend(check_issues);

    Ok(finish(
        CommandKind::Check,
        CommandSummary::Check(summary),
        issues,
        Counts {
            source_files: sources.files.len(),
            locale_files: resources.locale_count(),
        },
        true,
    ))
}

/// Compare every locale with the reference and the source's key usages.
pub(super) fn run_checks(
    ctx: &ProjectContext,
    resources: &ResourceSet,
    files: &[SourceFile],
) -> (CheckSummary, Vec<Issue>) {
    let usages = collect_key_usages(files, &ctx.table);
    let usage_map = build_key_usage_map(&usages);
    let reference = &resources.reference;
    let reference_flat = reference.flatten();

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(
        check_unknown_keys(&reference_flat, &usages)
            .into_iter()
            .map(Issue::UnknownKey),
    );
    issues.extend(
        check_missing_keys(reference, &resources.others, &usage_map)
            .into_iter()
            .map(Issue::MissingKey),
    );
    issues.extend(
        check_extra_keys(reference, &resources.others)
            .into_iter()
            .map(Issue::ExtraKey),
    );
    issues.extend(
        check_untranslated(
            reference,
            &resources.others,
            &ctx.config.preserve_terms,
            &usage_map,
        )
        .into_iter()
        .map(Issue::Untranslated),
    );
    issues.extend(resources.parse_errors.iter().cloned().map(Issue::ParseError));

    let locales = resources
        .others
        .iter()
        .map(|(locale, resource)| {
            let flat = resource.flatten();
            let locale_diff = diff(&reference_flat, &flat);
            LocaleSummary {
                locale: locale.clone(),
                key_count: flat.len(),
                missing_count: locale_diff.missing.len(),
                extra_count: locale_diff.extra.len(),
                identical_count: locale_diff.identical_count(),
            }
        })
        .collect();

    let summary = CheckSummary {
        reference_locale: reference.locale.clone(),
        reference_key_count: reference_flat.len(),
        locales,
    };
    (summary, issues)
}
