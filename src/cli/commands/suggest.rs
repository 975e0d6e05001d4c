use anyhow::Result;

use super::super::args::SuggestKeysCommand;
use super::{
    CommandKind, CommandResult, CommandSummary, SuggestSummary,
    helper::{Counts, finish, source_issues, store_locale},
};
use crate::core::{
    context::ProjectContext,
    pipeline::{CommitReport, SourceFile, commit_plans, plan_files},
    resources::LocaleResource,
    suggest::{KeyIndex, KeySuggester},
};

pub fn suggest_keys(cmd: SuggestKeysCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let mut resources = ctx.load_resources(true)?;
    let sources = ctx.sources();

    let (summary, _) = commit_keys(&ctx, &mut resources.reference, &sources.files, !cmd.dry_run)?;

    Ok(finish(
        CommandKind::SuggestKeys,
        CommandSummary::SuggestKeys(summary),
        source_issues(&sources.errors),
        Counts {
            source_files: sources.files.len(),
            locale_files: resources.locale_count(),
        },
        true,
    ))
}

/// Assign keys to every pending literal and merge the new ones into the
/// reference tree, saving it when `apply` is set.
///
/// The in-memory reference is updated either way, so a dry run can still
/// preview the rewrite and the check that would follow.
pub(super) fn commit_keys(
    ctx: &ProjectContext,
    reference: &mut LocaleResource,
    files: &[SourceFile],
    apply: bool,
) -> Result<(SuggestSummary, CommitReport)> {
    let mut index = KeyIndex::from_tree(&reference.tree);
    let plans = plan_files(files, &ctx.table, &index);
    let report = commit_plans(
        &plans,
        &KeySuggester::new(&ctx.table),
        &mut index,
        &mut reference.tree,
    );

    if !report.added.is_empty() {
        store_locale(reference, ctx.config.sort_keys, apply)?;
    }

    let summary = SuggestSummary {
        added: report
            .added
            .iter()
            .map(|(key, text)| (key.clone(), text.clone()))
            .collect(),
        reused_count: report.reused,
        collision_count: report.collisions,
        conflicts: report.conflicts.clone(),
        reference_file: reference.file_path.clone(),
        is_apply: apply,
    };
    Ok((summary, report))
}
