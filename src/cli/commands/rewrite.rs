use anyhow::Result;

use super::super::args::RewriteCommand;
use super::{
    CommandKind, CommandResult, CommandSummary,
    helper::{Counts, apply_rewrites, finish, source_issues},
};
use crate::core::{
    context::ProjectContext,
    pipeline::{existing_keys, plan_files, rewrite_files},
    suggest::KeyIndex,
};

/// Replace literals that already have a key. Literals without one are
/// counted but left alone; `suggest-keys` creates their keys.
pub fn rewrite(cmd: RewriteCommand) -> Result<CommandResult> {
    let mut ctx = ProjectContext::new(&cmd.common)?;
    if let Some(file) = &cmd.file {
        ctx.restrict_to(file)?;
    }
    let resources = ctx.load_resources(false)?;
    let index = KeyIndex::from_tree(&resources.reference.tree);
    let sources = ctx.sources();

    let plans = plan_files(&sources.files, &ctx.table, &index);
    let keys = existing_keys(&plans);
    let unmapped_count = plans
        .iter()
        .flat_map(|p| p.proposals.iter())
        .filter(|p| p.suggestion.is_new())
        .count();

    let (mut summary, rewrite_issues) =
        apply_rewrites(rewrite_files(&sources.files, &ctx.table, &keys), !cmd.dry_run);
    summary.unmapped_count = unmapped_count;

    let mut issues = source_issues(&sources.errors);
    issues.extend(rewrite_issues);

    Ok(finish(
        CommandKind::Rewrite,
        CommandSummary::Rewrite(summary),
        issues,
        Counts {
            source_files: sources.files.len(),
            locale_files: resources.locale_count(),
        },
        true,
    ))
}
