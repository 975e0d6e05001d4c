use anyhow::Result;

use super::super::args::SyncCommand;
use super::{
    CommandKind, CommandResult, CommandSummary, SyncSummary,
    check::run_checks,
    helper::{Counts, apply_rewrites, finish, source_issues},
    suggest::commit_keys,
};
use crate::core::{
    context::ProjectContext,
    pipeline::{SourceFile, rewrite_files},
};

/// suggest-keys, then rewrite, then check, in that order.
///
/// The reference locale is saved before any source file is touched, so a
/// failed save leaves the sources untouched. The check runs on the
/// rewritten sources.
pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let mut resources = ctx.load_resources(true)?;
    let sources = ctx.sources();
    let apply = !cmd.dry_run;

    let (suggest, report) = commit_keys(&ctx, &mut resources.reference, &sources.files, apply)?;

    let rewrites = rewrite_files(&sources.files, &ctx.table, &report.keys);
    let rewritten: Vec<SourceFile> = sources
        .files
        .iter()
        .zip(&rewrites)
        .map(|(file, (_, result))| match result {
            Ok(outcome) if outcome.changed() => SourceFile {
                path: file.path.clone(),
                content: outcome.content.clone(),
            },
            _ => file.clone(),
        })
        .collect();
    let (rewrite, rewrite_issues) = apply_rewrites(rewrites, apply);

    let (check, check_issues) = run_checks(&ctx, &resources, &rewritten);

    let mut issues = source_issues(&sources.errors);
    issues.extend(rewrite_issues);
    issues.extend(check_issues);

    Ok(finish(
        CommandKind::Sync,
        CommandSummary::Sync(SyncSummary {
            suggest,
            rewrite,
            check,
        }),
        issues,
        Counts {
            source_files: sources.files.len(),
            locale_files: resources.locale_count(),
        },
        true,
    ))
}
