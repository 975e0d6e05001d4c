use anyhow::Result;

use super::super::args::ScanCommand;
use super::{
    CommandKind, CommandResult, CommandSummary, ScanSummary,
    helper::{Counts, finish, source_issues},
};
use crate::{
    core::{context::ProjectContext, pipeline::plan_files, suggest::KeyIndex},
    issues::Issue,
    rules::hardcoded::check_hardcoded_text,
};

/// Report every pending literal. Never writes and never fails on findings.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let resources = ctx.load_resources(true)?;
    let index = KeyIndex::from_tree(&resources.reference.tree);
    let sources = ctx.sources();

    let plans = plan_files(&sources.files, &ctx.table, &index);
    let hardcoded = check_hardcoded_text(&plans);

    let summary = ScanSummary {
        candidate_count: hardcoded.len(),
        existing_count: hardcoded.iter().filter(|i| i.existing).count(),
        suppressed_count: plans.iter().map(|p| p.suppressed).sum(),
        file_count: plans.iter().filter(|p| !p.proposals.is_empty()).count(),
    };

    let mut issues = source_issues(&sources.errors);
    issues.extend(hardcoded.into_iter().map(Issue::HardcodedText));

    Ok(finish(
        CommandKind::Scan,
        CommandSummary::Scan(summary),
        issues,
        Counts {
            source_files: sources.files.len(),
            locale_files: resources.locale_count(),
        },
        false,
    ))
}
