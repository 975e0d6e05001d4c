use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

use super::{CommandKind, CommandResult, CommandSummary, FileChange, RewriteSummary};
use crate::{
    core::{
        fs::atomic_write,
        pipeline::FileRewrite,
        resources::LocaleResource,
        tree::SaveOptions,
    },
    issues::{Issue, IoErrorIssue, Severity},
};

pub struct Counts {
    pub source_files: usize,
    pub locale_files: usize,
}

pub fn finish(
    kind: CommandKind,
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    counts: Counts,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        kind,
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        parse_error_count,
        source_files_checked: counts.source_files,
        locale_files_checked: counts.locale_files,
    }
}

/// Re-serialize a locale after edits and write it when `apply` is set.
///
/// The in-memory content is refreshed either way so that reports point at
/// the lines the file has (or would have) after the edit.
pub fn store_locale(resource: &mut LocaleResource, sort_keys: bool, apply: bool) -> Result<()> {
    resource.content = resource.tree.to_json_string(SaveOptions { sort_keys })?;
    if apply {
        atomic_write(Path::new(&resource.file_path), &resource.content)?;
        tracing::debug!(
            file = %resource.file_path,
            keys = resource.tree.len(),
            "saved locale file"
        );
    }
    Ok(())
}

/// Turn rewrite results into a summary, writing changed files when `apply`
/// is set. Files are written in parallel, each one atomically. Failures are
/// returned as io-error issues and do not stop the other files.
pub fn apply_rewrites(
    rewrites: Vec<FileRewrite>,
    apply: bool,
) -> (RewriteSummary, Vec<Issue>) {
    let mut issues = Vec::new();
    let mut changed: Vec<(FileChange, String)> = Vec::new();
    let mut const_skipped = 0;

    for (file_path, result) in rewrites {
        if let Ok(outcome) = &result {
            const_skipped += outcome.const_skipped;
        }
        match result {
            Ok(outcome) if outcome.changed() => changed.push((
                FileChange {
                    file_path,
                    replacements: outcome.replacements,
                    import: outcome.import,
                    consts_removed: outcome.consts_removed,
                },
                outcome.content,
            )),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(file = %file_path, error = %e, "rewrite skipped");
                issues.push(Issue::IoError(IoErrorIssue {
                    file_path,
                    error: e.to_string(),
                }));
            }
        }
    }

    if apply {
        let failures: Vec<Issue> = changed
            .par_iter()
            .filter_map(|(change, content)| {
                atomic_write(Path::new(&change.file_path), content)
                    .err()
                    .map(|e| {
                        Issue::IoError(IoErrorIssue {
                            file_path: change.file_path.clone(),
                            error: format!("{:#}", e),
                        })
                    })
            })
            .collect();
        let failed: Vec<String> = failures
            .iter()
            .filter_map(|i| match i {
                Issue::IoError(e) => Some(e.file_path.clone()),
                _ => None,
            })
            .collect();
        changed.retain(|(change, _)| !failed.contains(&change.file_path));
        issues.extend(failures);
    }

    let summary = RewriteSummary {
        files: changed.into_iter().map(|(change, _)| change).collect(),
        unmapped_count: 0,
        const_skipped,
        is_apply: apply,
    };
    (summary, issues)
}

/// Unreadable source files as io-error issues.
pub fn source_issues(errors: &[IoErrorIssue]) -> Vec<Issue> {
    errors.iter().cloned().map(Issue::IoError).collect()
}
