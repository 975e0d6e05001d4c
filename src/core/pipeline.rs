//! Scan → suggest → commit → rewrite over a whole file set.
//!
//! Planning and rewriting fan out over rayon; `commit_plans` is the one
//! place where the key index and the reference tree are mutated.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::core::{
    imports::ImportError,
    patterns::PatternTable,
    rewrite::{RewriteOutcome, Rewriter},
    scanner::{Candidate, KeyUsage, Scanner},
    suggest::{KeyIndex, KeySuggester, Suggestion},
    tree::{FlatMap, MergePolicy, TranslationTree},
};

/// A source file loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// A pending candidate with the key it would get against the current index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub candidate: Candidate,
    pub suggestion: Suggestion,
}

/// Per-file scan result. Proposals are previews: final keys are only
/// assigned by `commit_plans`.
#[derive(Debug, Clone, Default)]
pub struct FilePlan {
    pub file_path: String,
    pub proposals: Vec<Proposal>,
    /// Literals skipped because they are already localized or disabled.
    pub suppressed: usize,
}

/// Scan every file in parallel against a read-only index.
pub fn plan_files(files: &[SourceFile], table: &PatternTable, index: &KeyIndex) -> Vec<FilePlan> {
    let scanner = Scanner::new(table);
    let suggester = KeySuggester::new(table);

    files
        .par_iter()
        .map(|file| {
            let mut plan = FilePlan {
                file_path: file.path.clone(),
                ..Default::default()
            };
            for candidate in scanner.scan(&file.path, &file.content) {
                if candidate.suppressed {
                    plan.suppressed += 1;
                    continue;
                }
                let suggestion = suggester.suggest(&candidate.text, index);
                plan.proposals.push(Proposal {
                    candidate,
                    suggestion,
                });
            }
            plan
        })
        .collect()
}

/// Every `'key'.tr()` usage across the file set, in file order.
pub fn collect_key_usages(files: &[SourceFile], table: &PatternTable) -> Vec<KeyUsage> {
    let scanner = Scanner::new(table);
    files
        .par_iter()
        .map(|file| scanner.resolver_keys(&file.path, &file.content))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Outcome of the serialization point.
#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    /// Final literal → key map for the rewriter.
    pub keys: HashMap<String, String>,
    /// Keys created in this run, in assignment order.
    pub added: FlatMap,
    /// Distinct literals that resolved to a key already in the tree.
    pub reused: usize,
    /// Occupied paths skipped while creating keys.
    pub collisions: usize,
    /// New keys the tree refused because of a leaf/branch clash.
    pub conflicts: Vec<String>,
}

/// Assign final keys and merge the new ones into the reference tree.
///
/// Plans are consumed in their given order (sorted by path) and candidates
/// in appearance order, so the same input always yields the same keys.
pub fn commit_plans(
    plans: &[FilePlan],
    suggester: &KeySuggester<'_>,
    index: &mut KeyIndex,
    tree: &mut TranslationTree,
) -> CommitReport {
    let texts = plans
        .iter()
        .flat_map(|plan| plan.proposals.iter())
        .map(|p| p.candidate.text.as_str());

    let mut report = CommitReport::default();
    for (text, suggestion) in suggester.commit(texts, index) {
        if report.keys.contains_key(&text) {
            continue;
        }
        match &suggestion {
            Suggestion::Existing { .. } => report.reused += 1,
            Suggestion::New { key, collisions } => {
                report.collisions += collisions;
                report.added.insert(key.clone(), text.clone());
            }
        }
        report.keys.insert(text, suggestion.key().to_string());
    }

    let merge = tree.merge_flat(&report.added, MergePolicy::KeepExisting);
    for path in &merge.conflicts {
        tracing::warn!(key = %path, "key conflicts with the existing tree structure, skipped");
        report.added.shift_remove(path);
        report.keys.retain(|_, key| *key != *path);
    }
    report.conflicts = merge.conflicts;
    report
}

/// Literal → key for every proposal whose literal already has a key.
pub fn existing_keys(plans: &[FilePlan]) -> HashMap<String, String> {
    plans
        .iter()
        .flat_map(|plan| plan.proposals.iter())
        .filter_map(|p| match &p.suggestion {
            Suggestion::Existing { key } => Some((p.candidate.text.clone(), key.clone())),
            Suggestion::New { .. } => None,
        })
        .collect()
}

/// A rewritten file, or the reason the import could not be placed.
pub type FileRewrite = (String, Result<RewriteOutcome, ImportError>);

/// Rewrite every file in parallel against the final key map.
pub fn rewrite_files(
    files: &[SourceFile],
    table: &PatternTable,
    keys: &HashMap<String, String>,
) -> Vec<FileRewrite> {
    let rewriter = Rewriter::new(table);
    files
        .par_iter()
        .map(|file| {
            (
                file.path.clone(),
                rewriter.rewrite(&file.path, &file.content, keys),
            )
        })
        .collect()
}
