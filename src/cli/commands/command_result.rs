use crate::{
    core::{imports::ImportEdit, rewrite::Replacement},
    issues::Issue,
    provider::FillReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Scan,
    SuggestKeys,
    Rewrite,
    Check,
    Sync,
    Translate,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    SuggestKeys(SuggestSummary),
    Rewrite(RewriteSummary),
    Check(CheckSummary),
    Sync(SyncSummary),
    Translate(TranslateSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub candidate_count: usize,
    /// Candidates whose literal already has a key.
    pub existing_count: usize,
    pub suppressed_count: usize,
    pub file_count: usize,
}

#[derive(Debug, Default)]
pub struct SuggestSummary {
    /// (key, literal) pairs added to the reference locale.
    pub added: Vec<(String, String)>,
    pub reused_count: usize,
    pub collision_count: usize,
    pub conflicts: Vec<String>,
    pub reference_file: String,
    pub is_apply: bool,
}

/// Planned or applied edits for one source file.
#[derive(Debug, Default)]
pub struct FileChange {
    pub file_path: String,
    pub replacements: Vec<Replacement>,
    pub import: ImportEdit,
    pub consts_removed: usize,
}

#[derive(Debug, Default)]
pub struct RewriteSummary {
    pub files: Vec<FileChange>,
    /// Pending literals left alone because no key exists for them.
    pub unmapped_count: usize,
    /// Keyed literals left alone inside `const` variable initializers.
    pub const_skipped: usize,
    pub is_apply: bool,
}

impl RewriteSummary {
    pub fn replacement_count(&self) -> usize {
        self.files.iter().map(|f| f.replacements.len()).sum()
    }
}

/// Completeness of one locale against the reference locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSummary {
    pub locale: String,
    pub key_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
    pub identical_count: usize,
}

impl LocaleSummary {
    pub fn is_complete(&self) -> bool {
        self.missing_count == 0 && self.extra_count == 0
    }
}

#[derive(Debug, Default)]
pub struct CheckSummary {
    pub reference_locale: String,
    pub reference_key_count: usize,
    pub locales: Vec<LocaleSummary>,
}

#[derive(Debug, Default)]
pub struct SyncSummary {
    pub suggest: SuggestSummary,
    pub rewrite: RewriteSummary,
    pub check: CheckSummary,
}

#[derive(Debug, Default)]
pub struct TranslateSummary {
    pub fills: Vec<FillReport>,
    /// Missing keys per locale (dry run).
    pub pending: Vec<(String, usize)>,
    pub is_apply: bool,
    pub check: CheckSummary,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command.
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 is returned when error_count > 0.
    /// If false, always exit 0 (`scan` is a report only).
    pub exit_on_errors: bool,
    pub issues: Vec<Issue>,
    pub parse_error_count: usize,
    pub source_files_checked: usize,
    pub locale_files_checked: usize,
}
