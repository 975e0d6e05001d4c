//! Issue types for scan and consistency results.
//!
//! Each issue is self-contained with all information the reporter needs to
//! display it.

use enum_dispatch::enum_dispatch;

use crate::core::{data::MessageContext, data::SourceContext, scanner::KeyUsage};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    HardcodedText,
    UnknownKey,
    MissingKey,
    ExtraKey,
    Untranslated,
    ParseError,
    IoError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::HardcodedText => write!(f, "hardcoded"),
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::ExtraKey => write!(f, "extra-key"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::IoError => write!(f, "io-error"),
        }
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// A user-facing literal that is not localized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardcodedTextIssue {
    pub context: SourceContext,
    pub text: String,
    /// `Text(...)`, `title: ...` and so on.
    pub syntax: String,
    /// Key the literal would get, and whether it already exists.
    pub key: String,
    pub existing: bool,
}

impl HardcodedTextIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::HardcodedText
    }
}

/// `'key'.tr()` where the key is absent from the reference locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyIssue {
    pub context: SourceContext,
    pub key: String,
}

impl UnknownKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

// ============================================================
// Issue Types - Locale Files (MessageContext)
// ============================================================

/// Key exists in the reference locale but is missing in other locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    /// Points at the key in the reference file.
    pub context: MessageContext,
    pub reference_locale: String,
    /// Locales where this key is missing, sorted.
    pub missing_in: Vec<String>,
    /// Where the key is used in code.
    pub usages: Vec<KeyUsage>,
}

impl MissingKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKey
    }
}

/// Key exists in a locale but not in the reference locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraKeyIssue {
    pub context: MessageContext,
    pub locale: String,
}

impl ExtraKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ExtraKey
    }
}

/// Value is byte-identical to the reference value (possibly not translated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub context: MessageContext,
    pub reference_locale: String,
    pub identical_in: Vec<String>,
    pub usages: Vec<KeyUsage>,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// Locale file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Source file could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl IoErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::IoError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HardcodedText(HardcodedTextIssue),
    UnknownKey(UnknownKeyIssue),
    MissingKey(MissingKeyIssue),
    ExtraKey(ExtraKeyIssue),
    Untranslated(UntranslatedIssue),
    ParseError(ParseErrorIssue),
    IoError(IoErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::HardcodedText(_) => HardcodedTextIssue::severity(),
            Issue::UnknownKey(_) => UnknownKeyIssue::severity(),
            Issue::MissingKey(_) => MissingKeyIssue::severity(),
            Issue::ExtraKey(_) => ExtraKeyIssue::severity(),
            Issue::Untranslated(_) => UntranslatedIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::IoError(_) => IoErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::HardcodedText(_) => HardcodedTextIssue::rule(),
            Issue::UnknownKey(_) => UnknownKeyIssue::rule(),
            Issue::MissingKey(_) => MissingKeyIssue::rule(),
            Issue::ExtraKey(_) => ExtraKeyIssue::rule(),
            Issue::Untranslated(_) => UntranslatedIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::IoError(_) => IoErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// Locale file location (no source_line, but has key/value).
    Message(&'a MessageContext),
    /// File-level only.
    File { path: &'a str },
}

/// Implemented by all issue types; `enum_dispatch` forwards it on `Issue`.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, text, error, etc.).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Usage locations (for missing-key and untranslated).
    fn usages(&self) -> &[KeyUsage] {
        &[]
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for HardcodedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("in {}", self.syntax))
    }

    fn hint(&self) -> Option<String> {
        Some(if self.existing {
            format!("existing key '{}'", self.key)
        } else {
            format!("new key '{}'", self.key)
        })
    }
}

impl Report for UnknownKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") missing in: {}",
            self.context.value,
            self.missing_in.join(", ")
        ))
    }

    fn usages(&self) -> &[KeyUsage] {
        &self.usages
    }
}

impl Report for ExtraKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("in {} (\"{}\")", self.locale, self.context.value))
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") identical in: {}",
            self.context.value,
            self.identical_in.join(", ")
        ))
    }

    fn usages(&self) -> &[KeyUsage] {
        &self.usages
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for IoErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
