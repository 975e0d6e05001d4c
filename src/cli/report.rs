//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format; each command adds its own
//! summary (added keys, rewrite previews, the per-locale table).

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, InitSummary, RewriteSummary, ScanSummary,
    SuggestSummary, TranslateSummary,
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::scanner::KeyUsage,
    issues::{Issue, Report, ReportLocation, Severity},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of usages to display per issue.
const MAX_USAGES_DISPLAY: usize = 3;

/// Print issues in cargo-style format, followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(source_files: usize, locale_files: usize, writer: &mut W) {
    let msg = if locale_files == 0 {
        format!(
            "Checked {} source {} - no issues found",
            source_files,
            plural(source_files, "file", "files")
        )
    } else {
        format!(
            "Checked {} source {}, {} locale {} - no issues found",
            source_files,
            plural(source_files, "file", "files"),
            locale_files,
            plural(locale_files, "file", "files")
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a warning about locale files that could not be parsed.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} locale file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, &mut io::stdout().lock());
    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Scan(summary) => {
            report_to(&result.issues, writer);
            print_scan(summary, writer);
        }
        CommandSummary::SuggestKeys(summary) => {
            print_suggest(summary, writer);
            report_to(&result.issues, writer);
        }
        CommandSummary::Rewrite(summary) => {
            print_rewrite(summary, writer);
            report_to(&result.issues, writer);
        }
        CommandSummary::Check(summary) => {
            report_to(&result.issues, writer);
            print_locale_table(summary, writer);
        }
        CommandSummary::Sync(summary) => {
            print_suggest(&summary.suggest, writer);
            print_rewrite(&summary.rewrite, writer);
            report_to(&result.issues, writer);
            print_locale_table(&summary.check, writer);
        }
        CommandSummary::Translate(summary) => {
            print_translate(summary, writer);
            report_to(&result.issues, writer);
            print_locale_table(&summary.check, writer);
        }
        CommandSummary::Init(summary) => {
            print_init(summary, writer);
            return;
        }
    }

    if result.issues.is_empty() {
        print_success_to(
            result.source_files_checked,
            result.locale_files_checked,
            writer,
        );
    }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let usages = issue.usages();
    if !usages.is_empty() {
        print_usages(usages, writer, max_line_width);
    } else if matches!(issue, Issue::MissingKey(_) | Issue::Untranslated(_)) {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "used:".bold(),
            "(no usages found)".dimmed(),
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_usages<W: Write>(usages: &[KeyUsage], writer: &mut W, max_line_width: usize) {
    let total = usages.len();
    let display_count = total.min(MAX_USAGES_DISPLAY);

    for (i, usage) in usages.iter().take(display_count).enumerate() {
        let is_last = i == display_count - 1;
        let remaining = total.saturating_sub(display_count);
        let suffix = if is_last && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };

        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}:{}:{}{}",
            "",
            "=".blue(),
            "used:".bold(),
            usage.context.file_path(),
            usage.context.line(),
            usage.context.col(),
            suffix,
            width = max_line_width
        );
    }
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.col(), None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::Message(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

// ============================================================
// Command Summaries
// ============================================================

fn print_scan<W: Write>(summary: &ScanSummary, writer: &mut W) {
    if summary.candidate_count == 0 {
        return;
    }
    let _ = writeln!(
        writer,
        "{} {} unlocalized literal(s) in {} file(s): {} with an existing key, {} need a new key.",
        "Found".yellow().bold(),
        summary.candidate_count,
        summary.file_count,
        summary.existing_count,
        summary.candidate_count - summary.existing_count
    );
    if summary.suppressed_count > 0 {
        let _ = writeln!(
            writer,
            "  - skipped: {} literal(s) already localized or disabled",
            summary.suppressed_count
        );
    }
    let _ = writeln!(
        writer,
        "Run {} to localize them.",
        "trsync sync".cyan()
    );
}

fn print_suggest<W: Write>(summary: &SuggestSummary, writer: &mut W) {
    for (key, text) in &summary.added {
        let _ = writeln!(writer, "  {} {}: \"{}\"", "+".green(), key, text);
    }
    for key in &summary.conflicts {
        let _ = writeln!(
            writer,
            "{} key '{}' clashes with an existing entry, skipped",
            "warning:".bold().yellow(),
            key
        );
    }

    if summary.added.is_empty() {
        if summary.reused_count > 0 {
            let _ = writeln!(
                writer,
                "No new keys needed ({} literal(s) reuse an existing key).",
                summary.reused_count
            );
        }
        return;
    }

    let verb = if summary.is_apply {
        "Added".green().bold()
    } else {
        "Would add".yellow().bold()
    };
    let _ = writeln!(
        writer,
        "{} {} key(s) to {}.",
        verb,
        summary.added.len(),
        summary.reference_file
    );
    if summary.reused_count > 0 {
        let _ = writeln!(
            writer,
            "  - reused: {} existing key(s)",
            summary.reused_count
        );
    }
    if summary.collision_count > 0 {
        let _ = writeln!(
            writer,
            "  - renamed: {} key(s) suffixed to avoid a collision",
            summary.collision_count
        );
    }
    if !summary.is_apply {
        print_dry_run_hint(writer);
    }
}

fn print_rewrite<W: Write>(summary: &RewriteSummary, writer: &mut W) {
    if !summary.is_apply {
        for file in &summary.files {
            for replacement in &file.replacements {
                let _ = writeln!(
                    writer,
                    "  {} {}:{}",
                    "-->".blue(),
                    file.file_path,
                    replacement.line
                );
                let _ = writeln!(writer, "    {} {}", "-".red(), replacement.original.red());
                let _ = writeln!(
                    writer,
                    "    {} {}",
                    "+".green(),
                    replacement.replacement.green()
                );
            }
            if let Some(directive) = &file.import.inserted {
                let _ = writeln!(writer, "    {} {}", "+".green(), directive.green());
            }
            for (uri, symbol) in &file.import.hidden {
                let _ = writeln!(
                    writer,
                    "    {} hide {} on '{}'",
                    "~".yellow(),
                    symbol,
                    uri
                );
            }
        }
        if !summary.files.is_empty() {
            let _ = writeln!(writer);
        }
    }

    let replacements = summary.replacement_count();
    if replacements > 0 {
        let verb = if summary.is_apply {
            "Rewrote".green().bold()
        } else {
            "Would rewrite".yellow().bold()
        };
        let _ = writeln!(
            writer,
            "{} {} literal(s) in {} file(s).",
            verb,
            replacements,
            summary.files.len()
        );
        let imports = summary
            .files
            .iter()
            .filter(|f| f.import.inserted.is_some())
            .count();
        if imports > 0 {
            let _ = writeln!(writer, "  - imports added: {}", imports);
        }
        let consts: usize = summary.files.iter().map(|f| f.consts_removed).sum();
        if consts > 0 {
            let _ = writeln!(writer, "  - const removed: {}", consts);
        }
    }
    if summary.unmapped_count > 0 {
        let _ = writeln!(
            writer,
            "Note: {} literal(s) have no key yet (run {} first).",
            summary.unmapped_count,
            "trsync suggest-keys".cyan()
        );
    }
    if summary.const_skipped > 0 {
        let _ = writeln!(
            writer,
            "Note: {} literal(s) initialize a const variable and were left as is (declare it final to localize them).",
            summary.const_skipped
        );
    }
    if replacements > 0 && !summary.is_apply {
        print_dry_run_hint(writer);
    }
}

fn print_translate<W: Write>(summary: &TranslateSummary, writer: &mut W) {
    for (locale, missing) in &summary.pending {
        let _ = writeln!(
            writer,
            "{} {} key(s) missing in {}",
            "Would translate".yellow().bold(),
            missing,
            locale
        );
    }
    if summary.pending.iter().any(|(_, missing)| *missing > 0) {
        print_dry_run_hint(writer);
    }

    for fill in &summary.fills {
        let mark = if fill.failed == 0 {
            SUCCESS_MARK.green()
        } else {
            FAILURE_MARK.red()
        };
        let _ = writeln!(
            writer,
            "{} {}: filled {} key(s) ({} translated, {} kept as is, {} failed)",
            mark,
            fill.locale,
            fill.filled.len(),
            fill.translated,
            fill.passed_through,
            fill.failed
        );
        for warning in &fill.warnings {
            let _ = writeln!(writer, "  {} {}", "warning:".bold().yellow(), warning);
        }
        for key in &fill.conflicts {
            let _ = writeln!(
                writer,
                "  {} key '{}' clashes with an existing entry, skipped",
                "warning:".bold().yellow(),
                key
            );
        }
    }
    if !summary.pending.is_empty() || !summary.fills.is_empty() {
        let _ = writeln!(writer);
    }
}

/// Key counts per locale next to the reference locale.
fn print_locale_table<W: Write>(summary: &CheckSummary, writer: &mut W) {
    if summary.locales.is_empty() {
        let _ = writeln!(
            writer,
            "Only the reference locale '{}' exists ({} keys).",
            summary.reference_locale, summary.reference_key_count
        );
        return;
    }

    let width = summary
        .locales
        .iter()
        .map(|l| l.locale.width())
        .chain([summary.reference_locale.width(), "locale".len()])
        .max()
        .unwrap_or_default();

    let _ = writeln!(
        writer,
        "{}",
        format!(
            "{:<width$}  {:>6}  {:>7}  {:>5}  {:>9}",
            "locale", "keys", "missing", "extra", "identical"
        )
        .bold()
    );
    let _ = writeln!(
        writer,
        "{:<width$}  {:>6}  {:>7}  {:>5}  {:>9}  {}",
        summary.reference_locale,
        summary.reference_key_count,
        "-",
        "-",
        "-",
        "(reference)".dimmed()
    );
    for locale in &summary.locales {
        let mark = if locale.is_complete() {
            SUCCESS_MARK.green()
        } else {
            FAILURE_MARK.red()
        };
        let _ = writeln!(
            writer,
            "{:<width$}  {:>6}  {:>7}  {:>5}  {:>9}  {}",
            locale.locale,
            locale.key_count,
            locale.missing_count,
            locale.extra_count,
            locale.identical_count,
            mark
        );
    }
    let _ = writeln!(writer);
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn print_dry_run_hint<W: Write>(writer: &mut W) {
    let _ = writeln!(writer, "Run without {} to apply.", "--dry-run".cyan());
}

// ============================================================
// Tests
// ============================================================
