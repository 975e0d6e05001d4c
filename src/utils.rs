//! Common utility functions shared across the codebase.

use std::sync::LazyLock;

use regex::Regex;

/// Positional and named placeholders: `{0}`, `{count}`, `%s`, `%d`, `%1$s`.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[A-Za-z0-9_]*\}|%(?:\d+\$)?[sdf@]").expect("placeholder regex is valid")
});

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use trsync::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(contains_alphabetic("Hello123"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("---"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Removes placeholder tokens, leaving the literal text around them.
pub fn strip_placeholders(text: &str) -> String {
    PLACEHOLDER_RE.replace_all(text, "").into_owned()
}

/// True when the text carries no words once placeholders are removed.
///
/// `"{0}"`, `"{count} {unit}"`, `"%s"`, `"42"` and `"--"` are placeholder-only.
pub fn is_placeholder_only(text: &str) -> bool {
    !contains_alphabetic(&strip_placeholders(text))
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Find the 1-based (line, column) for a byte offset. Columns count characters.
pub fn offset_to_line_col(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = offset_to_line(line_index, offset);
    let line_start = line_index[line - 1];
    let col = content[line_start..offset].chars().count() + 1;
    (line, col)
}

/// The text of a 1-based line, without its line terminator.
pub fn line_text<'a>(content: &'a str, line_index: &[usize], line: usize) -> &'a str {
    let start = line_index[line - 1];
    let end = line_index.get(line).map(|e| e - 1).unwrap_or(content.len());
    content[start..end].trim_end_matches('\r')
}
