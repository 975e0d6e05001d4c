//! Literal → key reference rewriting.
//!
//! Pure text transformation: no file I/O and no tree access. Callers pass
//! the final literal → key map and write the result themselves.

use std::{collections::HashMap, ops::Range};

use crate::core::{
    imports::{ImportEdit, ImportError, ensure_import},
    patterns::PatternTable,
    scanner::{Candidate, Scanner},
};

/// One literal replaced by a key reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Range<usize>,
    pub original: String,
    pub replacement: String,
    pub key: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: String,
    pub replacements: Vec<Replacement>,
    pub import: ImportEdit,
    /// Number of `const` keywords removed.
    pub consts_removed: usize,
    /// Keyed literals left alone because they initialize a `const` variable.
    pub const_skipped: usize,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        !self.replacements.is_empty()
    }
}

pub struct Rewriter<'t> {
    table: &'t PatternTable,
    scanner: Scanner<'t>,
}

impl<'t> Rewriter<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self {
            table,
            scanner: Scanner::new(table),
        }
    }

    /// Replace every pending literal that has a key in `keys`.
    ///
    /// `'Hello'` becomes `'common.hello'.tr()` with the original quote
    /// character. `const` keywords that would make the resolver call a
    /// compile error are removed. Applying the result again is a no-op.
    pub fn rewrite(
        &self,
        file_path: &str,
        content: &str,
        keys: &HashMap<String, String>,
    ) -> Result<RewriteOutcome, ImportError> {
        let suffix = self.table.resolver.suffix();
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        let mut const_spans: Vec<Range<usize>> = Vec::new();
        let mut replacements = Vec::new();
        let mut const_skipped = 0;

        for candidate in self.scanner.scan(file_path, content) {
            if candidate.suppressed {
                continue;
            }
            let Some(key) = keys.get(&candidate.text) else {
                continue;
            };
            if candidate.const_declaration {
                tracing::info!(
                    file = file_path,
                    line = candidate.line(),
                    "literal initializes a const variable, left as is"
                );
                const_skipped += 1;
                continue;
            }
            let Some(replacement) = key_reference(&candidate, key, &suffix) else {
                tracing::warn!(file = file_path, key = %key, "key cannot be quoted, literal left as is");
                continue;
            };
            edits.push((candidate.span.clone(), replacement.clone()));
            for span in &candidate.const_spans {
                if !const_spans.contains(span) {
                    const_spans.push(span.clone());
                }
            }
            replacements.push(Replacement {
                span: candidate.span.clone(),
                original: content[candidate.span.clone()].to_string(),
                replacement,
                key: key.clone(),
                line: candidate.line(),
            });
        }

        if replacements.is_empty() {
            return Ok(RewriteOutcome {
                content: content.to_string(),
                replacements,
                import: ImportEdit::default(),
                consts_removed: 0,
                const_skipped,
            });
        }

        let consts_removed = const_spans.len();
        for span in const_spans {
            // drop the keyword and the whitespace after it
            let rest = &content[span.end..];
            let ws = rest.len() - rest.trim_start().len();
            edits.push((span.start..span.end + ws, String::new()));
        }

        let rewritten = apply_edits(content, edits);
        let (content, import) = ensure_import(&rewritten, &self.table.resolver)?;

        Ok(RewriteOutcome {
            content,
            replacements,
            import,
            consts_removed,
            const_skipped,
        })
    }
}

/// `'key'.tr()` in the literal's quote style, with the key escaped so Dart
/// reads it back verbatim. Keys with line breaks get `None`.
fn key_reference(candidate: &Candidate, key: &str, suffix: &str) -> Option<String> {
    let quote = candidate.quote;
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' | '\r' => return None,
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    Some(format!("{quote}{escaped}{quote}{suffix}"))
}

/// Apply non-overlapping edits.
fn apply_edits(content: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(span, _)| span.start);
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for (span, text) in edits {
        out.push_str(&content[cursor..span.start]);
        out.push_str(&text);
        cursor = span.end;
    }
    out.push_str(&content[cursor..]);
    out
}
