//! Import injection for rewritten files.
//!
//! Dart requires directives (`library`, `import`, `export`, `part`) before
//! any declaration, and every `import` before the first `part`. The leading
//! directive block is found with the lexer and the resolver import goes
//! right after its last `library`/`import`/`export` directive.

use std::ops::Range;

use thiserror::Error;

use crate::core::{
    lexer::{Lexer, TokenKind},
    patterns::{HideOn, Resolver},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("expected exactly one import of '{uri}' after editing, found {count}")]
    InsertionCheck { uri: String, count: usize },
    #[error("import of '{uri}' would follow a part directive")]
    AfterPart { uri: String },
    #[error("part-of files cannot import '{uri}'; add it to the owning library")]
    PartOf { uri: String },
}

/// What `ensure_import` changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportEdit {
    /// The inserted directive line, if any.
    pub inserted: Option<String>,
    /// `(uri, symbol)` pairs that received a `hide` clause.
    pub hidden: Vec<(String, String)>,
}

impl ImportEdit {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_none() && self.hidden.is_empty()
    }
}

/// One directive of the leading block.
#[derive(Debug, Clone)]
struct Directive {
    keyword: String,
    uri: Option<String>,
    /// From the keyword to the `;`, inclusive.
    span: Range<usize>,
    prefixed: bool,
    shows: bool,
    hides: Vec<String>,
    /// `part of ...;`
    part_of: bool,
}

impl Directive {
    fn is_import_of(&self, uri: &str) -> bool {
        self.keyword == "import" && self.uri.as_deref() == Some(uri)
    }

    /// True when every symbol of the library lands in the global namespace
    /// and `symbol` is not hidden yet.
    fn exposes(&self, symbol: &str) -> bool {
        !self.prefixed && !self.shows && !self.hides.iter().any(|h| h == symbol)
    }
}

fn leading_directives(content: &str) -> Vec<Directive> {
    let mut lexer = Lexer::new(content);
    let mut directives = Vec::new();

    while let Some(token) = lexer.next_significant() {
        let keyword = match token.ident(content) {
            Some(k @ ("library" | "import" | "export" | "part")) => k.to_string(),
            _ => break,
        };
        let mut directive = Directive {
            keyword,
            uri: None,
            span: token.span.clone(),
            prefixed: false,
            shows: false,
            hides: Vec::new(),
            part_of: false,
        };
        let mut in_hide = false;
        let mut first = true;
        for token in lexer.by_ref().filter(|t| !t.is_comment()) {
            directive.span.end = token.span.end;
            if std::mem::take(&mut first)
                && directive.keyword == "part"
                && token.ident(content) == Some("of")
            {
                directive.part_of = true;
            }
            match &token.kind {
                TokenKind::Punct(';') => break,
                TokenKind::Str(lit) if directive.uri.is_none() => {
                    directive.uri = Some(lit.value.clone())
                }
                TokenKind::Ident => match token.text(content) {
                    "as" => directive.prefixed = true,
                    "show" => {
                        directive.shows = true;
                        in_hide = false;
                    }
                    "hide" => in_hide = true,
                    name if in_hide => directive.hides.push(name.to_string()),
                    _ => {}
                },
                _ => {}
            }
        }
        directives.push(directive);
    }

    directives
}

/// Make sure the resolver library is imported exactly once.
///
/// Nothing changes when an import of the resolver already exists. Otherwise
/// one directive line is inserted after the last `library`/`import`/`export`
/// directive and before any `part` (or at the top of the file), and
/// conflicting imports get `hide` clauses.
pub fn ensure_import(
    content: &str,
    resolver: &Resolver,
) -> Result<(String, ImportEdit), ImportError> {
    let directives = leading_directives(content);
    if directives.iter().any(|d| d.is_import_of(&resolver.import_uri)) {
        return Ok((content.to_string(), ImportEdit::default()));
    }
    if directives.iter().any(|d| d.part_of) {
        return Err(ImportError::PartOf {
            uri: resolver.import_uri.clone(),
        });
    }

    let mut edit = ImportEdit::default();
    // (offset, text) insertions, applied back to front
    let mut insertions: Vec<(usize, String)> = Vec::new();
    let mut resolver_hides: Vec<&str> = Vec::new();

    for conflict in &resolver.conflicts {
        let exposing: Vec<&Directive> = directives
            .iter()
            .filter(|d| d.is_import_of(&conflict.uri) && d.exposes(&conflict.symbol))
            .collect();
        if exposing.is_empty() {
            continue;
        }
        match conflict.hide_on {
            HideOn::Existing => {
                for directive in exposing {
                    // insert before the closing `;`
                    let at = directive.span.end - 1;
                    let text = if directive.hides.is_empty() {
                        format!(" hide {}", conflict.symbol)
                    } else {
                        format!(", {}", conflict.symbol)
                    };
                    insertions.push((at, text));
                }
            }
            HideOn::Resolver => resolver_hides.push(&conflict.symbol),
        }
        edit.hidden.push((conflict.uri.clone(), conflict.symbol.clone()));
    }

    let mut line = format!("import '{}'", resolver.import_uri);
    if !resolver_hides.is_empty() {
        line.push_str(" hide ");
        line.push_str(&resolver_hides.join(", "));
    }
    line.push(';');

    let first_part = directives.iter().position(|d| d.keyword == "part");
    let before_parts = &directives[..first_part.unwrap_or(directives.len())];
    let part_start = first_part.map(|i| directives[i].span.start);
    let insert_at = match (before_parts.last(), part_start) {
        (Some(last), _) => {
            let after = &content[last.span.end..];
            let line_end = match after.find('\n') {
                Some(nl) => last.span.end + nl + 1,
                None => content.len(),
            };
            // `import 'a.dart'; part 'b.dart';` on one line
            part_start.map_or(line_end, |p| line_end.min(p))
        }
        (None, Some(part)) => content[..part].rfind('\n').map_or(0, |nl| nl + 1),
        (None, None) => 0,
    };
    let mut inserted = String::new();
    if insert_at == content.len() && !content.is_empty() && !content.ends_with('\n') {
        inserted.push('\n');
    }
    inserted.push_str(&line);
    inserted.push('\n');
    if directives.is_empty() && !content.is_empty() {
        inserted.push('\n');
    }
    insertions.push((insert_at, inserted));
    edit.inserted = Some(line);

    insertions.sort_by(|a, b| b.0.cmp(&a.0));
    let mut result = content.to_string();
    for (at, text) in insertions {
        result.insert_str(at, &text);
    }

    let after = leading_directives(&result);
    let count = after
        .iter()
        .filter(|d| d.is_import_of(&resolver.import_uri))
        .count();
    if count != 1 {
        return Err(ImportError::InsertionCheck {
            uri: resolver.import_uri.clone(),
            count,
        });
    }
    let import_pos = after
        .iter()
        .position(|d| d.is_import_of(&resolver.import_uri));
    let part_pos = after.iter().position(|d| d.keyword == "part");
    if matches!((import_pos, part_pos), (Some(import), Some(part)) if part < import) {
        return Err(ImportError::AfterPart {
            uri: resolver.import_uri.clone(),
        });
    }

    Ok((result, edit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(content: &str) -> (String, ImportEdit) {
        ensure_import(content, &Resolver::default()).unwrap()
    }

    #[test]
    fn test_inserts_after_last_import() {
        let content = "import 'package:flutter/material.dart';\nimport 'widgets.dart';\n\nclass A {}\n";
        let (result, edit) = apply(content);
        assert_eq!(
            result,
            "import 'package:flutter/material.dart';\nimport 'widgets.dart';\nimport 'package:easy_localization/easy_localization.dart';\n\nclass A {}\n"
        );
        assert!(edit.hidden.is_empty());
        assert!(edit.inserted.is_some());
    }

    #[test]
    fn test_existing_import_is_left_alone() {
        let content = "import 'package:easy_localization/easy_localization.dart';\nclass A {}\n";
        let (result, edit) = apply(content);
        assert_eq!(result, content);
        assert!(edit.is_empty());
    }

    #[test]
    fn test_no_directives_inserts_at_top() {
        let (result, _) = apply("class A {}\n");
        assert_eq!(
            result,
            "import 'package:easy_localization/easy_localization.dart';\n\nclass A {}\n"
        );
    }

    #[test]
    fn test_hides_trans_on_getx() {
        let content = "import 'package:get/get.dart';\nclass A {}\n";
        let (result, edit) = apply(content);
        assert_eq!(
            result,
            "import 'package:get/get.dart' hide Trans;\nimport 'package:easy_localization/easy_localization.dart';\nclass A {}\n"
        );
        assert_eq!(
            edit.hidden,
            vec![("package:get/get.dart".to_string(), "Trans".to_string())]
        );
    }

    #[test]
    fn test_extends_existing_hide_clause() {
        let content = "import 'package:get/get.dart' hide Response;\n";
        let (result, _) = apply(content);
        assert!(result.starts_with("import 'package:get/get.dart' hide Response, Trans;\n"));
    }

    #[test]
    fn test_prefixed_or_show_imports_untouched() {
        let content = "import 'package:get/get.dart' as getx;\nimport 'package:get/get.dart' show Get;\n";
        let (result, edit) = apply(content);
        assert!(result.starts_with(content));
        assert!(edit.hidden.is_empty());
    }

    #[test]
    fn test_intl_hides_on_resolver_import() {
        let content = "import 'package:intl/intl.dart';\n";
        let (result, _) = apply(content);
        assert_eq!(
            result,
            "import 'package:intl/intl.dart';\nimport 'package:easy_localization/easy_localization.dart' hide TextDirection;\n"
        );
    }

    #[test]
    fn test_library_and_part_directives() {
        let content = "library home;\n\nimport 'a.dart';\npart 'home.g.dart';\n\nvoid main() {}\n";
        let (result, _) = apply(content);
        assert_eq!(
            result,
            "library home;\n\nimport 'a.dart';\nimport 'package:easy_localization/easy_localization.dart';\npart 'home.g.dart';\n\nvoid main() {}\n"
        );
    }

    #[test]
    fn test_import_goes_before_generated_part() {
        let content = "import 'package:flutter/material.dart';\n\npart 'home.g.dart';\n\nclass A {}\n";
        let (result, _) = apply(content);
        let import_at = result.find("import 'package:easy_localization").unwrap();
        let part_at = result.find("part 'home.g.dart'").unwrap();
        assert!(import_at < part_at);
        assert_eq!(
            result,
            "import 'package:flutter/material.dart';\nimport 'package:easy_localization/easy_localization.dart';\n\npart 'home.g.dart';\n\nclass A {}\n"
        );
    }

    #[test]
    fn test_part_only_file_gets_import_on_top() {
        let (result, _) = apply("// header\npart 'a.g.dart';\nclass A {}\n");
        assert_eq!(
            result,
            "// header\nimport 'package:easy_localization/easy_localization.dart';\npart 'a.g.dart';\nclass A {}\n"
        );
    }

    #[test]
    fn test_same_line_import_and_part() {
        let (result, _) = apply("import 'a.dart'; part 'b.dart';\n");
        assert_eq!(
            result,
            "import 'a.dart'; import 'package:easy_localization/easy_localization.dart';\npart 'b.dart';\n"
        );
    }

    #[test]
    fn test_part_of_file_is_rejected() {
        let err = ensure_import("part of 'home.dart';\n\nclass A {}\n", &Resolver::default())
            .unwrap_err();
        assert!(matches!(err, ImportError::PartOf { .. }));
    }

    #[test]
    fn test_import_without_trailing_newline() {
        let (result, _) = apply("import 'a.dart';");
        assert_eq!(
            result,
            "import 'a.dart';\nimport 'package:easy_localization/easy_localization.dart';\n"
        );
    }

    #[test]
    fn test_leading_comment_is_skipped() {
        let content = "// Copyright\nimport 'a.dart';\n";
        let (result, _) = apply(content);
        assert_eq!(
            result,
            "// Copyright\nimport 'a.dart';\nimport 'package:easy_localization/easy_localization.dart';\n"
        );
    }
}
