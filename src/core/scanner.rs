//! Finds user-facing string literals in source files.
//!
//! Matching works on the token stream from [`Lexer`]: a literal is a
//! candidate when the tokens before it form a display call (`Text('x')`)
//! or a named field (`title: 'x'`, `title: Text('x')`), and the token
//! after it closes the argument. A literal already followed by the
//! resolver suffix (`'key'.tr()`) is emitted with `suppressed` set, which
//! is what makes rewriting idempotent.

use std::{collections::VecDeque, ops::Range, sync::Arc};

use crate::{
    core::{
        data::{SourceContext, SourceLocation},
        directives::DisableContext,
        lexer::{Lexer, Token, TokenKind},
        patterns::PatternTable,
    },
    utils::{build_line_index, is_placeholder_only, line_text, offset_to_line, offset_to_line_col},
};

/// Tokens that close an argument, list element or statement.
const CLOSERS: &[char] = &[',', ')', ']', '}', ';'];

/// How many significant tokens of history the matcher looks at.
const WINDOW: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntacticContext {
    DisplayCall { callee: String },
    NamedField { field: String, callee: String },
}

impl SyntacticContext {
    pub fn describe(&self) -> String {
        match self {
            Self::DisplayCall { callee } => format!("{}(...)", callee),
            Self::NamedField { field, callee } if callee.is_empty() => format!("{}:", field),
            Self::NamedField { field, callee } => format!("{}({}: ...)", callee, field),
        }
    }
}

/// A literal that may need a translation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Escape-decoded literal text.
    pub text: String,
    /// Byte span of the literal token, quotes included.
    pub span: Range<usize>,
    pub context: SourceContext,
    pub syntax: SyntacticContext,
    /// Spans of `const` keywords that put this literal in a constant context,
    /// outermost first.
    pub const_spans: Vec<Range<usize>>,
    /// Inside the initializer of a `const` variable (`const w = Text('x');`),
    /// where dropping the keyword would not compile.
    pub const_declaration: bool,
    pub quote: char,
    pub suppressed: bool,
}

impl Candidate {
    pub fn file_path(&self) -> &str {
        self.context.file_path()
    }

    pub fn line(&self) -> usize {
        self.context.line()
    }
}

/// A `'key'.tr()` call found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub key: String,
    pub context: SourceContext,
}

pub struct Scanner<'t> {
    table: &'t PatternTable,
}

impl<'t> Scanner<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }

    /// Lazily scan `content`. Calling again restarts from the top.
    pub fn scan<'a>(&'a self, file_path: &'a str, content: &'a str) -> Candidates<'a> {
        Candidates {
            table: self.table,
            file_path,
            content,
            tokens: Lexer::new(content),
            window: VecDeque::with_capacity(WINDOW),
            frames: Vec::new(),
            const_declaration: None,
            disabled: Arc::new(disable_context(content)),
            line: 1,
            line_start: 0,
            cursor: 0,
        }
    }

    /// Every string literal immediately followed by the resolver suffix.
    pub fn resolver_keys(&self, file_path: &str, content: &str) -> Vec<KeyUsage> {
        let method = self.table.resolver.method.as_str();
        let line_index = build_line_index(content);
        let mut lexer = Lexer::new(content);
        let mut usages = Vec::new();

        while let Some(token) = lexer.next_significant() {
            let TokenKind::Str(lit) = &token.kind else {
                continue;
            };
            if lit.interpolated || !followed_by_resolver(&lexer, content, method) {
                continue;
            }
            let (line, col) = offset_to_line_col(content, &line_index, token.span.start);
            usages.push(KeyUsage {
                key: lit.value.clone(),
                context: SourceContext::new(
                    SourceLocation::new(file_path, line, col),
                    line_text(content, &line_index, line),
                ),
            });
        }
        usages
    }
}

/// Keep only candidates that still need a key.
pub fn pending(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    candidates.into_iter().filter(|c| !c.suppressed).collect()
}

fn disable_context(content: &str) -> DisableContext {
    if !content.contains("trsync-") {
        return DisableContext::default();
    }
    let line_index = build_line_index(content);
    let comments: Vec<(usize, &str)> = Lexer::new(content)
        .filter_map(|t| {
            let body = t.comment_body(content)?;
            Some((offset_to_line(&line_index, t.span.start), body))
        })
        .collect();
    DisableContext::from_comments(comments)
}

/// Whether the next significant tokens are `.method(`.
fn followed_by_resolver(lexer: &Lexer<'_>, content: &str, method: &str) -> bool {
    let mut ahead = lexer.clone();
    let dot = ahead.next_significant();
    let name = ahead.next_significant();
    let open = ahead.next_significant();
    matches!(
        (dot, name, open),
        (Some(d), Some(n), Some(o))
            if d.is_punct('.') && n.ident(content) == Some(method) && o.is_punct('(')
    )
}

#[derive(Debug, Clone)]
struct Frame {
    /// Identifier before `(`, if any.
    callee: Option<String>,
    /// `const` keyword creating a constant context at this bracket.
    const_span: Option<Range<usize>>,
}

/// Lazy iterator over the candidates of one file.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    table: &'a PatternTable,
    file_path: &'a str,
    content: &'a str,
    tokens: Lexer<'a>,
    /// Most recent significant tokens, newest first.
    window: VecDeque<Token>,
    /// One frame per open bracket.
    frames: Vec<Frame>,
    /// Bracket depth of the `const x = ...;` declaration being read.
    const_declaration: Option<usize>,
    disabled: Arc<DisableContext>,
    line: usize,
    line_start: usize,
    cursor: usize,
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let token = self.tokens.next_significant()?;
            let candidate = match &token.kind {
                TokenKind::Str(_) => self.match_literal(&token),
                _ => None,
            };
            self.track_brackets(&token);
            self.window.push_front(token);
            self.window.truncate(WINDOW);
            if candidate.is_some() {
                return candidate;
            }
        }
    }
}

impl Candidates<'_> {
    fn prev(&self, n: usize) -> Option<&Token> {
        self.window.get(n)
    }

    fn prev_is_punct(&self, n: usize, c: char) -> bool {
        self.prev(n).is_some_and(|t| t.is_punct(c))
    }

    fn prev_ident(&self, n: usize) -> Option<&str> {
        self.prev(n)?.ident(self.content)
    }

    fn track_brackets(&mut self, token: &Token) {
        match token.kind {
            TokenKind::Punct('(') => {
                let callee = self.prev_ident(0).map(str::to_string);
                // `const Foo(` or `const Foo.named(`
                let const_at = match (callee.is_some(), self.prev_is_punct(1, '.')) {
                    (true, true) => Some(3),
                    (true, false) => Some(1),
                    _ => None,
                };
                let const_span = const_at.and_then(|n| self.const_keyword(n));
                self.frames.push(Frame { callee, const_span });
            }
            TokenKind::Punct('[' | '{') => {
                let const_span = self.const_keyword(0);
                self.frames.push(Frame {
                    callee: None,
                    const_span,
                });
            }
            TokenKind::Punct(')' | ']' | '}') => {
                self.frames.pop();
                if self.const_declaration.is_some_and(|depth| self.frames.len() < depth) {
                    self.const_declaration = None;
                }
            }
            TokenKind::Punct('=') if self.const_declaration.is_none() && self.declares_const() => {
                self.const_declaration = Some(self.frames.len());
            }
            TokenKind::Punct(';') if self.const_declaration == Some(self.frames.len()) => {
                self.const_declaration = None;
            }
            _ => {}
        }
    }

    /// `const x =`, `static const x =` or `const Widget x =` right before `=`.
    fn declares_const(&self) -> bool {
        for (n, token) in self.window.iter().enumerate() {
            match token.ident(self.content) {
                Some("const") => return n > 0,
                Some(_) => {}
                None if ['<', '>', ',', '?', '.'].iter().any(|c| token.is_punct(*c)) => {}
                None => return false,
            }
        }
        false
    }

    fn const_keyword(&self, n: usize) -> Option<Range<usize>> {
        self.prev(n)
            .filter(|t| t.ident(self.content) == Some("const"))
            .map(|t| t.span.clone())
    }

    /// `field:` preceded by `(` or `,` starting at window offset `n`.
    fn named_field_at(&self, n: usize) -> Option<String> {
        if !self.prev_is_punct(n, ':') {
            return None;
        }
        let field = self.prev_ident(n + 1)?;
        if !self.table.is_named_field(field) {
            return None;
        }
        if !(self.prev_is_punct(n + 2, '(') || self.prev_is_punct(n + 2, ',')) {
            return None;
        }
        Some(field.to_string())
    }

    fn syntactic_context(&self) -> Option<SyntacticContext> {
        if self.prev_is_punct(0, '(')
            && let Some(callee) = self.prev_ident(1)
            && self.table.is_display_call(callee)
        {
            let field_offset = if self.const_keyword(2).is_some() { 3 } else { 2 };

            // `title: Text('x')` matches both patterns; the named field is more specific.
            if let Some(field) = self.named_field_at(field_offset) {
                tracing::debug!(
                    file = self.file_path,
                    field = %field,
                    callee,
                    "PatternAmbiguityWarning: literal matches both named-field and display-call patterns, using named field"
                );
                return Some(SyntacticContext::NamedField {
                    field,
                    callee: callee.to_string(),
                });
            }
            return Some(SyntacticContext::DisplayCall {
                callee: callee.to_string(),
            });
        }

        let field = self.named_field_at(0)?;
        let callee = self
            .frames
            .last()
            .and_then(|f| f.callee.clone())
            .unwrap_or_default();
        Some(SyntacticContext::NamedField { field, callee })
    }

    fn match_literal(&mut self, token: &Token) -> Option<Candidate> {
        let TokenKind::Str(lit) = &token.kind else {
            return None;
        };
        let syntax = self.syntactic_context()?;

        let method = self.table.resolver.method.as_str();
        let resolved = followed_by_resolver(&self.tokens, self.content, method);
        if !resolved {
            let mut ahead = self.tokens.clone();
            let closes = ahead
                .next_significant()
                .is_some_and(|t| CLOSERS.iter().any(|c| t.is_punct(*c)));
            if !closes {
                return None;
            }
        }

        if !lit.terminated || lit.interpolated || is_low_signal(&lit.value, self.table.min_length)
        {
            return None;
        }

        let (line, col) = self.locate(token.span.start);
        let suppressed = resolved || self.disabled.should_ignore(line);
        let source_line = self.current_line_text();

        Some(Candidate {
            text: lit.value.clone(),
            span: token.span.clone(),
            context: SourceContext::new(SourceLocation::new(self.file_path, line, col), source_line),
            syntax,
            const_spans: self
                .frames
                .iter()
                .filter_map(|f| f.const_span.clone())
                .collect(),
            const_declaration: self.const_declaration.is_some(),
            quote: lit.quote,
            suppressed,
        })
    }

    /// Advance the line tracker to `offset` (monotonic) and return (line, col).
    fn locate(&mut self, offset: usize) -> (usize, usize) {
        for (i, b) in self.content.as_bytes()[self.cursor..offset].iter().enumerate() {
            if *b == b'\n' {
                self.line += 1;
                self.line_start = self.cursor + i + 1;
            }
        }
        self.cursor = offset;
        let col = self.content[self.line_start..offset].chars().count() + 1;
        (self.line, col)
    }

    fn current_line_text(&self) -> &str {
        let rest = &self.content[self.line_start..];
        let end = rest.find('\n').unwrap_or(rest.len());
        rest[..end].trim_end_matches('\r')
    }
}

/// Short, empty or wordless text is not worth a key.
fn is_low_signal(text: &str, min_length: usize) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() < min_length || is_placeholder_only(trimmed)
}
