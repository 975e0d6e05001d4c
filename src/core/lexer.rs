//! A small tokenizer for Dart source.
//!
//! Only what the scanner needs: identifiers, string literals (decoded, with
//! interpolation detected), numbers, single-character punctuation and
//! comments. Anything else becomes punctuation, so malformed input never
//! stops the token stream.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Str(StrLit),
    Number,
    Punct(char),
    LineComment,
    BlockComment,
}

/// A string literal, with its escape-decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrLit {
    pub value: String,
    pub quote: char,
    pub raw: bool,
    pub triple: bool,
    /// Contains `$name` or `${expr}`.
    pub interpolated: bool,
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte span in the source, including quotes and the `r` prefix.
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.span.clone()]
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// The identifier text, if this is an identifier.
    pub fn ident<'a>(&self, src: &'a str) -> Option<&'a str> {
        match self.kind {
            TokenKind::Ident => Some(self.text(src)),
            _ => None,
        }
    }

    /// Comment body without `//`, `/*` and `*/`.
    pub fn comment_body<'a>(&self, src: &'a str) -> Option<&'a str> {
        let text = self.text(src);
        match self.kind {
            TokenKind::LineComment => Some(text.trim_start_matches('/')),
            TokenKind::BlockComment => Some(
                text.strip_prefix("/*")
                    .map(|t| t.strip_suffix("*/").unwrap_or(t))
                    .unwrap_or(text),
            ),
            _ => None,
        }
    }
}

/// Lazily tokenizes a source string. Cloning restarts nothing: a clone
/// continues from the same position, which makes cheap lookahead possible.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Next token that is not a comment.
    pub fn next_significant(&mut self) -> Option<Token> {
        self.find(|t| !t.is_comment())
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn line_comment(&mut self) -> TokenKind {
        self.eat_while(|c| c != '\n');
        TokenKind::LineComment
    }

    /// Dart block comments nest.
    fn block_comment(&mut self) -> TokenKind {
        self.pos += 2;
        let mut depth = 1;
        while depth > 0 {
            let rest = &self.src[self.pos..];
            if rest.starts_with("/*") {
                depth += 1;
                self.pos += 2;
            } else if rest.starts_with("*/") {
                depth -= 1;
                self.pos += 2;
            } else if self.bump().is_none() {
                break;
            }
        }
        TokenKind::BlockComment
    }

    fn number(&mut self) -> TokenKind {
        self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        }
        TokenKind::Number
    }

    /// Lex a string literal starting at the opening quote.
    fn string(&mut self, raw: bool) -> TokenKind {
        let quote = self.peek().unwrap_or('\'');
        let delimiter: String = std::iter::repeat_n(quote, 3).collect();
        let triple = self.src[self.pos..].starts_with(&delimiter);
        self.pos += if triple { 3 } else { 1 };

        let mut lit = StrLit {
            value: String::new(),
            quote,
            raw,
            triple,
            interpolated: false,
            terminated: false,
        };

        while let Some(c) = self.peek() {
            if triple && self.src[self.pos..].starts_with(&delimiter) {
                self.pos += 3;
                lit.terminated = true;
                break;
            }
            if !triple && c == quote {
                self.pos += 1;
                lit.terminated = true;
                break;
            }
            if !triple && c == '\n' {
                break;
            }
            if !raw && c == '\\' {
                self.pos += 1;
                self.escape(&mut lit.value);
                continue;
            }
            if !raw && c == '$' {
                lit.interpolated = true;
                let start = self.pos;
                self.pos += 1;
                match self.peek() {
                    Some('{') => self.interpolation(),
                    Some(c) if is_ident_start(c) => self.eat_while(is_ident_continue),
                    _ => {}
                }
                lit.value.push_str(&self.src[start..self.pos]);
                continue;
            }
            lit.value.push(c);
            self.pos += c.len_utf8();
        }

        TokenKind::Str(lit)
    }

    /// Skip `${ ... }`, including nested braces and strings.
    fn interpolation(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '{' => {
                    depth += 1;
                    self.pos += 1;
                }
                '}' => {
                    self.pos += 1;
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                '\'' | '"' => {
                    self.string(false);
                }
                _ => self.pos += c.len_utf8(),
            }
        }
    }

    fn escape(&mut self, out: &mut String) {
        let Some(c) = self.bump() else { return };
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            'x' => match self.hex_digits(2) {
                Some(ch) => ch,
                None => 'x',
            },
            'u' if self.peek() == Some('{') => {
                let rest = &self.src[self.pos + 1..];
                match rest.find('}') {
                    Some(end) => {
                        let code = u32::from_str_radix(&rest[..end], 16).ok();
                        self.pos += end + 2;
                        match code.and_then(char::from_u32) {
                            Some(ch) => ch,
                            None => return,
                        }
                    }
                    None => 'u',
                }
            }
            'u' => match self.hex_digits(4) {
                Some(ch) => ch,
                None => 'u',
            },
            other => other,
        };
        out.push(decoded);
    }

    fn hex_digits(&mut self, len: usize) -> Option<char> {
        let digits = self.src.get(self.pos..self.pos + len)?;
        let ch = u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)?;
        self.pos += len;
        Some(ch)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.eat_while(char::is_whitespace);
        let start = self.pos;
        let c = self.peek()?;

        let kind = match c {
            '/' if self.peek_at(1) == Some('/') => self.line_comment(),
            '/' if self.peek_at(1) == Some('*') => self.block_comment(),
            'r' if matches!(self.peek_at(1), Some('\'' | '"')) => {
                self.pos += 1;
                self.string(true)
            }
            '\'' | '"' => self.string(false),
            c if is_ident_start(c) => {
                self.eat_while(is_ident_continue);
                TokenKind::Ident
            }
            c if c.is_ascii_digit() => self.number(),
            c => {
                self.pos += c.len_utf8();
                TokenKind::Punct(c)
            }
        };

        Some(Token {
            kind,
            span: start..self.pos,
        })
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
