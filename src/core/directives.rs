//! Suppression directives in source comments.
//!
//! - `trsync-disable-next-line` - skip literals on the following line
//! - `trsync-disable-line` - skip literals on the comment's own line
//! - `trsync-disable` / `trsync-enable` - range-based disabling

use std::collections::HashSet;

/// Parsed trsync directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Disable,
    Enable,
    DisableNextLine,
    DisableLine,
}

impl Directive {
    /// Parse a directive from comment text (without the comment markers).
    /// Returns None if not a trsync directive.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let word = text.split_whitespace().next()?;

        match word {
            "trsync-disable-next-line" => Some(Self::DisableNextLine),
            "trsync-disable-line" => Some(Self::DisableLine),
            "trsync-disable" => Some(Self::Disable),
            "trsync-enable" => Some(Self::Enable),
            _ => None,
        }
    }
}

/// Range representing disabled lines [start, end] inclusive.
#[derive(Debug, Clone, Copy)]
struct DisabledRange {
    start: usize,
    end: usize, // usize::MAX for open-ended
}

/// Tracks disabled lines for a single file.
#[derive(Debug, Default, Clone)]
pub struct DisableContext {
    disabled_lines: HashSet<usize>,
    disabled_ranges: Vec<DisabledRange>,
}

impl DisableContext {
    pub fn should_ignore(&self, line: usize) -> bool {
        self.disabled_lines.contains(&line)
            || self
                .disabled_ranges
                .iter()
                .any(|r| line >= r.start && line <= r.end)
    }

    /// Build from `(line, comment text)` pairs in file order.
    pub fn from_comments<'a>(comments: impl IntoIterator<Item = (usize, &'a str)>) -> Self {
        let mut ctx = Self::default();
        let mut open_range: Option<usize> = None;

        for (line, text) in comments {
            match Directive::parse(text) {
                Some(Directive::Disable) => {
                    open_range.get_or_insert(line);
                }
                Some(Directive::Enable) => {
                    if let Some(start) = open_range.take() {
                        ctx.disabled_ranges.push(DisabledRange {
                            start,
                            end: line.saturating_sub(1),
                        });
                    }
                }
                Some(Directive::DisableNextLine) => {
                    ctx.disabled_lines.insert(line + 1);
                }
                Some(Directive::DisableLine) => {
                    ctx.disabled_lines.insert(line);
                }
                None => {}
            }
        }

        // Close an open range (extend to end of file)
        if let Some(start) = open_range {
            ctx.disabled_ranges.push(DisabledRange {
                start,
                end: usize::MAX,
            });
        }

        ctx
    }
}
