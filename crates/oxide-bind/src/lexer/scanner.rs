//! Quote and comment aware placeholder scanner.

use serde::Serialize;

use super::Span;

/// The character reserved for positional parameters.
pub const PLACEHOLDER_MARKER: char = '?';

/// Lexical context the scanner is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    /// Plain SQL text, where `?` is a placeholder.
    Default,
    /// Inside a `'...'` string literal.
    InSingleQuote,
    /// Inside a `"..."` quoted identifier.
    InDoubleQuote,
    /// Inside a `-- ...` comment, up to the end of the line.
    InLineComment,
    /// Inside a `/* ... */` comment.
    InBlockComment,
}

impl ScanState {
    /// Human readable name used in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Default => "text",
            Self::InSingleQuote => "string literal",
            Self::InDoubleQuote => "quoted identifier",
            Self::InLineComment => "line comment",
            Self::InBlockComment => "block comment",
        }
    }
}

/// One positional placeholder found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    /// 0-based index of occurrence, left to right.
    pub ordinal: usize,
    /// Location of the marker in the template.
    pub span: Span,
}

impl Placeholder {
    /// Byte offset of the marker in the template.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start
    }
}

/// Result of scanning a whole template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateScan {
    /// Placeholders in order of occurrence.
    pub placeholders: Vec<Placeholder>,
    /// Set when the template ends inside a literal, identifier or block
    /// comment: the state and the offset where it was opened.
    pub unterminated: Option<(ScanState, usize)>,
}

/// A scanner that finds positional placeholders in SQL text.
///
/// Works as an iterator over [`Placeholder`]s; [`PlaceholderScanner::scan`]
/// drains it and also reports whether the text ended in an open context.
pub struct PlaceholderScanner<'a> {
    /// The template text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The current lexical context.
    state: ScanState,
    /// Byte offset where the current non-default context was opened.
    opened_at: usize,
    /// Ordinal the next placeholder will receive.
    next_ordinal: usize,
}

impl<'a> PlaceholderScanner<'a> {
    /// Creates a new scanner for the given template.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            state: ScanState::Default,
            opened_at: 0,
            next_ordinal: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn enter(&mut self, state: ScanState, at: usize) {
        self.state = state;
        self.opened_at = at;
    }

    /// Leaves a quoted context unless the quote is doubled (an escape).
    fn close_quote(&mut self, quote: char) {
        if self.peek() == Some(quote) {
            self.advance();
        } else {
            self.state = ScanState::Default;
        }
    }

    /// Scans forward to the next placeholder.
    pub fn next_placeholder(&mut self) -> Option<Placeholder> {
        while let Some(c) = self.advance() {
            let start = self.pos - c.len_utf8();
            match self.state {
                ScanState::Default => match c {
                    PLACEHOLDER_MARKER => {
                        let placeholder = Placeholder {
                            ordinal: self.next_ordinal,
                            span: Span::new(start, self.pos),
                        };
                        self.next_ordinal += 1;
                        return Some(placeholder);
                    }
                    '\'' => self.enter(ScanState::InSingleQuote, start),
                    '"' => self.enter(ScanState::InDoubleQuote, start),
                    '-' if self.peek() == Some('-') => {
                        self.advance();
                        self.enter(ScanState::InLineComment, start);
                    }
                    '/' if self.peek() == Some('*') => {
                        self.advance();
                        self.enter(ScanState::InBlockComment, start);
                    }
                    _ => {}
                },
                ScanState::InSingleQuote if c == '\'' => self.close_quote('\''),
                ScanState::InDoubleQuote if c == '"' => self.close_quote('"'),
                ScanState::InLineComment if c == '\n' => self.state = ScanState::Default,
                ScanState::InBlockComment if c == '*' && self.peek() == Some('/') => {
                    self.advance();
                    self.state = ScanState::Default;
                }
                _ => {}
            }
        }
        None
    }

    /// Scans the entire template.
    #[must_use]
    pub fn scan(mut self) -> TemplateScan {
        let placeholders: Vec<Placeholder> = self.by_ref().collect();
        let unterminated = match self.state {
            ScanState::InSingleQuote | ScanState::InDoubleQuote | ScanState::InBlockComment => {
                Some((self.state, self.opened_at))
            }
            ScanState::Default | ScanState::InLineComment => None,
        };
        TemplateScan {
            placeholders,
            unterminated,
        }
    }
}

impl Iterator for PlaceholderScanner<'_> {
    type Item = Placeholder;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_placeholder()
    }
}
