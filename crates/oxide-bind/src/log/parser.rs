//! Line-by-line bind record extraction.

use serde::Serialize;
use tracing::trace;

use super::LogLinePattern;
use crate::lexer::Span;

/// Whether the log numbers parameters from 0 or from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionBase {
    /// The first parameter is announced as `0`.
    #[default]
    Zero,
    /// The first parameter is announced as `1` (Hibernate's own convention).
    One,
}

impl PositionBase {
    /// Returns the base for a number, if it is a supported one.
    #[must_use]
    pub const fn from_number(n: usize) -> Option<Self> {
        match n {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            _ => None,
        }
    }

    /// The value subtracted from announced positions.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

/// One parsed trace log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindRecord {
    /// 0-based position after applying the position base.
    pub position: usize,
    /// Position exactly as printed in the log.
    pub announced_position: usize,
    /// Declared SQL type, upper-cased.
    pub declared_type: String,
    /// Value text; empty when `is_null` is set.
    pub raw_value: String,
    /// True when the value token was a null sentinel.
    pub is_null: bool,
    /// Location of the line in the log text.
    pub span: Span,
}

/// Outcome for a log line that matched or announced a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// A complete binding.
    Record(BindRecord),
    /// The line announced a binding but could not be parsed.
    Malformed {
        /// Location of the line.
        span: Span,
    },
    /// The announced position is smaller than the position base.
    BelowBase {
        /// Position as printed in the log.
        announced: usize,
        /// Location of the line.
        span: Span,
    },
}

/// Lazy iterator over the bind lines of a log text.
///
/// Lines unrelated to binding are skipped. The iterator only borrows its
/// input, so cloning it (or calling [`parse`] again) restarts the scan
/// with identical results.
#[derive(Debug, Clone)]
pub struct BindLines<'a> {
    text: &'a str,
    pos: usize,
    pattern: &'a LogLinePattern,
    base: PositionBase,
}

/// Parses bind lines out of raw trace log text.
#[must_use]
pub const fn parse<'a>(
    text: &'a str,
    pattern: &'a LogLinePattern,
    base: PositionBase,
) -> BindLines<'a> {
    BindLines {
        text,
        pos: 0,
        pattern,
        base,
    }
}

impl<'a> BindLines<'a> {
    /// Returns the next raw line and its start offset.
    fn next_line(&mut self) -> Option<(&'a str, usize)> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.text[start..];
        let (line, consumed) = match rest.find('\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Some((line.strip_suffix('\r').unwrap_or(line), start))
    }

    fn classify(&self, line: &str, start: usize) -> Option<LogLine> {
        let span = Span::new(start, start + line.len());

        let Some(fields) = self.pattern.fields(line) else {
            return self
                .pattern
                .announces(line)
                .then_some(LogLine::Malformed { span });
        };

        let Ok(announced) = fields.position.trim().parse::<usize>() else {
            return Some(LogLine::Malformed { span });
        };
        let Some(position) = announced.checked_sub(self.base.offset()) else {
            return Some(LogLine::BelowBase { announced, span });
        };

        let is_null = self.pattern.is_null(fields.value);
        let record = BindRecord {
            position,
            announced_position: announced,
            declared_type: fields.type_name.trim().to_ascii_uppercase(),
            raw_value: if is_null {
                String::new()
            } else {
                fields.value.to_owned()
            },
            is_null,
            span,
        };
        trace!(
            position = record.position,
            declared_type = %record.declared_type,
            is_null = record.is_null,
            "parsed bind record"
        );
        Some(LogLine::Record(record))
    }
}

impl Iterator for BindLines<'_> {
    type Item = LogLine;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((line, start)) = self.next_line() {
            if let Some(item) = self.classify(line, start) {
                return Some(item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str, base: PositionBase) -> Vec<LogLine> {
        let pattern = LogLinePattern::hibernate();
        parse(text, &pattern, base).collect()
    }

    fn records(text: &str) -> Vec<BindRecord> {
        lines(text, PositionBase::Zero)
            .into_iter()
            .filter_map(|l| match l {
                LogLine::Record(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(lines("", PositionBase::Zero).is_empty());
    }

    #[test]
    fn test_single_record() {
        let recs = records("binding parameter [0] as [BIGINT] - [42]");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].position, 0);
        assert_eq!(recs[0].declared_type, "BIGINT");
        assert_eq!(recs[0].raw_value, "42");
        assert!(!recs[0].is_null);
    }

    #[test]
    fn test_noise_lines_are_skipped() {
        let text = "\
2024-01-01 DEBUG SQL - select * from t where a=?
2024-01-01 TRACE binding parameter [0] as [VARCHAR] - [x]
2024-01-01 TRACE extracted value ([a] : [VARCHAR]) - [y]
";
        let recs = records(text);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].raw_value, "x");
    }

    #[test]
    fn test_records_keep_log_order() {
        let text = "binding parameter [2] as [INTEGER] - [3]\n\
                    binding parameter [0] as [INTEGER] - [1]\n\
                    binding parameter [1] as [INTEGER] - [2]";
        let positions: Vec<usize> = records(text).iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![2, 0, 1]);
    }

    #[test]
    fn test_type_is_uppercased() {
        let recs = records("binding parameter [0] as [varchar] - [x]");
        assert_eq!(recs[0].declared_type, "VARCHAR");
    }

    #[test]
    fn test_null_value_is_flagged() {
        let recs = records("binding parameter [0] as [VARCHAR] - [null]");
        assert!(recs[0].is_null);
        assert_eq!(recs[0].raw_value, "");
    }

    #[test]
    fn test_empty_value_is_not_null() {
        let recs = records("binding parameter [0] as [VARCHAR] - []");
        assert!(!recs[0].is_null);
        assert_eq!(recs[0].raw_value, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let recs = records(
            "binding parameter [0] as [VARCHAR] - [a]\r\nbinding parameter [1] as [VARCHAR] - [b]\r\n",
        );
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].raw_value, "a");
        assert_eq!(recs[1].raw_value, "b");
    }

    #[test]
    fn test_malformed_line_reports_offset() {
        let text = "noise\nbinding parameter [0] as [VARCHAR]\n";
        let out = lines(text, PositionBase::Zero);
        assert_eq!(out, vec![LogLine::Malformed { span: Span::new(6, 40) }]);
    }

    #[test]
    fn test_position_base_one() {
        let out = lines(
            "binding parameter [1] as [INTEGER] - [7]",
            PositionBase::One,
        );
        match &out[0] {
            LogLine::Record(r) => {
                assert_eq!(r.position, 0);
                assert_eq!(r.announced_position, 1);
            }
            other => panic!("Expected record, got {other:?}"),
        }
    }

    #[test]
    fn test_position_below_base() {
        let out = lines(
            "binding parameter [0] as [INTEGER] - [7]",
            PositionBase::One,
        );
        assert_eq!(
            out,
            vec![LogLine::BelowBase {
                announced: 0,
                span: Span::new(0, 40)
            }]
        );
    }

    #[test]
    fn test_parse_is_restartable() {
        let pattern = LogLinePattern::hibernate();
        let text = "binding parameter [0] as [INTEGER] - [1]\nbinding parameter [1] as [DATE]";
        let iter = parse(text, &pattern, PositionBase::Zero);
        let first: Vec<LogLine> = iter.clone().collect();
        let second: Vec<LogLine> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_position_base_from_number() {
        assert_eq!(PositionBase::from_number(0), Some(PositionBase::Zero));
        assert_eq!(PositionBase::from_number(1), Some(PositionBase::One));
        assert_eq!(PositionBase::from_number(2), None);
    }
}
