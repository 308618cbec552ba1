//! Non-fatal findings collected while resolving a statement.

use std::fmt;

use serde::Serialize;

use crate::lexer::ScanState;

/// How much attention a diagnostic deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note; the output is still exact.
    Info,
    /// The output is incomplete or may not be what the query really ran.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A per-item problem or note. Positions and ordinals are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A line announced a binding but did not match the full pattern.
    UnparseableLine {
        /// Byte offset of the line in the log text.
        offset: usize,
    },
    /// A line announced a position smaller than the position base.
    PositionBelowBase {
        /// The position as printed in the log.
        announced: usize,
        /// The configured base.
        base: usize,
        /// Byte offset of the line in the log text.
        offset: usize,
    },
    /// The same position was bound more than once.
    Rebound {
        /// The repeated position.
        position: usize,
    },
    /// The declared type is not in the type table.
    UnknownType {
        /// The type token as it appeared in the log (upper-cased).
        type_name: String,
        /// The bound position.
        position: usize,
    },
    /// A numeric type carried a value that does not look like a number.
    NonNumericValue {
        /// The raw value.
        value: String,
        /// The declared type.
        type_name: String,
        /// The bound position.
        position: usize,
    },
    /// A boolean type carried something other than `true` or `false`.
    InvalidBoolean {
        /// The raw value.
        value: String,
        /// The declared type.
        type_name: String,
        /// The bound position.
        position: usize,
    },
    /// A comma separated text value was expanded into a list of literals.
    ExpandedInList {
        /// The bound position.
        position: usize,
        /// Number of literals produced.
        items: usize,
    },
    /// The template ended inside a literal, identifier or block comment.
    UnterminatedTemplate {
        /// The open context.
        context: ScanState,
        /// Where it was opened.
        offset: usize,
    },
    /// A placeholder has no recorded binding.
    MissingBinding {
        /// The placeholder ordinal.
        ordinal: usize,
    },
    /// A binding has no placeholder to go into.
    ExtraBinding {
        /// The bound position.
        position: usize,
        /// Number of placeholders in the template.
        placeholders: usize,
    },
}

impl Diagnostic {
    /// Returns the severity of this diagnostic.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::ExpandedInList { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableLine { offset } => {
                write!(f, "unparseable bind line at text offset {offset}")
            }
            Self::PositionBelowBase {
                announced,
                base,
                offset,
            } => write!(
                f,
                "bind position {announced} is below position base {base}; line at text offset {offset} ignored"
            ),
            Self::Rebound { position } => write!(
                f,
                "parameter {position} was bound more than once; using the last value"
            ),
            Self::UnknownType {
                type_name,
                position,
            } => write!(
                f,
                "unknown type '{type_name}' at position {position}, defaulted to quoted"
            ),
            Self::NonNumericValue {
                value,
                type_name,
                position,
            } => write!(
                f,
                "non-numeric value '{value}' for {type_name} at position {position}"
            ),
            Self::InvalidBoolean {
                value,
                type_name,
                position,
            } => write!(
                f,
                "invalid boolean value '{value}' for {type_name} at position {position}"
            ),
            Self::ExpandedInList { position, items } => write!(
                f,
                "expanded parameter {position} into IN list of {items} values"
            ),
            Self::UnterminatedTemplate { context, offset } => write!(
                f,
                "template ends inside an unterminated {} opened at offset {offset}",
                context.describe()
            ),
            Self::MissingBinding { ordinal } => {
                write!(f, "no binding recorded for parameter {ordinal}")
            }
            Self::ExtraBinding {
                position,
                placeholders,
            } => write!(
                f,
                "binding recorded for parameter {position} but template has only {placeholders} placeholders"
            ),
        }
    }
}
