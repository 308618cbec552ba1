//! Error types for bind resolution.

use std::fmt;

/// Which of the two engine inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The parameterized SQL template.
    Template,
    /// The raw trace log text.
    TraceLog,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => f.write_str("SQL template"),
            Self::TraceLog => f.write_str("trace log"),
        }
    }
}

/// Fatal errors. Everything that can be explained per item is a
/// [`Diagnostic`](crate::Diagnostic) instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An input exceeded the configured size limit.
    #[error("{input} is {size} bytes, which exceeds the limit of {limit} bytes")]
    InputTooLarge {
        /// The offending input.
        input: InputKind,
        /// Its size in bytes.
        size: usize,
        /// The configured limit.
        limit: usize,
    },

    /// A log line pattern could not be compiled or lacks a required group.
    #[error("Invalid log line pattern '{name}': {reason}")]
    InvalidPattern {
        /// Name of the pattern.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
