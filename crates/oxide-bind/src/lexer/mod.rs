//! Placeholder scanning for SQL templates.
//!
//! This is not a SQL tokenizer. It only tracks enough state (quotes and
//! comments) to tell a real positional `?` apart from one sitting inside a
//! string literal, a quoted identifier or a comment.

mod scanner;
mod span;

pub use scanner::{PLACEHOLDER_MARKER, Placeholder, PlaceholderScanner, ScanState, TemplateScan};
pub use span::Span;
