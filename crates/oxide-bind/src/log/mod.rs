//! Trace log parsing.
//!
//! ORM frameworks print one line per bound parameter. A [`LogLinePattern`]
//! describes what such a line looks like; [`parse`] walks the log text and
//! yields one [`LogLine`] for every line that matches or claims to.

mod parser;
mod pattern;

pub use parser::{BindLines, BindRecord, LogLine, PositionBase, parse};
pub use pattern::{DEFAULT_PATTERN_NAME, LineFields, LogLinePattern};
