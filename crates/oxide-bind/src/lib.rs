//! # oxide-bind
//!
//! Rebuilds the SQL an ORM actually ran from a parameterized template and
//! the bind lines of its trace log.
//!
//! This crate provides:
//! - A quote and comment aware scanner for positional `?` placeholders
//! - A trace log parser driven by a swappable [`LogLinePattern`]
//! - A type-aware literal renderer with SQL quote escaping
//! - A resolution engine that pairs the two and reports every mismatch
//!
//! ## Example
//!
//! ```rust
//! use oxide_bind::{BindStatus, resolve};
//!
//! let template = "SELECT * FROM users WHERE id = ? AND active = ?";
//! let log = "\
//! TRACE binding parameter [0] as [BIGINT] - [42]
//! TRACE binding parameter [1] as [BOOLEAN] - [true]";
//!
//! let result = resolve(template, log).unwrap();
//! assert_eq!(
//!     result.bound_sql,
//!     "SELECT * FROM users WHERE id = 42 AND active = true"
//! );
//! assert!(result.diagnostics.is_empty());
//! assert_eq!(result.parameters[0].status, BindStatus::Matched);
//! ```
//!
//! ## Partial logs
//!
//! Missing or extra bindings never abort resolution. They become
//! [`Diagnostic`]s and the unmatched placeholders stay in the output:
//!
//! ```rust
//! use oxide_bind::resolve;
//!
//! let result = resolve("SELECT ? , ?", "binding parameter [0] as [VARCHAR] - [O'Brien]").unwrap();
//! assert_eq!(result.bound_sql, "SELECT 'O''Brien' , ?");
//! assert_eq!(result.messages(), vec!["no binding recorded for parameter 1"]);
//! ```

pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod log;
pub mod render;
pub mod resolve;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{EngineError, InputKind, Result};
pub use lexer::{Placeholder, PlaceholderScanner, Span};
pub use log::{BindRecord, LogLinePattern, PositionBase};
pub use render::{BooleanStyle, LiteralRenderer, LiteralStyle, TypeTable};
pub use resolve::{
    BindStatus, BoundParameter, DEFAULT_MAX_INPUT_BYTES, ResolutionResult, ResolveOptions,
    Resolver, resolve,
};
