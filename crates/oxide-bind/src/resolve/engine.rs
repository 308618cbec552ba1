//! The resolution engine.

use std::collections::BTreeMap;

use tracing::debug;

use super::{BoundParameter, ResolutionResult, ResolveOptions};
use crate::diagnostic::Diagnostic;
use crate::error::{EngineError, InputKind, Result};
use crate::lexer::{PlaceholderScanner, Span};
use crate::log::{self, BindRecord, LogLine};

/// Resolves templates against trace logs.
///
/// A `Resolver` holds only its options, so it can be shared freely between
/// threads and reused for any number of calls.
///
/// ```
/// use oxide_bind::Resolver;
///
/// let result = Resolver::default()
///     .resolve(
///         "SELECT * FROM users WHERE id = ?",
///         "binding parameter [0] as [BIGINT] - [42]",
///     )
///     .unwrap();
/// assert_eq!(result.bound_sql, "SELECT * FROM users WHERE id = 42");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

/// Resolves with the default options.
///
/// # Errors
///
/// Returns [`EngineError::InputTooLarge`] if either input exceeds the
/// default size limit.
pub fn resolve(template: &str, trace_log: &str) -> Result<ResolutionResult> {
    Resolver::default().resolve(template, trace_log)
}

impl Resolver {
    /// Creates a resolver with the given options.
    #[must_use]
    pub const fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Binds the recorded values into the template.
    ///
    /// Partial results are normal: missing, extra or malformed bindings are
    /// reported in [`ResolutionResult::diagnostics`] and the rest of the
    /// statement is still bound.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InputTooLarge`] if either input exceeds
    /// [`ResolveOptions::max_input_bytes`].
    pub fn resolve(&self, template: &str, trace_log: &str) -> Result<ResolutionResult> {
        self.check_size(InputKind::Template, template)?;
        self.check_size(InputKind::TraceLog, trace_log)?;

        let mut diagnostics = Vec::new();
        let bindings = self.collect_bindings(trace_log, &mut diagnostics);

        let scan = PlaceholderScanner::new(template).scan();
        if let Some((context, offset)) = scan.unterminated {
            diagnostics.push(Diagnostic::UnterminatedTemplate { context, offset });
        }
        let placeholder_count = scan.placeholders.len();

        let mut parameters = Vec::with_capacity(placeholder_count);
        let mut substitutions = Vec::with_capacity(placeholder_count);
        for placeholder in &scan.placeholders {
            let ordinal = placeholder.ordinal;
            if let Some(record) = bindings.get(&ordinal) {
                let rendered = self.options.renderer().render_record(record);
                diagnostics.extend(rendered.notes);
                substitutions.push((placeholder.span, rendered.literal.clone()));
                parameters.push(BoundParameter::matched(ordinal, record, rendered.literal));
            } else {
                diagnostics.push(Diagnostic::MissingBinding { ordinal });
                parameters.push(BoundParameter::missing(ordinal));
            }
        }

        for record in bindings.range(placeholder_count..).map(|(_, r)| r) {
            diagnostics.push(Diagnostic::ExtraBinding {
                position: record.position,
                placeholders: placeholder_count,
            });
            parameters.push(BoundParameter::extra(record));
        }

        let bound_sql = substitute(template, &substitutions);

        debug!(
            placeholders = placeholder_count,
            bindings = bindings.len(),
            substituted = substitutions.len(),
            diagnostics = diagnostics.len(),
            "resolved template"
        );

        Ok(ResolutionResult {
            bound_sql,
            parameters,
            diagnostics,
            placeholder_count,
            binding_count: bindings.len(),
        })
    }

    fn check_size(&self, input: InputKind, text: &str) -> Result<()> {
        let limit = self.options.max_input_bytes();
        if text.len() > limit {
            return Err(EngineError::InputTooLarge {
                input,
                size: text.len(),
                limit,
            });
        }
        Ok(())
    }

    /// Parses the log into a position-keyed map. Later bindings of the same
    /// position replace earlier ones.
    fn collect_bindings(
        &self,
        trace_log: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> BTreeMap<usize, BindRecord> {
        let base = self.options.position_base();
        let mut bindings = BTreeMap::new();

        for line in log::parse(trace_log, self.options.log_pattern(), base) {
            match line {
                LogLine::Record(record) => {
                    let position = record.position;
                    if bindings.insert(position, record).is_some() {
                        debug!(position, "parameter rebound");
                        diagnostics.push(Diagnostic::Rebound { position });
                    }
                }
                LogLine::Malformed { span } => {
                    debug!(offset = span.start, "unparseable bind line");
                    diagnostics.push(Diagnostic::UnparseableLine { offset: span.start });
                }
                LogLine::BelowBase { announced, span } => {
                    diagnostics.push(Diagnostic::PositionBelowBase {
                        announced,
                        base: base.offset(),
                        offset: span.start,
                    });
                }
            }
        }

        bindings
    }
}

/// Splices literals into the template, last offset first so earlier spans
/// stay valid.
fn substitute(template: &str, substitutions: &[(Span, String)]) -> String {
    let mut sql = template.to_owned();
    for (span, literal) in substitutions.iter().rev() {
        sql.replace_range(span.start..span.end, literal);
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::PositionBase;
    use crate::resolve::BindStatus;

    const USERS: &str = "SELECT * FROM users WHERE id = ? AND active = ?";

    #[test]
    fn test_full_binding() {
        let log = "binding parameter [0] as [BIGINT] - [42]\n\
                   binding parameter [1] as [BOOLEAN] - [true]";
        let result = resolve(USERS, log).unwrap();
        assert_eq!(
            result.bound_sql,
            "SELECT * FROM users WHERE id = 42 AND active = true"
        );
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.placeholder_count, 2);
        assert_eq!(result.binding_count, 2);
    }

    #[test]
    fn test_missing_binding_keeps_marker() {
        let result = resolve(USERS, "binding parameter [0] as [BIGINT] - [42]").unwrap();
        assert_eq!(
            result.bound_sql,
            "SELECT * FROM users WHERE id = 42 AND active = ?"
        );
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::MissingBinding { ordinal: 1 }]
        );
        assert_eq!(result.parameters[1].status, BindStatus::MissingBinding);
    }

    #[test]
    fn test_rebind_last_write_wins() {
        let log = "binding parameter [0] as [BIGINT] - [1]\n\
                   binding parameter [0] as [BIGINT] - [2]";
        let result = resolve("SELECT ?", log).unwrap();
        assert_eq!(result.bound_sql, "SELECT 2");
        assert_eq!(result.diagnostics, vec![Diagnostic::Rebound { position: 0 }]);
        assert_eq!(result.binding_count, 1);
    }

    #[test]
    fn test_input_too_large() {
        let resolver = Resolver::new(ResolveOptions::new().with_max_input_bytes(8));
        let err = resolver.resolve("SELECT 1 FROM t", "").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InputTooLarge {
                input: InputKind::Template,
                size: 15,
                limit: 8
            }
        ));
        let err = resolver.resolve("?", "123456789").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InputTooLarge {
                input: InputKind::TraceLog,
                ..
            }
        ));
    }

    #[test]
    fn test_limit_is_inclusive() {
        let resolver = Resolver::new(ResolveOptions::new().with_max_input_bytes(8));
        assert!(resolver.resolve("SELECT ?", "").is_ok());
    }

    #[test]
    fn test_position_base_one() {
        let resolver = Resolver::new(ResolveOptions::new().with_position_base(PositionBase::One));
        let log = "binding parameter [1] as [INTEGER] - [5]\n\
                   binding parameter [2] as [VARCHAR] - [x]";
        let result = resolver.resolve("a = ? AND b = ?", log).unwrap();
        assert_eq!(result.bound_sql, "a = 5 AND b = 'x'");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_substitute_descending() {
        let subs = vec![
            (Span::new(0, 1), String::from("'long value'")),
            (Span::new(2, 3), String::from("1")),
        ];
        assert_eq!(substitute("? ?", &subs), "'long value' 1");
    }
}
