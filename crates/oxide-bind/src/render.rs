//! SQL literal rendering for bound values.
//!
//! The declared type decides whether a value is quoted. Quoting escapes
//! embedded single quotes by doubling them, so the result is always a
//! well-formed SQL string literal.

use std::collections::HashMap;

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::log::BindRecord;

/// How a value of some type is written as a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralStyle {
    /// Wrapped in single quotes (text, dates, times).
    Quoted,
    /// Emitted verbatim (numbers, booleans).
    Unquoted,
}

/// How boolean values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanStyle {
    /// As logged, e.g. `true`.
    #[default]
    Verbatim,
    /// As `1` / `0`, for databases without boolean literals.
    Numeric,
}

const QUOTED_TYPES: &[&str] = &[
    "CHAR",
    "VARCHAR",
    "LONGVARCHAR",
    "NCHAR",
    "NVARCHAR",
    "LONGNVARCHAR",
    "CLOB",
    "NCLOB",
    "TEXT",
    "STRING",
    "UUID",
    "JSON",
    "DATE",
    "TIME",
    "TIMESTAMP",
    "TIME_WITH_TIMEZONE",
    "TIMESTAMP_WITH_TIMEZONE",
    "TIMESTAMP_UTC",
    "INSTANT",
];

const UNQUOTED_TYPES: &[&str] = &[
    "TINYINT", "SMALLINT", "INTEGER", "INT", "BIGINT", "DECIMAL", "NUMERIC", "FLOAT", "REAL",
    "DOUBLE", "BIT", "BOOLEAN",
];

const BOOLEAN_TYPES: &[&str] = &["BOOLEAN", "BIT"];

/// Maps declared type tokens to literal styles. Lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    styles: HashMap<String, LiteralStyle>,
}

impl TypeTable {
    /// Creates an empty table; every type is unknown.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Adds or overrides the style for a type.
    #[must_use]
    pub fn with_type(mut self, name: &str, style: LiteralStyle) -> Self {
        self.styles.insert(name.to_ascii_uppercase(), style);
        self
    }

    /// Returns the style for a type, if known.
    #[must_use]
    pub fn style_of(&self, declared_type: &str) -> Option<LiteralStyle> {
        self.styles
            .get(&declared_type.to_ascii_uppercase())
            .copied()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        let quoted = QUOTED_TYPES.iter().map(|t| (t, LiteralStyle::Quoted));
        let unquoted = UNQUOTED_TYPES.iter().map(|t| (t, LiteralStyle::Unquoted));
        Self {
            styles: quoted
                .chain(unquoted)
                .map(|(t, s)| ((*t).to_owned(), s))
                .collect(),
        }
    }
}

/// A rendered literal plus any notes produced while rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The SQL literal text.
    pub literal: String,
    /// Diagnostics about this value.
    pub notes: Vec<Diagnostic>,
}

/// Converts bound values into SQL literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralRenderer {
    types: TypeTable,
    boolean_style: BooleanStyle,
    expand_in_lists: bool,
    flag_non_numeric: bool,
}

impl LiteralRenderer {
    /// Creates a renderer with the default type table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the type table.
    #[must_use]
    pub fn type_table(mut self, types: TypeTable) -> Self {
        self.types = types;
        self
    }

    /// Sets how booleans are written.
    #[must_use]
    pub const fn boolean_style(mut self, style: BooleanStyle) -> Self {
        self.boolean_style = style;
        self
    }

    /// Expands comma separated quoted values into a list of literals.
    #[must_use]
    pub const fn expand_in_lists(mut self, enabled: bool) -> Self {
        self.expand_in_lists = enabled;
        self
    }

    /// Reports unquoted values that are not plain decimal numbers.
    #[must_use]
    pub const fn flag_non_numeric(mut self, enabled: bool) -> Self {
        self.flag_non_numeric = enabled;
        self
    }

    /// Renders a parsed bind record.
    #[must_use]
    pub fn render_record(&self, record: &BindRecord) -> Rendered {
        self.render(
            &record.declared_type,
            &record.raw_value,
            record.is_null,
            record.position,
        )
    }

    /// Renders one value. Never fails; odd input is passed through and
    /// noted instead.
    #[must_use]
    pub fn render(
        &self,
        declared_type: &str,
        raw_value: &str,
        is_null: bool,
        position: usize,
    ) -> Rendered {
        if is_null {
            return Rendered {
                literal: String::from("NULL"),
                notes: Vec::new(),
            };
        }

        let mut notes = Vec::new();
        let style = self.types.style_of(declared_type).unwrap_or_else(|| {
            notes.push(Diagnostic::UnknownType {
                type_name: declared_type.to_owned(),
                position,
            });
            LiteralStyle::Quoted
        });

        let literal = match style {
            LiteralStyle::Quoted if self.expand_in_lists && raw_value.contains(',') => {
                let items: Vec<String> = raw_value.split(',').map(|v| quote(v.trim())).collect();
                notes.push(Diagnostic::ExpandedInList {
                    position,
                    items: items.len(),
                });
                items.join(",")
            }
            LiteralStyle::Quoted => quote(raw_value),
            LiteralStyle::Unquoted => self.unquoted(declared_type, raw_value, position, &mut notes),
        };

        Rendered { literal, notes }
    }

    fn unquoted(
        &self,
        declared_type: &str,
        raw_value: &str,
        position: usize,
        notes: &mut Vec<Diagnostic>,
    ) -> String {
        let is_boolean = BOOLEAN_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(declared_type));

        if is_boolean {
            let value = if raw_value.eq_ignore_ascii_case("true") {
                Some(true)
            } else if raw_value.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            };
            match (value, self.boolean_style) {
                (Some(value), BooleanStyle::Numeric) => {
                    return String::from(if value { "1" } else { "0" });
                }
                (Some(_), BooleanStyle::Verbatim) => {}
                (None, _) => notes.push(Diagnostic::InvalidBoolean {
                    value: raw_value.to_owned(),
                    type_name: declared_type.to_owned(),
                    position,
                }),
            }
        } else if self.flag_non_numeric && !is_plain_number(raw_value) {
            notes.push(Diagnostic::NonNumericValue {
                value: raw_value.to_owned(),
                type_name: declared_type.to_owned(),
                position,
            });
        }

        raw_value.to_owned()
    }
}

/// Wraps a value in single quotes, doubling embedded quotes.
#[must_use]
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    format!("'{escaped}'")
}

/// Matches `-?\d+(\.\d+)?` after trimming.
fn is_plain_number(value: &str) -> bool {
    let value = value.trim();
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(declared_type: &str, value: &str) -> Rendered {
        LiteralRenderer::new().render(declared_type, value, false, 0)
    }

    #[test]
    fn test_text_is_quoted() {
        assert_eq!(render("VARCHAR", "hello").literal, "'hello'");
    }

    #[test]
    fn test_quote_escaping() {
        assert_eq!(render("VARCHAR", "O'Brien").literal, "'O''Brien'");
        assert_eq!(quote("'; DROP TABLE users; --"), "'''; DROP TABLE users; --'");
    }

    #[test]
    fn test_quote_round_trips() {
        let value = "it's 'quoted'";
        let rendered = quote(value);
        let inner = &rendered[1..rendered.len() - 1];
        assert_eq!(inner.replace("''", "'"), value);
    }

    #[test]
    fn test_dates_are_quoted() {
        assert_eq!(render("DATE", "2024-01-31").literal, "'2024-01-31'");
        assert_eq!(
            render("TIMESTAMP", "2024-01-31 10:00:00").literal,
            "'2024-01-31 10:00:00'"
        );
    }

    #[test]
    fn test_numbers_are_verbatim() {
        let r = render("BIGINT", "42");
        assert_eq!(r.literal, "42");
        assert!(r.notes.is_empty());
        assert_eq!(render("DECIMAL", "-3.50").literal, "-3.50");
    }

    #[test]
    fn test_malformed_number_passes_through() {
        let r = render("INTEGER", "12abc");
        assert_eq!(r.literal, "12abc");
        assert!(r.notes.is_empty());
    }

    #[test]
    fn test_boolean_verbatim_and_numeric() {
        assert_eq!(render("BOOLEAN", "true").literal, "true");
        let numeric = LiteralRenderer::new().boolean_style(BooleanStyle::Numeric);
        assert_eq!(numeric.render("BOOLEAN", "true", false, 0).literal, "1");
        assert_eq!(numeric.render("boolean", "FALSE", false, 0).literal, "0");
        assert!(numeric.render("BIT", "true", false, 0).notes.is_empty());

        let r = numeric.flag_non_numeric(true).render("BOOLEAN", "maybe", false, 3);
        assert_eq!(r.literal, "maybe");
        assert_eq!(
            r.notes,
            vec![Diagnostic::InvalidBoolean {
                value: String::from("maybe"),
                type_name: String::from("BOOLEAN"),
                position: 3
            }]
        );
        assert_eq!(render("BIT", "2").notes.len(), 1);
    }

    #[test]
    fn test_type_lookup_is_case_insensitive() {
        assert_eq!(render("varchar", "x").literal, "'x'");
        assert_eq!(render("Integer", "5").literal, "5");
    }

    #[test]
    fn test_null_ignores_type() {
        let r = LiteralRenderer::new().render("INTEGER", "", true, 0);
        assert_eq!(r.literal, "NULL");
        let r = LiteralRenderer::new().render("MYSTERY", "", true, 0);
        assert_eq!(r.literal, "NULL");
        assert!(r.notes.is_empty());
    }

    #[test]
    fn test_unknown_type_defaults_to_quoted() {
        let r = LiteralRenderer::new().render("GEOMETRY", "POINT(1 2)", false, 4);
        assert_eq!(r.literal, "'POINT(1 2)'");
        assert_eq!(
            r.notes,
            vec![Diagnostic::UnknownType {
                type_name: String::from("GEOMETRY"),
                position: 4
            }]
        );
    }

    #[test]
    fn test_custom_type_table() {
        let renderer = LiteralRenderer::new()
            .type_table(TypeTable::default().with_type("money", LiteralStyle::Unquoted));
        let r = renderer.render("MONEY", "9.99", false, 0);
        assert_eq!(r.literal, "9.99");
        assert!(r.notes.is_empty());

        let renderer = LiteralRenderer::new().type_table(TypeTable::empty());
        assert_eq!(renderer.render("INTEGER", "1", false, 0).notes.len(), 1);
    }

    #[test]
    fn test_expand_in_lists() {
        let renderer = LiteralRenderer::new().expand_in_lists(true);
        let r = renderer.render("VARCHAR", "A, B,C", false, 2);
        assert_eq!(r.literal, "'A','B','C'");
        assert_eq!(
            r.notes,
            vec![Diagnostic::ExpandedInList {
                position: 2,
                items: 3
            }]
        );
        assert_eq!(renderer.render("VARCHAR", "single", false, 2).literal, "'single'");
    }

    #[test]
    fn test_expand_disabled_keeps_commas() {
        assert_eq!(render("VARCHAR", "a,b").literal, "'a,b'");
    }

    #[test]
    fn test_flag_non_numeric() {
        let renderer = LiteralRenderer::new().flag_non_numeric(true);
        let r = renderer.render("INTEGER", "abc", false, 1);
        assert_eq!(r.literal, "abc");
        assert_eq!(
            r.notes,
            vec![Diagnostic::NonNumericValue {
                value: String::from("abc"),
                type_name: String::from("INTEGER"),
                position: 1
            }]
        );
        assert!(renderer.render("INTEGER", "-12.5", false, 1).notes.is_empty());
        assert!(renderer.render("BOOLEAN", "true", false, 1).notes.is_empty());
    }

    #[test]
    fn test_is_plain_number() {
        assert!(is_plain_number("0"));
        assert!(is_plain_number(" -17 "));
        assert!(is_plain_number("3.25"));
        assert!(!is_plain_number(""));
        assert!(!is_plain_number("-"));
        assert!(!is_plain_number("1."));
        assert!(!is_plain_number(".5"));
        assert!(!is_plain_number("1e10"));
    }
}
