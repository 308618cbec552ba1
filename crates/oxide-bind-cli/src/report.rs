//! Text and JSON rendering of resolution results.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use oxide_bind::{BindStatus, BoundParameter, Diagnostic, ResolutionResult, Severity};

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Bound SQL, parameter table and diagnostics for humans.
    Text,
    /// The full result as a JSON document.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    bound_sql: &'a str,
    placeholder_count: usize,
    binding_count: usize,
    parameters: &'a [BoundParameter],
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    severity: Severity,
    message: String,
    #[serde(flatten)]
    detail: &'a Diagnostic,
}

/// Writes the report in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    result: &ResolutionResult,
    format: Format,
) -> anyhow::Result<()> {
    match format {
        Format::Text => write_text(out, result)?,
        Format::Json => {
            let report = JsonReport {
                bound_sql: &result.bound_sql,
                placeholder_count: result.placeholder_count,
                binding_count: result.binding_count,
                parameters: &result.parameters,
                diagnostics: result
                    .diagnostics
                    .iter()
                    .map(|d| JsonDiagnostic {
                        severity: d.severity(),
                        message: d.to_string(),
                        detail: d,
                    })
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

const fn status_label(status: BindStatus) -> &'static str {
    match status {
        BindStatus::Matched => "matched",
        BindStatus::MissingBinding => "missing",
        BindStatus::ExtraBinding => "extra",
    }
}

fn value_cell(param: &BoundParameter) -> String {
    match param.raw_value.as_deref() {
        None => String::from("-"),
        Some(_) if param.is_null => String::from("<null>"),
        Some("") => String::from("''"),
        Some(v) => v.to_owned(),
    }
}

fn write_text<W: Write>(out: &mut W, result: &ResolutionResult) -> std::io::Result<()> {
    writeln!(out, "-- Bound SQL")?;
    writeln!(out, "{}", result.bound_sql)?;
    writeln!(out)?;

    writeln!(
        out,
        "-- Parameters ({} placeholders, {} bindings)",
        result.placeholder_count, result.binding_count
    )?;
    let header = [
        String::from("#"),
        String::from("STATUS"),
        String::from("TYPE"),
        String::from("VALUE"),
        String::from("LITERAL"),
    ];
    let rows: Vec<[String; 5]> = result
        .parameters
        .iter()
        .map(|p| {
            [
                p.ordinal.to_string(),
                status_label(p.status).to_owned(),
                p.declared_type.clone().unwrap_or_else(|| String::from("-")),
                value_cell(p),
                p.rendered_literal
                    .clone()
                    .unwrap_or_else(|| String::from("-")),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }
    writeln!(out)?;

    writeln!(out, "-- Diagnostics")?;
    if result.diagnostics.is_empty() {
        writeln!(out, "none")?;
    }
    for diagnostic in &result.diagnostics {
        writeln!(out, "{}: {diagnostic}", diagnostic.severity())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &ResolutionResult, format: Format) -> String {
        let mut out = Vec::new();
        write_report(&mut out, result, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn partial() -> ResolutionResult {
        oxide_bind::resolve(
            "SELECT * FROM t WHERE a = ? AND b = ?",
            "binding parameter [0] as [VARCHAR] - [x]\nbinding parameter [2] as [INTEGER] - [9]",
        )
        .unwrap()
    }

    #[test]
    fn test_text_report() {
        let text = render(&partial(), Format::Text);
        assert!(text.starts_with("-- Bound SQL\nSELECT * FROM t WHERE a = 'x' AND b = ?\n"));
        assert!(text.contains("-- Parameters (2 placeholders, 2 bindings)"));
        assert!(text.contains("#  STATUS   TYPE     VALUE  LITERAL"));
        assert!(text.contains("0  matched  VARCHAR  x      'x'"));
        assert!(text.contains("1  missing  -        -      -"));
        assert!(text.contains("2  extra    INTEGER  9      -"));
        assert!(text.contains("warning: no binding recorded for parameter 1"));
    }

    #[test]
    fn test_text_report_without_diagnostics() {
        let result =
            oxide_bind::resolve("SELECT ?", "binding parameter [0] as [VARCHAR] - []").unwrap();
        let text = render(&result, Format::Text);
        assert!(text.contains("0  matched  VARCHAR  ''     ''"));
        assert!(text.ends_with("-- Diagnostics\nnone\n"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&partial(), Format::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["bound_sql"], "SELECT * FROM t WHERE a = 'x' AND b = ?");
        assert_eq!(value["placeholder_count"], 2);
        assert_eq!(value["parameters"][1]["status"], "missing_binding");
        assert_eq!(value["parameters"][2]["status"], "extra_binding");
        assert_eq!(value["diagnostics"][0]["kind"], "missing_binding");
        assert_eq!(value["diagnostics"][0]["ordinal"], 1);
        assert_eq!(value["diagnostics"][0]["severity"], "warning");
        assert_eq!(
            value["diagnostics"][0]["message"],
            "no binding recorded for parameter 1"
        );
    }
}
