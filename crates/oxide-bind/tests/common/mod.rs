#![allow(dead_code)]

use oxide_bind::{BindStatus, PlaceholderScanner, ResolutionResult, ResolveOptions, Resolver};

pub fn resolve_ok(template: &str, log: &str) -> ResolutionResult {
    oxide_bind::resolve(template, log)
        .unwrap_or_else(|e| panic!("Failed to resolve: {template}\nError: {e:?}"))
}

pub fn resolve_with(options: ResolveOptions, template: &str, log: &str) -> ResolutionResult {
    Resolver::new(options)
        .resolve(template, log)
        .unwrap_or_else(|e| panic!("Failed to resolve: {template}\nError: {e:?}"))
}

/// Formats one Hibernate bind line.
pub fn bind_line(position: usize, declared_type: &str, value: &str) -> String {
    format!("binding parameter [{position}] as [{declared_type}] - [{value}]")
}

/// Builds a log from `(position, type, value)` triples, one line each.
pub fn log_of(bindings: &[(usize, &str, &str)]) -> String {
    bindings
        .iter()
        .map(|(p, t, v)| bind_line(*p, t, v))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn statuses(result: &ResolutionResult) -> Vec<BindStatus> {
    result.parameters.iter().map(|p| p.status).collect()
}

/// Counts `?` markers that are real placeholders (outside literals and
/// comments).
pub fn live_markers(sql: &str) -> usize {
    PlaceholderScanner::new(sql).count()
}
