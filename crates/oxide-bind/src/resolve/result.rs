//! Resolution output model.

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};
use crate::log::BindRecord;

/// How a parameter row came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindStatus {
    /// Placeholder paired with a recorded binding.
    Matched,
    /// Placeholder without a recorded binding.
    MissingBinding,
    /// Recorded binding beyond the last placeholder.
    ExtraBinding,
}

/// One row of the parameter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundParameter {
    /// Placeholder ordinal, or the binding position for extra bindings.
    pub ordinal: usize,
    /// Declared type of the binding, if there was one.
    pub declared_type: Option<String>,
    /// Value as logged, if there was a binding.
    pub raw_value: Option<String>,
    /// True when the binding was a null sentinel.
    pub is_null: bool,
    /// Literal substituted into the SQL; only set for matched rows.
    pub rendered_literal: Option<String>,
    /// Row status.
    pub status: BindStatus,
}

impl BoundParameter {
    pub(crate) fn matched(ordinal: usize, record: &BindRecord, literal: String) -> Self {
        Self {
            ordinal,
            declared_type: Some(record.declared_type.clone()),
            raw_value: Some(record.raw_value.clone()),
            is_null: record.is_null,
            rendered_literal: Some(literal),
            status: BindStatus::Matched,
        }
    }

    pub(crate) const fn missing(ordinal: usize) -> Self {
        Self {
            ordinal,
            declared_type: None,
            raw_value: None,
            is_null: false,
            rendered_literal: None,
            status: BindStatus::MissingBinding,
        }
    }

    pub(crate) fn extra(record: &BindRecord) -> Self {
        Self {
            ordinal: record.position,
            declared_type: Some(record.declared_type.clone()),
            raw_value: Some(record.raw_value.clone()),
            is_null: record.is_null,
            rendered_literal: None,
            status: BindStatus::ExtraBinding,
        }
    }
}

/// Everything the engine produces for one template and log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// The template with every matched placeholder replaced.
    pub bound_sql: String,
    /// One row per placeholder, then one per extra binding.
    pub parameters: Vec<BoundParameter>,
    /// Non-fatal findings, in the order they were made.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of placeholders in the template.
    pub placeholder_count: usize,
    /// Number of distinct positions bound in the log.
    pub binding_count: usize,
}

impl ResolutionResult {
    /// Returns the diagnostics as human readable messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Returns true if every placeholder was matched and nothing needs
    /// attention.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Warning)
    }

    /// Iterates over the rows with the given status.
    pub fn parameters_with_status(
        &self,
        status: BindStatus,
    ) -> impl Iterator<Item = &BoundParameter> {
        self.parameters.iter().filter(move |p| p.status == status)
    }
}
