//! Resolution options.

use crate::log::{LogLinePattern, PositionBase};
use crate::render::{BooleanStyle, LiteralRenderer, TypeTable};

/// Default cap on either input: 4 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;

/// Configuration for a [`Resolver`](super::Resolver).
///
/// ```
/// use oxide_bind::{PositionBase, ResolveOptions};
///
/// let options = ResolveOptions::new()
///     .with_position_base(PositionBase::One)
///     .with_max_input_bytes(64 * 1024);
/// assert_eq!(options.max_input_bytes(), 64 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    position_base: PositionBase,
    log_pattern: LogLinePattern,
    max_input_bytes: usize,
    renderer: LiteralRenderer,
}

impl ResolveOptions {
    /// Creates options with the defaults: 0-based positions, the Hibernate
    /// pattern, a 4 MiB input cap and the default type table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position base of the log.
    #[must_use]
    pub const fn with_position_base(mut self, base: PositionBase) -> Self {
        self.position_base = base;
        self
    }

    /// Sets the log line pattern.
    #[must_use]
    pub fn with_log_pattern(mut self, pattern: LogLinePattern) -> Self {
        self.log_pattern = pattern;
        self
    }

    /// Sets the maximum size in bytes of either input.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// Replaces the type table used to pick literal styles.
    #[must_use]
    pub fn with_type_table(mut self, types: TypeTable) -> Self {
        self.renderer = self.renderer.type_table(types);
        self
    }

    /// Sets how boolean values are written.
    #[must_use]
    pub fn with_boolean_style(mut self, style: BooleanStyle) -> Self {
        self.renderer = self.renderer.boolean_style(style);
        self
    }

    /// Expands comma separated text values into literal lists for `IN (?)`.
    #[must_use]
    pub fn with_expand_in_lists(mut self, enabled: bool) -> Self {
        self.renderer = self.renderer.expand_in_lists(enabled);
        self
    }

    /// Reports numeric-typed values that do not look like numbers.
    #[must_use]
    pub fn with_flag_non_numeric(mut self, enabled: bool) -> Self {
        self.renderer = self.renderer.flag_non_numeric(enabled);
        self
    }

    /// Returns the position base.
    #[must_use]
    pub const fn position_base(&self) -> PositionBase {
        self.position_base
    }

    /// Returns the log line pattern.
    #[must_use]
    pub const fn log_pattern(&self) -> &LogLinePattern {
        &self.log_pattern
    }

    /// Returns the input size limit.
    #[must_use]
    pub const fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }

    /// Returns the literal renderer.
    #[must_use]
    pub const fn renderer(&self) -> &LiteralRenderer {
        &self.renderer
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            position_base: PositionBase::default(),
            log_pattern: LogLinePattern::hibernate(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            renderer: LiteralRenderer::default(),
        }
    }
}
