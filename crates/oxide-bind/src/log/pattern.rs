//! Log line patterns (trace log dialects).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EngineError, Result};

/// Name of the built-in pattern.
pub const DEFAULT_PATTERN_NAME: &str = "hibernate";

const HIBERNATE_ANNOUNCEMENT: &str = r"binding parameter";
/// The value ends at the first `]` that closes the line or a JSON string.
const HIBERNATE_LINE: &str =
    r#"binding parameter \[(?P<position>\d+)\] as \[(?P<type>[^\]]*)\] - \[(?P<value>.*?)\](?:"|\s*$)"#;

/// Named groups every line regex must define.
const REQUIRED_GROUPS: [&str; 3] = ["position", "type", "value"];

static HIBERNATE: LazyLock<LogLinePattern> = LazyLock::new(|| {
    LogLinePattern::new(DEFAULT_PATTERN_NAME, HIBERNATE_ANNOUNCEMENT, HIBERNATE_LINE)
        .expect("built-in hibernate pattern is valid")
});

/// The raw fields captured from one log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFields<'a> {
    /// Position token, not yet parsed.
    pub position: &'a str,
    /// Type token.
    pub type_name: &'a str,
    /// Value token.
    pub value: &'a str,
}

/// Describes how a trace log dialect announces a binding.
///
/// A pattern has two regexes. The *announcement* marks a line as a bind
/// line at all; the *line* regex extracts the `position`, `type` and
/// `value` named groups. A line that carries the announcement but fails the
/// line regex is reported as malformed rather than silently skipped.
///
/// # Example
///
/// ```
/// use oxide_bind::LogLinePattern;
///
/// let pattern = LogLinePattern::new(
///     "eclipselink",
///     r"bind =>",
///     r"bind => \[(?P<position>\d+):(?P<type>\w+)=(?P<value>.*)\]",
/// )
/// .unwrap();
/// let fields = pattern.fields("[EL Fine]: bind => [1:VARCHAR=abc]").unwrap();
/// assert_eq!(fields.value, "abc");
/// ```
#[derive(Debug, Clone)]
pub struct LogLinePattern {
    name: String,
    announcement: Regex,
    line: Regex,
    null_sentinels: Vec<String>,
}

impl LogLinePattern {
    /// Compiles a pattern from an announcement regex and a line regex.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] if either regex fails to
    /// compile or the line regex lacks one of the `position`, `type` and
    /// `value` named groups.
    pub fn new(name: impl Into<String>, announcement: &str, line: &str) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| EngineError::InvalidPattern {
            name: name.clone(),
            reason,
        };

        let announcement =
            Regex::new(announcement).map_err(|e| invalid(format!("announcement: {e}")))?;
        let line = Regex::new(line).map_err(|e| invalid(format!("line: {e}")))?;

        for group in REQUIRED_GROUPS {
            if !line.capture_names().flatten().any(|n| n == group) {
                return Err(invalid(format!("line regex has no named group '{group}'")));
            }
        }

        Ok(Self {
            name,
            announcement,
            line,
            null_sentinels: vec![String::from("null")],
        })
    }

    /// Returns the built-in Hibernate pattern:
    /// `binding parameter [N] as [TYPE] - [VALUE]`.
    #[must_use]
    pub fn hibernate() -> Self {
        HIBERNATE.clone()
    }

    /// Replaces the value tokens treated as SQL NULL (compared
    /// case-insensitively).
    #[must_use]
    pub fn with_null_sentinels<I, S>(mut self, sentinels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_sentinels = sentinels.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the name of the pattern.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the line announces a binding.
    #[must_use]
    pub fn announces(&self, line: &str) -> bool {
        self.announcement.is_match(line)
    }

    /// Extracts the position, type and value tokens from a line.
    #[must_use]
    pub fn fields<'a>(&self, line: &'a str) -> Option<LineFields<'a>> {
        let caps = self.line.captures(line)?;
        Some(LineFields {
            position: caps.name("position")?.as_str(),
            type_name: caps.name("type")?.as_str(),
            value: caps.name("value")?.as_str(),
        })
    }

    /// Returns true if the value token is a null sentinel.
    #[must_use]
    pub fn is_null(&self, value: &str) -> bool {
        self.null_sentinels
            .iter()
            .any(|s| s.eq_ignore_ascii_case(value))
    }
}

impl Default for LogLinePattern {
    fn default() -> Self {
        Self::hibernate()
    }
}
