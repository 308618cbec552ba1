//! Reading template and log text from files or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};

/// Path that stands for standard input.
pub const STDIN: &str = "-";

/// Returns true if the path means "read standard input".
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN
}

/// Reads a whole input, from stdin when the path is `-`.
pub fn read_input(path: &Path, what: &str) -> anyhow::Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {what} from stdin"))?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} from {}", path.display()))
}

/// Reads the template and the log; at most one of them may come from stdin.
pub fn read_pair(sql: &Path, log: &Path) -> anyhow::Result<(String, String)> {
    if is_stdin(sql) && is_stdin(log) {
        bail!("Only one of --sql and --log can read from stdin");
    }
    Ok((read_input(sql, "SQL template")?, read_input(log, "trace log")?))
}
