//! Regex line search producing seed lines.

use regex::Regex;
use tracing::debug;

use crate::core::line_set::LineSet;
use crate::core::lines::LineStore;
use crate::error::{Result, ScopeError};

/// Indices of all lines whose text matches `pattern`.
///
/// Lines are matched without their CRLF '\r' so `$` anchors behave the same
/// for both line endings.
pub fn search(store: &LineStore, pattern: &str) -> Result<LineSet> {
    let regex = Regex::new(pattern).map_err(|source| ScopeError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let matches: LineSet = store
        .iter()
        .enumerate()
        .filter(|(_, line)| regex.is_match(line.display_text()))
        .map(|(index, _)| index)
        .collect();

    debug!(pattern, matches = matches.len(), "search finished");
    Ok(matches)
}
