//! Text rendering of a display set.
//!
//! Every shown line gets a marker: the highlight symbol for lines of
//! interest, the context symbol for everything expansion added. Each run of
//! hidden lines collapses into a single gap marker.

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::core::line_set::LineSet;
use crate::core::lines::LineStore;

/// Rendering settings, also read from the `[render]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Prefix each shown line with its 1-based number
    pub line_numbers: bool,

    /// Color highlighted lines; off unless asked for
    pub color: bool,

    /// Marker for lines of interest
    pub highlight_symbol: String,

    /// Marker for context lines
    pub context_symbol: String,

    /// Marker for a run of hidden lines
    pub gap_symbol: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: false,
            color: false,
            highlight_symbol: "█".to_string(),
            context_symbol: "│".to_string(),
            gap_symbol: "⋮".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    options: RenderOptions,
}

impl TextFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `display` over `store`, marking lines in `highlight`.
    /// Empty when either set is empty.
    ///
    /// The empty line after a final '\n' is not content: it is neither
    /// printed nor reported as a gap.
    pub fn format(&self, store: &LineStore, display: &LineSet, highlight: &LineSet) -> String {
        if display.is_empty() || highlight.is_empty() {
            return String::new();
        }

        let content_len = content_len(store);
        let width = display
            .iter()
            .take_while(|&line| line < content_len)
            .last()
            .map_or(1, |last| number_width(last + 1));

        let mut out = String::new();
        let mut in_gap = false;

        for (index, line) in store.iter().enumerate().take(content_len) {
            if !display.contains(index) {
                if !in_gap {
                    out.push_str(&self.options.gap_symbol);
                    out.push('\n');
                    in_gap = true;
                }
                continue;
            }
            in_gap = false;

            if self.options.line_numbers {
                out.push_str(&format!("{:0width$} ", index + 1));
            }

            let highlighted = highlight.contains(index);
            let symbol = if highlighted {
                &self.options.highlight_symbol
            } else {
                &self.options.context_symbol
            };

            let text = line.display_text();
            if highlighted && self.options.color {
                out.push_str(&format!("{symbol} {}\n", text.red()));
            } else {
                out.push_str(&format!("{symbol} {text}\n"));
            }
        }

        out
    }
}

/// Number of lines to render: all of them, minus a trailing empty line.
fn content_len(store: &LineStore) -> usize {
    let len = store.len();
    match store.iter().last() {
        Some(last) if len > 1 && last.text().is_empty() => len - 1,
        _ => len,
    }
}

/// Decimal digits needed for `n`.
fn number_width(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}
