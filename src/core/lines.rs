//! Line store: raw source lines plus one scope annotation per line.
//!
//! The store is an arena indexed by line number. Parent links are plain
//! indices into the same arena, so there is no ownership between lines.
//!
//! Notes
//! - Splits on '\n' only; a trailing '\r' stays in the raw text and is
//!   stripped by [`Line::display_text`].
//! - An empty buffer has exactly one (empty) line.
//! - A trailing '\n' produces a trailing empty line.

use std::ops::RangeInclusive;

use crate::error::{Result, ScopeError};

/// Inclusive line span of a named construct that starts on its own line.
/// Always spans more than one line (`end > start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    /// Number of lines after the first one.
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Structural annotation of a single line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    /// Start line of the nearest enclosing block that begins on another line.
    /// Always smaller than the annotated line.
    pub parent: Option<usize>,

    /// Largest block that begins on this line.
    pub block: Option<Block>,
}

impl Scope {
    /// Size of the block starting here, 0 when there is none.
    pub fn size(&self) -> usize {
        self.block.map_or(0, |block| block.size())
    }
}

#[derive(Debug, Clone)]
pub struct Line {
    text: String,
    scope: Scope,
}

impl Line {
    /// Raw line content, exactly as read.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Content without the '\r' of a CRLF line ending.
    pub fn display_text(&self) -> &str {
        self.text.strip_suffix('\r').unwrap_or(&self.text)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

#[derive(Debug, Clone)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    /// Split `text` into lines with empty scopes.
    pub fn new(text: &str) -> Self {
        let mut lines = Vec::with_capacity(memchr::memchr_iter(b'\n', text.as_bytes()).count() + 1);

        lines.extend(text.split('\n').map(|raw| Line {
            text: raw.to_string(),
            scope: Scope::default(),
        }));

        Self { lines }
    }

    /// Number of lines; never 0.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last line.
    pub fn last_index(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Result<&Line> {
        self.lines.get(index).ok_or(ScopeError::LineOutOfRange {
            index,
            len: self.lines.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Scope of an in-range line; callers guarantee the bound.
    pub(crate) fn scope_at(&self, index: usize) -> Scope {
        self.lines[index].scope
    }

    /// Attach `start..=end` to `start` unless a block at least as large is
    /// already recorded there. Degenerate or out-of-range spans are ignored.
    pub(crate) fn record_block(&mut self, start: usize, end: usize) {
        let last = self.last_index();
        let Some(line) = self.lines.get_mut(start) else {
            return;
        };

        let end = end.min(last);
        if end <= start {
            return;
        }

        let candidate = Block { start, end };
        if line
            .scope
            .block
            .is_none_or(|current| candidate.size() > current.size())
        {
            line.scope.block = Some(candidate);
        }
    }

    /// Record `parent` as the parent of `line` if none is recorded yet.
    pub(crate) fn claim_parent(&mut self, line: usize, parent: usize) {
        if parent >= line {
            return;
        }

        if let Some(entry) = self.lines.get_mut(line)
            && entry.scope.parent.is_none()
        {
            entry.scope.parent = Some(parent);
        }
    }
}
