//! Context expansion: grows a seed set of lines into a display set.
//!
//! Steps, in order:
//! 1. surrounding lines around every seed
//! 2. scope absorption (a line that starts a block pulls in the block)
//! 3. ancestor inclusion (first and last line of every enclosing block)
//! 4. descendant preview (head of each block, or all of it when the head
//!    already covers more than 70% of it)
//! 5. gap closing between nearby shown lines
//!
//! Steps 2–4 iterate over a snapshot taken when the step starts, so lines a
//! step adds are not revisited by that same step.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::core::line_set::LineSet;
use crate::core::lines::LineStore;

/// Share of a block a preview must exceed before the whole block is shown.
const PREVIEW_CUTOFF_PERCENT: usize = 70;

/// Expansion policy. Read-only during a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig
{
    /// Lines shown before and after every seed
    pub surrounding_lines: usize,

    /// Largest distance between two shown lines that still gets filled in
    pub gap_to_close: usize,

    /// Include the first and last line of every enclosing block
    pub parent_context: bool,

    /// Preview the head of blocks that start on shown lines
    pub child_context: bool,

    /// Pull in the whole block of any shown line that starts one
    pub absorb_scopes: bool,

    /// Preview length; falls back to `surrounding_lines`
    pub child_lines: Option<usize>,
}

impl Default for ContextConfig
{
    fn default() -> Self
    {
        Self {
            surrounding_lines: 3,
            gap_to_close: 3,
            parent_context: true,
            child_context: true,
            absorb_scopes: true,
            child_lines: None,
        }
    }
}

impl ContextConfig
{
    /// Preset for outlining a file from its top-level declarations.
    pub fn overview() -> Self
    {
        Self {
            surrounding_lines: 2,
            gap_to_close: 3,
            parent_context: false,
            child_context: true,
            absorb_scopes: false,
            child_lines: Some(3),
        }
    }

    fn preview_lines(&self) -> usize
    {
        self.child_lines
            .unwrap_or(self.surrounding_lines)
    }
}

/// Reusable expander. Holds per-call bookkeeping only, so one instance can
/// serve many sequential calls; it is not meant to be shared across threads.
#[derive(Debug, Default)]
pub struct ContextExpander
{
    config: ContextConfig,
    seen_parents: HashSet<usize>,
}

impl ContextExpander
{
    pub fn new(config: ContextConfig) -> Self
    {
        Self {
            config,
            seen_parents: HashSet::new(),
        }
    }

    pub fn config(&self) -> &ContextConfig
    {
        &self.config
    }

    /// Expand `seeds` over `store`. Seeds past the end of the store are
    /// dropped; every other seed is part of the result.
    #[instrument(level = "debug", skip_all, fields(seeds = seeds.len()))]
    pub fn expand(
        &mut self,
        store: &LineStore,
        seeds: &LineSet,
    ) -> LineSet
    {
        self.seen_parents
            .clear();

        let mut shown = LineSet::new();
        if store.is_empty()
        {
            return shown;
        }

        self.add_surrounding_lines(store, seeds, &mut shown);
        trace!(lines = shown.len(), "after surrounding lines");

        if self
            .config
            .absorb_scopes
        {
            Self::absorb_scopes(store, &mut shown);
            trace!(lines = shown.len(), "after scope absorption");
        }

        if self
            .config
            .parent_context
        {
            for line in shown.to_vec()
            {
                self.add_parent_context(store, line, &mut shown);
            }
            trace!(lines = shown.len(), "after parent context");
        }

        if self
            .config
            .child_context
        {
            for line in shown.to_vec()
            {
                self.add_child_context(store, line, &mut shown);
            }
            trace!(lines = shown.len(), "after child context");
        }

        self.close_gaps(&mut shown);

        self.seen_parents
            .clear();

        debug!(lines = shown.len(), "context expanded");
        shown
    }

    fn add_surrounding_lines(
        &self,
        store: &LineStore,
        seeds: &LineSet,
        shown: &mut LineSet,
    )
    {
        let last = store.last_index();
        let gap = self
            .config
            .surrounding_lines;

        for line in seeds
            .iter()
            .take_while(|&line| line <= last)
        {
            let from = line.saturating_sub(gap);
            let to = line
                .saturating_add(gap)
                .min(last);
            shown.insert_range(from..=to);
        }
    }

    fn absorb_scopes(
        store: &LineStore,
        shown: &mut LineSet,
    )
    {
        for line in shown.to_vec()
        {
            if let Some(block) = store
                .scope_at(line)
                .block
            {
                shown.insert_range(block.lines());
            }
        }
    }

    /// Walk parent links upwards from `line`, adding the bounds of each
    /// enclosing block. Stops at a parent already walked in this call.
    fn add_parent_context(
        &mut self,
        store: &LineStore,
        line: usize,
        shown: &mut LineSet,
    )
    {
        let mut current = line;

        while let Some(parent) = store
            .scope_at(current)
            .parent
        {
            if !self
                .seen_parents
                .insert(parent)
            {
                return;
            }

            match store
                .scope_at(parent)
                .block
            {
                Some(block) =>
                {
                    shown.insert(block.start);
                    shown.insert(block.end);
                }
                None =>
                {
                    shown.insert(parent);
                }
            }

            current = parent;
        }
    }

    /// Preview the block starting on `line`. The root line and lines that
    /// start no block are skipped.
    fn add_child_context(
        &self,
        store: &LineStore,
        line: usize,
        shown: &mut LineSet,
    )
    {
        if line == 0
        {
            return;
        }

        let Some(block) = store
            .scope_at(line)
            .block
        else
        {
            return;
        };

        let mut limit = block
            .start
            .saturating_add(
                self.config
                    .preview_lines(),
            )
            .min(block.end);

        let threshold = block.start + block.size() * PREVIEW_CUTOFF_PERCENT / 100;
        if limit > threshold
        {
            limit = block.end;
        }

        for current in block.start..=limit
        {
            shown.insert(current);

            // Keep nested blocks visually closed.
            if let Some(nested) = store
                .scope_at(current)
                .block
            {
                shown.insert(nested.end);
            }
        }
    }

    /// Single forward pass over the sorted lines, filling every gap of at
    /// most `gap_to_close` lines.
    fn close_gaps(
        &self,
        shown: &mut LineSet,
    )
    {
        let sorted = shown.to_vec();

        for pair in sorted.windows(2)
        {
            let (from, to) = (pair[0], pair[1]);
            if to - from <= self.config.gap_to_close
            {
                shown.insert_range(from + 1..=to);
            }
        }
    }
}

/// One-shot expansion with a fresh expander.
pub fn expand(
    store: &LineStore,
    seeds: &LineSet,
    config: &ContextConfig,
) -> LineSet
{
    ContextExpander::new(config.clone()).expand(store, seeds)
}
