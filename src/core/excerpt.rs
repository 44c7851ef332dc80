//! Per-file pipeline: read → parse → scope graph → seeds → expansion.
//!
//! A `SourceFile` owns everything derived from one file and nothing else,
//! so several files can be processed side by side without coordination.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::core::expand::{ContextConfig, ContextExpander};
use crate::core::line_set::LineSet;
use crate::core::lines::LineStore;
use crate::core::render::TextFormatter;
use crate::core::scope_graph::{build_scopes, top_level_lines};
use crate::core::search::search;
use crate::error::{Result, ScopeError};
use crate::infra::io::read_source;
use crate::parsers::SourceLanguage;

/// A parsed, scope-annotated source file.
#[derive(Debug, Clone)]
pub struct SourceFile
{
    path: PathBuf,
    language: SourceLanguage,
    store: LineStore,
    top_level: LineSet,
}

/// Lines of interest and the lines shown around them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt
{
    pub highlight: LineSet,
    pub display: LineSet,
}

impl SourceFile
{
    /// Read and annotate a file from disk.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self>
    {
        let language = SourceLanguage::from_path(path)?;
        let content = read_source(path)?;
        Self::parse(path, language, content.as_ref())
    }

    /// Annotate in-memory text; the language comes from `path`'s extension.
    pub fn from_source(
        path: impl Into<PathBuf>,
        text: &str,
    ) -> Result<Self>
    {
        let path = path.into();
        let language = SourceLanguage::from_path(&path)?;
        Self::parse(&path, language, text)
    }

    fn parse(
        path: &Path,
        language: SourceLanguage,
        text: &str,
    ) -> Result<Self>
    {
        let tree = language.parse(text, path)?;
        let root = tree.root_node();

        let mut store = LineStore::new(text);
        build_scopes(&mut store, root);
        let top_level = top_level_lines(&store, root);

        debug!(
            path = %path.display(),
            language = language.name(),
            lines = store.len(),
            top_level = top_level.len(),
            "source annotated"
        );

        Ok(Self {
            path: path.to_path_buf(),
            language,
            store,
            top_level,
        })
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    pub fn language(&self) -> SourceLanguage
    {
        self.language
    }

    pub fn store(&self) -> &LineStore
    {
        &self.store
    }

    /// Lines matching a regex.
    pub fn search(
        &self,
        pattern: &str,
    ) -> Result<LineSet>
    {
        search(&self.store, pattern)
    }

    /// Start lines of multi-line top-level declarations.
    pub fn top_level(&self) -> &LineSet
    {
        &self.top_level
    }

    /// Expand `seeds`; an empty seed set is reported as `NoMatches`.
    pub fn excerpt(
        &self,
        seeds: LineSet,
        expander: &mut ContextExpander,
    ) -> Result<Excerpt>
    {
        if seeds.is_empty()
        {
            return Err(ScopeError::NoMatches);
        }

        let display = expander.expand(&self.store, &seeds);
        Ok(Excerpt {
            highlight: seeds,
            display,
        })
    }

    /// Search + expand with a fresh expander.
    pub fn excerpt_for_pattern(
        &self,
        pattern: &str,
        config: &ContextConfig,
    ) -> Result<Excerpt>
    {
        let seeds = self.search(pattern)?;
        self.excerpt(seeds, &mut ContextExpander::new(config.clone()))
    }

    /// Top-level declarations + expand with a fresh expander.
    pub fn overview(
        &self,
        config: &ContextConfig,
    ) -> Result<Excerpt>
    {
        self.excerpt(
            self.top_level
                .clone(),
            &mut ContextExpander::new(config.clone()),
        )
    }
}

impl Excerpt
{
    pub fn render(
        &self,
        file: &SourceFile,
        formatter: &TextFormatter,
    ) -> String
    {
        formatter.format(file.store(), &self.display, &self.highlight)
    }
}
