//! **scopegrep** - Scope-aware grep for source code
//!
//! Matches are shown together with the syntactic blocks around them: the
//! first and last line of every enclosing function or statement, a preview of
//! blocks that start near the match, and small gaps filled in. Scopes come
//! from tree-sitter parse trees.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Library error type
pub mod error;

/// Scope graph and context expansion
pub mod core {
    /// Ordered line-index sets
    pub mod line_set;
    pub use line_set::LineSet;

    /// Per-line text and scope annotations
    pub mod lines;
    pub use lines::{Block, Line, LineStore, Scope};

    /// Parse tree → per-line block and parent links
    pub mod scope_graph;
    pub use scope_graph::{SyntaxNode, build_scopes, top_level_lines};

    /// Seed set → display set
    pub mod expand;
    pub use expand::{ContextConfig, ContextExpander, expand};

    /// Regex seeding
    pub mod search;
    pub use search::search;

    /// Marker-based text output
    pub mod render;
    pub use render::{RenderOptions, TextFormatter};

    /// Per-file pipeline
    pub mod excerpt;
    pub use excerpt::{Excerpt, SourceFile};

    /// `search` and `overview` commands
    pub mod report;
    pub use report::{overview_run, search_run};

    #[cfg(test)]
    pub(crate) mod test_tree;
}

/// Grammar selection and parsing
pub mod parsers {
    pub mod language;
    pub use language::SourceLanguage;
}

/// Infrastructure - configuration and file I/O
pub mod infra {
    /// Layered configuration with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Memory-mapped file I/O for large files (>1MB threshold)
    pub mod io;
    pub use io::{FileContent, read_source};
}

// Re-exports for the binary and library users
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{
    ContextConfig, ContextExpander, Excerpt, LineSet, LineStore, RenderOptions, SourceFile,
    TextFormatter, overview_run, search_run,
};
pub use error::{Result, ScopeError};
pub use infra::{Config, load_config};
pub use parsers::SourceLanguage;
