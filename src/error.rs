//! Library error type shared by the parsing, search and expansion layers.

use std::path::PathBuf;

/// Result alias used across the library.
pub type Result<T, E = ScopeError> = std::result::Result<T, E>;

/// Everything that can go wrong between reading a file and rendering it.
///
/// Structural oddities in a syntax tree are never errors; the scope graph
/// simply ends up sparser.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError
{
    /// File could not be opened, mapped or read
    #[error("failed to read {}", .path.display())]
    Io
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File bytes are not UTF-8
    #[error("{} is not valid UTF-8", .path.display())]
    InvalidUtf8
    {
        path: PathBuf,
    },

    /// No grammar is registered for the file extension
    #[error("file type not recognized: {}", .0.display())]
    UnsupportedFileType(PathBuf),

    /// Grammar ABI does not match the linked tree-sitter runtime
    #[error("failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// Parser returned no tree
    #[error("failed to parse {} as {language}", .path.display())]
    Parse
    {
        path: PathBuf,
        language: &'static str,
    },

    /// Search pattern is not a valid regular expression
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern
    {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Line index past the end of the store
    #[error("line {index} is out of range (file has {len} lines)")]
    LineOutOfRange
    {
        index: usize,
        len: usize,
    },

    /// Search or overview produced no seed lines
    #[error("no matches found")]
    NoMatches,
}
