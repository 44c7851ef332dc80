//! Filepath: src/parsers/language.rs
//! Extension → tree-sitter grammar mapping and parsing.

use std::path::Path;

use tree_sitter::{Language, Parser, Tree};

use crate::error::{Result, ScopeError};

/// Languages with a bundled grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage
{
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Tsx,
    Go,
    C,
    Cpp,
    Java,
    CSharp,
    Ruby,
    Bash,
    Php,
}

impl SourceLanguage
{
    /// Detect language from a bare extension (no dot, any case)
    pub fn from_extension(ext: &str) -> Option<Self>
    {
        match ext
            .to_lowercase()
            .as_str()
        {
            "rs" => Some(Self::Rust),
            "py" | "pyi" => Some(Self::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "go" => Some(Self::Go),
            "c" | "h" => Some(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some(Self::Cpp),
            "java" => Some(Self::Java),
            "cs" => Some(Self::CSharp),
            "rb" => Some(Self::Ruby),
            "sh" | "bash" => Some(Self::Bash),
            "php" | "php3" | "phtml" => Some(Self::Php),
            _ => None,
        }
    }

    /// Detect language from a file path
    pub fn from_path(path: &Path) -> Result<Self>
    {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ScopeError::UnsupportedFileType(path.to_path_buf()))
    }

    /// Lowercase language label
    pub fn name(self) -> &'static str
    {
        match self
        {
            Self::Rust => "rust",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::Go => "go",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::CSharp => "c_sharp",
            Self::Ruby => "ruby",
            Self::Bash => "bash",
            Self::Php => "php",
        }
    }

    pub fn grammar(self) -> Language
    {
        match self
        {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Self::Java => tree_sitter_java::LANGUAGE.into(),
            Self::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Self::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Self::Bash => tree_sitter_bash::LANGUAGE.into(),
            // Full PHP files, including any HTML around `<?php`
            Self::Php => tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }

    /// Parse `source`; `path` only labels errors
    pub fn parse(
        self,
        source: &str,
        path: &Path,
    ) -> Result<Tree>
    {
        let mut parser = Parser::new();
        parser.set_language(&self.grammar())?;

        parser
            .parse(source, None)
            .ok_or_else(|| ScopeError::Parse {
                path: path.to_path_buf(),
                language: self.name(),
            })
    }
}
