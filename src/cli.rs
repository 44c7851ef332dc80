use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::expand::ContextConfig;
use crate::core::render::RenderOptions;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "sgr")]
#[command(about = "Scope-aware grep: show matches together with the code blocks around them")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress summaries and other non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search files for a regex and show each match in its scope
    Search(SearchArgs),

    /// Outline files from their top-level declarations
    Overview(OverviewArgs),

    /// Initialize a scopegrep.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Regular expression matched against each line
    pub pattern: String,

    /// Source files to search
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub context: ContextFlags,

    #[command(flatten)]
    pub render: RenderFlags,
}

#[derive(Debug, Parser)]
pub struct OverviewArgs {
    /// Source files to outline
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub context: ContextFlags,

    #[command(flatten)]
    pub render: RenderFlags,
}

/// Expansion overrides; unset flags keep the configured value
#[derive(Debug, Default, Args)]
pub struct ContextFlags {
    /// Lines shown before and after each match
    #[arg(short, long, value_name = "N")]
    pub surrounding: Option<usize>,

    /// Fill gaps of at most N lines between shown lines
    #[arg(short, long, value_name = "N")]
    pub gap: Option<usize>,

    /// Don't show the first and last line of enclosing blocks
    #[arg(long)]
    pub no_parent: bool,

    /// Don't preview blocks that start on shown lines
    #[arg(long)]
    pub no_child: bool,

    /// Length of block previews (defaults to --surrounding)
    #[arg(long, value_name = "N")]
    pub child_lines: Option<usize>,

    /// Don't pull in whole blocks that start on shown lines
    #[arg(long)]
    pub no_absorb: bool,
}

impl ContextFlags {
    pub fn apply(&self, config: &mut ContextConfig) {
        if let Some(n) = self.surrounding {
            config.surrounding_lines = n;
        }
        if let Some(n) = self.gap {
            config.gap_to_close = n;
        }
        if self.no_parent {
            config.parent_context = false;
        }
        if self.no_child {
            config.child_context = false;
        }
        if let Some(n) = self.child_lines {
            config.child_lines = Some(n);
        }
        if self.no_absorb {
            config.absorb_scopes = false;
        }
    }
}

/// Output overrides; unset flags keep the configured value
#[derive(Debug, Default, Args)]
pub struct RenderFlags {
    /// Prefix each line with its line number
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Marker for matching lines
    #[arg(long, value_name = "SYMBOL")]
    pub highlight_symbol: Option<String>,

    /// Marker for context lines
    #[arg(long, value_name = "SYMBOL")]
    pub context_symbol: Option<String>,

    /// Marker for hidden runs of lines
    #[arg(long, value_name = "SYMBOL")]
    pub gap_symbol: Option<String>,
}

impl RenderFlags {
    pub fn apply(&self, options: &mut RenderOptions) {
        if self.line_numbers {
            options.line_numbers = true;
        }
        if let Some(symbol) = &self.highlight_symbol {
            options.highlight_symbol = symbol.clone();
        }
        if let Some(symbol) = &self.context_symbol {
            options.context_symbol = symbol.clone();
        }
        if let Some(symbol) = &self.gap_symbol {
            options.gap_symbol = symbol.clone();
        }
    }
}

#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; required unless --stdout is set
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
