//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use graphdoc::builder::AccessLevel;

/// graphdoc - generate symbol graphs for a package's documentable targets
#[derive(Parser)]
#[command(name = "graphdoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Graphdoc.toml (defaults to searching upward from the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate symbol graphs and the documentation plan
    Generate(GenerateArgs),

    /// List documentable targets and products
    Targets,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Document the library and executable targets of a product (repeatable)
    #[arg(long = "product", value_name = "NAME")]
    pub products: Vec<String>,

    /// Document a specific target (repeatable)
    #[arg(long = "target", value_name = "NAME")]
    pub targets: Vec<String>,

    /// Minimum access level of included symbols
    #[arg(long, value_name = "LEVEL")]
    pub symbol_graph_minimum_access_level: Option<AccessLevel>,

    /// Exclude compiler-synthesized members
    #[arg(long)]
    pub skip_synthesized_symbols: bool,

    /// Include symbols for extensions to types from other modules
    #[arg(long, conflicts_with = "exclude_extended_types")]
    pub include_extended_types: bool,

    /// Exclude symbols for extensions to types from other modules
    #[arg(long)]
    pub exclude_extended_types: bool,

    /// Do not extract snippets
    #[arg(long)]
    pub no_snippets: bool,

    /// Also plan one combined archive for all targets
    #[arg(long)]
    pub combined: bool,

    /// Archive output path (a directory of archives when documenting several targets)
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Number of parallel target workers
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the documentation plan as JSON to stdout
    #[arg(long)]
    pub emit_plan: bool,
}

impl GenerateArgs {
    /// Extension block override requested on the command line.
    pub fn extension_blocks(&self) -> Option<bool> {
        if self.include_extended_types {
            Some(true)
        } else if self.exclude_extended_types {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
