//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Audits consistency between documentation and code for
/// configuration-property keys.
#[derive(Parser, Debug)]
#[command(name = "props-audit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan documentation and code and report inconsistencies
    Audit(ScanArgs),

    /// List every code location where the given keys literally appear
    Usages {
        #[command(flatten)]
        code: CodeArgs,

        /// Keys to look up
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

/// Arguments describing the code tree. These are the only settings the
/// `usages` subcommand needs.
#[derive(Args, Debug)]
pub struct CodeArgs {
    /// Root of the code tree
    #[arg(long, default_value = ".")]
    pub code_root: PathBuf,

    /// Glob for code files
    #[arg(long, default_value = "**/*.java")]
    pub code_glob: String,

    /// Manual list of code files to ignore (gitignore syntax)
    #[arg(long)]
    pub ignore_files: Option<PathBuf>,
}

/// Arguments for the full audit.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root of the documentation tree
    #[arg(long, default_value = ".")]
    pub docs_root: PathBuf,

    #[command(flatten)]
    pub code: CodeArgs,

    /// Glob for documentation files
    #[arg(long, default_value = "**/*.adoc")]
    pub docs_glob: String,

    /// Key prefix identifying a property (repeatable)
    #[arg(long = "prefix", required = true)]
    pub prefixes: Vec<String>,

    /// Documentation file always excluded, gitignore syntax (repeatable)
    #[arg(long = "exclude-doc")]
    pub exclude_docs: Vec<String>,

    /// Manual list of documentation matches to ignore (bare keys)
    #[arg(long)]
    pub ignore_doc_matches: Option<PathBuf>,

    /// Manual list of property declarations to ignore (placeholder syntax)
    #[arg(long)]
    pub ignore_props: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections with terminal colors
    Console,
    /// Pretty-printed JSON
    Json,
}
