//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: List untranslated JSX text and existing translation calls
//! - `wrap`: Wrap one scanned literal in a translation call
//! - `suggest`: Print the key suggested for a piece of text
//! - `init`: Write a default configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::codemod::ImportKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Wrap(cmd)) => cmd.common.verbose,
            Some(Command::Suggest(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style report
    #[default]
    Pretty,
    /// Candidates as JSON
    Json,
    /// Nested locale bundle built from suggested keys
    Bundle,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory to scan, relative to the root (overrides config, repeatable)
    #[arg(long = "include", value_name = "DIR")]
    pub includes: Vec<String>,

    /// File extension to scan (overrides config, repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Extra ignore pattern, added to the configured ones (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignores: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Leave already-translated calls out of the output
    #[arg(long)]
    pub plain_only: bool,
}

#[derive(Debug, Args)]
pub struct WrapCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// File containing the literal (relative paths resolve against the root)
    pub file: String,

    /// 1-based line of the literal, as reported by `scan`
    #[arg(long)]
    pub line: usize,

    /// 0-based column of the literal, as reported by `scan`
    #[arg(long)]
    pub column: usize,

    /// Trimmed text of the literal, as reported by `scan`
    #[arg(long)]
    pub text: String,

    /// Localization key to pass to the translation call
    #[arg(long)]
    pub key: String,

    /// Translation function, e.g. `t` or `i18n.t` (overrides config)
    #[arg(long = "function", value_name = "NAME")]
    pub function_name: Option<String>,

    /// Module to import the translation function from (overrides config)
    #[arg(long, value_name = "MODULE")]
    pub import_source: Option<String>,

    /// How the translation function is imported (overrides config)
    #[arg(long, value_enum)]
    pub import_kind: Option<ImportKind>,

    /// Do not add or check the import
    #[arg(long)]
    pub skip_import: bool,
}

#[derive(Debug, Args)]
pub struct SuggestCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Text to derive a key from
    pub text: String,

    /// Namespace for the key (default: config namespace)
    #[arg(long, conflicts_with = "file")]
    pub namespace: Option<String>,

    /// Derive the namespace from this file name
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to create the config file in (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find JSX text that still needs translating
    Scan(ScanCommand),
    /// Wrap a scanned literal in a translation call and add the import
    Wrap(WrapCommand),
    /// Suggest a localization key for some text
    Suggest(SuggestCommand),
    /// Initialize a new .localeforgerc.json configuration file
    Init(InitCommand),
    /// Start MCP server for AI coding agents
    Serve,
}
