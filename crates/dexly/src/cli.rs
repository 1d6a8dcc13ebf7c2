//! Clap derive structures for the `dexly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dexly -- browse the creature catalog from your terminal
#[derive(Debug, Parser)]
#[command(
    name = "dexly",
    version,
    about = "Browse, search and favorite catalog creatures from the command line",
    long_about = "A terminal client for a public creature catalog.\n\n\
        Lists the catalog page by page, searches it by name, shows full\n\
        profiles and keeps a local set of favorites.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Catalog API root (overrides config)
    #[arg(long, env = "DEXLY_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Directory holding the favorites file (overrides config)
    #[arg(long, env = "DEXLY_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "DEXLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "DEXLY_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one grid page of the catalog
    #[command(alias = "ls", alias = "l")]
    List(ListArgs),

    /// Show the full profile of one item
    #[command(alias = "s")]
    Show(ShowArgs),

    /// Manage locally stored favorites
    #[command(alias = "fav", alias = "f")]
    Favorites(FavoritesArgs),

    /// Page through the catalog interactively
    #[command(alias = "b")]
    Browse,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── List ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page to show (1-indexed)
    #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Only items whose name contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only favorited items
    #[arg(long, short = 'f')]
    pub favorites: bool,

    /// Items per page (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=500))]
    pub page_size: Option<u64>,
}

// ── Show ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Numeric id or name
    pub item: String,
}

// ── Favorites ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favorited ids
    #[command(alias = "ls")]
    List,

    /// Add an id to favorites
    Add {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,
    },

    /// Remove an id from favorites
    #[command(alias = "rm")]
    Remove {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,
    },

    /// Add the id if absent, remove it if present
    Toggle {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,
    },

    /// Remove every favorite
    Clear,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file populated with defaults
    Init,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
