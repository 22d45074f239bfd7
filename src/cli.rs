use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "rulescan")]
#[command(author, version, about = "Rule-driven scanner - validate code and tests against a rule catalog")]
#[command(long_about = "Runs every rule in a rule catalog against a set of source and test \
    files, then rolls the violations into a single health report.\n\n\
    Exit codes:\n  \
    0 - Clean, healthy, good or warnings only\n  \
    1 - Needs attention or critical issues\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate files against every rule in the catalog
    Check(CheckArgs),

    /// List catalog rules and how their scanners resolve
    Rules(RulesArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Paths to scan (files or directories)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rule catalog directory (overrides config)
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Bot name enabling the `bots.<name>.scanners` namespace
    #[arg(long)]
    pub bot: Option<String>,

    /// JSON document forwarded to scanners as the story graph
    #[arg(long)]
    pub story_graph: Option<PathBuf>,

    /// File extensions to scan (overrides config)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Exclude patterns (glob syntax)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Changed files compared against the rest by cross-file scanners
    #[arg(long, value_delimiter = ',')]
    pub changed: Vec<PathBuf>,

    /// Maximum number of cross-file comparisons (overrides config)
    #[arg(long)]
    pub max_comparisons: Option<usize>,

    /// Number of rules to run in parallel
    #[arg(short, long, default_value = "1")]
    pub jobs: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report problems but always exit successfully
    #[arg(long)]
    pub warn_only: bool,
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rule catalog directory (overrides config)
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Bot name enabling the `bots.<name>.scanners` namespace
    #[arg(long)]
    pub bot: Option<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
