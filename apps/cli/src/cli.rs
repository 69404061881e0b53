//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Conditional activation of declarative validation rules.
#[derive(Debug, Parser)]
#[command(name = "rulegate", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG`
    /// takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the rules that stay active for a record.
    Prune(PruneArgs),
    /// Verify every condition in a rule set without a record.
    Check(CheckArgs),
}

/// Where rules come from and which settings apply to them.
#[derive(Debug, Args)]
pub struct RuleSource {
    /// JSON rule set: field -> rule name -> rule parameters. `-` reads stdin.
    #[arg(long, value_name = "FILE")]
    pub rules: PathBuf,

    /// Record type whose settings apply.
    #[arg(long, value_name = "NAME", default_value = "default")]
    pub record_type: String,

    /// TOML settings file: `[<record type>]` tables with `condition_key`.
    #[arg(long, value_name = "FILE", env = "RULEGATE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Condition key for the selected record type; overrides the settings file.
    #[arg(long, value_name = "KEY")]
    pub condition_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct PruneArgs {
    #[command(flatten)]
    pub source: RuleSource,

    /// JSON record the conditions are evaluated against. `-` reads stdin.
    #[arg(long, value_name = "FILE")]
    pub record: PathBuf,

    /// Print `{"rules": ..., "removed": [...]}` instead of the bare rule set.
    #[arg(long)]
    pub report: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: RuleSource,
}
