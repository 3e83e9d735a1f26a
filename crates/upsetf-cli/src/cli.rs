//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{CacheArgs, ConfigArgs, OverlapArgs};

/// UpSETF - Weighted overlap of ETF holdings
#[derive(Parser, Debug)]
#[command(name = "upsetf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: configured format, else table]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file [default: <config dir>/upsetf/config.json]
    #[arg(long, env = "UPSETF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the weighted holdings overlap of 2 to 5 ETFs
    Overlap(OverlapArgs),

    /// Manage configuration (API key, data directory, output format)
    Config(ConfigArgs),

    /// Inspect or clear cached fund profiles
    Cache(CacheArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl OutputFormat {
    /// Parses a format name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(s, true).ok()
    }
}
