//! Cache command implementation.
//!
//! Lists and deletes the per-ticker profile files under the data directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use upsetf_ext_file::{CacheEntry, ProfileCache};
use upsetf_traits::FundId;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_header, print_output, print_success, print_warning};

/// Arguments for the cache command.
#[derive(Args, Debug)]
pub struct CacheArgs {
    /// Profile cache directory [default: configured dir, else ./data]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CacheCommand,
}

/// Cache subcommands.
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// List cached profiles
    List,

    /// Delete one cached profile, or all of them
    Clear(ClearArgs),
}

/// Arguments for clear subcommand.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Ticker to delete; omit to delete every cached profile
    pub ticker: Option<String>,
}

/// One row of `cache list`.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CacheRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Holdings")]
    pub holdings: String,
    #[tabled(rename = "Fetched at")]
    pub fetched_at: String,
    #[tabled(rename = "Size (bytes)")]
    pub size_bytes: u64,
}

impl From<CacheEntry> for CacheRow {
    fn from(entry: CacheEntry) -> Self {
        Self {
            ticker: entry.id.to_string(),
            holdings: entry
                .holdings
                .map_or_else(|| "unreadable".to_string(), |n| n.to_string()),
            fetched_at: entry.fetched_at.unwrap_or_default(),
            size_bytes: entry.size_bytes,
        }
    }
}

/// Execute the cache command.
pub fn execute(args: CacheArgs, ctx: &Context) -> Result<()> {
    let cache = ProfileCache::new(ctx.data_dir(args.data_dir));
    match args.command {
        CacheCommand::List => execute_list(&cache, ctx),
        CacheCommand::Clear(clear_args) => execute_clear(&cache, clear_args, ctx),
    }
}

fn execute_list(cache: &ProfileCache, ctx: &Context) -> Result<()> {
    let rows: Vec<CacheRow> = cache
        .list()
        .map_err(CliError::from)?
        .into_iter()
        .map(CacheRow::from)
        .collect();

    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header(&format!("Cached profiles in {}", cache.data_dir().display()));
    }
    print_output(&rows, ctx.format)
}

fn execute_clear(cache: &ProfileCache, args: ClearArgs, ctx: &Context) -> Result<()> {
    match args.ticker {
        Some(ticker) => {
            let id = FundId::parse(&ticker).map_err(|_| CliError::InvalidTicker(ticker))?;
            if cache.remove(&id).map_err(CliError::from)? {
                if !ctx.quiet {
                    print_success(&format!("Removed cached profile for {}", id));
                }
            } else if !ctx.quiet {
                print_warning(&format!("No cached profile for {}", id));
            }
        }
        None => {
            let removed = cache.clear().map_err(CliError::from)?;
            if !ctx.quiet {
                print_success(&format!("Removed {} cached profile(s)", removed));
            }
        }
    }
    Ok(())
}
