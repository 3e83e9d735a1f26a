//! Overlap command implementation.
//!
//! Fetches each fund's profile, turns usable ones into a [`FundSet`], and
//! prints how much weight each combination of funds holds exclusively.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use upsetf_core::{allocate_exclusive, Fund, FundSet, SetTotal, UpsetTable, MIN_FUNDS};
use upsetf_ext_alphavantage::{AlphaVantageSource, CachedHoldingsSource, DEMO_API_KEY};
use upsetf_ext_file::{FileHoldingsSource, ProfileCache};
use upsetf_traits::{EtfProfile, FundId, HoldingsSource};

use crate::cli::OutputFormat;
use crate::commands::{parse_tickers, Context};
use crate::error::{CliError, CliResult};
use crate::output::{
    bar, format_percent, print_csv_records, print_dynamic_table, print_header, print_json,
    print_warning,
};

/// Holdings summing below this fraction of net assets trigger a warning.
const MIN_COVERAGE: f64 = 0.99;

/// Arguments for the overlap command.
#[derive(Args, Debug)]
pub struct OverlapArgs {
    /// ETF tickers (2 to 5)
    #[arg(required = true, num_args = 1..)]
    pub tickers: Vec<String>,

    /// Alpha Vantage API key [default: configured key, else "demo"]
    #[arg(long, env = "ALPHAVANTAGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Ignore cached profiles and fetch fresh ones
    #[arg(long, conflicts_with = "offline")]
    pub force_refresh: bool,

    /// Use cached profiles only; never touch the network
    #[arg(long)]
    pub offline: bool,

    /// Profile cache directory [default: configured dir, else ./data]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Hide combinations that hold no weight
    #[arg(long)]
    pub hide_empty: bool,

    /// Width of the bar column, in characters
    #[arg(long, default_value_t = 40)]
    pub bar_width: usize,
}

/// A fund left out of the computation.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFund {
    /// Fund ticker.
    pub ticker: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Everything the overlap command reports.
#[derive(Debug, Clone, Serialize)]
pub struct OverlapReport {
    /// Funds that took part, sorted.
    pub funds: Vec<String>,
    /// Funds that were requested but not usable.
    pub skipped: Vec<SkippedFund>,
    /// Exclusive weight per fund combination.
    pub upset: UpsetTable,
    /// Per-fund totals across combinations.
    pub totals: Vec<SetTotal>,
}

/// Execute the overlap command.
pub async fn execute(args: OverlapArgs, ctx: &Context) -> Result<()> {
    let tickers = parse_tickers(&args.tickers)?;
    let source = build_source(&args, ctx)?;

    debug!(source = source.name(), tickers = tickers.len(), "fetching profiles");
    let fetched = join_all(tickers.iter().map(|id| source.fetch_profile(id))).await;

    let mut funds = Vec::with_capacity(tickers.len());
    let mut skipped = Vec::new();
    for (id, result) in tickers.iter().zip(fetched) {
        let usable = result
            .map_err(CliError::from)
            .and_then(|profile| fund_from_profile(id, &profile));
        match usable {
            Ok(fund) => funds.push(fund),
            Err(e) => {
                debug!(ticker = %id, error = %e, "skipping fund");
                if !ctx.quiet {
                    print_warning(&format!("Skipping {}: {}", id, e));
                }
                skipped.push(SkippedFund {
                    ticker: id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if funds.len() < MIN_FUNDS {
        return Err(CliError::NotEnoughFunds {
            usable: funds.len(),
            required: MIN_FUNDS,
        }
        .into());
    }

    let fund_set = FundSet::new(funds).map_err(CliError::from)?;
    let result = allocate_exclusive(&fund_set).map_err(CliError::from)?;

    let mut upset = result.to_upset();
    if args.hide_empty {
        upset = upset.without_empty();
    }
    let totals = upset.set_totals();

    let report = OverlapReport {
        funds: result.fund_ids().to_vec(),
        skipped,
        upset,
        totals,
    };

    match ctx.format {
        OutputFormat::Table => print_report_table(&report, &fund_set, args.bar_width, ctx.quiet),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_report_csv(&report)?,
    }

    Ok(())
}

/// Picks the network or offline source, wrapped in the profile cache.
fn build_source(args: &OverlapArgs, ctx: &Context) -> CliResult<Box<dyn HoldingsSource>> {
    let cache = ProfileCache::new(ctx.data_dir(args.data_dir.clone()));

    if args.offline {
        return Ok(Box::new(FileHoldingsSource::new(cache)));
    }

    let api_key = match args.api_key.clone().or_else(|| ctx.settings.api_key.clone()) {
        Some(key) if !key.trim().is_empty() => key,
        _ => {
            debug!("no API key configured, using the demo key");
            if !ctx.quiet {
                print_warning(
                    "No API key configured; using Alpha Vantage's demo key. \
                     Set one with `upsetf config set api_key <KEY>`.",
                );
            }
            DEMO_API_KEY.to_string()
        }
    };

    let network = AlphaVantageSource::new(api_key)?;
    Ok(Box::new(
        CachedHoldingsSource::new(cache, network).with_force_refresh(args.force_refresh),
    ))
}

/// Converts a provider profile into a validated [`Fund`].
///
/// Funds without positive net assets or without holdings are unusable.
/// Holdings covering less than 99% of the fund are kept with a warning.
pub fn fund_from_profile(id: &FundId, profile: &EtfProfile) -> CliResult<Fund> {
    match profile.net_assets_value() {
        Some(assets) if assets > 0.0 => {}
        _ => return Err(CliError::unusable(id.as_str(), "no usable net_assets")),
    }
    if profile.holdings.is_empty() {
        return Err(CliError::unusable(id.as_str(), "no holdings"));
    }

    let weights = profile.parsed_weights()?;
    let coverage: f64 = weights.iter().map(|(_, w)| w).sum();
    if coverage < MIN_COVERAGE {
        warn!(
            ticker = %id,
            coverage = %format_percent(coverage),
            "holdings do not cover the whole fund"
        );
    }

    Fund::builder()
        .id(id.as_str())
        .add_holdings(weights)
        .build()
        .map_err(|e| CliError::unusable(id.as_str(), e.to_string()))
}

fn print_report_table(report: &OverlapReport, fund_set: &FundSet, bar_width: usize, quiet: bool) {
    let upset = &report.upset;
    let max = upset.max_weight();

    if !quiet {
        print_header("Exclusive overlap by fund combination");
    }

    let mut header = vec!["Combination".to_string()];
    header.extend(upset.sets.iter().cloned());
    header.push("Weight".to_string());
    header.push(String::new());

    let records: Vec<Vec<String>> = upset
        .rows
        .iter()
        .map(|row| {
            let mut record = vec![row.members.join(" & ")];
            record.extend(
                row.membership
                    .iter()
                    .map(|&m| (if m { "●" } else { "·" }).to_string()),
            );
            record.push(format_percent(row.weight));
            record.push(bar(row.weight, max, bar_width));
            record
        })
        .collect();
    print_dynamic_table(&header, &records);

    if !quiet {
        print_header("Per-fund totals");
    }
    let header = ["Fund", "Holdings", "Input weight", "Allocated"]
        .map(String::from)
        .to_vec();
    let records: Vec<Vec<String>> = report
        .totals
        .iter()
        .map(|total| {
            let fund = fund_set.get(&total.set);
            vec![
                total.set.clone(),
                fund.map_or(0, Fund::len).to_string(),
                format_percent(fund.map_or(0.0, Fund::total_weight)),
                format_percent(total.weight),
            ]
        })
        .collect();
    print_dynamic_table(&header, &records);
}

fn print_report_csv(report: &OverlapReport) -> Result<()> {
    let upset = &report.upset;

    let mut header = vec!["combination".to_string(), "degree".to_string()];
    header.extend(upset.sets.iter().cloned());
    header.push("weight".to_string());

    let records: Vec<Vec<String>> = upset
        .rows
        .iter()
        .map(|row| {
            let mut record = vec![row.members.join("&"), row.degree.to_string()];
            record.extend(row.membership.iter().map(|&m| u8::from(m).to_string()));
            record.push(row.weight.to_string());
            record
        })
        .collect();

    print_csv_records(&header, &records)
}
