//! CLI command implementations.

pub mod cache;
pub mod config;
pub mod overlap;

// Re-export submodules for convenience
pub use cache::CacheArgs;
pub use config::ConfigArgs;
pub use overlap::OverlapArgs;

use std::path::PathBuf;

use upsetf_core::{MAX_FUNDS, MIN_FUNDS};
use upsetf_ext_file::DEFAULT_DATA_DIR;
use upsetf_traits::FundId;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::settings::Settings;

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Loaded settings.
    pub settings: Settings,
    /// Where `settings` lives.
    pub config_path: PathBuf,
}

impl Context {
    /// Cache directory: explicit flag, then configured value, then `./data`.
    pub fn data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.settings.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

/// Parses ticker arguments.
///
/// Tickers are normalized to upper case, repeated tickers are dropped, and
/// the result is sorted. Between 2 and 5 distinct tickers are accepted.
pub fn parse_tickers(raw: &[String]) -> CliResult<Vec<FundId>> {
    let mut ids: Vec<FundId> = Vec::with_capacity(raw.len());
    for s in raw {
        let id = FundId::parse(s).map_err(|_| CliError::InvalidTicker(s.clone()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if !(MIN_FUNDS..=MAX_FUNDS).contains(&ids.len()) {
        return Err(CliError::TickerCount {
            count: ids.len(),
            min: MIN_FUNDS,
            max: MAX_FUNDS,
        });
    }

    ids.sort();
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_tickers_normalizes_and_sorts() {
        let ids = parse_tickers(&strings(&["spy", " qqq ", "SPY", "dia"])).unwrap();
        let names: Vec<&str> = ids.iter().map(FundId::as_str).collect();
        assert_eq!(names, vec!["DIA", "QQQ", "SPY"]);
    }

    #[test]
    fn test_parse_tickers_bounds() {
        assert!(matches!(
            parse_tickers(&strings(&["SPY", "spy"])),
            Err(CliError::TickerCount { count: 1, .. })
        ));
        assert!(matches!(
            parse_tickers(&strings(&["A", "B", "C", "D", "E", "F"])),
            Err(CliError::TickerCount { count: 6, .. })
        ));
        assert!(matches!(
            parse_tickers(&strings(&["SPY", "  "])),
            Err(CliError::InvalidTicker(_))
        ));
    }

    #[test]
    fn test_data_dir_precedence() {
        let mut ctx = Context {
            format: OutputFormat::Table,
            quiet: false,
            settings: Settings::default(),
            config_path: PathBuf::from("config.json"),
        };
        assert_eq!(ctx.data_dir(None), PathBuf::from("data"));

        ctx.settings.data_dir = Some(PathBuf::from("/cfg"));
        assert_eq!(ctx.data_dir(None), PathBuf::from("/cfg"));
        assert_eq!(ctx.data_dir(Some(PathBuf::from("/flag"))), PathBuf::from("/flag"));
    }
}
