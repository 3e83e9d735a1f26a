//! Alpha Vantage `ETF_PROFILE` client.
//!
//! API key is passed in by the caller; it is never logged and is stripped
//! from transport error messages.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;
use upsetf_traits::{EtfProfile, FundId, HoldingsSource, TraitError};

/// Production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Key Alpha Vantage accepts without registration, for a handful of tickers only.
pub const DEMO_API_KEY: &str = "demo";

/// Longest provider message echoed back in an error.
const MAX_MESSAGE_CHARS: usize = 200;

/// Connection settings for [`AlphaVantageSource`].
#[derive(Clone)]
pub struct AlphaVantageConfig {
    /// API key.
    pub api_key: String,
    /// Endpoint URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    /// Settings for the production endpoint with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True if this is the shared demo key.
    #[must_use]
    pub fn is_demo_key(&self) -> bool {
        self.api_key.trim() == DEMO_API_KEY
    }
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self::new(DEMO_API_KEY)
    }
}

impl fmt::Debug for AlphaVantageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Holdings source for the Alpha Vantage `ETF_PROFILE` function.
#[derive(Debug, Clone)]
pub struct AlphaVantageSource {
    config: AlphaVantageConfig,
    http: reqwest::Client,
}

impl AlphaVantageSource {
    /// Client for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::ConnectionFailed`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TraitError> {
        Self::from_config(AlphaVantageConfig::new(api_key))
    }

    /// Client with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::ConnectionFailed`] if the HTTP client cannot be built.
    pub fn from_config(config: AlphaVantageConfig) -> Result<Self, TraitError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TraitError::ConnectionFailed(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Connection settings.
    pub fn config(&self) -> &AlphaVantageConfig {
        &self.config
    }
}

#[async_trait]
impl HoldingsSource for AlphaVantageSource {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    async fn fetch_profile(&self, id: &FundId) -> Result<EtfProfile, TraitError> {
        debug!(ticker = %id, url = %self.config.base_url, "GET ETF_PROFILE");

        let resp = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("function", "ETF_PROFILE"),
                ("symbol", id.as_str()),
                ("apikey", self.config.api_key.trim()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TraitError::ConnectionFailed(format!(
                "alphavantage http error status={} ticker={}",
                status.as_u16(),
                id
            )));
        }

        let body: Value = resp.json().await.map_err(|e| {
            TraitError::ParseError(format!("{id}: {}", e.without_url()))
        })?;

        profile_from_response(id, body)
    }
}

/// Turns an `ETF_PROFILE` response body into a profile.
///
/// The ticker and fetch time are stamped on, sector breakdown is dropped, and
/// placeholder symbols are resolved. A body without `holdings` is a provider
/// message: `Note` means rate limiting, `Information` is usually a plan or key
/// notice, and `Error Message` an unknown symbol.
pub(crate) fn profile_from_response(id: &FundId, body: Value) -> Result<EtfProfile, TraitError> {
    let map = match body {
        Value::Object(map) => map,
        other => {
            return Err(TraitError::ParseError(format!(
                "{id}: expected a JSON object, got {}",
                truncate(&other.to_string())
            )))
        }
    };

    if !map.contains_key("holdings") {
        return Err(provider_message(id, &map));
    }

    let mut profile: EtfProfile = serde_json::from_value(Value::Object(map))?;
    profile.ticker = id.to_string();
    profile.fetched_at = Some(Utc::now().to_rfc3339());
    profile.drop_sectors();
    profile.resolve_placeholders();
    Ok(profile)
}

fn provider_message(id: &FundId, map: &Map<String, Value>) -> TraitError {
    let text = |key: &str| map.get(key).and_then(Value::as_str).map(truncate);

    if let Some(note) = text("Note") {
        return TraitError::RateLimited(format!("{id}: {note}"));
    }
    if let Some(info) = text("Information") {
        if info.to_lowercase().contains("rate limit") {
            return TraitError::RateLimited(format!("{id}: {info}"));
        }
        return TraitError::SourceNotAvailable(format!("{id}: {info}"));
    }
    if let Some(err) = text("Error Message") {
        return TraitError::NotFound(format!("{id}: {err}"));
    }
    TraitError::SourceNotAvailable(format!(
        "unexpected response for {id}: {}",
        truncate(&Value::Object(map.clone()).to_string())
    ))
}

fn transport_error(e: reqwest::Error) -> TraitError {
    if e.is_timeout() {
        TraitError::Timeout
    } else {
        TraitError::ConnectionFailed(e.without_url().to_string())
    }
}

fn truncate(s: &str) -> String {
    s.chars().take(MAX_MESSAGE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spy() -> FundId {
        FundId::new("SPY")
    }

    #[test]
    fn test_profile_is_stamped_and_cleaned() {
        let body = json!({
            "net_assets": "500000000000",
            "holdings": [
                {"symbol": "AAPL", "description": "APPLE INC", "weight": "0.07"},
                {"symbol": "n/a", "description": "Cash Collateral Usd", "weight": "0.001"}
            ],
            "sectors": [{"sector": "IT", "weight": "0.3"}]
        });

        let profile = profile_from_response(&spy(), body).unwrap();
        assert_eq!(profile.ticker, "SPY");
        assert!(profile.fetched_at.is_some());
        assert!(!profile.extra.contains_key("sectors"));
        assert_eq!(profile.holdings[1].symbol, "CASH_COLLATERAL_USD");
    }

    #[test]
    fn test_note_is_rate_limit() {
        let err = profile_from_response(&spy(), json!({"Note": "5 calls per minute"})).unwrap_err();
        assert!(matches!(err, TraitError::RateLimited(ref m) if m.contains("5 calls")));
    }

    #[test]
    fn test_information_messages() {
        let limit = json!({"Information": "Our standard API rate limit is 25 requests per day."});
        assert!(matches!(
            profile_from_response(&spy(), limit),
            Err(TraitError::RateLimited(_))
        ));

        let premium = json!({"Information": "This is a premium endpoint."});
        assert!(matches!(
            profile_from_response(&spy(), premium),
            Err(TraitError::SourceNotAvailable(_))
        ));
    }

    #[test]
    fn test_error_message_is_not_found() {
        let body = json!({"Error Message": "Invalid API call."});
        assert!(matches!(
            profile_from_response(&spy(), body),
            Err(TraitError::NotFound(_))
        ));
    }

    #[test]
    fn test_unexpected_bodies() {
        let long = "x".repeat(1000);
        let err = profile_from_response(&spy(), json!({ "weird": long })).unwrap_err();
        match err {
            TraitError::SourceNotAvailable(msg) => assert!(msg.len() < 300),
            other => panic!("unexpected error {other:?}"),
        }

        assert!(matches!(
            profile_from_response(&spy(), json!([1, 2])),
            Err(TraitError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = AlphaVantageConfig::new("SECRET123");
        assert!(!format!("{config:?}").contains("SECRET123"));
        assert!(!config.is_demo_key());
        assert!(AlphaVantageConfig::default().is_demo_key());
    }
}
