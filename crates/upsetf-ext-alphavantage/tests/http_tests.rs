//! HTTP tests against a local mock of the Alpha Vantage endpoint.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use upsetf_ext_alphavantage::{AlphaVantageConfig, AlphaVantageSource, CachedHoldingsSource};
use upsetf_ext_file::ProfileCache;
use upsetf_traits::{FundId, HoldingsSource, TraitError};

fn source_for(server: &MockServer, key: &str) -> AlphaVantageSource {
    AlphaVantageSource::from_config(
        AlphaVantageConfig::new(key).with_base_url(server.url("/query")),
    )
    .unwrap()
}

fn qqq_body() -> serde_json::Value {
    json!({
        "net_assets": "312000000000",
        "portfolio_turnover": "0.08",
        "holdings": [
            {"symbol": "AAPL", "description": "APPLE INC", "weight": "0.0883"},
            {"symbol": "MSFT", "description": "MICROSOFT CORP", "weight": "0.0812"},
            {"symbol": "n/a", "description": "Us Dollar", "weight": "0.0004"}
        ],
        "sectors": [{"sector": "INFORMATION TECHNOLOGY", "weight": "0.51"}]
    })
}

#[tokio::test]
async fn fetches_profile_with_expected_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/query")
                .query_param("function", "ETF_PROFILE")
                .query_param("symbol", "QQQ")
                .query_param("apikey", "TESTKEY");
            then.status(200).json_body(qqq_body());
        })
        .await;

    let profile = source_for(&server, "TESTKEY")
        .fetch_profile(&FundId::new("qqq"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(profile.ticker, "QQQ");
    assert_eq!(profile.holdings.len(), 3);
    assert_eq!(profile.holdings[2].symbol, "US_DOLLAR");
    assert!(profile.extra.contains_key("portfolio_turnover"));
    assert!(!profile.extra.contains_key("sectors"));
    assert_eq!(profile.net_assets_value(), Some(312_000_000_000.0));
}

#[tokio::test]
async fn rate_limit_note_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(200)
                .json_body(json!({"Note": "Thank you for using Alpha Vantage! 5 calls per minute."}));
        })
        .await;

    let err = source_for(&server, "K")
        .fetch_profile(&FundId::new("SPY"))
        .await
        .unwrap_err();

    assert!(matches!(err, TraitError::RateLimited(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn http_error_is_connection_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(503);
        })
        .await;

    let err = source_for(&server, "K")
        .fetch_profile(&FundId::new("SPY"))
        .await
        .unwrap_err();

    assert!(matches!(err, TraitError::ConnectionFailed(ref m) if m.contains("503")));
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = source_for(&server, "SECRETKEY")
        .fetch_profile(&FundId::new("SPY"))
        .await
        .unwrap_err();

    assert!(matches!(err, TraitError::ParseError(_)));
    assert!(!err.to_string().contains("SECRETKEY"));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(qqq_body());
        })
        .await;

    let source = AlphaVantageSource::from_config(
        AlphaVantageConfig::new("K")
            .with_base_url(server.url("/query"))
            .with_timeout(Duration::from_millis(50)),
    )
    .unwrap();

    let err = source.fetch_profile(&FundId::new("QQQ")).await.unwrap_err();
    assert!(matches!(err, TraitError::Timeout));
}

#[tokio::test]
async fn cached_source_hits_network_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/query").query_param("symbol", "QQQ");
            then.status(200).json_body(qqq_body());
        })
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let source = CachedHoldingsSource::new(ProfileCache::new(tmp.path()), source_for(&server, "K"));
    let id = FundId::new("QQQ");

    let fetched = source.fetch_profile(&id).await.unwrap();
    let cached = source.fetch_profile(&id).await.unwrap();

    mock.assert_hits_async(1).await;
    assert_eq!(fetched, cached);

    let on_disk = std::fs::read_to_string(tmp.path().join("QQQ.json")).unwrap();
    assert!(on_disk.contains("\"fetched_at\""));
    assert!(!on_disk.contains("sectors"));
}

#[tokio::test]
async fn force_refresh_refetches() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(200).json_body(qqq_body());
        })
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let source = CachedHoldingsSource::new(ProfileCache::new(tmp.path()), source_for(&server, "K"))
        .with_force_refresh(true);
    let id = FundId::new("QQQ");

    source.fetch_profile(&id).await.unwrap();
    source.fetch_profile(&id).await.unwrap();

    mock.assert_hits_async(2).await;
}
