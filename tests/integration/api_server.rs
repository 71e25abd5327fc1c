//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and the macro read-outs.


use macrobias::config::EngineConfig;
use serde_json::Value;

use test_utils::{correlation_store, hawkish_store, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "macrobias-engine");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/diagnosis").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
    assert!(body.contains("diagnoses_total 1"));
}

#[tokio::test]
async fn empty_store_yields_neutral_diagnosis() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/diagnosis").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["score"], 0.0);
    assert_eq!(body["regime"], "Neutral");
    assert_eq!(body["usdLabel"], "Neutral");
    assert!(body["lastUpdated"].is_null());
    assert!(body["items"].as_array().is_some_and(|items| !items.is_empty()));
}

#[tokio::test]
async fn diagnosis_reads_the_store() {
    let app = TestApiServer::hawkish().await;
    let body: Value = app.server.get("/api/diagnosis").await.json();

    assert_eq!(body["regime"], "RISK OFF");
    assert_eq!(body["usdLabel"], "Fuerte");
    assert_eq!(body["lastUpdated"], "2024-05-01");
    assert_eq!(body["quadrant"], "stagflation");

    let core = body["items"]
        .as_array()
        .and_then(|items| items.iter().find(|i| i["key"] == "core_cpi_yoy"))
        .cloned()
        .expect("core cpi item");
    assert_eq!(core["posture"], "Hawkish");
    assert_eq!(core["previousValue"], 3.8);
}

#[tokio::test]
async fn bias_endpoint_follows_live_regime() {
    let app = TestApiServer::hawkish().await;
    let body: Value = app.server.get("/api/bias").await.json();

    assert_eq!(body["regime"], "RISK OFF");
    let rows = body["rows"].as_array().expect("rows");
    let eurusd = rows.iter().find(|r| r["pair"] == "EURUSD").expect("EURUSD row");
    assert_eq!(eurusd["action"], "Sell");
    assert_eq!(eurusd["tactical"], "Bearish");

    let spx = rows.iter().find(|r| r["pair"] == "SPX500").expect("SPX500 row");
    assert_eq!(spx["action"], "Sell");
}

fn pair<'a>(body: &'a Value, symbol: &str) -> &'a Value {
    body["rows"]
        .as_array()
        .and_then(|rows| rows.iter().find(|r| r["pair"] == symbol))
        .expect("pair row")
}

#[tokio::test]
async fn configured_currency_scores_drive_fx_pairs() {
    let config = EngineConfig::from_json(r#"{"currency_scores": {"eur": 0.4, "USD": 0.0}}"#)
        .expect("config parses");
    let app = TestApiServer::with_config(config, hawkish_store(), correlation_store()).await;

    let bias: Value = app.server.get("/api/bias").await.json();
    assert_eq!(bias["usdLabel"], "Fuerte");
    let eurusd = pair(&bias, "EURUSD");
    assert_eq!(eurusd["action"], "Buy");
    assert_eq!(eurusd["pairScore"], 0.4);

    // GBP is unscored, so the pair keeps the USD-centric call.
    assert_eq!(pair(&bias, "GBPUSD")["action"], "Sell");

    let tactical: Value = app.server.get("/api/tactical").await.json();
    assert_eq!(pair(&tactical, "EURUSD")["action"], "Buy");
}

#[tokio::test]
async fn query_scores_override_the_usd_centric_rule() {
    let app = TestApiServer::hawkish().await;

    let fallback: Value = app.server.get("/api/bias").await.json();
    assert_eq!(pair(&fallback, "EURUSD")["action"], "Sell");

    let scored: Value = app
        .server
        .get("/api/bias")
        .add_query_param("scores", "EUR:0.4,USD:0.0")
        .await
        .json();
    assert_eq!(pair(&scored, "EURUSD")["action"], "Buy");

    let malformed: Value = app
        .server
        .get("/api/tactical")
        .add_query_param("scores", "garbage")
        .await
        .json();
    assert_eq!(pair(&malformed, "EURUSD")["action"], "Sell");
}

#[tokio::test]
async fn tactical_endpoint_includes_correlations() {
    let app = TestApiServer::hawkish().await;
    let body: Value = app.server.get("/api/tactical").await.json();
    let rows = body["rows"].as_array().expect("rows");

    let btc = rows.iter().find(|r| r["pair"] == "BTCUSDT").expect("BTCUSDT row");
    assert_eq!(btc["corr12m"], -0.41);
    assert_eq!(btc["corrRef"], "BTCUSD/DXY");
    assert_eq!(btc["corrMapped"], true);

    let metrics = app.server.get("/metrics").await.text();
    assert!(metrics.contains("correlation_resolutions_total"));
}

#[tokio::test]
async fn scenarios_endpoint_lists_pattern_matches() {
    let app = TestApiServer::hawkish().await;
    let body: Value = app.server.get("/api/scenarios").await.json();
    let ids: Vec<&str> = body
        .as_array()
        .expect("scenario list")
        .iter()
        .filter_map(|s| s["id"].as_str())
        .collect();

    assert!(ids.contains(&"stagflation"));
    assert!(ids.contains(&"tight_financial_conditions"));
    assert!(ids.contains(&"risk_off"));
}

#[tokio::test]
async fn institutional_setups_respect_usd_direction() {
    let app = TestApiServer::hawkish().await;
    let body: Value = app.server.get("/api/scenarios/institutional").await.json();

    let active = body["active"].as_array().expect("active");
    let watchlist = body["watchlist"].as_array().expect("watchlist");
    assert!(!active.is_empty() || !watchlist.is_empty());
    for setup in active.iter().chain(watchlist.iter()) {
        assert_eq!(setup["direction"], "Sell");
    }
}
