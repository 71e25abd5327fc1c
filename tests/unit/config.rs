//! Unit tests for engine configuration

use macrobias::config::{EngineConfig, DEFAULT_REGIME_THRESHOLD};
use macrobias::indicators::alias::AliasResolver;
use macrobias::models::instrument::AssetClass;
use macrobias::models::series::SeriesId;

#[test]
fn defaults_are_complete() {
    let config = EngineConfig::default();
    assert_eq!(config.regime_threshold, DEFAULT_REGIME_THRESHOLD);
    assert_eq!(config.benchmark, "DXY");
    assert!(!config.universe.is_empty());
    assert!(config.is_institutional("eurusd"));
    assert!(!config.is_institutional("EURGBP"));

    let weights = config.weight_table(&AliasResolver::new());
    assert_eq!(weights.get(&SeriesId::CoreCpi), 1.0);
    assert_eq!(weights.get(&SeriesId::IsmServices), 0.0);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let config = EngineConfig::from_json(
        r#"{
            "weights": { "payrolls": 2.5, "CPIAUCSL": 0.4, "vix": -1.0 },
            "regime_threshold": 0.4,
            "universe": [
                { "symbol": "EURUSD", "asset_class": "fx", "base": "EUR", "quote": "USD" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.regime_threshold, 0.4);
    assert_eq!(config.universe.len(), 1);
    assert_eq!(config.universe[0].asset_class, AssetClass::Fx);
    assert_eq!(config.benchmark, "DXY");

    let weights = config.weight_table(&AliasResolver::new());
    assert_eq!(weights.get(&SeriesId::Payrolls), 1.0);
    assert_eq!(weights.get(&SeriesId::Cpi), 0.4);
    assert_eq!(weights.get(&SeriesId::Vix), 0.0);
}

#[test]
fn invalid_threshold_and_empty_universe_fall_back() {
    let config = EngineConfig::from_json(r#"{ "regime_threshold": 0.0, "universe": [] }"#).unwrap();
    assert_eq!(config.regime_threshold, DEFAULT_REGIME_THRESHOLD);
    assert!(!config.universe.is_empty());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(EngineConfig::from_json("{ not json").is_err());
    assert!(EngineConfig::from_path("/nonexistent/macrobias.json").is_err());
}

#[test]
fn priority_lists_fall_back_to_default() {
    let config = EngineConfig::default();
    assert!(config
        .priority_for("xauusd")
        .contains(&"cpi_yoy".to_string()));
    assert_eq!(
        config.priority_for("UNLISTED"),
        config.default_priority_indicators.as_slice()
    );
}

#[test]
fn currency_scores_are_uppercased_clamped_and_finite() {
    let config = EngineConfig::from_json(r#"{"currency_scores": {" eur ": 1.8, "usd": -0.2}}"#).unwrap();
    assert_eq!(config.currency_scores.get("EUR"), Some(&1.0));
    assert_eq!(config.currency_scores.get("USD"), Some(&-0.2));
    assert!(EngineConfig::default().currency_scores.is_empty());
}
