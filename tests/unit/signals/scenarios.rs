//! Unit tests for scenario pattern rules

use macrobias::models::bias::Regime;
use macrobias::models::indicator::{Indicator, Observation};
use macrobias::models::scenario::Severity;
use macrobias::models::series::SeriesId;
use macrobias::signals::scenarios::detect_scenarios;

fn indicator(series: SeriesId, value: f64) -> Indicator {
    Indicator::classify(&Observation::new(series.code(), series.clone(), Some(value)), 1.0)
}

fn ids(indicators: &[Indicator], regime: Regime) -> Vec<String> {
    detect_scenarios(indicators, regime)
        .into_iter()
        .map(|s| s.id)
        .collect()
}

#[test]
fn stagflation_fires_once_with_alta_severity() {
    let items = vec![
        indicator(SeriesId::CoreCpi, 3.6),
        indicator(SeriesId::Cpi, 3.9),
        indicator(SeriesId::Gdp, 0.4),
    ];
    let scenarios = detect_scenarios(&items, Regime::Neutral);
    let stagflation: Vec<_> = scenarios.iter().filter(|s| s.id == "stagflation").collect();
    assert_eq!(stagflation.len(), 1);
    assert_eq!(stagflation[0].severity, Severity::Alta);
    let reasons = stagflation[0].macro_reasons.clone().unwrap_or_default();
    assert!(reasons.contains(&"CPILFESL".to_string()));
    assert!(reasons.contains(&"GDPC1".to_string()));
}

#[test]
fn clean_expansion_mirrors_stagflation() {
    let items = vec![indicator(SeriesId::Gdp, 3.2), indicator(SeriesId::CorePce, 2.1)];
    let found = ids(&items, Regime::RiskOn);
    assert_eq!(found, vec!["clean_expansion".to_string()]);
}

#[test]
fn cooling_employment_needs_any_one_signal() {
    assert!(ids(&[indicator(SeriesId::Payrolls, 80.0)], Regime::Neutral)
        .contains(&"cooling_employment".to_string()));
    assert!(ids(&[indicator(SeriesId::InitialClaims, 310_000.0)], Regime::Neutral)
        .contains(&"cooling_employment".to_string()));
    assert!(ids(&[indicator(SeriesId::Unemployment, 4.6)], Regime::Neutral)
        .contains(&"cooling_employment".to_string()));
    assert!(ids(&[indicator(SeriesId::Unemployment, 4.5)], Regime::Neutral).is_empty());
}

#[test]
fn broad_usd_strength_requires_all_three() {
    let mut items = vec![
        indicator(SeriesId::BroadDollar, 4.0),
        indicator(SeriesId::Curve10y2y, 1.2),
        indicator(SeriesId::Curve10y3m, 1.5),
    ];
    assert!(ids(&items, Regime::Neutral).contains(&"broad_usd_strength".to_string()));

    items[2] = indicator(SeriesId::Curve10y3m, 0.5);
    assert!(!ids(&items, Regime::Neutral).contains(&"broad_usd_strength".to_string()));
}

#[test]
fn tight_financial_conditions_above_threshold() {
    assert!(ids(&[indicator(SeriesId::FinancialConditions, 0.31)], Regime::Neutral)
        .contains(&"tight_financial_conditions".to_string()));
    assert!(ids(&[indicator(SeriesId::FinancialConditions, 0.3)], Regime::Neutral).is_empty());
}

#[test]
fn risk_off_regime_adds_general_rule() {
    assert_eq!(ids(&[], Regime::RiskOff), vec!["risk_off".to_string()]);
    assert!(ids(&[], Regime::RiskOn).is_empty());
}
