//! Unit tests for diagnosis assembly

use chrono::NaiveDate;
use macrobias::indicators::registry::IndicatorCategory;
use macrobias::models::bias::{Quadrant, Regime, UsdLabel};
use macrobias::models::indicator::{Indicator, Observation};
use macrobias::models::series::SeriesId;
use macrobias::signals::aggregation::{derive_quadrant, summarize, usd_label_from_score};

fn indicator(series: SeriesId, value: f64) -> Indicator {
    Indicator::classify(&Observation::new(series.code(), series.clone(), Some(value)), 1.0)
}

#[test]
fn quadrant_follows_growth_and_inflation_means() {
    // Hawkish growth, Hawkish inflation
    let hot_hot = vec![indicator(SeriesId::Gdp, 3.5), indicator(SeriesId::Cpi, 3.6)];
    assert_eq!(derive_quadrant(&hot_hot), Some(Quadrant::Overheating));

    let cold_hot = vec![indicator(SeriesId::Gdp, 0.2), indicator(SeriesId::Cpi, 3.6)];
    assert_eq!(derive_quadrant(&cold_hot), Some(Quadrant::Stagflation));

    let cold_cold = vec![indicator(SeriesId::Gdp, 0.2), indicator(SeriesId::Cpi, 1.8)];
    assert_eq!(derive_quadrant(&cold_cold), Some(Quadrant::Slowdown));

    let hot_cold = vec![indicator(SeriesId::Gdp, 3.5), indicator(SeriesId::Cpi, 1.8)];
    assert_eq!(derive_quadrant(&hot_cold), Some(Quadrant::Expansion));
}

#[test]
fn quadrant_needs_both_families() {
    assert_eq!(derive_quadrant(&[indicator(SeriesId::Gdp, 3.5)]), None);
    assert_eq!(derive_quadrant(&[]), None);
}

#[test]
fn usd_label_tracks_score_sign() {
    assert_eq!(usd_label_from_score(-0.4, 0.3), UsdLabel::Strong);
    assert_eq!(usd_label_from_score(0.3, 0.3), UsdLabel::Weak);
    assert_eq!(usd_label_from_score(0.1, 0.3), UsdLabel::Neutral);
}

#[test]
fn summary_counts_postures_and_trends() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let later = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let observations = [
        Observation::new("core_cpi_yoy", SeriesId::CoreCpi, Some(3.6))
            .with_date(date)
            .with_previous(Some(3.9), None),
        Observation::new("unemployment", SeriesId::Unemployment, Some(4.9))
            .with_date(later)
            .with_previous(Some(4.2), None),
        Observation::new("gdp_yoy", SeriesId::Gdp, Some(1.8)).with_date(date),
        Observation::new("vix", SeriesId::Vix, None),
    ];
    let items: Vec<Indicator> = observations
        .iter()
        .map(|o| Indicator::classify(o, 1.0))
        .collect();

    let diagnosis = summarize(items, 0.3);

    assert_eq!(diagnosis.counts.hawkish, 1);
    assert_eq!(diagnosis.counts.dovish, 1);
    assert_eq!(diagnosis.counts.neutral, 1);
    assert_eq!(diagnosis.used_count, 3);
    assert_eq!(diagnosis.score, 0.0);
    assert_eq!(diagnosis.regime, Regime::Neutral);
    assert_eq!(diagnosis.last_updated, Some(later));
    assert_eq!(diagnosis.improving, vec!["core_cpi_yoy".to_string()]);
    assert_eq!(diagnosis.deteriorating, vec!["unemployment".to_string()]);
    assert_eq!(
        diagnosis.category_counts[&IndicatorCategory::Inflation].hawkish,
        1
    );
    assert_eq!(diagnosis.items.len(), 4);
}
