//! Unit tests for trend classification

use macrobias::indicators::trend::classify_trend;
use macrobias::models::indicator::Trend;
use macrobias::models::series::SeriesId;

#[test]
fn missing_inputs_are_unknown() {
    assert_eq!(classify_trend(&SeriesId::Cpi, None, Some(3.0)), Trend::Unknown);
    assert_eq!(classify_trend(&SeriesId::Cpi, Some(3.0), None), Trend::Unknown);
    assert_eq!(classify_trend(&SeriesId::Cpi, Some(f64::NAN), Some(3.0)), Trend::Unknown);
}

#[test]
fn lower_is_better_series_improve_on_declines() {
    assert_eq!(classify_trend(&SeriesId::Cpi, Some(3.0), Some(3.2)), Trend::Improving);
    assert_eq!(classify_trend(&SeriesId::Cpi, Some(3.4), Some(3.2)), Trend::Worsening);
    assert_eq!(classify_trend(&SeriesId::Unemployment, Some(4.4), Some(4.0)), Trend::Worsening);
    assert_eq!(
        classify_trend(&SeriesId::InitialClaims, Some(210_000.0), Some(230_000.0)),
        Trend::Improving
    );
}

#[test]
fn higher_is_better_series_improve_on_increases() {
    assert_eq!(classify_trend(&SeriesId::Gdp, Some(2.4), Some(2.0)), Trend::Improving);
    assert_eq!(classify_trend(&SeriesId::Payrolls, Some(150.0), Some(220.0)), Trend::Worsening);
}

#[test]
fn unlisted_series_default_to_higher_is_better() {
    assert_eq!(classify_trend(&SeriesId::Vix, Some(20.0), Some(15.0)), Trend::Improving);
    assert_eq!(
        classify_trend(&SeriesId::Other("X".to_string()), Some(1.0), Some(2.0)),
        Trend::Worsening
    );
}

#[test]
fn small_moves_are_stable_regardless_of_family() {
    assert_eq!(classify_trend(&SeriesId::Cpi, Some(3.02), Some(3.0)), Trend::Stable);
    assert_eq!(classify_trend(&SeriesId::Gdp, Some(2.98), Some(3.0)), Trend::Stable);
    assert_eq!(classify_trend(&SeriesId::Vix, Some(20.0), Some(20.0)), Trend::Stable);
}

#[test]
fn zero_previous_uses_absolute_change() {
    assert_eq!(classify_trend(&SeriesId::Curve10y2y, Some(0.005), Some(0.0)), Trend::Stable);
    assert_eq!(classify_trend(&SeriesId::Curve10y2y, Some(0.2), Some(0.0)), Trend::Improving);
}
