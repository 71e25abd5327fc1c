//! (current, previous) → trend direction

use crate::models::indicator::Trend;
use crate::models::series::SeriesId;

/// Relative change below which a move is considered noise.
pub const STABLE_THRESHOLD: f64 = 0.01;

/// Series where a falling reading is an improvement.
pub fn lower_is_better(series: &SeriesId) -> bool {
    matches!(
        series,
        SeriesId::Cpi
            | SeriesId::CoreCpi
            | SeriesId::Pce
            | SeriesId::CorePce
            | SeriesId::Ppi
            | SeriesId::Unemployment
            | SeriesId::InitialClaims
    )
}

/// Series where a rising reading is an improvement. Anything outside both
/// sets is treated the same way.
pub fn higher_is_better(series: &SeriesId) -> bool {
    matches!(
        series,
        SeriesId::Gdp
            | SeriesId::IndustrialProduction
            | SeriesId::RetailSales
            | SeriesId::Payrolls
            | SeriesId::IsmManufacturing
            | SeriesId::IsmServices
    )
}

pub fn classify_trend(series: &SeriesId, current: Option<f64>, previous: Option<f64>) -> Trend {
    let (current, previous) = match (current, previous) {
        (Some(c), Some(p)) if c.is_finite() && p.is_finite() => (c, p),
        _ => return Trend::Unknown,
    };

    let delta = current - previous;
    let relative = if previous == 0.0 {
        delta.abs()
    } else {
        (delta / previous).abs()
    };
    if relative < STABLE_THRESHOLD {
        return Trend::Stable;
    }

    let rising = delta > 0.0;
    let improving = if lower_is_better(series) { !rising } else { rising };
    if improving {
        Trend::Improving
    } else {
        Trend::Worsening
    }
}
