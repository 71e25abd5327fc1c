//! Indicator category registry

use serde::{Deserialize, Serialize};

use crate::models::series::SeriesId;

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Rates,
    Inflation,
    Growth,
    Employment,
    Markets,
    Other,
}

pub fn category_of(series: &SeriesId) -> IndicatorCategory {
    match series {
        SeriesId::Curve10y2y | SeriesId::Curve10y3m | SeriesId::PolicyRate => {
            IndicatorCategory::Rates
        }
        SeriesId::Breakeven5y
        | SeriesId::Pce
        | SeriesId::CorePce
        | SeriesId::Cpi
        | SeriesId::CoreCpi
        | SeriesId::Ppi => IndicatorCategory::Inflation,
        SeriesId::Gdp
        | SeriesId::IndustrialProduction
        | SeriesId::RetailSales
        | SeriesId::DurableGoods
        | SeriesId::Construction
        | SeriesId::CapacityUtilization
        | SeriesId::LeadingIndex
        | SeriesId::IsmManufacturing
        | SeriesId::IsmServices => IndicatorCategory::Growth,
        SeriesId::Payrolls
        | SeriesId::Unemployment
        | SeriesId::InitialClaims
        | SeriesId::Underemployment => IndicatorCategory::Employment,
        SeriesId::FinancialConditions | SeriesId::Vix | SeriesId::BroadDollar => {
            IndicatorCategory::Markets
        }
        SeriesId::Other(code) if code.to_ascii_lowercase().ends_with("_yoy") => {
            IndicatorCategory::Growth
        }
        SeriesId::Other(_) => IndicatorCategory::Other,
    }
}

/// Series that feed the growth leg of the quadrant.
pub fn is_growth_series(series: &SeriesId) -> bool {
    matches!(
        series,
        SeriesId::Gdp
            | SeriesId::IndustrialProduction
            | SeriesId::RetailSales
            | SeriesId::DurableGoods
            | SeriesId::Construction
            | SeriesId::LeadingIndex
            | SeriesId::IsmManufacturing
            | SeriesId::Payrolls
    )
}

/// Series that feed the inflation leg of the quadrant.
pub fn is_inflation_series(series: &SeriesId) -> bool {
    matches!(
        series,
        SeriesId::Cpi
            | SeriesId::CoreCpi
            | SeriesId::Pce
            | SeriesId::CorePce
            | SeriesId::Ppi
            | SeriesId::Breakeven5y
    )
}
