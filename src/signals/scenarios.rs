//! Qualitative scenario detection over classified indicators

use crate::models::bias::Regime;
use crate::models::indicator::{Indicator, Posture};
use crate::models::scenario::{Scenario, Severity};
use crate::models::series::SeriesId;

const PRICE_SERIES: [SeriesId; 4] = [
    SeriesId::Pce,
    SeriesId::CorePce,
    SeriesId::Cpi,
    SeriesId::CoreCpi,
];
const ACTIVITY_SERIES: [SeriesId; 4] = [
    SeriesId::Gdp,
    SeriesId::IndustrialProduction,
    SeriesId::RetailSales,
    SeriesId::LeadingIndex,
];

const PAYROLLS_COOLING_K: f64 = 100.0;
const CLAIMS_COOLING: f64 = 300_000.0;
const UNEMPLOYMENT_COOLING: f64 = 4.5;
const TIGHT_FINANCIAL_CONDITIONS: f64 = 0.3;

fn find<'a>(indicators: &'a [Indicator], series: &SeriesId) -> Option<&'a Indicator> {
    indicators
        .iter()
        .find(|i| i.series_id == *series && i.has_value())
}

/// Keys of indicators in `family` that read as `posture`.
fn matching(indicators: &[Indicator], family: &[SeriesId], posture: Posture) -> Vec<String> {
    family
        .iter()
        .filter_map(|series| find(indicators, series))
        .filter(|i| i.posture == posture)
        .map(|i| i.key.clone())
        .collect()
}

fn value_of(indicators: &[Indicator], series: &SeriesId) -> Option<f64> {
    find(indicators, series).and_then(|i| i.value)
}

fn stagflation(indicators: &[Indicator]) -> Option<Scenario> {
    let hot_prices = matching(indicators, &PRICE_SERIES, Posture::Hawkish);
    let weak_activity = matching(indicators, &ACTIVITY_SERIES, Posture::Dovish);
    if hot_prices.is_empty() || weak_activity.is_empty() {
        return None;
    }
    Some(
        Scenario::new(
            "stagflation",
            "Stagflation risk",
            Severity::Alta,
            "Inflation prints run hot while activity data are contracting",
            "Favour defensive assets and precious metals; reduce cyclical exposure",
        )
        .with_macro_reasons([hot_prices, weak_activity].concat()),
    )
}

fn clean_expansion(indicators: &[Indicator]) -> Option<Scenario> {
    let strong_activity = matching(indicators, &ACTIVITY_SERIES, Posture::Hawkish);
    let cool_prices = matching(indicators, &PRICE_SERIES, Posture::Dovish);
    if strong_activity.is_empty() || cool_prices.is_empty() {
        return None;
    }
    Some(
        Scenario::new(
            "clean_expansion",
            "Clean expansion",
            Severity::Baja,
            "Activity is firm while inflation is cooling",
            "Constructive on equities and pro-cyclical currencies",
        )
        .with_macro_reasons([strong_activity, cool_prices].concat()),
    )
}

fn cooling_employment(indicators: &[Indicator]) -> Option<Scenario> {
    let mut reasons = Vec::new();
    if value_of(indicators, &SeriesId::Payrolls).is_some_and(|v| v < PAYROLLS_COOLING_K) {
        reasons.push("payrolls below 100k".to_string());
    }
    if value_of(indicators, &SeriesId::InitialClaims).is_some_and(|v| v > CLAIMS_COOLING) {
        reasons.push("initial claims above 300k".to_string());
    }
    if value_of(indicators, &SeriesId::Unemployment).is_some_and(|v| v > UNEMPLOYMENT_COOLING) {
        reasons.push("unemployment above 4.5%".to_string());
    }
    if reasons.is_empty() {
        return None;
    }
    Some(
        Scenario::new(
            "cooling_employment",
            "Labour market cooling",
            Severity::Media,
            "Employment data point to a softening labour market",
            "Watch for dovish repricing of the policy path",
        )
        .with_macro_reasons(reasons),
    )
}

fn broad_usd_strength(indicators: &[Indicator]) -> Option<Scenario> {
    let hawkish = |series: &SeriesId| {
        find(indicators, series).is_some_and(|i| i.posture == Posture::Hawkish)
    };
    if !(hawkish(&SeriesId::BroadDollar)
        && hawkish(&SeriesId::Curve10y2y)
        && hawkish(&SeriesId::Curve10y3m))
    {
        return None;
    }
    Some(Scenario::new(
        "broad_usd_strength",
        "Broad USD strength",
        Severity::Media,
        "Trade-weighted dollar is firm and both curve spreads are steep",
        "Prefer USD longs against low-yielders",
    ))
}

fn tight_financial_conditions(indicators: &[Indicator]) -> Option<Scenario> {
    let value = value_of(indicators, &SeriesId::FinancialConditions)?;
    if value <= TIGHT_FINANCIAL_CONDITIONS {
        return None;
    }
    Some(
        Scenario::new(
            "tight_financial_conditions",
            "Tight financial conditions",
            Severity::Alta,
            "Financial conditions index is above 0.3",
            "Reduce leverage and favour liquidity",
        )
        .with_macro_reasons(vec![format!("financial conditions {:.2}", value)]),
    )
}

fn risk_off(regime: Regime) -> Option<Scenario> {
    if regime != Regime::RiskOff {
        return None;
    }
    Some(Scenario::new(
        "risk_off",
        "Risk-off regime",
        Severity::Alta,
        "Weighted macro score is at or below the RISK OFF threshold",
        "Favour safe havens and cut risk-on exposure",
    ))
}

/// Run every pattern rule. Each rule contributes at most one scenario.
pub fn detect_scenarios(indicators: &[Indicator], regime: Regime) -> Vec<Scenario> {
    [
        stagflation(indicators),
        clean_expansion(indicators),
        cooling_employment(indicators),
        broad_usd_strength(indicators),
        tight_financial_conditions(indicators),
        risk_off(regime),
    ]
    .into_iter()
    .flatten()
    .collect()
}
