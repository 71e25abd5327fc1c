//! Diagnosis assembly: classification, scoring and summary counts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::IndicatorWeights;
use crate::indicators::registry::{is_growth_series, is_inflation_series, IndicatorCategory};
use crate::models::bias::{Quadrant, Regime, UsdLabel};
use crate::models::indicator::{Indicator, Observation, Posture, Trend};
use crate::models::series::SeriesId;
use crate::signals::scoring::{diagnose, weighted_score};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostureCounts {
    pub hawkish: usize,
    pub neutral: usize,
    pub dovish: usize,
}

impl PostureCounts {
    fn record(&mut self, posture: Posture) {
        match posture {
            Posture::Hawkish => self.hawkish += 1,
            Posture::Neutral => self.neutral += 1,
            Posture::Dovish => self.dovish += 1,
        }
    }
}

/// Full macro read for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub items: Vec<Indicator>,
    pub score: f64,
    pub regime: Regime,
    pub used_count: usize,
    pub used_weights: f64,
    pub last_updated: Option<NaiveDate>,
    pub counts: PostureCounts,
    pub category_counts: BTreeMap<IndicatorCategory, PostureCounts>,
    pub improving: Vec<String>,
    pub deteriorating: Vec<String>,
    pub quadrant: Option<Quadrant>,
    pub usd_label: UsdLabel,
}

/// Classify observations into indicators, ordered by key.
pub fn build_indicators(observations: &[Observation], weights: &IndicatorWeights) -> Vec<Indicator> {
    let mut items: Vec<Indicator> = observations
        .iter()
        .map(|obs| Indicator::classify(obs, weights.get(&obs.series_id)))
        .collect();
    items.sort_by(|a, b| a.key.cmp(&b.key));
    items
}

/// Mean posture numeric over members with a value.
fn family_mean(indicators: &[Indicator], member: fn(&SeriesId) -> bool) -> Option<f64> {
    let values: Vec<f64> = indicators
        .iter()
        .filter(|i| i.has_value() && member(&i.series_id))
        .map(|i| i.posture.numeric())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Growth × inflation quadrant. Hawkish postures are negative, so a mean
/// below zero reads as "hot".
pub fn derive_quadrant(indicators: &[Indicator]) -> Option<Quadrant> {
    let growth_hot = family_mean(indicators, is_growth_series)? < 0.0;
    let inflation_hot = family_mean(indicators, is_inflation_series)? < 0.0;
    Some(match (growth_hot, inflation_hot) {
        (true, true) => Quadrant::Overheating,
        (false, true) => Quadrant::Stagflation,
        (false, false) => Quadrant::Slowdown,
        (true, false) => Quadrant::Expansion,
    })
}

/// USD view implied by the regime score: Hawkish readings are USD-supportive.
pub fn usd_label_from_score(score: f64, threshold: f64) -> UsdLabel {
    if score <= -threshold {
        UsdLabel::Strong
    } else if score >= threshold {
        UsdLabel::Weak
    } else {
        UsdLabel::Neutral
    }
}

pub fn summarize(items: Vec<Indicator>, threshold: f64) -> Diagnosis {
    let weighted = weighted_score(&items);
    let regime = diagnose(weighted.score, threshold);

    let mut counts = PostureCounts::default();
    let mut category_counts: BTreeMap<IndicatorCategory, PostureCounts> = BTreeMap::new();
    let mut improving = Vec::new();
    let mut deteriorating = Vec::new();

    for item in items.iter().filter(|i| i.has_value()) {
        counts.record(item.posture);
        category_counts
            .entry(item.category)
            .or_default()
            .record(item.posture);
        match item.trend {
            Trend::Improving => improving.push(item.key.clone()),
            Trend::Worsening => deteriorating.push(item.key.clone()),
            Trend::Stable | Trend::Unknown => {}
        }
    }

    let last_updated = items.iter().filter_map(|i| i.date).max();
    let quadrant = derive_quadrant(&items);

    Diagnosis {
        score: weighted.score,
        regime,
        used_count: weighted.count,
        used_weights: weighted.used_weights,
        last_updated,
        counts,
        category_counts,
        improving,
        deteriorating,
        quadrant,
        usd_label: usd_label_from_score(weighted.score, threshold),
        items,
    }
}
