//! Weighted regime scoring

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_REGIME_THRESHOLD;
use crate::models::bias::Regime;
use crate::models::indicator::Indicator;

/// Weighted average of posture numerics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedScore {
    pub score: f64,
    pub count: usize,
    pub used_weights: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeScore {
    pub score: f64,
    pub regime: Regime,
}

/// Score = Σ(posture · weight) / Σweight over indicators that have a value
/// and a nonzero weight. Zero when no weight is used.
pub fn weighted_score(indicators: &[Indicator]) -> WeightedScore {
    let mut total = 0.0;
    let mut used_weights = 0.0;
    let mut count = 0;

    for indicator in indicators
        .iter()
        .filter(|i| i.has_value() && i.weight > 0.0)
    {
        total += indicator.posture.numeric() * indicator.weight;
        used_weights += indicator.weight;
        count += 1;
    }

    let score = if used_weights > 0.0 {
        (total / used_weights).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    WeightedScore {
        score,
        count,
        used_weights,
    }
}

/// Discretize a score. Both boundaries are inclusive toward the extreme label.
pub fn diagnose(score: f64, threshold: f64) -> Regime {
    if score >= threshold {
        Regime::RiskOn
    } else if score <= -threshold {
        Regime::RiskOff
    } else {
        Regime::Neutral
    }
}

/// `diagnose` with the default 0.3 threshold.
pub fn diagnose_default(score: f64) -> Regime {
    diagnose(score, DEFAULT_REGIME_THRESHOLD)
}

pub fn score_regime(indicators: &[Indicator], threshold: f64) -> RegimeScore {
    let weighted = weighted_score(indicators);
    RegimeScore {
        score: weighted.score,
        regime: diagnose(weighted.score, threshold),
    }
}
