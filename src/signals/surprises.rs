//! Aligned big-surprise counting

use std::collections::HashSet;
use tracing::debug;

use crate::indicators::alias::AliasResolver;
use crate::models::bias::UsdLabel;
use crate::models::indicator::{Indicator, Posture};
use crate::models::series::SeriesId;

/// |z| at or above this is a relevant surprise.
pub const RELEVANT_Z: f64 = 1.0;

/// High-impact releases eligible as big surprises.
pub fn is_big_indicator(series: &SeriesId) -> bool {
    matches!(
        series,
        SeriesId::Cpi
            | SeriesId::CoreCpi
            | SeriesId::CorePce
            | SeriesId::Payrolls
            | SeriesId::IsmManufacturing
    )
}

/// Posture that confirms a USD view. Neutral has none.
pub fn expected_posture(usd: UsdLabel) -> Option<Posture> {
    match usd {
        UsdLabel::Strong => Some(Posture::Hawkish),
        UsdLabel::Weak => Some(Posture::Dovish),
        UsdLabel::Neutral => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurpriseTally {
    pub raw_count: u32,
    pub z_sum: f64,
}

impl SurpriseTally {
    /// Reported count after the z-sum floor is applied.
    pub fn reported(&self) -> u32 {
        if self.z_sum >= 3.0 {
            self.raw_count.max(2)
        } else if self.z_sum >= 1.0 {
            self.raw_count.max(1)
        } else {
            self.raw_count
        }
    }
}

/// Which priority keys are eligible for scanning: series with weight or
/// explicitly whitelisted ones.
pub struct SurpriseScope<'a> {
    pub aliases: &'a AliasResolver,
    pub whitelist: &'a [String],
}

impl SurpriseScope<'_> {
    fn whitelisted(&self, series: &SeriesId) -> bool {
        self.whitelist
            .iter()
            .any(|key| self.aliases.resolve(key) == *series)
    }
}

pub fn tally_aligned_surprises(
    usd: UsdLabel,
    priority_keys: &[String],
    indicators: &[Indicator],
    scope: &SurpriseScope<'_>,
) -> SurpriseTally {
    let mut tally = SurpriseTally::default();
    let expected = match expected_posture(usd) {
        Some(posture) => posture,
        None => return tally,
    };

    let mut seen: HashSet<SeriesId> = HashSet::new();
    for key in priority_keys {
        let series = scope.aliases.resolve(key);
        if !is_big_indicator(&series) || !seen.insert(series.clone()) {
            continue;
        }
        let indicator = match indicators.iter().find(|i| i.series_id == series) {
            Some(indicator) => indicator,
            None => continue,
        };
        if indicator.weight <= 0.0 && !scope.whitelisted(&series) {
            continue;
        }
        if !indicator.has_value() || indicator.posture != expected {
            continue;
        }

        tally.raw_count += 1;
        if let Some(z) = indicator.z_score {
            if z.abs() >= RELEVANT_Z {
                tally.z_sum += z.abs();
            }
        }
        debug!(key = %key, series = %series, z = ?indicator.z_score, "Aligned big surprise");
    }
    tally
}

pub fn count_aligned_big_surprises(
    usd: UsdLabel,
    priority_keys: &[String],
    indicators: &[Indicator],
    scope: &SurpriseScope<'_>,
) -> u32 {
    tally_aligned_surprises(usd, priority_keys, indicators, scope).reported()
}
