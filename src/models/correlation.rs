//! Correlation records and resolved snapshots

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationWindow {
    #[serde(rename = "12m")]
    TwelveMonths,
    #[serde(rename = "3m")]
    ThreeMonths,
}

impl CorrelationWindow {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "12m" => Some(CorrelationWindow::TwelveMonths),
            "3m" => Some(CorrelationWindow::ThreeMonths),
            _ => None,
        }
    }
}

/// One stored asset-vs-benchmark correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationRecord {
    pub symbol: String,
    pub benchmark: String,
    pub window: CorrelationWindow,
    pub value: Option<f64>,
    pub sample_size: u32,
    pub as_of: NaiveDate,
}

/// Both store-backed windows for one symbol/benchmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationRow {
    pub corr12m: Option<f64>,
    pub corr3m: Option<f64>,
    pub sample_size12m: u32,
    pub sample_size3m: u32,
}

impl CorrelationRow {
    /// Fold records into a row, keeping the most recent record per window.
    /// Values outside [-1, 1] are discarded.
    pub fn from_records(records: &[CorrelationRecord]) -> Option<Self> {
        let latest = |window: CorrelationWindow| {
            records
                .iter()
                .filter(|r| r.window == window)
                .max_by_key(|r| r.as_of)
        };

        let twelve = latest(CorrelationWindow::TwelveMonths);
        let three = latest(CorrelationWindow::ThreeMonths);
        if twelve.is_none() && three.is_none() {
            return None;
        }

        Some(Self {
            corr12m: twelve.and_then(|r| valid_correlation(r.value)),
            corr3m: three.and_then(|r| valid_correlation(r.value)),
            sample_size12m: twelve.map(|r| r.sample_size).unwrap_or(0),
            sample_size3m: three.map(|r| r.sample_size).unwrap_or(0),
        })
    }

    pub fn has_value(&self) -> bool {
        self.corr12m.is_some() || self.corr3m.is_some()
    }

    /// True when at least one present window is backed by `min_samples` points.
    pub fn is_well_sampled(&self, min_samples: u32) -> bool {
        (self.corr12m.is_some() && self.sample_size12m >= min_samples)
            || (self.corr3m.is_some() && self.sample_size3m >= min_samples)
    }
}

/// Statically configured correlation used when the store has nothing usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCorrelation {
    #[serde(default = "default_benchmark")]
    pub benchmark: String,
    #[serde(default)]
    pub corr12m: Option<f64>,
    #[serde(default)]
    pub corr6m: Option<f64>,
    #[serde(default)]
    pub corr3m: Option<f64>,
}

fn default_benchmark() -> String {
    "DXY".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationSource {
    Store,
    Static,
    StoreLowSample,
    #[default]
    Unmapped,
}

impl CorrelationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationSource::Store => "store",
            CorrelationSource::Static => "static",
            CorrelationSource::StoreLowSample => "store_low_sample",
            CorrelationSource::Unmapped => "unmapped",
        }
    }
}

/// Resolved correlation for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationSnapshot {
    pub corr12m: Option<f64>,
    pub corr6m: Option<f64>,
    pub corr3m: Option<f64>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub mapped: bool,
    pub source: CorrelationSource,
}

pub fn valid_correlation(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && (-1.0..=1.0).contains(v))
}
