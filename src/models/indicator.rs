use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::posture::classify_posture;
use crate::indicators::registry::{category_of, IndicatorCategory};
use crate::indicators::trend::classify_trend;
use crate::models::series::SeriesId;

/// Policy-stance reading of a single indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Posture {
    Hawkish,
    Neutral,
    Dovish,
}

impl Posture {
    /// Calibrated sign convention: Dovish is positive.
    pub fn numeric(&self) -> f64 {
        match self {
            Posture::Hawkish => -1.0,
            Posture::Neutral => 0.0,
            Posture::Dovish => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
    Unknown,
}

/// A single point of a stored series. `value` is null when the release is
/// missing or unparseable upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Latest known reading of a series, as supplied by the observation store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub key: String,
    #[serde(rename = "canonicalSeriesId")]
    pub series_id: SeriesId,
    pub value: Option<f64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub previous_value: Option<f64>,
    #[serde(default)]
    pub previous_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
}

impl Observation {
    pub fn new(key: impl Into<String>, series_id: SeriesId, value: Option<f64>) -> Self {
        Self {
            key: key.into(),
            series_id,
            value,
            date: None,
            previous_value: None,
            previous_date: None,
            z_score: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_previous(mut self, value: Option<f64>, date: Option<NaiveDate>) -> Self {
        self.previous_value = value;
        self.previous_date = date;
        self
    }

    pub fn with_z_score(mut self, z_score: f64) -> Self {
        self.z_score = Some(z_score);
        self
    }
}

/// Classified indicator shared by every downstream component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub key: String,
    #[serde(rename = "canonicalSeriesId")]
    pub series_id: SeriesId,
    pub category: IndicatorCategory,
    pub value: Option<f64>,
    pub date: Option<NaiveDate>,
    pub previous_value: Option<f64>,
    pub previous_date: Option<NaiveDate>,
    pub posture: Posture,
    pub trend: Trend,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
}

impl Indicator {
    pub fn classify(observation: &Observation, weight: f64) -> Self {
        let value = observation.value.filter(|v| v.is_finite());
        Self {
            key: observation.key.clone(),
            series_id: observation.series_id.clone(),
            category: category_of(&observation.series_id),
            value,
            date: observation.date,
            previous_value: observation.previous_value,
            previous_date: observation.previous_date,
            posture: classify_posture(&observation.series_id, value),
            trend: classify_trend(&observation.series_id, value, observation.previous_value),
            weight,
            z_score: observation.z_score.filter(|z| z.is_finite()),
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}
