//! Regime, bias and confidence labels plus the per-pair output row

use serde::{Deserialize, Serialize};

use crate::models::instrument::AssetClass;

/// Discretized aggregate stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    #[serde(rename = "RISK ON")]
    RiskOn,
    #[serde(rename = "RISK OFF")]
    RiskOff,
    Neutral,
}

impl Regime {
    pub fn label(&self) -> &'static str {
        match self {
            Regime::RiskOn => "RISK ON",
            Regime::RiskOff => "RISK OFF",
            Regime::Neutral => "Neutral",
        }
    }
}

/// Overall USD bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsdLabel {
    #[serde(rename = "Fuerte")]
    Strong,
    #[serde(rename = "Débil")]
    Weak,
    Neutral,
}

impl UsdLabel {
    pub fn label(&self) -> &'static str {
        match self {
            UsdLabel::Strong => "Fuerte",
            UsdLabel::Weak => "Débil",
            UsdLabel::Neutral => "Neutral",
        }
    }

    /// A directional (non-neutral) USD view.
    pub fn is_directional(&self) -> bool {
        !matches!(self, UsdLabel::Neutral)
    }
}

/// Growth × inflation regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Overheating,
    Stagflation,
    Slowdown,
    Expansion,
}

impl Quadrant {
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Overheating => "overheating",
            Quadrant::Stagflation => "stagflation",
            Quadrant::Slowdown => "slowdown",
            Quadrant::Expansion => "expansion",
        }
    }

    /// Quadrants in which growth is decelerating.
    pub fn is_defensive(&self) -> bool {
        matches!(self, Quadrant::Slowdown | Quadrant::Stagflation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    Range,
}

impl Action {
    pub fn is_directional(&self) -> bool {
        !matches!(self, Action::Range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tactical {
    Bullish,
    Bearish,
    Neutral,
}

impl From<Action> for Tactical {
    fn from(action: Action) -> Self {
        match action {
            Action::Buy => Tactical::Bullish,
            Action::Sell => Tactical::Bearish,
            Action::Range => Tactical::Neutral,
        }
    }
}

/// Confidence grade. Ordering follows strength: `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "Baja")]
    Low,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Alta")]
    High,
}

impl Confidence {
    pub fn points(&self) -> u32 {
        match self {
            Confidence::High => 2,
            Confidence::Medium => 1,
            Confidence::Low => 0,
        }
    }

    pub fn from_points(points: u32) -> Self {
        if points >= 3 {
            Confidence::High
        } else if points >= 1 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "Alta",
            Confidence::Medium => "Media",
            Confidence::Low => "Baja",
        }
    }
}

/// One row of the bias table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairBiasRow {
    pub pair: String,
    pub asset_class: AssetClass,
    pub macro_label: String,
    pub action: Action,
    pub rationale: String,
    pub tactical: Tactical,
    pub confidence: Confidence,
    pub corr12m: Option<f64>,
    pub corr6m: Option<f64>,
    pub corr3m: Option<f64>,
    pub corr_ref: Option<String>,
    pub corr_mapped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_score: Option<f64>,
    #[serde(default)]
    pub aligned_surprises: u32,
}
