use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Fx,
    Metal,
    Crypto,
    Index,
}

impl AssetClass {
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Fx => "FX",
            AssetClass::Metal => "metal",
            AssetClass::Crypto => "crypto",
            AssetClass::Index => "index",
        }
    }
}

/// How an instrument reacts to the overall risk regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSensitivity {
    RiskOn,
    RiskOff,
    #[default]
    Neutral,
}

/// Tradable instrument in the configured universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub base: String,
    pub quote: String,
    #[serde(default)]
    pub risk_sensitivity: RiskSensitivity,
}

impl Instrument {
    pub fn new(symbol: &str, asset_class: AssetClass, base: &str, quote: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            asset_class,
            base: base.to_string(),
            quote: quote.to_string(),
            risk_sensitivity: RiskSensitivity::Neutral,
        }
    }

    pub fn with_risk_sensitivity(mut self, sensitivity: RiskSensitivity) -> Self {
        self.risk_sensitivity = sensitivity;
        self
    }
}
