//! Load-once engine configuration and environment helpers

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::Path;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::indicators::alias::AliasResolver;
use crate::models::correlation::StaticCorrelation;
use crate::models::instrument::{AssetClass, Instrument, RiskSensitivity};
use crate::models::series::SeriesId;

pub const CONFIG_PATH_ENV: &str = "MACROBIAS_CONFIG";
pub const DEFAULT_REGIME_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CORRELATION_MIN_SAMPLES: u32 = 24;

/// Deployment environment (`production`, `sandbox`, ...), lowercased.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

pub fn get_questdb_url() -> String {
    env::var("QUESTDB_URL").unwrap_or_else(|_| {
        "host=localhost port=8812 user=admin password=quest dbname=qdb".to_string()
    })
}

/// Static engine configuration. Every field has a built-in default so a
/// partial or missing file still yields a usable engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Internal key or canonical code → weight in [0, 1].
    pub weights: BTreeMap<String, f64>,
    pub regime_threshold: f64,
    /// Extra internal key → canonical code aliases.
    pub aliases: BTreeMap<String, String>,
    pub universe: Vec<Instrument>,
    /// Symbol → priority indicator keys for surprise scanning.
    pub priority_indicators: BTreeMap<String, Vec<String>>,
    /// Used for symbols without their own priority list.
    pub default_priority_indicators: Vec<String>,
    /// Keys scanned for surprises even when they carry no weight.
    pub surprise_whitelist: Vec<String>,
    pub institutional_pairs: Vec<String>,
    pub static_correlations: BTreeMap<String, StaticCorrelation>,
    pub correlation_min_samples: u32,
    pub benchmark: String,
    /// ISO currency → macro score in [-1, 1]. When non-empty, FX pairs with
    /// both legs scored use the relative pair score.
    pub currency_scores: BTreeMap<String, f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            regime_threshold: DEFAULT_REGIME_THRESHOLD,
            aliases: BTreeMap::new(),
            universe: default_universe(),
            priority_indicators: default_priority_indicators(),
            default_priority_indicators: strings(&[
                "core_cpi_yoy",
                "core_pce_yoy",
                "payrolls",
                "ism_manufacturing",
            ]),
            surprise_whitelist: Vec::new(),
            institutional_pairs: strings(&["EURUSD", "GBPUSD", "USDJPY", "XAUUSD", "SPX500"]),
            static_correlations: default_static_correlations(),
            correlation_min_samples: DEFAULT_CORRELATION_MIN_SAMPLES,
            benchmark: "DXY".to_string(),
            currency_scores: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load from `MACROBIAS_CONFIG` when set. Any failure falls back to the
    /// built-in defaults.
    pub fn load() -> Self {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => match Self::from_path(&path) {
                Ok(config) => {
                    info!(path = %path, "Loaded engine configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Falling back to default engine configuration");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    /// Clamp weights into [0, 1], drop non-finite ones and reset an unusable
    /// threshold or empty universe to the defaults.
    pub fn sanitized(mut self) -> Self {
        self.weights.retain(|key, weight| {
            if weight.is_finite() {
                *weight = weight.clamp(0.0, 1.0);
                true
            } else {
                warn!(key = %key, "Dropping non-finite indicator weight");
                false
            }
        });
        if !self.regime_threshold.is_finite()
            || self.regime_threshold <= 0.0
            || self.regime_threshold > 1.0
        {
            warn!(
                threshold = self.regime_threshold,
                "Invalid regime threshold, using default"
            );
            self.regime_threshold = DEFAULT_REGIME_THRESHOLD;
        }
        self.currency_scores = self
            .currency_scores
            .into_iter()
            .filter_map(|(currency, score)| {
                if score.is_finite() {
                    Some((currency.trim().to_ascii_uppercase(), score.clamp(-1.0, 1.0)))
                } else {
                    warn!(currency = %currency, "Dropping non-finite currency score");
                    None
                }
            })
            .collect();
        if self.universe.is_empty() {
            self.universe = default_universe();
        }
        if self.benchmark.trim().is_empty() {
            self.benchmark = "DXY".to_string();
        }
        self
    }

    /// Resolve configured weights onto canonical ids.
    pub fn weight_table(&self, aliases: &AliasResolver) -> IndicatorWeights {
        let mut weights = HashMap::new();
        for (key, weight) in &self.weights {
            weights.insert(aliases.resolve(key), *weight);
        }
        IndicatorWeights { weights }
    }

    pub fn priority_for(&self, symbol: &str) -> &[String] {
        self.priority_indicators
            .get(&symbol.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(self.default_priority_indicators.as_slice())
    }

    pub fn is_institutional(&self, symbol: &str) -> bool {
        self.institutional_pairs
            .iter()
            .any(|p| p.eq_ignore_ascii_case(symbol))
    }
}

/// Weights keyed by canonical series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorWeights {
    weights: HashMap<SeriesId, f64>,
}

impl IndicatorWeights {
    pub fn new(weights: HashMap<SeriesId, f64>) -> Self {
        Self { weights }
    }

    /// Weight of a series; absent series weigh 0.
    pub fn get(&self, series: &SeriesId) -> f64 {
        self.weights.get(series).copied().unwrap_or(0.0)
    }

    pub fn series(&self) -> impl Iterator<Item = &SeriesId> {
        self.weights.keys()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_weights() -> BTreeMap<String, f64> {
    [
        ("curve_10y2y", 0.6),
        ("curve_10y3m", 0.6),
        ("breakeven_5y", 0.5),
        ("nfci", 0.6),
        ("gdp_yoy", 0.9),
        ("indpro_yoy", 0.5),
        ("retail_yoy", 0.6),
        ("durables_yoy", 0.3),
        ("construction_yoy", 0.2),
        ("capacity_utilization", 0.3),
        ("payrolls", 1.0),
        ("unemployment", 0.9),
        ("claims_4w", 0.6),
        ("lei_yoy", 0.5),
        ("ism_manufacturing", 0.7),
        ("u6", 0.4),
        ("pce_yoy", 0.7),
        ("core_pce_yoy", 1.0),
        ("cpi_yoy", 0.9),
        ("core_cpi_yoy", 1.0),
        ("ppi_yoy", 0.4),
        ("fed_funds", 0.8),
        ("vix", 0.5),
    ]
    .into_iter()
    .map(|(k, w)| (k.to_string(), w))
    .collect()
}

pub fn default_universe() -> Vec<Instrument> {
    vec![
        Instrument::new("EURUSD", AssetClass::Fx, "EUR", "USD"),
        Instrument::new("GBPUSD", AssetClass::Fx, "GBP", "USD"),
        Instrument::new("AUDUSD", AssetClass::Fx, "AUD", "USD"),
        Instrument::new("NZDUSD", AssetClass::Fx, "NZD", "USD"),
        Instrument::new("USDJPY", AssetClass::Fx, "USD", "JPY"),
        Instrument::new("USDCAD", AssetClass::Fx, "USD", "CAD"),
        Instrument::new("USDCHF", AssetClass::Fx, "USD", "CHF"),
        Instrument::new("EURGBP", AssetClass::Fx, "EUR", "GBP"),
        Instrument::new("EURJPY", AssetClass::Fx, "EUR", "JPY"),
        Instrument::new("XAUUSD", AssetClass::Metal, "XAU", "USD"),
        Instrument::new("XAGUSD", AssetClass::Metal, "XAG", "USD"),
        Instrument::new("BTCUSDT", AssetClass::Crypto, "BTC", "USDT")
            .with_risk_sensitivity(RiskSensitivity::RiskOn),
        Instrument::new("ETHUSDT", AssetClass::Crypto, "ETH", "USDT")
            .with_risk_sensitivity(RiskSensitivity::RiskOn),
        Instrument::new("SPX500", AssetClass::Index, "SPX", "USD")
            .with_risk_sensitivity(RiskSensitivity::RiskOn),
        Instrument::new("NAS100", AssetClass::Index, "NDX", "USD")
            .with_risk_sensitivity(RiskSensitivity::RiskOn),
    ]
}

fn default_priority_indicators() -> BTreeMap<String, Vec<String>> {
    let usd_core = strings(&["core_cpi_yoy", "core_pce_yoy", "payrolls", "ism_manufacturing"]);
    let mut map = BTreeMap::new();
    for pair in ["EURUSD", "GBPUSD", "AUDUSD", "NZDUSD", "USDJPY", "USDCAD", "USDCHF"] {
        map.insert(pair.to_string(), usd_core.clone());
    }
    map.insert(
        "XAUUSD".to_string(),
        strings(&["cpi_yoy", "core_cpi_yoy", "core_pce_yoy", "payrolls"]),
    );
    map.insert(
        "SPX500".to_string(),
        strings(&["payrolls", "ism_manufacturing", "core_cpi_yoy"]),
    );
    map
}

fn default_static_correlations() -> BTreeMap<String, StaticCorrelation> {
    let entry = |c12: f64, c6: f64, c3: f64| StaticCorrelation {
        benchmark: "DXY".to_string(),
        corr12m: Some(c12),
        corr6m: Some(c6),
        corr3m: Some(c3),
    };
    [
        ("EURUSD", entry(-0.95, -0.94, -0.93)),
        ("GBPUSD", entry(-0.82, -0.80, -0.78)),
        ("USDJPY", entry(0.62, 0.58, 0.55)),
        ("XAUUSD", entry(-0.45, -0.50, -0.40)),
        ("BTCUSD", entry(-0.30, -0.25, -0.20)),
        ("SPX500", entry(-0.20, -0.15, -0.10)),
    ]
    .into_iter()
    .map(|(symbol, corr)| (symbol.to_string(), corr))
    .collect()
}
