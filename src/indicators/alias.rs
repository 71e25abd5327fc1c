//! Bidirectional mapping between internal indicator keys and canonical series ids

use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::models::series::SeriesId;

fn default_aliases() -> [(&'static str, SeriesId); 25] {
    [
        ("curve_10y2y", SeriesId::Curve10y2y),
        ("curve_10y3m", SeriesId::Curve10y3m),
        ("breakeven_5y", SeriesId::Breakeven5y),
        ("nfci", SeriesId::FinancialConditions),
        ("gdp_yoy", SeriesId::Gdp),
        ("indpro_yoy", SeriesId::IndustrialProduction),
        ("retail_yoy", SeriesId::RetailSales),
        ("durables_yoy", SeriesId::DurableGoods),
        ("construction_yoy", SeriesId::Construction),
        ("capacity_utilization", SeriesId::CapacityUtilization),
        ("payrolls", SeriesId::Payrolls),
        ("unemployment", SeriesId::Unemployment),
        ("claims_4w", SeriesId::InitialClaims),
        ("lei_yoy", SeriesId::LeadingIndex),
        ("ism_manufacturing", SeriesId::IsmManufacturing),
        ("ism_services", SeriesId::IsmServices),
        ("u6", SeriesId::Underemployment),
        ("pce_yoy", SeriesId::Pce),
        ("core_pce_yoy", SeriesId::CorePce),
        ("cpi_yoy", SeriesId::Cpi),
        ("core_cpi_yoy", SeriesId::CoreCpi),
        ("ppi_yoy", SeriesId::Ppi),
        ("fed_funds", SeriesId::PolicyRate),
        ("vix", SeriesId::Vix),
        ("broad_dollar_yoy", SeriesId::BroadDollar),
    ]
}

/// Resolves internal keys to canonical ids and back.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    by_key: HashMap<String, SeriesId>,
    primary_key: HashMap<SeriesId, String>,
}

impl AliasResolver {
    pub fn new() -> Self {
        let mut resolver = Self {
            by_key: HashMap::new(),
            primary_key: HashMap::new(),
        };
        for (key, series) in default_aliases() {
            resolver.insert(key, series);
        }
        resolver
    }

    /// Default table extended with configured aliases (internal key → canonical
    /// code). Entries pointing at an unknown code are skipped.
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        let mut resolver = Self::new();
        for (key, code) in extra {
            let series = SeriesId::from_code(code);
            if !series.is_known() {
                warn!(key = %key, code = %code, "Ignoring alias to unknown canonical series");
                continue;
            }
            resolver.insert(key, series);
        }
        resolver
    }

    fn insert(&mut self, key: &str, series: SeriesId) {
        self.primary_key
            .entry(series.clone())
            .or_insert_with(|| key.to_string());
        self.by_key.insert(key.to_ascii_lowercase(), series);
    }

    /// Resolve an internal key or a canonical code. Unrecognized input is kept
    /// as `SeriesId::Other`.
    pub fn resolve(&self, key: &str) -> SeriesId {
        let normalized = key.trim().to_ascii_lowercase();
        match self.by_key.get(&normalized) {
            Some(series) => series.clone(),
            None => SeriesId::from_code(key),
        }
    }

    /// Primary internal key of a series; falls back to its canonical code.
    pub fn internal_key<'a>(&'a self, series: &'a SeriesId) -> &'a str {
        self.primary_key
            .get(series)
            .map(String::as_str)
            .unwrap_or_else(|| series.code())
    }

    /// All internal keys mapped to `series`, sorted.
    pub fn aliases_of(&self, series: &SeriesId) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .by_key
            .iter()
            .filter(|(_, s)| *s == series)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Every canonical series reachable through the table.
    pub fn known_series(&self) -> Vec<SeriesId> {
        let mut series: Vec<SeriesId> = self.primary_key.keys().cloned().collect();
        series.sort();
        series
    }

    /// Verify every recognized series has at least one internal key.
    pub fn validate(&self) -> Result<(), Vec<SeriesId>> {
        let missing: Vec<SeriesId> = SeriesId::KNOWN
            .iter()
            .filter(|series| !self.primary_key.contains_key(*series))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new()
    }
}
