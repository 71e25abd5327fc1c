//! Layered correlation resolution: store, static table, low-sample store rows

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::correlation::{
    valid_correlation, CorrelationRow, CorrelationSnapshot, CorrelationSource, StaticCorrelation,
};
use crate::services::correlation_store::CorrelationStore;

const QUOTE_SUFFIXES: [&str; 3] = ["USDT", "USDC", "USD"];

/// Fiat and metal codes. A pair with one of these as its base is an FX or
/// metals cross and is looked up verbatim.
const NON_CRYPTO_BASES: [&str; 12] = [
    "USD", "EUR", "GBP", "JPY", "CHF", "AUD", "NZD", "CAD", "CNH", "XAU", "XAG", "XPT",
];

/// Normalized lookup variants, most specific first. A crypto pair quoted in
/// USD or a USD stablecoin is also tried against the other quotes and bare.
/// Any other symbol only yields its normalized form.
pub fn symbol_variants(symbol: &str) -> Vec<String> {
    let normalized: String = symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase();
    if normalized.is_empty() {
        return Vec::new();
    }

    let crypto_stem = QUOTE_SUFFIXES
        .iter()
        .find_map(|suffix| normalized.strip_suffix(suffix))
        .filter(|stem| stem.len() >= 2 && stem.chars().all(|c| c.is_ascii_alphabetic()))
        .filter(|stem| !NON_CRYPTO_BASES.contains(stem))
        .map(str::to_string);

    let mut variants = vec![normalized.clone()];
    if let Some(stem) = crypto_stem {
        for candidate in [format!("{stem}USD"), format!("{stem}USDT"), stem] {
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        }
    }
    variants
}

pub struct CorrelationResolver<'a> {
    store: &'a dyn CorrelationStore,
    static_table: &'a BTreeMap<String, StaticCorrelation>,
    min_samples: u32,
}

impl<'a> CorrelationResolver<'a> {
    pub fn new(
        store: &'a dyn CorrelationStore,
        static_table: &'a BTreeMap<String, StaticCorrelation>,
        min_samples: u32,
    ) -> Self {
        Self {
            store,
            static_table,
            min_samples,
        }
    }

    /// Resolve `symbol` against `benchmark`. Lookup failures degrade to an
    /// unmapped snapshot.
    ///
    /// The first pass only accepts a store row whose present value is backed
    /// by at least `min_samples` points. Rows with a value but fewer samples
    /// are kept and win only after the static table misses.
    pub async fn resolve(&self, symbol: &str, benchmark: &str) -> CorrelationSnapshot {
        let variants = symbol_variants(symbol);
        let mut fetched: Vec<(String, CorrelationRow)> = Vec::new();

        for variant in &variants {
            match self.store.correlation(variant, benchmark).await {
                Ok(Some(row)) => {
                    if row.is_well_sampled(self.min_samples) {
                        debug!(symbol = %symbol, variant = %variant, "Correlation resolved from store");
                        return from_row(variant, benchmark, &row, CorrelationSource::Store);
                    }
                    fetched.push((variant.clone(), row));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(symbol = %symbol, variant = %variant, error = %e, "Correlation lookup failed");
                }
            }
        }

        for variant in &variants {
            if let Some(entry) = self.static_entry(variant, benchmark) {
                debug!(symbol = %symbol, variant = %variant, "Correlation resolved from static table");
                return CorrelationSnapshot {
                    corr12m: valid_correlation(entry.corr12m),
                    corr6m: valid_correlation(entry.corr6m),
                    corr3m: valid_correlation(entry.corr3m),
                    reference: Some(reference(variant, benchmark)),
                    mapped: true,
                    source: CorrelationSource::Static,
                };
            }
        }

        if let Some((variant, row)) = fetched.iter().find(|(_, row)| row.has_value()) {
            debug!(symbol = %symbol, variant = %variant, "Correlation resolved from low-sample store row");
            return from_row(variant, benchmark, row, CorrelationSource::StoreLowSample);
        }

        debug!(symbol = %symbol, "Correlation unmapped");
        CorrelationSnapshot::default()
    }

    fn static_entry(&self, variant: &str, benchmark: &str) -> Option<&StaticCorrelation> {
        self.static_table
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(variant))
            .map(|(_, entry)| entry)
            .filter(|entry| entry.benchmark.eq_ignore_ascii_case(benchmark))
            .filter(|entry| {
                valid_correlation(entry.corr12m).is_some()
                    || valid_correlation(entry.corr6m).is_some()
                    || valid_correlation(entry.corr3m).is_some()
            })
    }
}

fn reference(variant: &str, benchmark: &str) -> String {
    format!("{}/{}", variant, benchmark.to_ascii_uppercase())
}

fn from_row(
    variant: &str,
    benchmark: &str,
    row: &CorrelationRow,
    source: CorrelationSource,
) -> CorrelationSnapshot {
    CorrelationSnapshot {
        corr12m: row.corr12m,
        corr6m: None,
        corr3m: row.corr3m,
        reference: Some(reference(variant, benchmark)),
        mapped: true,
        source,
    }
}
