//! Macro engine facade
//!
//! Owns the load-once configuration, the alias resolver and the resolved
//! weight table, and exposes the diagnosis, bias and scenario operations.
//! Everything except the store reads is a pure function of its inputs.

use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::{EngineConfig, IndicatorWeights};
use crate::indicators::alias::AliasResolver;
use crate::models::bias::{PairBiasRow, Quadrant, Regime, UsdLabel};
use crate::models::correlation::CorrelationSnapshot;
use crate::models::indicator::{Indicator, Observation, SeriesPoint};
use crate::models::instrument::Instrument;
use crate::models::scenario::{InstitutionalSetups, Scenario};
use crate::models::series::SeriesId;
use crate::services::correlation::CorrelationResolver;
use crate::services::correlation_store::CorrelationStore;
use crate::services::observation_store::ObservationStore;
use crate::signals::aggregation::{build_indicators, derive_quadrant, summarize, Diagnosis};
use crate::signals::bias::{self, BiasContext, CurrencyScores, Enrichment};
use crate::signals::scenarios;
use crate::signals::setups::institutional_setups;
use crate::signals::surprises::{count_aligned_big_surprises, SurpriseScope};

/// Minimum prior points before a z-score is reported.
pub const MIN_Z_HISTORY: usize = 8;

pub struct MacroEngine {
    config: Arc<EngineConfig>,
    aliases: AliasResolver,
    weights: IndicatorWeights,
    currency_scores: Option<CurrencyScores>,
}

impl MacroEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let aliases = AliasResolver::with_extra(&config.aliases);
        if let Err(missing) = aliases.validate() {
            error!(missing = ?missing, "Alias table does not cover every canonical series");
        }
        let weights = config.weight_table(&aliases);
        let currency_scores = (!config.currency_scores.is_empty()).then(|| {
            config
                .currency_scores
                .iter()
                .map(|(currency, score)| (currency.to_ascii_uppercase(), *score))
                .collect::<CurrencyScores>()
        });
        Self {
            config,
            aliases,
            weights,
            currency_scores,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn aliases(&self) -> &AliasResolver {
        &self.aliases
    }

    pub fn weights(&self) -> &IndicatorWeights {
        &self.weights
    }

    /// Configured per-currency scores, if any were supplied.
    pub fn currency_scores(&self) -> Option<&CurrencyScores> {
        self.currency_scores.as_ref()
    }

    /// Series read on every run: the alias table plus anything weighted.
    pub fn tracked_series(&self) -> Vec<SeriesId> {
        let mut series = self.aliases.known_series();
        for weighted in self.weights.series() {
            if !series.contains(weighted) {
                series.push(weighted.clone());
            }
        }
        series
    }

    /// Read the latest point and history of every tracked series. A series
    /// whose reads fail comes back without a value.
    pub async fn load_observations(&self, store: &dyn ObservationStore) -> Vec<Observation> {
        let series = self.tracked_series();
        let reads: Vec<_> = series.iter().map(|id| self.load_one(store, id)).collect();
        join_all(reads).await
    }

    async fn load_one(&self, store: &dyn ObservationStore, series: &SeriesId) -> Observation {
        let key = self.aliases.internal_key(series).to_string();
        let latest = match store.latest(series).await {
            Ok(Some(point)) => point,
            Ok(None) => {
                debug!(series = %series, "No observation in store");
                return Observation::new(key, series.clone(), None);
            }
            Err(e) => {
                warn!(series = %series, error = %e, "Failed to read latest observation");
                return Observation::new(key, series.clone(), None);
            }
        };

        let history = match store.history(series).await {
            Ok(history) => history,
            Err(e) => {
                warn!(series = %series, error = %e, "Failed to read observation history");
                Vec::new()
            }
        };
        let prior: Vec<&SeriesPoint> = history
            .iter()
            .filter(|p| p.date < latest.date && p.value.is_some_and(f64::is_finite))
            .collect();

        let mut observation = Observation::new(key, series.clone(), latest.value).with_date(latest.date);
        if let Some(previous) = prior.last() {
            observation = observation.with_previous(previous.value, Some(previous.date));
        }
        let prior_values: Vec<f64> = prior.iter().filter_map(|p| p.value).collect();
        if let Some(z) = latest.value.and_then(|v| z_score(v, &prior_values)) {
            observation = observation.with_z_score(z);
        }
        observation
    }

    /// Map an observation onto its canonical series. A series id that is
    /// not a canonical code is read as an alias, then the internal key is
    /// tried.
    pub fn canonicalize(&self, observation: &Observation) -> Observation {
        if observation.series_id.is_known() {
            return observation.clone();
        }
        let resolved = [observation.series_id.code(), observation.key.as_str()]
            .into_iter()
            .map(|candidate| self.aliases.resolve(candidate))
            .find(SeriesId::is_known);
        match resolved {
            Some(series_id) => Observation {
                series_id,
                ..observation.clone()
            },
            None if self.weights.get(&observation.series_id) > 0.0 => observation.clone(),
            None => {
                warn!(
                    key = %observation.key,
                    series = %observation.series_id,
                    "Observation does not map to a canonical series; it carries no weight"
                );
                observation.clone()
            }
        }
    }

    pub fn indicators(&self, observations: &[Observation]) -> Vec<Indicator> {
        let canonical: Vec<Observation> =
            observations.iter().map(|obs| self.canonicalize(obs)).collect();
        build_indicators(&canonical, &self.weights)
    }

    pub fn diagnose_snapshot(&self, observations: &[Observation]) -> Diagnosis {
        let diagnosis = summarize(self.indicators(observations), self.config.regime_threshold);
        info!(
            score = diagnosis.score,
            regime = diagnosis.regime.label(),
            used = diagnosis.used_count,
            usd = diagnosis.usd_label.label(),
            quadrant = ?diagnosis.quadrant,
            "Macro diagnosis"
        );
        diagnosis
    }

    pub async fn diagnose(&self, store: &dyn ObservationStore) -> Diagnosis {
        let observations = self.load_observations(store).await;
        self.diagnose_snapshot(&observations)
    }

    pub fn bias_table(
        &self,
        regime: Regime,
        usd: UsdLabel,
        quadrant: Option<Quadrant>,
        currency_scores: Option<&CurrencyScores>,
    ) -> Vec<PairBiasRow> {
        let ctx = BiasContext {
            regime,
            usd,
            quadrant,
            currency_scores,
        };
        bias::bias_table(&self.config.universe, &ctx, self.config.regime_threshold)
    }

    pub fn tactical_bias_table(
        &self,
        items: &[Indicator],
        regime: Regime,
        usd: UsdLabel,
        score: f64,
        correlations: &HashMap<String, CorrelationSnapshot>,
        currency_scores: Option<&CurrencyScores>,
    ) -> Vec<PairBiasRow> {
        let ctx = BiasContext {
            regime,
            usd,
            quadrant: derive_quadrant(items),
            currency_scores,
        };
        let scope = SurpriseScope {
            aliases: &self.aliases,
            whitelist: &self.config.surprise_whitelist,
        };
        let aligned = |instrument: &Instrument| {
            count_aligned_big_surprises(usd, self.config.priority_for(&instrument.symbol), items, &scope)
        };
        let enrichment = Enrichment {
            correlations,
            aligned_surprises: &aligned,
        };
        bias::tactical_bias_table(
            &self.config.universe,
            &ctx,
            score,
            self.config.regime_threshold,
            &enrichment,
        )
    }

    /// Correlation snapshot per instrument in the universe, resolved
    /// concurrently.
    pub async fn resolve_correlations(
        &self,
        store: &dyn CorrelationStore,
    ) -> HashMap<String, CorrelationSnapshot> {
        let resolver = CorrelationResolver::new(
            store,
            &self.config.static_correlations,
            self.config.correlation_min_samples,
        );
        let benchmark = self.config.benchmark.as_str();
        let lookups: Vec<_> = self
            .config
            .universe
            .iter()
            .map(|instrument| {
                let resolver = &resolver;
                async move {
                    let snapshot = resolver.resolve(&instrument.symbol, benchmark).await;
                    (instrument.symbol.clone(), snapshot)
                }
            })
            .collect();
        join_all(lookups).await.into_iter().collect()
    }

    pub fn scenarios(&self, rows: &[PairBiasRow], usd: UsdLabel, regime: Regime) -> InstitutionalSetups {
        institutional_setups(rows, usd, regime, |symbol| self.config.is_institutional(symbol))
    }

    pub fn detect_scenarios(&self, items: &[Indicator], regime: Regime) -> Vec<Scenario> {
        scenarios::detect_scenarios(items, regime)
    }
}

/// Standard score of `latest` against `prior` (population stddev).
pub fn z_score(latest: f64, prior: &[f64]) -> Option<f64> {
    if prior.len() < MIN_Z_HISTORY || !latest.is_finite() {
        return None;
    }
    let n = prior.len() as f64;
    let mean = prior.iter().sum::<f64>() / n;
    let variance = prior.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();
    if stddev == 0.0 || !stddev.is_finite() {
        return None;
    }
    Some((latest - mean) / stddev)
}
