//! Macro signal evaluation: scoring, bias, confidence and scenarios.

pub mod aggregation;
pub mod bias;
pub mod confidence;
pub mod engine;
pub mod scenarios;
pub mod scoring;
pub mod setups;
pub mod surprises;

pub use aggregation::{Diagnosis, PostureCounts};
pub use bias::{parse_currency_scores, BiasContext, BiasDecision, CurrencyScores, Enrichment};
pub use confidence::{confidence_advanced, confidence_band, confidence_from, confidence_from_signals};
pub use engine::MacroEngine;
pub use scenarios::detect_scenarios;
pub use scoring::{diagnose, weighted_score, RegimeScore, WeightedScore};
pub use setups::institutional_setups;
pub use surprises::{count_aligned_big_surprises, SurpriseScope, SurpriseTally};
