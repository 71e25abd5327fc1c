//! Currency-relative bias derivation per instrument

use std::collections::HashMap;
use tracing::debug;

use crate::models::bias::{Action, Confidence, PairBiasRow, Quadrant, Regime, Tactical, UsdLabel};
use crate::models::correlation::CorrelationSnapshot;
use crate::models::instrument::{AssetClass, Instrument, RiskSensitivity};
use crate::signals::confidence::{confidence_advanced, confidence_from};

/// Relative score beyond which an FX pair gets a directional call.
pub const PAIR_SCORE_THRESHOLD: f64 = 0.3;

/// Per-currency macro scores in [-1, 1], keyed by ISO code.
pub type CurrencyScores = HashMap<String, f64>;

/// Macro backdrop shared by every row of one table.
#[derive(Debug, Clone, Copy)]
pub struct BiasContext<'a> {
    pub regime: Regime,
    pub usd: UsdLabel,
    pub quadrant: Option<Quadrant>,
    pub currency_scores: Option<&'a CurrencyScores>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiasDecision {
    pub action: Action,
    pub macro_label: String,
    pub rationale: String,
    pub pair_score: Option<f64>,
}

/// Parse `EUR:0.4,USD:-0.1` into scores. Malformed entries are skipped.
pub fn parse_currency_scores(raw: &str) -> CurrencyScores {
    raw.split(',')
        .filter_map(|entry| {
            let (currency, score) = entry.split_once(':')?;
            let currency = currency.trim().to_ascii_uppercase();
            let score = score.trim().parse::<f64>().ok().filter(|s| s.is_finite())?;
            (!currency.is_empty()).then_some((currency, score))
        })
        .collect()
}

fn currency_score(scores: &CurrencyScores, currency: &str) -> Option<f64> {
    scores
        .get(&currency.to_ascii_uppercase())
        .copied()
        .filter(|s| s.is_finite())
        .map(|s| s.clamp(-1.0, 1.0))
}

/// score(base) − score(quote), when both sides are scored.
pub fn relative_pair_score(base: &str, quote: &str, scores: &CurrencyScores) -> Option<f64> {
    Some(currency_score(scores, base)? - currency_score(scores, quote)?)
}

pub fn action_from_pair_score(pair_score: f64) -> Action {
    if pair_score > PAIR_SCORE_THRESHOLD {
        Action::Buy
    } else if pair_score < -PAIR_SCORE_THRESHOLD {
        Action::Sell
    } else {
        Action::Range
    }
}

pub fn decide(instrument: &Instrument, ctx: &BiasContext<'_>) -> BiasDecision {
    match instrument.asset_class {
        AssetClass::Fx => decide_fx(instrument, ctx),
        AssetClass::Metal => decide_metal(instrument, ctx),
        AssetClass::Crypto => decide_crypto(instrument, ctx),
        AssetClass::Index => decide_index(instrument, ctx),
    }
}

fn decide_fx(instrument: &Instrument, ctx: &BiasContext<'_>) -> BiasDecision {
    let scored = ctx
        .currency_scores
        .and_then(|scores| relative_pair_score(&instrument.base, &instrument.quote, scores));

    if let Some(pair_score) = scored {
        let action = action_from_pair_score(pair_score);
        let rationale = match action {
            Action::Buy => format!(
                "Relative macro score {:+.2} favours {} over {}",
                pair_score, instrument.base, instrument.quote
            ),
            Action::Sell => format!(
                "Relative macro score {:+.2} favours {} over {}",
                pair_score, instrument.quote, instrument.base
            ),
            Action::Range => format!(
                "Relative macro score {:+.2} inside ±{:.2}, no edge",
                pair_score, PAIR_SCORE_THRESHOLD
            ),
        };
        return BiasDecision {
            action,
            macro_label: format!("{} vs {} {:+.2}", instrument.base, instrument.quote, pair_score),
            rationale,
            pair_score: Some(pair_score),
        };
    }

    usd_centric_fx(instrument, ctx.usd)
}

fn usd_centric_fx(instrument: &Instrument, usd: UsdLabel) -> BiasDecision {
    let usd_base = instrument.base.eq_ignore_ascii_case("USD");
    let usd_quote = instrument.quote.eq_ignore_ascii_case("USD");
    let macro_label = format!("USD {}", usd.label());

    if !usd_base && !usd_quote {
        return BiasDecision {
            action: Action::Range,
            macro_label,
            rationale: "Cross pair without a USD leg, no USD-driven read".to_string(),
            pair_score: None,
        };
    }

    let action = match (usd, usd_base) {
        (UsdLabel::Strong, true) | (UsdLabel::Weak, false) => Action::Buy,
        (UsdLabel::Strong, false) | (UsdLabel::Weak, true) => Action::Sell,
        (UsdLabel::Neutral, _) => Action::Range,
    };
    let leg = if usd_base { "base" } else { "quote" };
    let rationale = match action {
        Action::Range => format!("USD neutral with USD as {} currency", leg),
        _ => format!("USD {} with USD as {} currency", usd.label(), leg),
    };

    BiasDecision {
        action,
        macro_label,
        rationale,
        pair_score: None,
    }
}

fn decide_metal(_instrument: &Instrument, ctx: &BiasContext<'_>) -> BiasDecision {
    let defensive = ctx.quadrant.is_some_and(|q| q.is_defensive());
    let (action, rationale) = if defensive {
        (
            Action::Buy,
            "Decelerating growth quadrant supports precious metals".to_string(),
        )
    } else if ctx.usd == UsdLabel::Weak {
        (Action::Buy, "Weak USD supports precious metals".to_string())
    } else if ctx.usd == UsdLabel::Strong {
        (Action::Sell, "Strong USD outside a defensive quadrant".to_string())
    } else {
        (
            Action::Range,
            "Neutral USD without a defensive quadrant".to_string(),
        )
    };

    let quadrant = ctx.quadrant.map(|q| q.label()).unwrap_or("n/a");
    BiasDecision {
        action,
        macro_label: format!("Quadrant {} · USD {}", quadrant, ctx.usd.label()),
        rationale,
        pair_score: None,
    }
}

fn decide_crypto(instrument: &Instrument, ctx: &BiasContext<'_>) -> BiasDecision {
    let risk_on_asset = instrument.risk_sensitivity == RiskSensitivity::RiskOn;
    let action = if risk_on_asset && ctx.regime == Regime::RiskOn {
        Action::Buy
    } else {
        Action::Sell
    };
    let rationale = if action == Action::Buy {
        "Risk-on asset in a RISK ON regime".to_string()
    } else {
        format!("Regime {} does not support crypto beta", ctx.regime.label())
    };
    BiasDecision {
        action,
        macro_label: format!("Regime {}", ctx.regime.label()),
        rationale,
        pair_score: None,
    }
}

fn decide_index(_instrument: &Instrument, ctx: &BiasContext<'_>) -> BiasDecision {
    let action = if ctx.regime == Regime::RiskOn {
        Action::Buy
    } else {
        Action::Sell
    };
    BiasDecision {
        action,
        macro_label: format!("Regime {}", ctx.regime.label()),
        rationale: format!("Equity indices follow the {} regime", ctx.regime.label()),
        pair_score: None,
    }
}

fn base_row(instrument: &Instrument, decision: BiasDecision, confidence: Confidence) -> PairBiasRow {
    PairBiasRow {
        pair: instrument.symbol.clone(),
        asset_class: instrument.asset_class,
        macro_label: decision.macro_label,
        action: decision.action,
        rationale: decision.rationale,
        tactical: Tactical::from(decision.action),
        confidence,
        corr12m: None,
        corr6m: None,
        corr3m: None,
        corr_ref: None,
        corr_mapped: false,
        pair_score: decision.pair_score,
        aligned_surprises: 0,
    }
}

/// Strategic table: action per instrument, graded on the pair score alone.
pub fn bias_table(universe: &[Instrument], ctx: &BiasContext<'_>, threshold: f64) -> Vec<PairBiasRow> {
    universe
        .iter()
        .map(|instrument| {
            let decision = decide(instrument, ctx);
            let confidence = confidence_from(decision.pair_score.unwrap_or(0.0), threshold, ctx.usd);
            base_row(instrument, decision, confidence)
        })
        .collect()
}

/// Per-row enrichment inputs for the tactical table.
pub struct Enrichment<'a> {
    pub correlations: &'a HashMap<String, CorrelationSnapshot>,
    pub aligned_surprises: &'a dyn Fn(&Instrument) -> u32,
}

/// Tactical table: the strategic action graded on the regime score, the
/// 12m correlation and aligned big surprises.
pub fn tactical_bias_table(
    universe: &[Instrument],
    ctx: &BiasContext<'_>,
    score: f64,
    threshold: f64,
    enrichment: &Enrichment<'_>,
) -> Vec<PairBiasRow> {
    let base_confidence = confidence_from(score, threshold, ctx.usd);
    universe
        .iter()
        .map(|instrument| {
            let decision = decide(instrument, ctx);
            let corr = enrichment
                .correlations
                .get(&instrument.symbol)
                .cloned()
                .unwrap_or_default();
            let aligned = (enrichment.aligned_surprises)(instrument);
            let confidence = confidence_advanced(base_confidence, corr.corr12m, aligned);
            debug!(
                pair = %instrument.symbol,
                action = ?decision.action,
                corr12m = ?corr.corr12m,
                aligned,
                confidence = confidence.label(),
                "Tactical bias row"
            );

            let mut row = base_row(instrument, decision, confidence);
            row.corr12m = corr.corr12m;
            row.corr6m = corr.corr6m;
            row.corr3m = corr.corr3m;
            row.corr_ref = corr.reference;
            row.corr_mapped = corr.mapped;
            row.aligned_surprises = aligned;
            row
        })
        .collect()
}
