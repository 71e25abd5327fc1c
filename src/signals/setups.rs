//! Institutional setups built from tactical rows

use crate::models::bias::{Action, Confidence, PairBiasRow, Regime, UsdLabel};
use crate::models::instrument::AssetClass;
use crate::models::scenario::{InstitutionalSetups, Scenario, Severity};

/// Minimal view of a tactical row.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupCandidate {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub action: Action,
    pub confidence: Confidence,
}

impl From<&PairBiasRow> for SetupCandidate {
    fn from(row: &PairBiasRow) -> Self {
        Self {
            symbol: row.pair.to_ascii_uppercase(),
            asset_class: row.asset_class,
            action: row.action,
            confidence: row.confidence,
        }
    }
}

fn setup_text(candidate: &SetupCandidate) -> String {
    let pair = &candidate.symbol;
    match (candidate.asset_class, candidate.action) {
        (AssetClass::Fx, Action::Buy) => format!(
            "Long {pair}: accumulate on pullbacks while the macro differential holds"
        ),
        (AssetClass::Fx, _) => format!(
            "Short {pair}: sell rallies into resistance while the macro differential holds"
        ),
        (AssetClass::Metal, Action::Buy) => {
            format!("Long {pair}: buy dips, USD and growth backdrop supportive")
        }
        (AssetClass::Metal, _) => format!("Short {pair}: fade strength, firm USD caps metals"),
        (AssetClass::Crypto, Action::Buy) => {
            format!("Long {pair}: risk-on exposure with tight invalidation and reduced size")
        }
        (AssetClass::Crypto, _) => {
            format!("Short {pair}: reduce exposure or short failed rebounds")
        }
        (AssetClass::Index, Action::Buy) => {
            format!("Long {pair}: buy dips while the risk-on regime holds")
        }
        (AssetClass::Index, _) => format!("Short {pair}: hedge or sell rallies under risk-off"),
    }
}

fn render(candidate: &SetupCandidate, usd: UsdLabel, regime: Regime) -> Scenario {
    let direction = match candidate.action {
        Action::Buy => "long",
        _ => "short",
    };
    let severity = match candidate.confidence {
        Confidence::High => Severity::Alta,
        Confidence::Medium => Severity::Media,
        Confidence::Low => Severity::Baja,
    };
    Scenario {
        id: format!("setup_{}", candidate.symbol.to_ascii_lowercase()),
        title: format!("{} {} setup", candidate.symbol, direction),
        severity,
        rationale: format!(
            "Regime {} · USD {} · confidence {}",
            regime.label(),
            usd.label(),
            candidate.confidence.label()
        ),
        action_hint: format!("Look for {} entries on {}", direction, candidate.symbol),
        pair: Some(candidate.symbol.clone()),
        direction: Some(candidate.action),
        confidence: Some(candidate.confidence),
        macro_reasons: None,
        setup_text: Some(setup_text(candidate)),
    }
}

/// Build active (Alta) and watchlist (Media) setups.
pub fn institutional_setups(
    rows: &[PairBiasRow],
    usd: UsdLabel,
    regime: Regime,
    is_institutional: impl Fn(&str) -> bool,
) -> InstitutionalSetups {
    let mut candidates: Vec<SetupCandidate> = rows
        .iter()
        .map(SetupCandidate::from)
        .filter(|c| c.action.is_directional())
        .filter(|c| matches!(c.confidence, Confidence::High | Confidence::Medium))
        .collect();

    candidates.sort_by(|a, b| {
        let a_inst = is_institutional(&a.symbol);
        let b_inst = is_institutional(&b.symbol);
        b_inst
            .cmp(&a_inst)
            .then_with(|| b.confidence.cmp(&a.confidence))
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    match usd {
        UsdLabel::Strong => candidates.retain(|c| c.action == Action::Sell),
        UsdLabel::Weak => candidates.retain(|c| c.action == Action::Buy),
        UsdLabel::Neutral => {
            if candidates.iter().any(|c| c.confidence == Confidence::High) {
                candidates.retain(|c| c.confidence == Confidence::High);
            }
        }
    }

    let (active, watchlist): (Vec<_>, Vec<_>) = candidates
        .iter()
        .partition(|c| c.confidence == Confidence::High);

    InstitutionalSetups {
        active: active.into_iter().map(|c| render(c, usd, regime)).collect(),
        watchlist: watchlist.into_iter().map(|c| render(c, usd, regime)).collect(),
    }
}
