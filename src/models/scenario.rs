use serde::{Deserialize, Serialize};

use crate::models::bias::{Action, Confidence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Alta,
    Media,
    Baja,
}

/// Qualitative scenario or institutional setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub rationale: String,
    pub action_hint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_reasons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_text: Option<String>,
}

impl Scenario {
    pub fn new(id: &str, title: &str, severity: Severity, rationale: &str, action_hint: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            severity,
            rationale: rationale.to_string(),
            action_hint: action_hint.to_string(),
            pair: None,
            direction: None,
            confidence: None,
            macro_reasons: None,
            setup_text: None,
        }
    }

    pub fn with_macro_reasons(mut self, reasons: Vec<String>) -> Self {
        if !reasons.is_empty() {
            self.macro_reasons = Some(reasons);
        }
        self
    }
}

/// Institutional setups split by conviction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstitutionalSetups {
    pub active: Vec<Scenario>,
    pub watchlist: Vec<Scenario>,
}
