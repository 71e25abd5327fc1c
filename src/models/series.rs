//! Canonical macro series identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical series id. Known series carry their FRED-style code; anything the
/// alias table does not recognize is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeriesId {
    Curve10y2y,
    Curve10y3m,
    Breakeven5y,
    FinancialConditions,
    Gdp,
    IndustrialProduction,
    RetailSales,
    DurableGoods,
    Construction,
    CapacityUtilization,
    Payrolls,
    Unemployment,
    InitialClaims,
    LeadingIndex,
    IsmManufacturing,
    IsmServices,
    Underemployment,
    Pce,
    CorePce,
    Cpi,
    CoreCpi,
    Ppi,
    PolicyRate,
    Vix,
    BroadDollar,
    Other(String),
}

impl SeriesId {
    /// Every recognized series, used to validate the alias table at startup.
    pub const KNOWN: [SeriesId; 25] = [
        SeriesId::Curve10y2y,
        SeriesId::Curve10y3m,
        SeriesId::Breakeven5y,
        SeriesId::FinancialConditions,
        SeriesId::Gdp,
        SeriesId::IndustrialProduction,
        SeriesId::RetailSales,
        SeriesId::DurableGoods,
        SeriesId::Construction,
        SeriesId::CapacityUtilization,
        SeriesId::Payrolls,
        SeriesId::Unemployment,
        SeriesId::InitialClaims,
        SeriesId::LeadingIndex,
        SeriesId::IsmManufacturing,
        SeriesId::IsmServices,
        SeriesId::Underemployment,
        SeriesId::Pce,
        SeriesId::CorePce,
        SeriesId::Cpi,
        SeriesId::CoreCpi,
        SeriesId::Ppi,
        SeriesId::PolicyRate,
        SeriesId::Vix,
        SeriesId::BroadDollar,
    ];

    pub fn code(&self) -> &str {
        match self {
            SeriesId::Curve10y2y => "T10Y2Y",
            SeriesId::Curve10y3m => "T10Y3M",
            SeriesId::Breakeven5y => "T5YIE",
            SeriesId::FinancialConditions => "NFCI",
            SeriesId::Gdp => "GDPC1",
            SeriesId::IndustrialProduction => "INDPRO",
            SeriesId::RetailSales => "RSAFS",
            SeriesId::DurableGoods => "DGORDER",
            SeriesId::Construction => "TTLCONS",
            SeriesId::CapacityUtilization => "TCU",
            SeriesId::Payrolls => "PAYEMS",
            SeriesId::Unemployment => "UNRATE",
            SeriesId::InitialClaims => "IC4WSA",
            SeriesId::LeadingIndex => "USSLIND",
            SeriesId::IsmManufacturing => "NAPM",
            SeriesId::IsmServices => "NMFCI",
            SeriesId::Underemployment => "U6RATE",
            SeriesId::Pce => "PCEPI",
            SeriesId::CorePce => "PCEPILFE",
            SeriesId::Cpi => "CPIAUCSL",
            SeriesId::CoreCpi => "CPILFESL",
            SeriesId::Ppi => "PPIACO",
            SeriesId::PolicyRate => "FEDFUNDS",
            SeriesId::Vix => "VIXCLS",
            SeriesId::BroadDollar => "DTWEXBGS",
            SeriesId::Other(code) => code,
        }
    }

    /// Parse a canonical code. Matching is case-insensitive; unknown codes
    /// become `Other` with the input preserved.
    pub fn from_code(code: &str) -> SeriesId {
        let trimmed = code.trim();
        SeriesId::KNOWN
            .iter()
            .find(|id| id.code().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| SeriesId::Other(trimmed.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SeriesId::Other(_))
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for SeriesId {
    fn from(code: String) -> Self {
        SeriesId::from_code(&code)
    }
}

impl From<SeriesId> for String {
    fn from(id: SeriesId) -> Self {
        id.code().to_string()
    }
}
