//! Shared data models spanning the engine layers.

pub mod bias;
pub mod correlation;
pub mod indicator;
pub mod instrument;
pub mod scenario;
pub mod series;

pub use bias::{Action, Confidence, PairBiasRow, Quadrant, Regime, Tactical, UsdLabel};
pub use correlation::{
    CorrelationRecord, CorrelationRow, CorrelationSnapshot, CorrelationSource, CorrelationWindow,
    StaticCorrelation,
};
pub use indicator::{Indicator, Observation, Posture, SeriesPoint, Trend};
pub use instrument::{AssetClass, Instrument, RiskSensitivity};
pub use scenario::{InstitutionalSetups, Scenario, Severity};
pub use series::SeriesId;
