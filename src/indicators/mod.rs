//! Leaf classifiers over individual macro series.

pub mod alias;
pub mod posture;
pub mod registry;
pub mod trend;

pub use alias::AliasResolver;
pub use posture::{band_for, classify_posture, Polarity, PostureBand};
pub use registry::{category_of, IndicatorCategory};
pub use trend::{classify_trend, higher_is_better, lower_is_better};
