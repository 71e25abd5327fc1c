//! Read-only data services backing the engine

pub mod correlation;
pub mod correlation_store;
pub mod observation_store;

pub use correlation::{symbol_variants, CorrelationResolver};
pub use correlation_store::{CorrelationStore, InMemoryCorrelationStore};
pub use observation_store::{InMemoryObservationStore, ObservationStore};
