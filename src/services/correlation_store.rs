//! Read-only correlation store interface

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::correlation::{CorrelationRecord, CorrelationRow};

#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Latest 12m and 3m correlation of `symbol` against `benchmark`, if any
    /// record exists.
    async fn correlation(
        &self,
        symbol: &str,
        benchmark: &str,
    ) -> Result<Option<CorrelationRow>, StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCorrelationStore {
    records: Vec<CorrelationRecord>,
}

impl InMemoryCorrelationStore {
    pub fn new(records: Vec<CorrelationRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: CorrelationRecord) {
        self.records.push(record);
    }
}

#[async_trait]
impl CorrelationStore for InMemoryCorrelationStore {
    async fn correlation(
        &self,
        symbol: &str,
        benchmark: &str,
    ) -> Result<Option<CorrelationRow>, StoreError> {
        let matching: Vec<CorrelationRecord> = self
            .records
            .iter()
            .filter(|r| {
                r.symbol.eq_ignore_ascii_case(symbol) && r.benchmark.eq_ignore_ascii_case(benchmark)
            })
            .cloned()
            .collect();
        Ok(CorrelationRow::from_records(&matching))
    }
}
