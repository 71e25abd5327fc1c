//! Read-only observation store interface

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::StoreError;
use crate::models::indicator::SeriesPoint;
use crate::models::series::SeriesId;

#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Most recent point of a series.
    async fn latest(&self, series: &SeriesId) -> Result<Option<SeriesPoint>, StoreError>;

    /// Full history, oldest first.
    async fn history(&self, series: &SeriesId) -> Result<Vec<SeriesPoint>, StoreError>;
}

/// Store backed by a map, for snapshots and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObservationStore {
    series: HashMap<SeriesId, Vec<SeriesPoint>>,
}

impl InMemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, series: SeriesId, mut points: Vec<SeriesPoint>) {
        points.sort_by_key(|p| p.date);
        self.series.insert(series, points);
    }

    pub fn with_series(mut self, series: SeriesId, points: Vec<SeriesPoint>) -> Self {
        self.insert(series, points);
        self
    }
}

#[async_trait]
impl ObservationStore for InMemoryObservationStore {
    async fn latest(&self, series: &SeriesId) -> Result<Option<SeriesPoint>, StoreError> {
        Ok(self.series.get(series).and_then(|points| points.last().cloned()))
    }

    async fn history(&self, series: &SeriesId) -> Result<Vec<SeriesPoint>, StoreError> {
        Ok(self.series.get(series).cloned().unwrap_or_default())
    }
}
