//! QuestDB reads for macro observations and correlations

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{info, warn};

use crate::config;
use crate::error::StoreError;
use crate::models::correlation::{CorrelationRecord, CorrelationRow, CorrelationWindow};
use crate::models::indicator::SeriesPoint;
use crate::models::series::SeriesId;
use crate::services::correlation_store::CorrelationStore;
use crate::services::observation_store::ObservationStore;

const CONNECT_ATTEMPTS: usize = 3;

/// Read-only QuestDB client. Tables are owned by the ingestion side:
///
/// - `observations(timestamp TIMESTAMP, series_id SYMBOL, value DOUBLE)`
/// - `correlations(as_of TIMESTAMP, symbol SYMBOL, benchmark SYMBOL,
///   window SYMBOL, value DOUBLE, sample_size INT)`
pub struct QuestDatabase {
    client: Arc<RwLock<Option<Client>>>,
}

impl QuestDatabase {
    pub async fn new() -> Result<Self, StoreError> {
        Self::connect(&config::get_questdb_url()).await
    }

    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let (client, connection) = (|| async { tokio_postgres::connect(url, NoTls).await })
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(CONNECT_ATTEMPTS),
            )
            .notify(|e, delay| {
                warn!(error = %e, retry_in_ms = delay.as_millis() as u64, "QuestDB connection attempt failed");
            })
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to QuestDB: {}", e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "QuestDB connection error");
            }
        });

        info!("QuestDB connected");
        Ok(Self {
            client: Arc::new(RwLock::new(Some(client))),
        })
    }

    async fn query(&self, sql: &str, params: &[&(dyn tokio_postgres::types::ToSql + Sync)]) -> Result<Vec<Row>, StoreError> {
        let client = self.client.read().await;
        match *client {
            Some(ref c) => Ok(c.query(sql, params).await?),
            None => Err(StoreError::Connection("QuestDB client not initialized".to_string())),
        }
    }
}

fn series_point(row: &Row) -> Result<SeriesPoint, StoreError> {
    let timestamp: NaiveDateTime = row
        .try_get(0)
        .map_err(|e| StoreError::Decode(format!("observation timestamp: {}", e)))?;
    let value: Option<f64> = row
        .try_get(1)
        .map_err(|e| StoreError::Decode(format!("observation value: {}", e)))?;
    Ok(SeriesPoint {
        date: timestamp.date(),
        value: value.filter(|v| v.is_finite()),
    })
}

fn correlation_record(row: &Row) -> Result<Option<CorrelationRecord>, StoreError> {
    let decode = |field: &str, e: tokio_postgres::Error| StoreError::Decode(format!("correlation {}: {}", field, e));
    let as_of: NaiveDateTime = row.try_get(0).map_err(|e| decode("as_of", e))?;
    let symbol: String = row.try_get(1).map_err(|e| decode("symbol", e))?;
    let benchmark: String = row.try_get(2).map_err(|e| decode("benchmark", e))?;
    let window: String = row.try_get(3).map_err(|e| decode("window", e))?;
    let value: Option<f64> = row.try_get(4).map_err(|e| decode("value", e))?;
    let sample_size: Option<i32> = row.try_get(5).map_err(|e| decode("sample_size", e))?;

    // Windows other than 12m/3m are not store-backed.
    let Some(window) = CorrelationWindow::parse(&window) else {
        return Ok(None);
    };
    Ok(Some(CorrelationRecord {
        symbol,
        benchmark,
        window,
        value,
        sample_size: sample_size.unwrap_or(0).max(0) as u32,
        as_of: as_of.date(),
    }))
}

#[async_trait]
impl ObservationStore for QuestDatabase {
    async fn latest(&self, series: &SeriesId) -> Result<Option<SeriesPoint>, StoreError> {
        let rows = self
            .query(
                "SELECT timestamp, value FROM observations
                 WHERE series_id = $1
                 ORDER BY timestamp DESC
                 LIMIT 1",
                &[&series.code()],
            )
            .await?;
        rows.first().map(series_point).transpose()
    }

    async fn history(&self, series: &SeriesId) -> Result<Vec<SeriesPoint>, StoreError> {
        let rows = self
            .query(
                "SELECT timestamp, value FROM observations
                 WHERE series_id = $1
                 ORDER BY timestamp ASC",
                &[&series.code()],
            )
            .await?;
        rows.iter().map(series_point).collect()
    }
}

#[async_trait]
impl CorrelationStore for QuestDatabase {
    async fn correlation(
        &self,
        symbol: &str,
        benchmark: &str,
    ) -> Result<Option<CorrelationRow>, StoreError> {
        let rows = self
            .query(
                "SELECT as_of, symbol, benchmark, window, value, sample_size FROM correlations
                 WHERE symbol = $1 AND benchmark = $2",
                &[&symbol.to_ascii_uppercase(), &benchmark.to_ascii_uppercase()],
            )
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(record) = correlation_record(row)? {
                records.push(record);
            }
        }
        Ok(CorrelationRow::from_records(&records))
    }
}
