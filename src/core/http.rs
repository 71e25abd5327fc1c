//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::EngineConfig;
use crate::metrics::Metrics;
use crate::models::bias::{PairBiasRow, Quadrant, Regime, UsdLabel};
use crate::models::correlation::CorrelationSnapshot;
use crate::models::scenario::{InstitutionalSetups, Scenario};
use crate::services::correlation_store::{CorrelationStore, InMemoryCorrelationStore};
use crate::services::observation_store::{InMemoryObservationStore, ObservationStore};
use crate::signals::aggregation::Diagnosis;
use crate::signals::bias::{parse_currency_scores, CurrencyScores};
use crate::signals::engine::MacroEngine;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub engine: Arc<MacroEngine>,
    pub observations: Arc<dyn ObservationStore>,
    pub correlations: Arc<dyn CorrelationStore>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "macrobias-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

async fn current_diagnosis(state: &AppState) -> Diagnosis {
    let diagnosis = state.engine.diagnose(state.observations.as_ref()).await;
    state.metrics.diagnoses_total.inc();
    diagnosis
}

async fn correlations(state: &AppState) -> HashMap<String, CorrelationSnapshot> {
    let snapshots = state
        .engine
        .resolve_correlations(state.correlations.as_ref())
        .await;
    for snapshot in snapshots.values() {
        state
            .metrics
            .correlation_resolutions_total
            .with_label_values(&[snapshot.source.as_str()])
            .inc();
    }
    snapshots
}

/// Optional `?scores=EUR:0.4,USD:0.0` override of the configured currency
/// scores.
#[derive(Debug, Default, Deserialize)]
struct BiasQuery {
    scores: Option<String>,
}

impl BiasQuery {
    fn currency_scores(&self) -> Option<CurrencyScores> {
        self.scores
            .as_deref()
            .map(parse_currency_scores)
            .filter(|scores| !scores.is_empty())
    }
}

async fn tactical_rows(
    state: &AppState,
    diagnosis: &Diagnosis,
    currency_scores: Option<&CurrencyScores>,
) -> Vec<PairBiasRow> {
    let snapshots = correlations(state).await;
    state.engine.tactical_bias_table(
        &diagnosis.items,
        diagnosis.regime,
        diagnosis.usd_label,
        diagnosis.score,
        &snapshots,
        currency_scores,
    )
}

/// Regime context echoed next to every table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BiasResponse {
    regime: Regime,
    usd_label: UsdLabel,
    quadrant: Option<Quadrant>,
    score: f64,
    rows: Vec<PairBiasRow>,
}

async fn get_diagnosis(State(state): State<AppState>) -> Json<Diagnosis> {
    Json(current_diagnosis(&state).await)
}

async fn get_bias(
    State(state): State<AppState>,
    Query(query): Query<BiasQuery>,
) -> Json<BiasResponse> {
    let diagnosis = current_diagnosis(&state).await;
    let overridden = query.currency_scores();
    let rows = state.engine.bias_table(
        diagnosis.regime,
        diagnosis.usd_label,
        diagnosis.quadrant,
        overridden.as_ref().or(state.engine.currency_scores()),
    );
    Json(BiasResponse {
        regime: diagnosis.regime,
        usd_label: diagnosis.usd_label,
        quadrant: diagnosis.quadrant,
        score: diagnosis.score,
        rows,
    })
}

async fn get_tactical(
    State(state): State<AppState>,
    Query(query): Query<BiasQuery>,
) -> Json<BiasResponse> {
    let diagnosis = current_diagnosis(&state).await;
    let overridden = query.currency_scores();
    let scores = overridden.as_ref().or(state.engine.currency_scores());
    let rows = tactical_rows(&state, &diagnosis, scores).await;
    Json(BiasResponse {
        regime: diagnosis.regime,
        usd_label: diagnosis.usd_label,
        quadrant: diagnosis.quadrant,
        score: diagnosis.score,
        rows,
    })
}

async fn get_scenarios(State(state): State<AppState>) -> Json<Vec<Scenario>> {
    let diagnosis = current_diagnosis(&state).await;
    Json(state.engine.detect_scenarios(&diagnosis.items, diagnosis.regime))
}

async fn get_institutional(
    State(state): State<AppState>,
    Query(query): Query<BiasQuery>,
) -> Json<InstitutionalSetups> {
    let diagnosis = current_diagnosis(&state).await;
    let overridden = query.currency_scores();
    let scores = overridden.as_ref().or(state.engine.currency_scores());
    let rows = tactical_rows(&state, &diagnosis, scores).await;
    Json(
        state
            .engine
            .scenarios(&rows, diagnosis.usd_label, diagnosis.regime),
    )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/diagnosis", get(get_diagnosis))
        .route("/api/bias", get(get_bias))
        .route("/api/tactical", get(get_tactical))
        .route("/api/scenarios", get(get_scenarios))
        .route("/api/scenarios/institutional", get(get_institutional))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());
    let engine = Arc::new(MacroEngine::new(Arc::new(EngineConfig::load())));

    // Without QuestDB every series reads as missing and correlations fall
    // back to the static table.
    let (observations, correlations): (Arc<dyn ObservationStore>, Arc<dyn CorrelationStore>) =
        match crate::db::QuestDatabase::new().await {
            Ok(db) => {
                let db = Arc::new(db);
                let observations: Arc<dyn ObservationStore> = db.clone();
                let correlations: Arc<dyn CorrelationStore> = db;
                (observations, correlations)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to connect to QuestDB for API server - serving from empty stores");
                (
                    Arc::new(InMemoryObservationStore::new()),
                    Arc::new(InMemoryCorrelationStore::default()),
                )
            }
        };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: start_time.clone(),
        engine,
        observations,
        correlations,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
