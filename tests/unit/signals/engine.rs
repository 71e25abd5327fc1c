//! Unit tests for the macro engine facade

use async_trait::async_trait;
use chrono::NaiveDate;
use macrobias::config::EngineConfig;
use macrobias::error::StoreError;
use macrobias::models::bias::{Action, Regime, UsdLabel};
use macrobias::models::correlation::CorrelationSource;
use macrobias::models::indicator::{Observation, Posture, SeriesPoint};
use macrobias::models::series::SeriesId;
use macrobias::services::correlation_store::InMemoryCorrelationStore;
use macrobias::services::observation_store::{InMemoryObservationStore, ObservationStore};
use macrobias::signals::engine::{z_score, MacroEngine};
use std::sync::Arc;

fn engine() -> MacroEngine {
    MacroEngine::new(Arc::new(EngineConfig::default()))
}

fn date(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
}

fn snapshot() -> Vec<Observation> {
    vec![
        Observation::new("core_cpi_yoy", SeriesId::CoreCpi, Some(3.7))
            .with_date(date(5))
            .with_previous(Some(3.8), Some(date(4)))
            .with_z_score(1.6),
        Observation::new("cpi_yoy", SeriesId::Cpi, Some(3.4)).with_date(date(5)),
        Observation::new("payrolls", SeriesId::Payrolls, Some(290.0))
            .with_date(date(5))
            .with_z_score(2.1),
        Observation::new("gdp_yoy", SeriesId::Gdp, Some(0.6)).with_date(date(4)),
        Observation::new("unemployment", SeriesId::Unemployment, Some(3.7)).with_date(date(5)),
        Observation::new("fed_funds", SeriesId::PolicyRate, Some(5.33)).with_date(date(5)),
        Observation::new("vix", SeriesId::Vix, None),
    ]
}

struct FailingStore;

#[async_trait]
impl ObservationStore for FailingStore {
    async fn latest(&self, _series: &SeriesId) -> Result<Option<SeriesPoint>, StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }

    async fn history(&self, _series: &SeriesId) -> Result<Vec<SeriesPoint>, StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }
}

fn points(values: &[f64]) -> Vec<SeriesPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| SeriesPoint {
            date: date(1) + chrono::Days::new(i as u64 * 30),
            value: Some(*v),
        })
        .collect()
}

#[test]
fn diagnosis_is_idempotent() {
    let engine = engine();
    let observations = snapshot();
    let first = engine.diagnose_snapshot(&observations);
    let second = engine.diagnose_snapshot(&observations);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn hawkish_snapshot_reads_as_risk_off_and_strong_usd() {
    let diagnosis = engine().diagnose_snapshot(&snapshot());
    assert!(diagnosis.score < 0.0);
    assert_eq!(diagnosis.regime, Regime::RiskOff);
    assert_eq!(diagnosis.usd_label, UsdLabel::Strong);
    assert_eq!(diagnosis.last_updated, Some(date(5)));
    assert_eq!(diagnosis.items.len(), 7);
    let vix = diagnosis.items.iter().find(|i| i.key == "vix").unwrap();
    assert_eq!(vix.posture, Posture::Neutral);
}

#[test]
fn snapshot_internal_keys_resolve_to_canonical_series() {
    let observations: Vec<Observation> = serde_json::from_str(
        r#"[
            {"key": "core_cpi_yoy", "canonicalSeriesId": "core_cpi_yoy", "value": 4.0},
            {"key": "payrolls", "canonicalSeriesId": "payrolls", "value": 300.0},
            {"key": "fed_funds", "canonicalSeriesId": "MYSTERY", "value": 5.3}
        ]"#,
    )
    .unwrap();
    assert_eq!(observations[0].series_id, SeriesId::Other("core_cpi_yoy".to_string()));

    let diagnosis = engine().diagnose_snapshot(&observations);
    let core = diagnosis.items.iter().find(|i| i.key == "core_cpi_yoy").unwrap();
    assert_eq!(core.series_id, SeriesId::CoreCpi);
    assert_eq!(core.posture, Posture::Hawkish);
    assert_eq!(core.weight, 1.0);

    let payrolls = diagnosis.items.iter().find(|i| i.key == "payrolls").unwrap();
    assert_eq!(payrolls.series_id, SeriesId::Payrolls);
    assert_eq!(payrolls.posture, Posture::Hawkish);

    let policy = diagnosis.items.iter().find(|i| i.key == "fed_funds").unwrap();
    assert_eq!(policy.series_id, SeriesId::PolicyRate);

    assert_eq!(diagnosis.used_count, 3);
    assert_eq!(diagnosis.regime, Regime::RiskOff);
}

#[test]
fn canonical_codes_are_left_untouched() {
    let engine = engine();
    let observation = Observation::new("anything", SeriesId::Cpi, Some(2.0));
    assert_eq!(engine.canonicalize(&observation), observation);

    let unknown = Observation::new("custom", SeriesId::Other("custom".to_string()), Some(1.0));
    assert_eq!(engine.canonicalize(&unknown).series_id, SeriesId::Other("custom".to_string()));
}

#[test]
fn tactical_table_uses_surprises_and_correlations() {
    let engine = engine();
    let diagnosis = engine.diagnose_snapshot(&snapshot());
    let correlations =
        tokio_test::block_on(engine.resolve_correlations(&InMemoryCorrelationStore::default()));

    let rows = engine.tactical_bias_table(
        &diagnosis.items,
        diagnosis.regime,
        diagnosis.usd_label,
        diagnosis.score,
        &correlations,
        None,
    );
    assert_eq!(rows.len(), engine.config().universe.len());

    let eurusd = rows.iter().find(|r| r.pair == "EURUSD").unwrap();
    assert_eq!(eurusd.action, Action::Sell);
    assert_eq!(eurusd.corr12m, Some(-0.95));
    assert!(eurusd.corr_mapped);
    assert_eq!(eurusd.aligned_surprises, 2);

    let setups = engine.scenarios(&rows, diagnosis.usd_label, diagnosis.regime);
    assert!(setups
        .active
        .iter()
        .chain(setups.watchlist.iter())
        .all(|s| s.direction == Some(Action::Sell)));

    let scenarios = engine.detect_scenarios(&diagnosis.items, diagnosis.regime);
    assert!(scenarios.iter().any(|s| s.id == "stagflation"));
    assert!(scenarios.iter().any(|s| s.id == "risk_off"));
}

#[test]
fn crypto_symbols_resolve_through_variants() {
    let engine = engine();
    let correlations =
        tokio_test::block_on(engine.resolve_correlations(&InMemoryCorrelationStore::default()));
    let btc = &correlations["BTCUSDT"];
    assert!(btc.mapped);
    assert_eq!(btc.source, CorrelationSource::Static);
    assert_eq!(btc.reference.as_deref(), Some("BTCUSD/DXY"));

    let nas = &correlations["NAS100"];
    assert!(!nas.mapped);
    assert_eq!(nas.corr12m, None);
}

#[tokio::test]
async fn loads_previous_value_and_z_score_from_history() {
    let history = points(&[3.0, 3.1, 2.9, 3.0, 3.2, 3.1, 3.0, 2.9, 3.1, 4.0]);
    let store = InMemoryObservationStore::new().with_series(SeriesId::CoreCpi, history);

    let observations = engine().load_observations(&store).await;
    let core = observations
        .iter()
        .find(|o| o.series_id == SeriesId::CoreCpi)
        .unwrap();

    assert_eq!(core.key, "core_cpi_yoy");
    assert_eq!(core.value, Some(4.0));
    assert_eq!(core.previous_value, Some(3.1));
    assert!(core.previous_date.is_some());
    assert!(core.z_score.is_some_and(|z| z > 3.0));

    let missing = observations
        .iter()
        .find(|o| o.series_id == SeriesId::Payrolls)
        .unwrap();
    assert_eq!(missing.value, None);
}

#[tokio::test]
async fn short_history_has_no_z_score() {
    let store = InMemoryObservationStore::new()
        .with_series(SeriesId::Cpi, points(&[3.0, 3.2, 3.4]));
    let observations = engine().load_observations(&store).await;
    let cpi = observations.iter().find(|o| o.series_id == SeriesId::Cpi).unwrap();
    assert_eq!(cpi.value, Some(3.4));
    assert_eq!(cpi.previous_value, Some(3.2));
    assert_eq!(cpi.z_score, None);
}

#[tokio::test]
async fn store_failures_degrade_to_missing_data() {
    let engine = engine();
    let diagnosis = engine.diagnose(&FailingStore).await;
    assert!(diagnosis.items.iter().all(|i| i.value.is_none()));
    assert_eq!(diagnosis.score, 0.0);
    assert_eq!(diagnosis.regime, Regime::Neutral);
    assert_eq!(diagnosis.items.len(), engine.tracked_series().len());
}

#[test]
fn z_score_uses_population_stddev() {
    let prior = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let z = z_score(4.5, &prior).unwrap();
    assert!(z.abs() < 1e-12);
    assert_eq!(z_score(4.5, &prior[..7]), None);
    assert_eq!(z_score(1.0, &[2.0; 8]), None);
}
