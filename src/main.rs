use dotenvy::dotenv;
use macrobias::config::EngineConfig;
use macrobias::logging;
use macrobias::models::indicator::Observation;
use macrobias::services::correlation_store::InMemoryCorrelationStore;
use macrobias::signals::engine::MacroEngine;
use std::env;
use std::sync::Arc;

/// Print the diagnosis, bias tables and scenarios for an observation
/// snapshot file (JSON array of observations).
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let path = env::args()
        .nth(1)
        .ok_or("usage: macrobias <observations.json>")?;
    let raw = std::fs::read_to_string(&path)?;
    let observations: Vec<Observation> = serde_json::from_str(&raw)?;

    let engine = MacroEngine::new(Arc::new(EngineConfig::load()));
    let diagnosis = engine.diagnose_snapshot(&observations);

    println!("Regime: {} (score {:.3})", diagnosis.regime.label(), diagnosis.score);
    println!("USD: {}", diagnosis.usd_label.label());
    if let Some(quadrant) = diagnosis.quadrant {
        println!("Quadrant: {}", quadrant.label());
    }
    println!(
        "Postures: {} hawkish / {} neutral / {} dovish",
        diagnosis.counts.hawkish, diagnosis.counts.neutral, diagnosis.counts.dovish
    );
    println!();

    // No store in snapshot mode: correlations come from the static table.
    let correlations = engine
        .resolve_correlations(&InMemoryCorrelationStore::default())
        .await;
    let rows = engine.tactical_bias_table(
        &diagnosis.items,
        diagnosis.regime,
        diagnosis.usd_label,
        diagnosis.score,
        &correlations,
        engine.currency_scores(),
    );

    println!("Bias:");
    for row in &rows {
        println!(
            "  {:<8} {:<6} {:<8} {:<5} corr12m={}  {}",
            row.pair,
            row.asset_class.label(),
            format!("{:?}", row.action),
            row.confidence.label(),
            row.corr12m
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "-".to_string()),
            row.rationale
        );
    }
    println!();

    println!("Scenarios:");
    for scenario in engine.detect_scenarios(&diagnosis.items, diagnosis.regime) {
        println!("  [{:?}] {}: {}", scenario.severity, scenario.title, scenario.rationale);
    }

    let setups = engine.scenarios(&rows, diagnosis.usd_label, diagnosis.regime);
    println!();
    println!("Setups:");
    for setup in setups.active.iter().chain(setups.watchlist.iter()) {
        println!(
            "  {} {}",
            setup.title,
            setup.setup_text.as_deref().unwrap_or_default()
        );
    }

    Ok(())
}
