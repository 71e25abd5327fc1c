//! Macro posture, regime and currency-bias engine.
//!
//! Classifies macro indicator readings into Hawkish/Neutral/Dovish postures,
//! aggregates them into a weighted risk regime, and derives per-instrument
//! directional bias, confidence grades and scenario alerts.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
