//! Vigia: deterministic clinical-trajectory simulation and risk-scoring
//! engine for intensive-care patients.
//!
//! The engine takes an externally supplied roster of patient snapshots and
//! an optional set of authored clinical profiles, and derives from them:
//! instantaneous risk and severity scores, a multi-day simulated trajectory
//! per patient, a discrete event timeline, short-window deterioration
//! flags, and unit-level census figures. Scores are illustrative weighted
//! heuristics, not validated clinical instruments.
//!
//! All computation is synchronous and side-effect-free except for the
//! per-patient trajectory cache. "Now" is injectable via [`clock::Clock`]
//! so callers and tests control time.

pub mod census;
pub mod clock;
pub mod config;
pub mod deterioration;
pub mod engine;
pub mod error;
pub mod models;
pub mod profile;
pub mod scoring;
pub mod timeline;
pub mod trajectory;

pub use engine::ClinicalEngine;
pub use error::EngineError;

use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber with the crate's default filter.
///
/// Intended for binaries and examples embedding the engine; libraries and
/// tests that already manage a subscriber should skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
