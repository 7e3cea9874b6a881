//! Structured logging setup.
//!
//! The engine logs through `tracing`: `info` for run start and end, `debug`
//! for wiring and per-tick sampling, `trace` for every scheduler firing and
//! server state change. Install a subscriber with one of the initialisers
//! below, or your own. `RUST_LOG` overrides the level given here, e.g.
//! `RUST_LOG=qsim_core::scheduler=trace`.

use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Installs a global fmt subscriber. Does nothing if one is already set.
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), level).into());

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init();

    if installed.is_ok() {
        info!("Simulation logging initialized at level: {}", level);
    }
}

pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}
