//! Headless driver for the Homestead simulation.
//!
//! Wires configuration, logging, world generation and the frame runner
//! together, lets the scripted farmer play until the game ends or the day
//! bound passes, then prints the final snapshot as JSON on stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$HOMESTEAD_CONFIG` or `homestead-config.yaml`
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Generate the world, retrying seeds as configured
//! 4. Run frames with the scripted farmer
//! 5. Reconcile the ledger and print the snapshot

mod autopilot;
mod error;
mod frame_log;

use homestead_core::config::{GameConfig, LoggingConfig};
use homestead_core::runner::{self, RunBounds};
use homestead_core::Game;
use homestead_ledger::conservation::ReconcileResult;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::autopilot::{Autopilot, FarmerSettings};
use crate::error::EngineError;
use crate::frame_log::FrameLogger;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, world generation, the run itself or
/// the final serialization fails.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = GameConfig::resolve_path();
    let config = GameConfig::load_or_default(&config_path)?;
    config.validate()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        path = %config_path.display(),
        width = config.world.width,
        height = config.world.height,
        seed = ?config.world.seed,
        day_duration_ms = config.time.day_duration_ms,
        "homestead-engine starting"
    );

    // 3. Generate the world.
    let mut game = Game::new(&config)?;
    info!(
        seed = game.seed(),
        farmhouse = %game.world().farmhouse().origin,
        owned = game.world().owned_count(),
        "world ready"
    );

    // 4. Run the simulation.
    let bounds = RunBounds {
        max_days: config.simulation.max_days,
        frame_ms: config.simulation.frame_ms,
    };
    let mut farmer = Autopilot::new(FarmerSettings::default());
    let mut logger = FrameLogger::new();
    let result = runner::run_frames(&mut game, &mut farmer, &mut logger, bounds)?;
    runner::log_run_end(&result, &game);
    info!(
        ripened = logger.harvest_ready(),
        lost = logger.losses(),
        "crop summary"
    );

    // 5. Reconcile and report.
    frame_log::log_ledger_totals(&game);
    if let ReconcileResult::Anomaly(anomaly) = game.reconcile() {
        warn!(
            expected = %anomaly.expected,
            actual = %anomaly.actual,
            "ledger does not explain the purse: {anomaly}"
        );
    }
    let snapshot = serde_json::to_string_pretty(&game.snapshot())?;
    println!("{snapshot}");

    info!(end_reason = ?result.end_reason, "homestead-engine shutdown complete");
    Ok(())
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| EngineError::Logging {
            message: format!("invalid log filter {:?}: {e}", logging.level),
        })?;

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
