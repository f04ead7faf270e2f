//! Frame callback that turns notifications into log lines.
//!
//! The renderer would show these as toasts; headless runs log them.

use std::collections::BTreeMap;

use homestead_core::Game;
use homestead_core::runner::{FrameCallback, FrameSummary};
use homestead_types::{LedgerEntryType, Notification};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Logs every notification a frame produced.
#[derive(Debug, Default)]
pub struct FrameLogger {
    harvest_ready: u64,
    losses: u64,
}

impl FrameLogger {
    /// Create a new logger.
    pub const fn new() -> Self {
        Self {
            harvest_ready: 0,
            losses: 0,
        }
    }

    /// Plants that ripened during the run.
    pub const fn harvest_ready(&self) -> u64 {
        self.harvest_ready
    }

    /// Plants that withered or drowned during the run.
    pub const fn losses(&self) -> u64 {
        self.losses
    }
}

impl FrameCallback for FrameLogger {
    fn on_frame(&mut self, summary: &FrameSummary, game: &Game) {
        for note in &summary.notifications {
            match note {
                Notification::PlantRipe { pos, crop } => {
                    self.harvest_ready = self.harvest_ready.saturating_add(1);
                    info!(%pos, crop = crop.key(), "plant ripe");
                }
                Notification::PlantWithered { pos, crop } => {
                    self.losses = self.losses.saturating_add(1);
                    warn!(%pos, crop = crop.key(), "plant withered");
                }
                Notification::PlantDrowned { pos, crop } => {
                    self.losses = self.losses.saturating_add(1);
                    warn!(%pos, crop = crop.key(), "plant drowned");
                }
                Notification::CropUnlocked { crop } => {
                    info!(crop = crop.key(), score = game.player().score, "crop unlocked");
                }
                Notification::DayStarted { day, tax } => {
                    debug!(day, %tax, frame = summary.frame, "new day");
                }
                Notification::GameOver { day, score } => {
                    warn!(day, score, "game over");
                }
            }
        }
        if summary.rejected > 0 {
            debug!(
                frame = summary.frame,
                rejected = summary.rejected,
                "intents rejected"
            );
        }
    }
}

/// Log where the money went over the run and return the per-type totals.
pub fn log_ledger_totals(game: &Game) -> BTreeMap<LedgerEntryType, Decimal> {
    let totals = game.ledger().totals_by_type();
    for (entry_type, total) in &totals {
        info!(kind = ?entry_type, %total, "ledger total");
    }
    info!(
        entries = game.ledger().len(),
        net = %game.ledger().net_change(),
        "ledger summary"
    );
    totals
}
