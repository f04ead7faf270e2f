//! Headless frame loop.
//!
//! [`run_frames`] plays the game the way a browser would: each frame it
//! collects intents from an [`IntentSource`], applies them, advances time by
//! a fixed frame length and reports to a [`FrameCallback`]. It stops when
//! the game ends, when the day bound is passed, or when the clock is paused
//! and no time can pass.

use tracing::{info, warn};

use homestead_types::Notification;

use crate::decision::IntentSource;
use crate::game::Game;

/// Errors that can occur before a run starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    /// The bounds would never let the run finish.
    #[error("invalid run bounds: {reason}")]
    InvalidBounds {
        /// Explanation of what is wrong.
        reason: String,
    },
}

/// Limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    /// Stop once this many days have fully elapsed.
    pub max_days: u32,
    /// Simulated milliseconds per frame.
    pub frame_ms: u32,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// The player went broke.
    GameOver,
    /// The day bound was passed.
    MaxDaysReached,
    /// The clock was paused with no way to resume.
    Paused,
}

/// What happened in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSummary {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Day at the start of the frame.
    pub day: u32,
    /// Intents accepted this frame.
    pub accepted: u32,
    /// Intents rejected this frame.
    pub rejected: u32,
    /// Notifications from actions and time, in order.
    pub notifications: Vec<Notification>,
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Why the run stopped.
    pub end_reason: RunEndReason,
    /// Frames executed.
    pub frames: u64,
    /// Day when the run stopped.
    pub final_day: u32,
    /// Intents accepted over the run.
    pub accepted: u64,
    /// Intents rejected over the run.
    pub rejected: u64,
}

/// Callback invoked after each frame.
pub trait FrameCallback {
    /// Called after a frame completes.
    fn on_frame(&mut self, summary: &FrameSummary, game: &Game);
}

/// A no-op frame callback.
pub struct NoOpCallback;

impl FrameCallback for NoOpCallback {
    fn on_frame(&mut self, _summary: &FrameSummary, _game: &Game) {}
}

/// Run frames until the game ends, the day bound passes, or time stops.
///
/// # Errors
///
/// Returns [`RunnerError::InvalidBounds`] for a zero frame length.
pub fn run_frames(
    game: &mut Game,
    source: &mut dyn IntentSource,
    callback: &mut dyn FrameCallback,
    bounds: RunBounds,
) -> Result<RunResult, RunnerError> {
    if bounds.frame_ms == 0 {
        return Err(RunnerError::InvalidBounds {
            reason: "frame_ms must be at least 1".to_owned(),
        });
    }
    let frame_ms = f64::from(bounds.frame_ms);

    let mut frames: u64 = 0;
    let mut accepted: u64 = 0;
    let mut rejected: u64 = 0;

    info!(
        max_days = bounds.max_days,
        frame_ms = bounds.frame_ms,
        seed = game.seed(),
        "run starting"
    );

    let end_reason = loop {
        if game.is_game_over() {
            break RunEndReason::GameOver;
        }
        if game.clock().day() > bounds.max_days {
            break RunEndReason::MaxDaysReached;
        }
        if game.is_paused() {
            warn!(day = game.clock().day(), "clock paused, ending run");
            break RunEndReason::Paused;
        }

        let mut summary = FrameSummary {
            frame: frames,
            day: game.clock().day(),
            accepted: 0,
            rejected: 0,
            notifications: Vec::new(),
        };

        for intent in source.collect_intents(game) {
            if game.is_game_over() {
                break;
            }
            match game.apply(intent) {
                Ok(outcome) => {
                    summary.accepted = summary.accepted.saturating_add(1);
                    summary.notifications.extend(outcome.notifications);
                }
                Err(_) => summary.rejected = summary.rejected.saturating_add(1),
            }
        }
        summary.notifications.extend(game.tick(frame_ms));

        accepted = accepted.saturating_add(u64::from(summary.accepted));
        rejected = rejected.saturating_add(u64::from(summary.rejected));
        frames = frames.saturating_add(1);
        callback.on_frame(&summary, game);
    };

    Ok(RunResult {
        end_reason,
        frames,
        final_day: game.clock().day(),
        accepted,
        rejected,
    })
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult, game: &Game) {
    info!(
        reason = ?result.end_reason,
        frames = result.frames,
        final_day = result.final_day,
        accepted = result.accepted,
        rejected = result.rejected,
        money = %game.player().money,
        score = game.player().score,
        "run ended"
    );
}
