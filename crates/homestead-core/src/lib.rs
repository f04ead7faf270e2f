//! Clock, configuration, and the game aggregate for the Homestead simulation.
//!
//! This crate ties the world and the ledger together into a playable game:
//! a [`Game`] owns one world, one clock and one purse, exposes the
//! `attempt_*` mutators the renderer calls, and advances time frame by frame.
//!
//! # Modules
//!
//! - [`clock`]: Day counter and midnight-aware frame segments.
//! - [`config`]: Configuration loading from `homestead-config.yaml` into
//!   strongly-typed structs.
//! - [`game`]: The [`Game`] aggregate: construction, regeneration, queries.
//! - [`actions`]: Till, plant, water, harvest, land and water purchases.
//! - [`tick`]: Continuous ticks and the day rollover.
//! - [`decision`]: [`IntentSource`] trait and [`StubIntentSource`].
//! - [`runner`]: Headless frame loop.
//!
//! [`IntentSource`]: decision::IntentSource
//! [`StubIntentSource`]: decision::StubIntentSource

pub mod actions;
pub mod clock;
pub mod config;
pub mod decision;
pub mod game;
pub mod runner;
pub mod tick;

pub use config::GameConfig;
pub use game::{Game, GameError};
