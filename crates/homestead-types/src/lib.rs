//! Shared type definitions for the Homestead farming simulation.
//!
//! This crate is the single source of truth for the values passed between
//! the simulation crates and the browser renderer. Types flow to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`coords`]: Value-type tile coordinates
//! - [`enums`]: Terrain, tile types, plant status, crops, rejection reasons
//! - [`catalog`]: The immutable crop catalog
//! - [`structs`]: Plants, farmhouse, player purse, ledger entries, snapshots
//! - [`actions`]: Intents, outcomes, notifications, rejections

pub mod actions;
pub mod catalog;
pub mod coords;
pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{ActionEffect, ActionOutcome, Intent, Notification, Rejection, WaterQuote};
pub use catalog::{CropCatalog, CropDef};
pub use coords::TilePos;
pub use enums::{
    CropKind, LedgerEntryType, MoistureBand, PlantStatus, RejectionReason, Terrain, TileType,
};
pub use structs::{
    ClockState, Farmhouse, LedgerEntry, Plant, PlantReport, PlantView, PlayerState,
    TileInspection, WorldSnapshot,
};
