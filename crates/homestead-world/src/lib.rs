//! Terrain, ownership, and plant simulation for the Homestead farming game.
//!
//! This crate models the physical farm: a seeded noise field turned into a
//! terrain grid, the farmhouse and starter plot placed on it, the set of
//! owned tiles, and the plants growing on tilled soil.
//!
//! # Modules
//!
//! - [`noise`]: Seeded 2D simplex noise.
//! - [`generation`]: Terrain thresholds and shoreline smoothing.
//! - [`starting_world`]: Farmhouse placement, starter plot, re-rolls.
//! - [`world_map`]: [`TerrainGrid`] and the mutable [`WorldState`].
//! - [`farming`]: The plant state machine.
//! - [`error`]: [`WorldError`].

pub mod error;
pub mod farming;
pub mod generation;
pub mod noise;
pub mod starting_world;
pub mod world_map;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use noise::SimplexNoise;
pub use starting_world::{GenerationParams, generate_world, reroll_farmhouse};
pub use world_map::{TerrainGrid, WorldState};
