//! Error types for the `homestead-world` crate.
//!
//! These are invariant violations and generation failures. Ordinary player
//! mistakes are reported as rejections by the game layer before any world
//! mutator is called.

use homestead_types::{TilePos, Terrain};

/// Errors that can occur during world generation and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The grid dimensions are unusable.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The cell buffer does not match the grid dimensions.
    #[error("grid has {actual} cells, expected {expected}")]
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },

    /// A coordinate lies outside the grid.
    #[error("tile {0} is out of bounds")]
    OutOfBounds(TilePos),

    /// No all-grass block was found for the farmhouse.
    #[error("no farmhouse site found after {attempts} attempts")]
    PlacementFailed {
        /// Attempts made.
        attempts: u32,
    },

    /// None of the cells around the farmhouse qualify as starter land.
    #[error("no starter tile qualifies around the farmhouse at {0}")]
    NoStarterTiles(TilePos),

    /// The tile has the wrong terrain for the operation.
    #[error("tile {pos} is {found:?}, expected {expected:?}")]
    WrongTerrain {
        /// The tile.
        pos: TilePos,
        /// Terrain required.
        expected: Terrain,
        /// Terrain present.
        found: Terrain,
    },

    /// The tile is part of the farmhouse footprint.
    #[error("tile {0} is under the farmhouse")]
    UnderFarmhouse(TilePos),

    /// The tile is not owned by the player.
    #[error("tile {0} is not owned")]
    NotOwned(TilePos),

    /// A plant already occupies the tile.
    #[error("tile {0} already has a plant")]
    Occupied(TilePos),
}
