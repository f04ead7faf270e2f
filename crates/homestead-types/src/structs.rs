//! Core entity structs for the Homestead simulation.
//!
//! Plants, the farmhouse footprint, the player's purse, ledger entries, and
//! the read-only views handed to the rendering collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coords::TilePos;
use crate::enums::{CropKind, LedgerEntryType, MoistureBand, PlantStatus, TileType};

// ---------------------------------------------------------------------------
// Plant
// ---------------------------------------------------------------------------

/// A crop growing on one tile of tilled soil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Plant {
    /// Which crop was sown.
    pub crop: CropKind,
    /// Good days accumulated so far, never above the crop's growth days.
    pub growth_stage: u32,
    /// Current moisture, in `[0, 10]`.
    pub moisture: f64,
    /// Lifecycle status.
    pub status: PlantStatus,
}

impl Plant {
    /// A freshly sown seed with the given starting moisture.
    pub const fn sown(crop: CropKind, moisture: f64) -> Self {
        Self {
            crop,
            growth_stage: 0,
            moisture,
            status: PlantStatus::Alive,
        }
    }
}

// ---------------------------------------------------------------------------
// Farmhouse
// ---------------------------------------------------------------------------

/// The farmhouse footprint: a `size` by `size` block whose top-left corner
/// is `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Farmhouse {
    /// Top-left cell of the footprint.
    pub origin: TilePos,
    /// Edge length in tiles.
    pub size: u32,
}

impl Farmhouse {
    /// Create a farmhouse at `origin` with the given edge length.
    pub const fn new(origin: TilePos, size: u32) -> Self {
        Self { origin, size }
    }

    fn span(self) -> i32 {
        i32::try_from(self.size).unwrap_or(i32::MAX)
    }

    /// Whether `value` lies in `[start, start + span)`.
    const fn within(value: i32, start: i32, span: i32) -> bool {
        value >= start && value < start.saturating_add(span)
    }

    /// Whether `pos` is one of the footprint cells.
    pub fn contains(self, pos: TilePos) -> bool {
        let span = self.span();
        Self::within(pos.x, self.origin.x, span) && Self::within(pos.y, self.origin.y, span)
    }

    /// Whether `pos` touches the footprint along an edge (diagonal corners
    /// excluded). Footprint cells themselves are not adjacent.
    pub fn is_cardinally_adjacent(self, pos: TilePos) -> bool {
        let span = self.span();
        let TilePos { x: ox, y: oy } = self.origin;
        let beside = Self::within(pos.y, oy, span)
            && (pos.x == ox.saturating_sub(1) || pos.x == ox.saturating_add(span));
        let above_or_below = Self::within(pos.x, ox, span)
            && (pos.y == oy.saturating_sub(1) || pos.y == oy.saturating_add(span));
        beside || above_or_below
    }

    /// Every cell of the footprint, row-major.
    pub fn cells(self) -> Vec<TilePos> {
        let span = self.span();
        (0..span)
            .flat_map(|dy| (0..span).map(move |dx| (dx, dy)))
            .map(|(dx, dy)| self.origin.offset(dx, dy))
            .collect()
    }

    /// The cells that share an edge with the footprint: `size` per side,
    /// listed top, bottom, left, right.
    pub fn perimeter(self) -> Vec<TilePos> {
        let span = self.span();
        let top = (0..span).map(|i| self.origin.offset(i, -1));
        let bottom = (0..span).map(|i| self.origin.offset(i, span));
        let left = (0..span).map(|i| self.origin.offset(-1, i));
        let right = (0..span).map(|i| self.origin.offset(span, i));
        top.chain(bottom).chain(left).chain(right).collect()
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The player's purse and progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerState {
    /// Cash on hand. May go negative through daily tax.
    #[ts(as = "String")]
    pub money: Decimal,
    /// Cumulative score: land cost plus harvest revenue.
    pub score: u64,
    /// Units of water in the tank.
    pub water: u32,
    /// How many crops the score has unlocked so far.
    pub unlocked_crop_count: u32,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// One money movement in the player's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LedgerEntry {
    /// Sequence number, starting at 1.
    pub sequence: u64,
    /// Day on which the movement happened.
    pub day: u32,
    /// Category of the movement.
    pub entry_type: LedgerEntryType,
    /// Amount moved (always positive; the entry type gives the sign).
    #[ts(as = "String")]
    pub amount: Decimal,
    /// Tile involved, if any.
    pub tile: Option<TilePos>,
    /// Crop involved, if any.
    pub crop: Option<CropKind>,
}

impl LedgerEntry {
    /// The amount with its sign applied: positive for credits.
    pub fn signed_amount(&self) -> Decimal {
        let mut amount = self.amount;
        amount.set_sign_negative(!self.entry_type.is_credit());
        amount
    }
}

// ---------------------------------------------------------------------------
// Views for the renderer
// ---------------------------------------------------------------------------

/// Serializable clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClockState {
    /// Current day, starting at 1.
    pub day: u32,
    /// Milliseconds elapsed in the current day.
    pub ms_into_day: f64,
    /// Length of a day in milliseconds.
    pub day_duration_ms: f64,
    /// Whether ticking is suspended.
    pub paused: bool,
}

/// A plant together with its tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantView {
    /// Where the plant grows.
    pub pos: TilePos,
    /// The plant itself.
    pub plant: Plant,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Seed the terrain was generated from.
    pub seed: u64,
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Row-major tile types with the farmhouse overlaid.
    pub tiles: Vec<TileType>,
    /// Farmhouse footprint.
    pub farmhouse: Farmhouse,
    /// Owned tiles, row-major.
    pub owned: Vec<TilePos>,
    /// Plants, row-major by tile.
    pub plants: Vec<PlantView>,
    /// Clock reading.
    pub clock: ClockState,
    /// Purse and progress.
    pub player: PlayerState,
    /// Whether the game has ended.
    pub game_over: bool,
}

/// Plant details shown by the hand tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantReport {
    /// Which crop.
    pub crop: CropKind,
    /// Display name from the catalog.
    pub display_name: String,
    /// Lifecycle status.
    pub status: PlantStatus,
    /// Growth progress as a whole percentage (floored).
    pub growth_percent: u32,
    /// Good days still needed before harvest.
    pub days_to_harvest: u32,
    /// Raw moisture.
    pub moisture: f64,
    /// Coarse moisture reading.
    pub band: MoistureBand,
}

/// Result of inspecting a tile with the hand tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TileInspection {
    /// The tile inspected.
    pub pos: TilePos,
    /// What the tile is.
    pub tile_type: TileType,
    /// Whether the player owns it.
    pub owned: bool,
    /// Whether buying it would be accepted right now.
    pub purchasable: bool,
    /// The plant on the tile, if any.
    pub plant: Option<PlantReport>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn house() -> Farmhouse {
        Farmhouse::new(TilePos::new(10, 10), 2)
    }

    #[test]
    fn footprint_has_size_squared_cells() {
        let cells = house().cells();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| house().contains(*c)));
        assert!(!house().contains(TilePos::new(12, 10)));
        assert!(!house().contains(TilePos::new(9, 11)));
    }

    #[test]
    fn adjacency_excludes_corners_and_footprint() {
        let fh = house();
        assert!(fh.is_cardinally_adjacent(TilePos::new(9, 10)));
        assert!(fh.is_cardinally_adjacent(TilePos::new(12, 11)));
        assert!(fh.is_cardinally_adjacent(TilePos::new(11, 9)));
        assert!(fh.is_cardinally_adjacent(TilePos::new(10, 12)));
        assert!(!fh.is_cardinally_adjacent(TilePos::new(9, 9)));
        assert!(!fh.is_cardinally_adjacent(TilePos::new(12, 12)));
        assert!(!fh.is_cardinally_adjacent(TilePos::new(10, 10)));
        assert!(!fh.is_cardinally_adjacent(TilePos::new(13, 10)));
    }

    #[test]
    fn perimeter_is_two_cells_per_side() {
        let perimeter = house().perimeter();
        assert_eq!(perimeter.len(), 8);
        assert!(perimeter.iter().all(|p| house().is_cardinally_adjacent(*p)));
    }

    #[test]
    fn signed_amount_follows_entry_type() {
        let mut entry = LedgerEntry {
            sequence: 1,
            day: 1,
            entry_type: LedgerEntryType::HarvestSale,
            amount: dec!(30),
            tile: None,
            crop: Some(CropKind::Carrot),
        };
        assert_eq!(entry.signed_amount(), dec!(30));
        entry.entry_type = LedgerEntryType::DailyTax;
        assert_eq!(entry.signed_amount(), dec!(-30));
    }
}
