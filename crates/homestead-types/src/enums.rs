//! Enumeration types for the Homestead simulation.
//!
//! Closed variant sets for terrain, tile queries, plant status, crops,
//! moisture bands, rejection reasons, and ledger entry categories.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Terrain and tiles
// ---------------------------------------------------------------------------

/// A value stored in the world grid.
///
/// Every in-bounds cell holds exactly one terrain value. The farmhouse is not
/// terrain: it is an overlay described by its position and size, so it can
/// never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Terrain {
    /// Lakes and rivers. Never purchasable, source of shoreline.
    Water,
    /// Open meadow. The only terrain that can be bought or tilled.
    Grass,
    /// Woodland.
    Forest,
    /// High peaks.
    Mountain,
    /// Rocky outcrops.
    Rock,
    /// Hoed grass, ready for seeds.
    TilledSoil,
}

/// The type reported for a tile query.
///
/// Identical to [`Terrain`] plus the derived [`TileType::Farmhouse`] overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TileType {
    /// See [`Terrain::Water`].
    Water,
    /// See [`Terrain::Grass`].
    Grass,
    /// See [`Terrain::Forest`].
    Forest,
    /// See [`Terrain::Mountain`].
    Mountain,
    /// See [`Terrain::Rock`].
    Rock,
    /// See [`Terrain::TilledSoil`].
    TilledSoil,
    /// Part of the farmhouse footprint, regardless of the terrain below.
    Farmhouse,
}

impl From<Terrain> for TileType {
    fn from(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Water => Self::Water,
            Terrain::Grass => Self::Grass,
            Terrain::Forest => Self::Forest,
            Terrain::Mountain => Self::Mountain,
            Terrain::Rock => Self::Rock,
            Terrain::TilledSoil => Self::TilledSoil,
        }
    }
}

// ---------------------------------------------------------------------------
// Plants
// ---------------------------------------------------------------------------

/// Lifecycle status of a planted crop.
///
/// `Alive` is the only non-terminal state. The three terminal states leave
/// the plant in place until the player harvests (ripe) or hoes it away
/// (withered, drowned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PlantStatus {
    /// Growing; loses moisture over time.
    Alive,
    /// Dried out (moisture reached zero).
    Withered,
    /// Overwatered (moisture reached the maximum).
    Drowned,
    /// Fully grown and ready to harvest.
    Ripe,
}

impl PlantStatus {
    /// Whether the plant can still turn into money (alive or ripe).
    pub const fn is_viable(self) -> bool {
        matches!(self, Self::Alive | Self::Ripe)
    }

    /// Whether the plant died and can only be cleared with the hoe.
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Withered | Self::Drowned)
    }
}

/// The crops a player can sow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum CropKind {
    /// Cheap, fast, thirsty only a little.
    Sunflower,
    /// The baseline crop.
    Carrot,
    /// Pricier and thirstier.
    Tomato,
    /// Unlocked by score.
    Strawberry,
    /// Unlocked by score; the most valuable crop.
    Pumpkin,
}

impl CropKind {
    /// Every crop, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Sunflower,
        Self::Carrot,
        Self::Tomato,
        Self::Strawberry,
        Self::Pumpkin,
    ];

    /// Stable lowercase key, as used in configuration files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sunflower => "sunflower",
            Self::Carrot => "carrot",
            Self::Tomato => "tomato",
            Self::Strawberry => "strawberry",
            Self::Pumpkin => "pumpkin",
        }
    }
}

impl core::fmt::Display for CropKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Coarse moisture reading shown when a player inspects a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MoistureBand {
    /// Below the growth band; the plant will not grow tonight.
    TooDry,
    /// Inside the growth band.
    Optimal,
    /// Above the growth band; close to drowning.
    TooWet,
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why a player action was refused.
///
/// Rejections are ordinary game feedback, not failures: the state is left
/// untouched and the renderer shows a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The coordinate lies outside the grid.
    OutOfBounds,
    /// The action needs an owned tile.
    NotOwned,
    /// The tile has the wrong type (hoeing non-grass, planting off soil, ...).
    WrongTileType,
    /// A plant already grows on the tile.
    AlreadyOccupied,
    /// The tile is already part of the farm.
    AlreadyOwned,
    /// Not enough money once the seed reserve is taken into account.
    InsufficientFunds,
    /// The watering can is empty.
    InsufficientWater,
    /// The water tank has no room left.
    TankFull,
    /// A purchase amount of zero.
    InvalidAmount,
    /// The tile does not touch the farm or the farmhouse.
    InvalidAdjacency,
    /// The tile borders water.
    Shoreline,
    /// The plant is not ready for harvest.
    NotRipe,
    /// The plant is ripe; it only needs harvesting.
    AlreadyRipe,
    /// The plant is withered or drowned.
    PlantUnhealthy,
    /// The plant is alive or ripe and cannot be hoed away.
    PlantHealthy,
    /// No plant on the tile.
    NoPlant,
    /// The crop has not been unlocked by score yet.
    CropLocked,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Category of a money movement recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum LedgerEntryType {
    /// Seeds bought when planting (debit).
    SeedPurchase,
    /// Ripe crop sold on harvest (credit).
    HarvestSale,
    /// A tile of land bought (debit).
    LandPurchase,
    /// Water bought for the tank (debit).
    WaterPurchase,
    /// Per-tile land tax charged at day rollover (debit).
    DailyTax,
}

impl LedgerEntryType {
    /// Whether entries of this type add money to the player's purse.
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::HarvestSale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_terrain_maps_to_a_tile_type() {
        let all = [
            Terrain::Water,
            Terrain::Grass,
            Terrain::Forest,
            Terrain::Mountain,
            Terrain::Rock,
            Terrain::TilledSoil,
        ];
        for terrain in all {
            assert_ne!(TileType::from(terrain), TileType::Farmhouse);
        }
    }

    #[test]
    fn viability_and_death_partition_terminal_states() {
        assert!(PlantStatus::Alive.is_viable());
        assert!(PlantStatus::Ripe.is_viable());
        assert!(PlantStatus::Withered.is_dead());
        assert!(PlantStatus::Drowned.is_dead());
        assert!(!PlantStatus::Alive.is_dead());
        assert!(!PlantStatus::Drowned.is_viable());
    }

    #[test]
    fn crop_keys_round_trip_through_serde() {
        for kind in CropKind::ALL {
            let json = serde_json::to_string(&kind).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", kind.key()));
        }
    }

    #[test]
    fn only_harvest_sales_are_credits() {
        assert!(LedgerEntryType::HarvestSale.is_credit());
        assert!(!LedgerEntryType::DailyTax.is_credit());
        assert!(!LedgerEntryType::SeedPurchase.is_credit());
    }
}
