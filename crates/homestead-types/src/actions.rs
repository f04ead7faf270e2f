//! Player intents, action outcomes, and notifications.
//!
//! The rendering collaborator turns clicks into [`Intent`] values; every
//! mutator answers with either an [`ActionOutcome`] (what changed, plus any
//! notifications to show) or a [`Rejection`] (why nothing changed).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coords::TilePos;
use crate::enums::{CropKind, PlantStatus, RejectionReason};

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// A single user action routed to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Intent {
    /// Use the hoe on a tile.
    Till {
        /// Target tile.
        pos: TilePos,
    },
    /// Sow a seed on a tile.
    Plant {
        /// Target tile.
        pos: TilePos,
        /// Crop to sow.
        crop: CropKind,
    },
    /// Use the watering can on a tile.
    Water {
        /// Target tile.
        pos: TilePos,
    },
    /// Harvest a ripe plant.
    Harvest {
        /// Target tile.
        pos: TilePos,
    },
    /// Buy a tile of land.
    BuyLand {
        /// Target tile.
        pos: TilePos,
    },
    /// Refill the tank.
    BuyWater {
        /// Requested units.
        amount: u32,
    },
    /// Pause or resume the clock.
    SetPaused {
        /// New pause state.
        paused: bool,
    },
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// The state change produced by an accepted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ActionEffect {
    /// Grass turned into tilled soil.
    Tilled {
        /// The tile hoed.
        pos: TilePos,
    },
    /// A dead plant was hoed away; the soil stays tilled.
    Cleared {
        /// The tile cleared.
        pos: TilePos,
        /// What grew there.
        crop: CropKind,
        /// How it died.
        status: PlantStatus,
    },
    /// A seed was sown.
    Planted {
        /// The tile sown.
        pos: TilePos,
        /// The crop sown.
        crop: CropKind,
        /// Seed price paid.
        #[ts(as = "String")]
        cost: Decimal,
    },
    /// A plant was watered.
    Watered {
        /// The tile watered.
        pos: TilePos,
        /// Moisture after watering.
        moisture: f64,
        /// Status after watering (drowned if it reached the maximum).
        status: PlantStatus,
        /// Tank level after watering.
        water_left: u32,
    },
    /// A ripe plant was sold.
    Harvested {
        /// The tile harvested.
        pos: TilePos,
        /// The crop sold.
        crop: CropKind,
        /// Money and score credited.
        #[ts(as = "String")]
        revenue: Decimal,
    },
    /// A tile of land was bought.
    LandPurchased {
        /// The tile bought.
        pos: TilePos,
        /// Price paid.
        #[ts(as = "String")]
        cost: Decimal,
    },
    /// Water was bought.
    WaterPurchased {
        /// Units added to the tank (after clamping).
        amount: u32,
        /// Price paid.
        #[ts(as = "String")]
        cost: Decimal,
    },
    /// The clock was paused or resumed.
    PauseChanged {
        /// New pause state.
        paused: bool,
    },
}

/// Events worth telling the player about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Notification {
    /// A plant dried out.
    PlantWithered {
        /// Where.
        pos: TilePos,
        /// Which crop.
        crop: CropKind,
    },
    /// A plant was overwatered.
    PlantDrowned {
        /// Where.
        pos: TilePos,
        /// Which crop.
        crop: CropKind,
    },
    /// A plant is ready for harvest.
    PlantRipe {
        /// Where.
        pos: TilePos,
        /// Which crop.
        crop: CropKind,
    },
    /// A crop became available.
    CropUnlocked {
        /// The crop.
        crop: CropKind,
    },
    /// A new day began and tax was charged.
    DayStarted {
        /// The new day number.
        day: u32,
        /// Tax charged at the rollover.
        #[ts(as = "String")]
        tax: Decimal,
    },
    /// No seed is affordable and nothing is left growing.
    GameOver {
        /// Day on which the game ended.
        day: u32,
        /// Final score.
        score: u64,
    },
}

/// An accepted action: its effect and any notifications it triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionOutcome {
    /// What changed.
    pub effect: ActionEffect,
    /// Unlocks, game over, and similar follow-ups.
    pub notifications: Vec<Notification>,
}

impl ActionOutcome {
    /// An outcome with no follow-up notifications.
    pub const fn new(effect: ActionEffect) -> Self {
        Self {
            effect,
            notifications: Vec::new(),
        }
    }
}

/// A refused action. The game state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export, export_to = "bindings/")]
#[error("{reason:?}: {message}")]
pub struct Rejection {
    /// Machine-readable reason.
    pub reason: RejectionReason,
    /// Text for the player.
    pub message: String,
}

impl Rejection {
    /// Build a rejection from a reason and a message.
    pub fn new(reason: RejectionReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// How much water the player could buy right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WaterQuote {
    /// Largest purchasable amount, after every cap and the reserve.
    pub max_amount: u32,
    /// Price per unit.
    #[ts(as = "String")]
    pub unit_price: Decimal,
    /// Money kept back so a seed stays affordable (zero while plants grow).
    #[ts(as = "String")]
    pub reserve: Decimal,
    /// Why `max_amount` is zero, if it is.
    pub blocked_by: Option<RejectionReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_displays_reason_and_message() {
        let r = Rejection::new(RejectionReason::Shoreline, "Too close to the water");
        assert_eq!(r.to_string(), "Shoreline: Too close to the water");
    }

    #[test]
    fn new_outcome_has_no_notifications() {
        let outcome = ActionOutcome::new(ActionEffect::PauseChanged { paused: true });
        assert!(outcome.notifications.is_empty());
    }
}
