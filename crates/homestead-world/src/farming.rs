//! The plant state machine: evaporation, watering, daily growth.
//!
//! ```text
//!            moisture <= 0            watering to >= 10
//!   Withered <------------- Alive ---------------------> Drowned
//!                             |
//!                             | growth_stage reaches growth_days
//!                             v
//!                            Ripe
//! ```
//!
//! Only `Alive` plants evaporate or grow. The terminal states wait for the
//! player to harvest (ripe) or hoe away (withered, drowned) the plant.

use tracing::{debug, info};

use homestead_types::{
    CropCatalog, CropDef, MoistureBand, Notification, Plant, PlantReport, PlantStatus, TilePos,
};

use crate::world_map::WorldState;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Moisture of a freshly sown seed.
pub const SEED_MOISTURE: f64 = 4.0;

/// Moisture at which a plant drowns. Watering never goes above it.
pub const MAX_MOISTURE: f64 = 10.0;

/// Moisture added by one use of the watering can.
pub const WATERING_STEP: f64 = 1.0;

/// Lower edge of the growth band (inclusive).
pub const OPTIMAL_MIN: f64 = 2.0;

/// Upper edge of the growth band (inclusive).
pub const OPTIMAL_MAX: f64 = 8.0;

/// Classify a moisture reading against the growth band.
pub fn moisture_band(moisture: f64) -> MoistureBand {
    if moisture < OPTIMAL_MIN {
        MoistureBand::TooDry
    } else if moisture > OPTIMAL_MAX {
        MoistureBand::TooWet
    } else {
        MoistureBand::Optimal
    }
}

// ---------------------------------------------------------------------------
// Single-plant transitions
// ---------------------------------------------------------------------------

/// Drain moisture for `day_fraction` of a day. Returns `true` if the plant
/// withered. Non-alive plants are untouched.
#[allow(clippy::arithmetic_side_effects)]
pub fn evaporate(plant: &mut Plant, def: &CropDef, day_fraction: f64) -> bool {
    if plant.status != PlantStatus::Alive {
        return false;
    }
    plant.moisture -= def.water_need * day_fraction;
    if plant.moisture <= 0.0 {
        plant.moisture = 0.0;
        plant.status = PlantStatus::Withered;
        return true;
    }
    false
}

/// Add one step of water, capped at the maximum. Reaching the maximum
/// drowns the plant. Returns the new status.
///
/// Callers must only water alive plants.
#[allow(clippy::arithmetic_side_effects)]
pub fn water(plant: &mut Plant) -> PlantStatus {
    plant.moisture = (plant.moisture + WATERING_STEP).min(MAX_MOISTURE);
    if plant.moisture >= MAX_MOISTURE {
        plant.status = PlantStatus::Drowned;
    }
    plant.status
}

/// Run one day of growth. Returns `true` if the plant just ripened.
pub fn grow(plant: &mut Plant, def: &CropDef) -> bool {
    if plant.status != PlantStatus::Alive {
        return false;
    }
    if moisture_band(plant.moisture) == MoistureBand::Optimal {
        plant.growth_stage = plant.growth_stage.saturating_add(1).min(def.growth_days);
    }
    if plant.growth_stage >= def.growth_days {
        plant.status = PlantStatus::Ripe;
        return true;
    }
    false
}

/// Hand-tool summary of a plant.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn report(plant: &Plant, def: &CropDef) -> PlantReport {
    let growth_percent = if def.growth_days == 0 {
        100
    } else {
        let ratio = f64::from(plant.growth_stage) / f64::from(def.growth_days);
        (ratio * 100.0).floor().clamp(0.0, 100.0) as u32
    };
    PlantReport {
        crop: plant.crop,
        display_name: def.display_name.clone(),
        status: plant.status,
        growth_percent,
        days_to_harvest: def.growth_days.saturating_sub(plant.growth_stage),
        moisture: plant.moisture,
        band: moisture_band(plant.moisture),
    }
}

// ---------------------------------------------------------------------------
// Whole-field passes
// ---------------------------------------------------------------------------

/// Evaporate every alive plant for `day_fraction` of a day and report the
/// ones that withered.
pub fn evaporate_all(
    world: &mut WorldState,
    catalog: &CropCatalog,
    day_fraction: f64,
) -> Vec<Notification> {
    let mut notes = Vec::new();
    for (pos, plant) in world.plants_mut() {
        if evaporate(plant, catalog.def(plant.crop), day_fraction) {
            info!(%pos, crop = %plant.crop, "plant withered");
            notes.push(Notification::PlantWithered {
                pos,
                crop: plant.crop,
            });
        }
    }
    notes
}

/// Run daily growth over every plant and report the ones that ripened.
pub fn grow_all(world: &mut WorldState, catalog: &CropCatalog) -> Vec<Notification> {
    let mut notes = Vec::new();
    for (pos, plant) in world.plants_mut() {
        let before = plant.growth_stage;
        if grow(plant, catalog.def(plant.crop)) {
            info!(%pos, crop = %plant.crop, "plant ripe");
            notes.push(Notification::PlantRipe {
                pos,
                crop: plant.crop,
            });
        } else if plant.growth_stage > before {
            debug!(%pos, stage = plant.growth_stage, "plant grew");
        }
    }
    notes
}

/// Water the plant at `pos`, if there is one. Returns the updated plant.
pub fn water_at(world: &mut WorldState, pos: TilePos) -> Option<&Plant> {
    let plant = world.plant_mut(pos)?;
    if water(plant) == PlantStatus::Drowned {
        info!(%pos, crop = %plant.crop, "plant drowned");
    }
    Some(plant)
}
