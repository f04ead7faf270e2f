//! Building a playable homestead from a seed.
//!
//! One [`SmallRng`] seeded from the world seed is consumed in a fixed order:
//! the noise permutation, then farmhouse placement, then the starter-plot
//! shuffle. The same seed and parameters therefore always produce the same
//! world.
//!
//! Placement is a bounded retry loop. When no all-grass block is found, or
//! no cell around the farmhouse qualifies as starter land, generation fails
//! with an explicit error and the caller decides whether to try another seed.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use homestead_types::{Farmhouse, Terrain, TilePos};

use crate::error::WorldError;
use crate::generation::generate_terrain;
use crate::noise::SimplexNoise;
use crate::world_map::{TerrainGrid, WorldState};

/// Knobs for world generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Noise sampling frequency per tile.
    pub noise_scale: f64,
    /// Farmhouse edge length.
    pub farmhouse_size: u32,
    /// Random placements tried before giving up.
    pub placement_attempts: u32,
    /// Half-width of the placement window around the map centre.
    pub placement_radius: u32,
    /// Owned tiles granted at the start.
    pub starter_tiles: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            noise_scale: 0.05,
            farmhouse_size: 2,
            placement_attempts: 200,
            placement_radius: 15,
            starter_tiles: 3,
        }
    }
}

/// Generate terrain, place the farmhouse and grant the starter plot.
///
/// # Errors
///
/// Returns [`WorldError::PlacementFailed`] or [`WorldError::NoStarterTiles`]
/// when the seed does not yield a playable homestead, and
/// [`WorldError::InvalidDimensions`] for unusable sizes.
pub fn generate_world(params: &GenerationParams, seed: u64) -> Result<WorldState, WorldError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let noise = SimplexNoise::new(&mut rng);
    let grid = generate_terrain(params.width, params.height, params.noise_scale, &noise)?;
    let (farmhouse, starters) = settle(&grid, params, &mut rng)?;
    let world = WorldState::new(grid, farmhouse, starters)?;

    info!(
        seed,
        width = world.width(),
        height = world.height(),
        water_ratio = world.grid().water_ratio(),
        farmhouse = %farmhouse.origin,
        starter_tiles = world.owned_count(),
        "world generated"
    );
    Ok(world)
}

/// Move the farmhouse and starter plot on the existing terrain.
///
/// Tilled soil reverts to grass and every plant and owned tile is dropped.
/// On failure the world is left untouched.
///
/// # Errors
///
/// Same placement failures as [`generate_world`].
pub fn reroll_farmhouse(
    world: &mut WorldState,
    params: &GenerationParams,
    seed: u64,
) -> Result<(), WorldError> {
    let mut fresh = world.clone();
    fresh.reset_homestead(world.farmhouse());

    let mut rng = SmallRng::seed_from_u64(seed);
    let (farmhouse, starters) = settle(fresh.grid(), params, &mut rng)?;

    fresh.reset_homestead(farmhouse);
    for pos in starters {
        fresh.claim(pos)?;
    }
    *world = fresh;

    info!(seed, farmhouse = %farmhouse.origin, "farmhouse re-rolled");
    Ok(())
}

fn settle(
    grid: &TerrainGrid,
    params: &GenerationParams,
    rng: &mut impl Rng,
) -> Result<(Farmhouse, Vec<TilePos>), WorldError> {
    let farmhouse = place_farmhouse(
        grid,
        params.farmhouse_size,
        params.placement_attempts,
        params.placement_radius,
        rng,
    )?;
    let starters = select_starter_tiles(grid, farmhouse, params.starter_tiles, rng);
    if starters.is_empty() {
        return Err(WorldError::NoStarterTiles(farmhouse.origin));
    }
    Ok((farmhouse, starters))
}

/// Try up to `attempts` random top-left corners around the map centre and
/// return the first whose whole `size x size` block is grass.
///
/// # Errors
///
/// Returns [`WorldError::PlacementFailed`] when every attempt misses.
pub fn place_farmhouse(
    grid: &TerrainGrid,
    size: u32,
    attempts: u32,
    radius: u32,
    rng: &mut impl Rng,
) -> Result<Farmhouse, WorldError> {
    let centre_x = i32::try_from(grid.width() / 2).unwrap_or(0);
    let centre_y = i32::try_from(grid.height() / 2).unwrap_or(0);
    let r = i32::try_from(radius).unwrap_or(i32::MAX);

    for attempt in 0..attempts {
        let (dx, dy) = if r == 0 {
            (0, 0)
        } else {
            (rng.random_range(-r..r), rng.random_range(-r..r))
        };
        let candidate = Farmhouse::new(TilePos::new(centre_x, centre_y).offset(dx, dy), size);
        let all_grass = candidate
            .cells()
            .into_iter()
            .all(|c| grid.get(c) == Some(Terrain::Grass));
        if all_grass {
            debug!(attempt, origin = %candidate.origin, "farmhouse placed");
            return Ok(candidate);
        }
    }
    Err(WorldError::PlacementFailed { attempts })
}

/// Shuffle the cells bordering the farmhouse and keep up to `count` that
/// are grass and not shoreline.
pub fn select_starter_tiles(
    grid: &TerrainGrid,
    farmhouse: Farmhouse,
    count: u32,
    rng: &mut impl Rng,
) -> Vec<TilePos> {
    let mut candidates = farmhouse.perimeter();
    candidates.shuffle(rng);
    let limit = usize::try_from(count).unwrap_or(usize::MAX);
    candidates
        .into_iter()
        .filter(|pos| grid.get(*pos) == Some(Terrain::Grass) && !grid.is_shoreline(*pos))
        .take(limit)
        .collect()
}
