//! Noise-to-terrain conversion and shoreline smoothing.
//!
//! Each cell samples the noise field at `(x * scale, y * scale)`, maps the
//! value from `[-1, 1]` to `[0, 1]`, and picks a terrain by ascending
//! threshold. A smoothing pass then turns every forest, rock or mountain cell
//! that touches water (8-neighbourhood) into grass, so the shore is always a
//! grass buffer.

use homestead_types::Terrain;

use crate::error::WorldError;
use crate::noise::SimplexNoise;
use crate::world_map::TerrainGrid;

/// Normalised noise below this is water.
pub const WATER_LEVEL: f64 = 0.30;
/// Below this (and above water) is grass.
pub const GRASS_LEVEL: f64 = 0.60;
/// Below this is forest.
pub const FOREST_LEVEL: f64 = 0.80;
/// Below this is rock; everything above is mountain.
pub const ROCK_LEVEL: f64 = 0.90;

/// Map a normalised noise value in `[0, 1]` to terrain.
pub fn classify(value: f64) -> Terrain {
    if value < WATER_LEVEL {
        Terrain::Water
    } else if value < GRASS_LEVEL {
        Terrain::Grass
    } else if value < FOREST_LEVEL {
        Terrain::Forest
    } else if value < ROCK_LEVEL {
        Terrain::Rock
    } else {
        Terrain::Mountain
    }
}

/// Sample `noise` over a `width x height` grid and classify every cell,
/// then smooth the shoreline.
///
/// # Errors
///
/// Returns [`WorldError::InvalidDimensions`] for unusable dimensions.
#[allow(clippy::arithmetic_side_effects)]
pub fn generate_terrain(
    width: u32,
    height: u32,
    scale: f64,
    noise: &SimplexNoise,
) -> Result<TerrainGrid, WorldError> {
    let mut grid = TerrainGrid::from_fn(width, height, |pos| {
        let raw = noise.sample(f64::from(pos.x) * scale, f64::from(pos.y) * scale);
        classify((raw + 1.0) / 2.0)
    })?;
    smooth_shoreline(&mut grid);
    Ok(grid)
}

/// Replace every non-grass land cell touching water with grass.
///
/// Water is read from the grid before smoothing; only land cells change.
pub fn smooth_shoreline(grid: &mut TerrainGrid) {
    let smoothed = grid.map_cells(|pos, terrain| {
        let rough = matches!(terrain, Terrain::Forest | Terrain::Rock | Terrain::Mountain);
        if rough && pos.surrounding().iter().any(|n| grid.is_water(*n)) {
            Terrain::Grass
        } else {
            terrain
        }
    });
    *grid = smoothed;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use homestead_types::TilePos;

    use super::*;

    #[test]
    fn thresholds_ascend() {
        assert_eq!(classify(0.0), Terrain::Water);
        assert_eq!(classify(0.29), Terrain::Water);
        assert_eq!(classify(0.30), Terrain::Grass);
        assert_eq!(classify(0.59), Terrain::Grass);
        assert_eq!(classify(0.60), Terrain::Forest);
        assert_eq!(classify(0.80), Terrain::Rock);
        assert_eq!(classify(0.89), Terrain::Rock);
        assert_eq!(classify(0.90), Terrain::Mountain);
        assert_eq!(classify(1.0), Terrain::Mountain);
    }

    #[test]
    fn smoothing_turns_shore_land_into_grass() {
        let mut grid = TerrainGrid::from_cells(
            3,
            3,
            vec![
                Terrain::Water,
                Terrain::Forest,
                Terrain::Mountain,
                Terrain::Rock,
                Terrain::Mountain,
                Terrain::Forest,
                Terrain::Forest,
                Terrain::Forest,
                Terrain::Forest,
            ],
        )
        .unwrap();
        smooth_shoreline(&mut grid);
        assert_eq!(grid.get(TilePos::new(1, 0)), Some(Terrain::Grass));
        assert_eq!(grid.get(TilePos::new(0, 1)), Some(Terrain::Grass));
        assert_eq!(grid.get(TilePos::new(1, 1)), Some(Terrain::Grass));
        assert_eq!(grid.get(TilePos::new(2, 0)), Some(Terrain::Mountain));
        assert_eq!(grid.get(TilePos::new(2, 2)), Some(Terrain::Forest));
        assert_eq!(grid.get(TilePos::new(0, 0)), Some(Terrain::Water));
        assert_eq!((grid.width(), grid.height()), (3, 3));
    }

    #[test]
    fn generated_terrain_never_puts_highland_next_to_water() {
        for seed in 0..40_u64 {
            let noise = SimplexNoise::new(&mut SmallRng::seed_from_u64(seed));
            let grid = generate_terrain(50, 50, 0.05, &noise).unwrap();
            for pos in grid.positions() {
                let terrain = grid.get(pos).unwrap();
                if matches!(terrain, Terrain::Forest | Terrain::Rock | Terrain::Mountain) {
                    assert!(
                        !pos.surrounding().iter().any(|n| grid.is_water(*n)),
                        "seed {seed}: {terrain:?} at {pos} touches water"
                    );
                }
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = SimplexNoise::new(&mut SmallRng::seed_from_u64(5));
        let b = SimplexNoise::new(&mut SmallRng::seed_from_u64(5));
        assert_eq!(
            generate_terrain(30, 20, 0.05, &a).unwrap(),
            generate_terrain(30, 20, 0.05, &b).unwrap()
        );
    }
}
