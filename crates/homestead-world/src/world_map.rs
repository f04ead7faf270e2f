//! The tile grid and the mutable world built on it.
//!
//! [`TerrainGrid`] is a row-major `width x height` buffer of [`Terrain`].
//! [`WorldState`] adds the farmhouse overlay, the owned-tile set and the
//! plants, and enforces the tile invariants in its mutators:
//!
//! - owned tiles are never water and never under the farmhouse;
//! - every plant sits on tilled soil, at most one per tile.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use homestead_types::{Farmhouse, Plant, Terrain, TilePos, TileType};

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// TerrainGrid
// ---------------------------------------------------------------------------

/// A fixed-size grid of terrain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    cells: Vec<Terrain>,
}

impl TerrainGrid {
    /// Build a grid by evaluating `f` at every position, row by row.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is zero
    /// or does not fit a signed coordinate.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(TilePos) -> Terrain,
    ) -> Result<Self, WorldError> {
        let (w, h) = Self::signed_dims(width, height)?;
        let cells = (0..h)
            .flat_map(|y| (0..w).map(move |x| TilePos::new(x, y)))
            .map(&mut f)
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from a row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] for unusable dimensions or
    /// [`WorldError::CellCountMismatch`] if the buffer has the wrong length.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Terrain>) -> Result<Self, WorldError> {
        Self::signed_dims(width, height)?;
        let expected = usize::try_from(u64::from(width).saturating_mul(u64::from(height)))
            .unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(WorldError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    fn signed_dims(width: u32, height: u32) -> Result<(i32, i32), WorldError> {
        let invalid = WorldError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(invalid),
        }
    }

    /// Grid width in tiles.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        let x = u32::try_from(pos.x).ok()?;
        let y = u32::try_from(pos.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let flat = u64::from(y)
            .checked_mul(u64::from(self.width))?
            .checked_add(u64::from(x))?;
        usize::try_from(flat).ok()
    }

    /// Whether `pos` lies on the grid.
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        self.index(pos).is_some()
    }

    /// Terrain at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: TilePos) -> Option<Terrain> {
        self.index(pos).and_then(|i| self.cells.get(i)).copied()
    }

    /// Overwrite the terrain at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is off the grid.
    pub fn set(&mut self, pos: TilePos, terrain: Terrain) -> Result<(), WorldError> {
        let cell = self
            .index(pos)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(WorldError::OutOfBounds(pos))?;
        *cell = terrain;
        Ok(())
    }

    /// Whether the tile at `pos` is water. Off-grid positions are not.
    pub fn is_water(&self, pos: TilePos) -> bool {
        self.get(pos) == Some(Terrain::Water)
    }

    /// Whether any cardinal neighbour of `pos` is water.
    pub fn is_shoreline(&self, pos: TilePos) -> bool {
        pos.cardinal_neighbors().into_iter().any(|n| self.is_water(n))
    }

    /// Every position on the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + use<> {
        let w = i32::try_from(self.width).unwrap_or(0);
        let h = i32::try_from(self.height).unwrap_or(0);
        (0..h).flat_map(move |y| (0..w).map(move |x| TilePos::new(x, y)))
    }

    /// A grid of the same size where each cell is `f(pos, terrain)`.
    ///
    /// `f` sees the cell values of `self`, never partially rewritten ones.
    #[must_use]
    pub fn map_cells(&self, mut f: impl FnMut(TilePos, Terrain) -> Terrain) -> Self {
        let cells = self
            .positions()
            .zip(self.cells.iter())
            .map(|(pos, terrain)| f(pos, *terrain))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Row-major terrain cells.
    pub fn cells(&self) -> &[Terrain] {
        &self.cells
    }

    /// Share of water cells, in `[0, 1]`.
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub fn water_ratio(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let water = self.cells.iter().filter(|t| **t == Terrain::Water).count();
        water as f64 / self.cells.len() as f64
    }
}

// ---------------------------------------------------------------------------
// WorldState
// ---------------------------------------------------------------------------

/// The grid plus everything the player has done to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    grid: TerrainGrid,
    farmhouse: Farmhouse,
    owned: BTreeSet<TilePos>,
    plants: BTreeMap<TilePos, Plant>,
}

impl WorldState {
    /// Assemble a world from a grid, a farmhouse and an initial set of owned
    /// tiles.
    ///
    /// # Errors
    ///
    /// Fails if the farmhouse leaves the grid, or an owned tile is off the
    /// grid, water, or under the farmhouse.
    pub fn new(
        grid: TerrainGrid,
        farmhouse: Farmhouse,
        owned: impl IntoIterator<Item = TilePos>,
    ) -> Result<Self, WorldError> {
        if let Some(off) = farmhouse.cells().into_iter().find(|c| !grid.in_bounds(*c)) {
            return Err(WorldError::OutOfBounds(off));
        }
        let mut world = Self {
            grid,
            farmhouse,
            owned: BTreeSet::new(),
            plants: BTreeMap::new(),
        };
        for pos in owned {
            world.claim(pos)?;
        }
        Ok(world)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// The underlying terrain grid.
    pub const fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    /// Grid width in tiles.
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Grid height in tiles.
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    /// The farmhouse footprint.
    pub const fn farmhouse(&self) -> Farmhouse {
        self.farmhouse
    }

    /// Whether `pos` lies on the grid.
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        self.grid.in_bounds(pos)
    }

    /// Raw terrain at `pos`, ignoring the farmhouse overlay.
    pub fn terrain_at(&self, pos: TilePos) -> Option<Terrain> {
        self.grid.get(pos)
    }

    /// Tile type at `pos` with the farmhouse overlaid; `None` off the grid.
    pub fn tile_type_at(&self, pos: TilePos) -> Option<TileType> {
        let terrain = self.grid.get(pos)?;
        if self.farmhouse.contains(pos) {
            Some(TileType::Farmhouse)
        } else {
            Some(TileType::from(terrain))
        }
    }

    /// Whether the tile at `pos` is water.
    pub fn is_water(&self, pos: TilePos) -> bool {
        self.grid.is_water(pos)
    }

    /// Whether any cardinal neighbour of `pos` is water.
    pub fn is_shoreline(&self, pos: TilePos) -> bool {
        self.grid.is_shoreline(pos)
    }

    /// Whether the player owns `pos`.
    pub fn is_owned(&self, pos: TilePos) -> bool {
        self.owned.contains(&pos)
    }

    /// Whether `pos` touches the farm: a cardinal neighbour is owned, or the
    /// tile borders the farmhouse along an edge.
    pub fn is_owned_or_adjacent(&self, pos: TilePos) -> bool {
        self.farmhouse.is_cardinally_adjacent(pos)
            || pos.cardinal_neighbors().iter().any(|n| self.owned.contains(n))
    }

    /// Owned tiles in row-major order.
    pub fn owned(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.owned.iter().copied()
    }

    /// Number of owned tiles.
    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    /// The plant at `pos`, if any.
    pub fn plant(&self, pos: TilePos) -> Option<&Plant> {
        self.plants.get(&pos)
    }

    /// Mutable access to the plant at `pos`.
    pub fn plant_mut(&mut self, pos: TilePos) -> Option<&mut Plant> {
        self.plants.get_mut(&pos)
    }

    /// All plants in row-major order.
    pub fn plants(&self) -> impl Iterator<Item = (TilePos, &Plant)> {
        self.plants.iter().map(|(pos, plant)| (*pos, plant))
    }

    /// All plants, mutably.
    pub fn plants_mut(&mut self) -> impl Iterator<Item = (TilePos, &mut Plant)> {
        self.plants.iter_mut().map(|(pos, plant)| (*pos, plant))
    }

    /// Whether any plant is alive or ripe.
    pub fn has_viable_plant(&self) -> bool {
        self.plants.values().any(|p| p.status.is_viable())
    }

    /// Tile types for the whole grid, row-major, farmhouse overlaid.
    pub fn tile_types(&self) -> Vec<TileType> {
        self.grid
            .positions()
            .filter_map(|pos| self.tile_type_at(pos))
            .collect()
    }

    // -------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------

    /// Add `pos` to the owned set.
    ///
    /// # Errors
    ///
    /// Fails for off-grid, water, and farmhouse tiles.
    pub fn claim(&mut self, pos: TilePos) -> Result<(), WorldError> {
        let terrain = self.grid.get(pos).ok_or(WorldError::OutOfBounds(pos))?;
        if terrain == Terrain::Water {
            return Err(WorldError::WrongTerrain {
                pos,
                expected: Terrain::Grass,
                found: terrain,
            });
        }
        if self.farmhouse.contains(pos) {
            return Err(WorldError::UnderFarmhouse(pos));
        }
        self.owned.insert(pos);
        Ok(())
    }

    /// Turn owned grass at `pos` into tilled soil.
    ///
    /// # Errors
    ///
    /// Fails if the tile is not owned or is not grass.
    pub fn till(&mut self, pos: TilePos) -> Result<(), WorldError> {
        let terrain = self.grid.get(pos).ok_or(WorldError::OutOfBounds(pos))?;
        if !self.is_owned(pos) {
            return Err(WorldError::NotOwned(pos));
        }
        if terrain != Terrain::Grass {
            return Err(WorldError::WrongTerrain {
                pos,
                expected: Terrain::Grass,
                found: terrain,
            });
        }
        self.grid.set(pos, Terrain::TilledSoil)
    }

    /// Put `plant` on the tilled soil at `pos`.
    ///
    /// # Errors
    ///
    /// Fails if the tile is not tilled soil or already has a plant.
    pub fn insert_plant(&mut self, pos: TilePos, plant: Plant) -> Result<(), WorldError> {
        let terrain = self.grid.get(pos).ok_or(WorldError::OutOfBounds(pos))?;
        if terrain != Terrain::TilledSoil {
            return Err(WorldError::WrongTerrain {
                pos,
                expected: Terrain::TilledSoil,
                found: terrain,
            });
        }
        if self.plants.contains_key(&pos) {
            return Err(WorldError::Occupied(pos));
        }
        self.plants.insert(pos, plant);
        Ok(())
    }

    /// Take the plant off `pos`. The soil stays tilled.
    pub fn remove_plant(&mut self, pos: TilePos) -> Option<Plant> {
        self.plants.remove(&pos)
    }

    /// Forget every plant, owned tile and tilled cell, and move the
    /// farmhouse. Used when re-rolling the homestead on the same terrain.
    pub(crate) fn reset_homestead(&mut self, farmhouse: Farmhouse) {
        self.plants.clear();
        self.owned.clear();
        for cell in &mut self.grid.cells {
            if *cell == Terrain::TilledSoil {
                *cell = Terrain::Grass;
            }
        }
        self.farmhouse = farmhouse;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_types::{CropKind, PlantStatus};

    use super::*;

    /// 6x6 all-grass grid with a water cell at (5, 0).
    fn small_world() -> WorldState {
        let grid = TerrainGrid::from_fn(6, 6, |p| {
            if p == TilePos::new(5, 0) {
                Terrain::Water
            } else {
                Terrain::Grass
            }
        })
        .unwrap();
        let farmhouse = Farmhouse::new(TilePos::new(2, 2), 2);
        WorldState::new(grid, farmhouse, [TilePos::new(1, 2)]).unwrap()
    }

    #[test]
    fn farmhouse_overlays_grid() {
        let world = small_world();
        assert_eq!(world.tile_type_at(TilePos::new(3, 3)), Some(TileType::Farmhouse));
        assert_eq!(world.terrain_at(TilePos::new(3, 3)), Some(Terrain::Grass));
        assert_eq!(world.tile_type_at(TilePos::new(0, 0)), Some(TileType::Grass));
        assert_eq!(world.tile_type_at(TilePos::new(6, 0)), None);
        assert_eq!(world.tile_type_at(TilePos::new(-1, 0)), None);
    }

    #[test]
    fn tile_types_cover_the_grid() {
        let world = small_world();
        let tiles = world.tile_types();
        assert_eq!(tiles.len(), 36);
        assert_eq!(tiles.iter().filter(|t| **t == TileType::Farmhouse).count(), 4);
    }

    #[test]
    fn shoreline_uses_cardinal_neighbours() {
        let world = small_world();
        assert!(world.is_shoreline(TilePos::new(4, 0)));
        assert!(world.is_shoreline(TilePos::new(5, 1)));
        assert!(!world.is_shoreline(TilePos::new(4, 1)));
    }

    #[test]
    fn adjacency_counts_owned_and_farmhouse() {
        let world = small_world();
        assert!(world.is_owned_or_adjacent(TilePos::new(0, 2)));
        assert!(world.is_owned_or_adjacent(TilePos::new(4, 3)));
        assert!(!world.is_owned_or_adjacent(TilePos::new(0, 5)));
    }

    #[test]
    fn claim_rejects_water_and_farmhouse() {
        let mut world = small_world();
        assert!(world.claim(TilePos::new(5, 0)).is_err());
        assert_eq!(
            world.claim(TilePos::new(2, 2)),
            Err(WorldError::UnderFarmhouse(TilePos::new(2, 2)))
        );
        assert_eq!(
            world.claim(TilePos::new(9, 9)),
            Err(WorldError::OutOfBounds(TilePos::new(9, 9)))
        );
    }

    #[test]
    fn plants_need_tilled_soil() {
        let mut world = small_world();
        let pos = TilePos::new(1, 2);
        let seed = Plant::sown(CropKind::Carrot, 4.0);
        assert!(world.insert_plant(pos, seed.clone()).is_err());
        world.till(pos).unwrap();
        world.insert_plant(pos, seed.clone()).unwrap();
        assert_eq!(world.insert_plant(pos, seed), Err(WorldError::Occupied(pos)));
        assert!(world.has_viable_plant());

        world.plant_mut(pos).unwrap().status = PlantStatus::Withered;
        assert!(!world.has_viable_plant());
        assert!(world.remove_plant(pos).is_some());
        assert_eq!(world.terrain_at(pos), Some(Terrain::TilledSoil));
    }

    #[test]
    fn till_requires_ownership() {
        let mut world = small_world();
        assert_eq!(
            world.till(TilePos::new(0, 0)),
            Err(WorldError::NotOwned(TilePos::new(0, 0)))
        );
    }

    #[test]
    fn reset_reverts_tilled_soil() {
        let mut world = small_world();
        world.till(TilePos::new(1, 2)).unwrap();
        world.reset_homestead(Farmhouse::new(TilePos::new(0, 4), 2));
        assert_eq!(world.owned_count(), 0);
        assert_eq!(world.terrain_at(TilePos::new(1, 2)), Some(Terrain::Grass));
        assert_eq!(world.tile_type_at(TilePos::new(1, 5)), Some(TileType::Farmhouse));
    }

    #[test]
    fn from_cells_checks_length() {
        let err = TerrainGrid::from_cells(2, 2, vec![Terrain::Grass; 3]).unwrap_err();
        assert_eq!(
            err,
            WorldError::CellCountMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert!(TerrainGrid::from_cells(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn map_cells_reads_the_original_grid() {
        let grid = TerrainGrid::from_fn(3, 1, |pos| {
            if pos.x == 0 {
                Terrain::Water
            } else {
                Terrain::Forest
            }
        })
        .unwrap();
        // Flooding every cell next to water must not spread along the row.
        let flooded = grid.map_cells(|pos, terrain| {
            if pos.cardinal_neighbors().iter().any(|n| grid.is_water(*n)) {
                Terrain::Water
            } else {
                terrain
            }
        });
        assert_eq!(
            flooded.cells(),
            &[Terrain::Water, Terrain::Water, Terrain::Forest]
        );
        assert_eq!(flooded.width(), 3);
    }
}
