//! The game aggregate.
//!
//! [`Game`] owns everything one running game needs: the world, the clock,
//! the player's purse and tank, the money ledger and the configuration it was
//! built from. The simulation loop holds it exclusively; renderers read it
//! through [`Game::snapshot`] and the query methods, and send changes through
//! the `attempt_*` mutators in [`crate::actions`] or [`Game::apply`].

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use homestead_ledger::conservation::ReconcileResult;
use homestead_ledger::{Ledger, LedgerError, WaterPricing, pricing};
use homestead_types::{
    CropCatalog, CropDef, CropKind, LedgerEntry, Notification, PlantView, PlayerState, TileInspection,
    TilePos, TileType, WaterQuote, WorldSnapshot,
};
use homestead_world::{GenerationParams, WorldError, WorldState, farming, generate_world, reroll_farmhouse};

use crate::clock::{ClockError, SimClock};
use crate::config::{ConfigError, GameConfig};

/// Errors that can occur while building or regenerating a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The configuration is unusable.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The clock could not be built.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// World construction failed for a reason retries cannot fix.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Every seed tried produced a map without room for a homestead.
    #[error("no playable map after {attempts} attempts; regeneration required")]
    RegenerationRequired {
        /// Seeds tried.
        attempts: u32,
    },
}

/// One running game.
#[derive(Debug, Clone)]
pub struct Game {
    /// Configuration the game was built from.
    pub(crate) config: GameConfig,
    /// Crop catalog with configured overrides.
    pub(crate) catalog: CropCatalog,
    /// Seed of the current terrain.
    pub(crate) seed: u64,
    /// Terrain, farmhouse, ownership and plants.
    pub(crate) world: WorldState,
    /// Simulated time.
    pub(crate) clock: SimClock,
    /// Purse, score and tank.
    pub(crate) player: PlayerState,
    /// Every money movement so far.
    pub(crate) ledger: Ledger,
    /// Set once the player can no longer recover.
    pub(crate) game_over: bool,
}

impl Game {
    /// Build a game from `config`, drawing a random seed if none is
    /// configured.
    ///
    /// # Errors
    ///
    /// See [`Game::with_seed`].
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let seed = config.world.seed.unwrap_or_else(rand::random);
        Self::with_seed(config, seed)
    }

    /// Build a game on the terrain generated from `seed`.
    ///
    /// Maps that cannot host a homestead are skipped by trying `seed + 1`,
    /// `seed + 2`, and so on, up to `world.generation_retries` extra seeds.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] for an invalid configuration and
    /// [`GameError::RegenerationRequired`] when every seed fails.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let params = config.world.generation_params();
        let retries = config.world.generation_retries;

        let mut candidate = seed;
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            match generate_world(&params, candidate) {
                Ok(world) => return Self::from_world(config, world, candidate),
                Err(err @ (WorldError::PlacementFailed { .. } | WorldError::NoStarterTiles(_))) => {
                    warn!(seed = candidate, attempts, error = %err, "map cannot host a homestead");
                    if attempts > retries {
                        return Err(GameError::RegenerationRequired { attempts });
                    }
                    candidate = candidate.wrapping_add(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Start a game on an already built world.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] for an invalid configuration.
    pub fn from_world(config: &GameConfig, world: WorldState, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let catalog = config.catalog();
        let clock = SimClock::new(config.time.day_duration_ms)?;
        let player = fresh_player(config, &catalog);
        Ok(Self {
            config: config.clone(),
            catalog,
            seed,
            world,
            clock,
            player,
            ledger: Ledger::new(),
            game_over: false,
        })
    }

    /// Throw the current game away and generate a new world.
    ///
    /// # Errors
    ///
    /// Same as [`Game::with_seed`]; the current game is kept on failure.
    pub fn generate_world(&mut self, seed: Option<u64>) -> Result<WorldSnapshot, GameError> {
        let seed = seed.unwrap_or_else(rand::random);
        *self = Self::with_seed(&self.config, seed)?;
        Ok(self.snapshot())
    }

    /// Move the farmhouse on the current terrain and restart the game there.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] if no placement is found for `seed`; the
    /// current game is kept.
    pub fn reroll_farmhouse(&mut self, seed: u64) -> Result<WorldSnapshot, GameError> {
        let params = self.generation_params();
        reroll_farmhouse(&mut self.world, &params, seed)?;
        self.clock = SimClock::new(self.config.time.day_duration_ms)?;
        self.player = fresh_player(&self.config, &self.catalog);
        self.ledger = Ledger::new();
        self.game_over = false;
        Ok(self.snapshot())
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Serializable view of the whole game.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            seed: self.seed,
            width: self.world.width(),
            height: self.world.height(),
            tiles: self.world.tile_types(),
            farmhouse: self.world.farmhouse(),
            owned: self.world.owned().collect(),
            plants: self
                .world
                .plants()
                .map(|(pos, plant)| PlantView {
                    pos,
                    plant: plant.clone(),
                })
                .collect(),
            clock: self.clock.state(),
            player: self.player.clone(),
            game_over: self.game_over,
        }
    }

    /// Tile type at `pos` with the farmhouse overlaid, or `None` off the map.
    pub fn tile_at(&self, pos: TilePos) -> Option<TileType> {
        self.world.tile_type_at(pos)
    }

    /// What the hand tool shows for `pos`, or `None` off the map.
    pub fn inspect(&self, pos: TilePos) -> Option<TileInspection> {
        let tile_type = self.world.tile_type_at(pos)?;
        let plant = self
            .world
            .plant(pos)
            .map(|plant| farming::report(plant, self.catalog.def(plant.crop)));
        Some(TileInspection {
            pos,
            tile_type,
            owned: self.world.is_owned(pos),
            purchasable: self.check_land_purchase(pos).is_ok(),
            plant,
        })
    }

    /// Seeds the player may buy, cheapest first.
    pub fn available_crops(&self) -> Vec<(CropKind, &CropDef)> {
        pricing::available_crops(&self.catalog, self.player.score)
    }

    /// Largest water purchase possible right now.
    pub fn water_quote(&self) -> WaterQuote {
        pricing::quote_water(
            self.water_pricing(),
            self.player.money,
            self.player.water,
            self.world.has_viable_plant(),
            self.cheapest_price(),
        )
    }

    /// Price of the cheapest unlocked seed.
    pub fn cheapest_price(&self) -> Option<u32> {
        pricing::cheapest_unlocked_price(&self.catalog, self.player.score)
    }

    /// Check the ledger against the purse.
    pub fn reconcile(&self) -> ReconcileResult {
        self.ledger
            .reconcile(self.config.economy.starting_money, self.player.money)
    }

    /// Whether the game has ended.
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the clock is paused.
    pub const fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Pause or resume the clock. A finished game stays paused. Returns the
    /// resulting pause state.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let paused = paused || self.game_over;
        if paused != self.clock.is_paused() {
            info!(paused, day = self.clock.day(), "clock pause changed");
        }
        self.clock.set_paused(paused);
        paused
    }

    /// Seed of the current terrain.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The world.
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    /// The clock.
    pub const fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Purse, score and tank.
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The money ledger.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The crop catalog in use.
    pub const fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// The configuration the game was built from.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    // -------------------------------------------------------------------
    // Shared rule helpers
    // -------------------------------------------------------------------

    pub(crate) const fn generation_params(&self) -> GenerationParams {
        self.config.world.generation_params()
    }

    pub(crate) const fn water_pricing(&self) -> WaterPricing {
        self.config.economy.water_pricing()
    }

    /// Emit one notification per crop unlocked since the last check.
    pub(crate) fn check_unlocks(&mut self) -> Vec<Notification> {
        let score = self.player.score;
        let fresh = pricing::newly_unlocked(&self.catalog, self.player.unlocked_crop_count, score);
        if fresh.is_empty() {
            return Vec::new();
        }
        self.player.unlocked_crop_count = self.catalog.unlocked_count(score);
        fresh
            .into_iter()
            .map(|crop| {
                info!(%crop, score, "crop unlocked");
                Notification::CropUnlocked { crop }
            })
            .collect()
    }

    /// End the game if no seed is affordable and nothing viable grows.
    pub(crate) fn check_game_over(&mut self) -> Option<Notification> {
        if self.game_over
            || !pricing::is_game_over(
                self.player.money,
                self.cheapest_price(),
                self.world.has_viable_plant(),
            )
        {
            return None;
        }
        self.game_over = true;
        self.clock.set_paused(true);
        info!(
            day = self.clock.day(),
            score = self.player.score,
            money = %self.player.money,
            "game over"
        );
        Some(Notification::GameOver {
            day: self.clock.day(),
            score: self.player.score,
        })
    }
}

fn fresh_player(config: &GameConfig, catalog: &CropCatalog) -> PlayerState {
    PlayerState {
        money: config.economy.starting_money,
        score: 0,
        water: config.economy.starting_water.min(config.economy.max_water),
        unlocked_crop_count: catalog.unlocked_count(0),
    }
}

/// Log a ledger entry that could not be recorded. Reconciliation will then
/// report the gap.
pub(crate) fn log_ledger_failure(result: Result<&LedgerEntry, LedgerError>, amount: Decimal) {
    if let Err(err) = result {
        error!(error = %err, %amount, "ledger entry not recorded");
    }
}
