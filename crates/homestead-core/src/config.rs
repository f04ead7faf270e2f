//! Configuration loading and typed config structures for the Homestead simulation.
//!
//! The canonical configuration lives in `homestead-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, a loader that reads the file, and [`GameConfig::validate`] which
//! rejects values the simulation cannot run with.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard game.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use homestead_ledger::WaterPricing;
use homestead_types::{CropCatalog, CropDef, CropKind};
use homestead_world::GenerationParams;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "HOMESTEAD_CONFIG";

/// File read when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "homestead-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unplayable game.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `homestead-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Map size, seed and generation parameters.
    #[serde(default)]
    pub world: WorldConfig,

    /// Day length.
    #[serde(default)]
    pub time: TimeConfig,

    /// Prices, starting purse and water tank.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Per-crop overrides of the standard catalog.
    #[serde(default)]
    pub crops: BTreeMap<CropKind, CropOverride>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Bounds for headless runs.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`GameConfig::from_file`] for an existing file.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Path of the configuration file: `$HOMESTEAD_CONFIG` or
    /// `homestead-config.yaml`.
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// The crop catalog with overrides applied.
    pub fn catalog(&self) -> CropCatalog {
        self.crops
            .iter()
            .fold(CropCatalog::standard(), |catalog, (&kind, over)| {
                let def = over.apply(catalog.def(kind));
                catalog.with_def(kind, def)
            })
    }

    /// Reject configurations the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if world.width == 0 || world.height == 0 {
            return Err(invalid("world.width and world.height must be at least 1"));
        }
        if world.farmhouse_size == 0 || world.farmhouse_size > world.width.min(world.height) {
            return Err(invalid("world.farmhouse_size must fit inside the map"));
        }
        if world.placement_attempts == 0 {
            return Err(invalid("world.placement_attempts must be at least 1"));
        }
        if !world.noise_scale.is_finite() || world.noise_scale <= 0.0 {
            return Err(invalid("world.noise_scale must be a positive number"));
        }
        if self.time.day_duration_ms == 0 {
            return Err(invalid("time.day_duration_ms must be at least 1"));
        }

        let economy = &self.economy;
        if economy.land_cost == 0 {
            return Err(invalid("economy.land_cost must be positive"));
        }
        if economy.water_unit_price <= Decimal::ZERO {
            return Err(invalid("economy.water_unit_price must be positive"));
        }
        if economy.tax_per_tile.is_sign_negative() {
            return Err(invalid("economy.tax_per_tile must not be negative"));
        }
        if economy.starting_money.is_sign_negative() {
            return Err(invalid("economy.starting_money must not be negative"));
        }
        if economy.max_water_per_purchase == 0 {
            return Err(invalid("economy.max_water_per_purchase must be at least 1"));
        }
        if economy.starting_water > economy.max_water {
            return Err(invalid("economy.starting_water exceeds economy.max_water"));
        }

        for (kind, def) in self.catalog().iter() {
            if def.purchase_price == 0 || def.sell_price == 0 {
                return Err(invalid(format!("crops.{kind}: prices must be positive")));
            }
            if def.growth_days == 0 {
                return Err(invalid(format!("crops.{kind}: growth_days must be at least 1")));
            }
            if !def.water_need.is_finite() || def.water_need < 0.0 {
                return Err(invalid(format!(
                    "crops.{kind}: water_need must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Map size and generation parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Map width in tiles.
    #[serde(default = "default_map_size")]
    pub width: u32,

    /// Map height in tiles.
    #[serde(default = "default_map_size")]
    pub height: u32,

    /// World seed. A random seed is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Noise frequency applied to tile coordinates.
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,

    /// Farmhouse edge length in tiles.
    #[serde(default = "default_farmhouse_size")]
    pub farmhouse_size: u32,

    /// Random positions tried before placement gives up.
    #[serde(default = "default_placement_attempts")]
    pub placement_attempts: u32,

    /// Half-width of the window around the map centre used for placement.
    #[serde(default = "default_placement_radius")]
    pub placement_radius: u32,

    /// Tiles granted next to the farmhouse at the start.
    #[serde(default = "default_starter_tiles")]
    pub starter_tiles: u32,

    /// Extra seeds tried when a map cannot host a homestead.
    #[serde(default = "default_generation_retries")]
    pub generation_retries: u32,
}

impl WorldConfig {
    /// Parameters for [`homestead_world::generate_world`].
    pub const fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            width: self.width,
            height: self.height,
            noise_scale: self.noise_scale,
            farmhouse_size: self.farmhouse_size,
            placement_attempts: self.placement_attempts,
            placement_radius: self.placement_radius,
            starter_tiles: self.starter_tiles,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_map_size(),
            height: default_map_size(),
            seed: None,
            noise_scale: default_noise_scale(),
            farmhouse_size: default_farmhouse_size(),
            placement_attempts: default_placement_attempts(),
            placement_radius: default_placement_radius(),
            starter_tiles: default_starter_tiles(),
            generation_retries: default_generation_retries(),
        }
    }
}

/// Time settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeConfig {
    /// Real milliseconds per simulated day.
    #[serde(default = "default_day_duration_ms")]
    pub day_duration_ms: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            day_duration_ms: default_day_duration_ms(),
        }
    }
}

/// Economy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Money at the start of a game.
    #[serde(default = "default_starting_money")]
    pub starting_money: Decimal,

    /// Water units in the tank at the start of a game.
    #[serde(default = "default_starting_water")]
    pub starting_water: u32,

    /// Price of one tile of land.
    #[serde(default = "default_land_cost")]
    pub land_cost: u32,

    /// Tax charged per owned tile at each rollover.
    #[serde(default = "default_tax_per_tile")]
    pub tax_per_tile: Decimal,

    /// Tank capacity.
    #[serde(default = "default_max_water")]
    pub max_water: u32,

    /// Price of one water unit.
    #[serde(default = "default_water_unit_price")]
    pub water_unit_price: Decimal,

    /// Largest water purchase in one transaction.
    #[serde(default = "default_max_water_per_purchase")]
    pub max_water_per_purchase: u32,
}

impl EconomyConfig {
    /// Water shop parameters.
    pub const fn water_pricing(&self) -> WaterPricing {
        WaterPricing {
            unit_price: self.water_unit_price,
            max_water: self.max_water,
            max_per_purchase: self.max_water_per_purchase,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: default_starting_money(),
            starting_water: default_starting_water(),
            land_cost: default_land_cost(),
            tax_per_tile: default_tax_per_tile(),
            max_water: default_max_water(),
            water_unit_price: default_water_unit_price(),
            max_water_per_purchase: default_max_water_per_purchase(),
        }
    }
}

/// Partial crop definition; absent fields keep the standard value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CropOverride {
    /// Replacement display name.
    pub display_name: Option<String>,
    /// Replacement seed price.
    pub purchase_price: Option<u32>,
    /// Replacement harvest price.
    pub sell_price: Option<u32>,
    /// Replacement moisture loss per day.
    pub water_need: Option<f64>,
    /// Replacement days to ripen.
    pub growth_days: Option<u32>,
    /// Replacement unlock threshold.
    pub unlock_score: Option<u64>,
}

impl CropOverride {
    /// Merge the override onto `base`.
    pub fn apply(&self, base: &CropDef) -> CropDef {
        CropDef {
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| base.display_name.clone()),
            purchase_price: self.purchase_price.unwrap_or(base.purchase_price),
            sell_price: self.sell_price.unwrap_or(base.sell_price),
            water_need: self.water_need.unwrap_or(base.water_need),
            growth_days: self.growth_days.unwrap_or(base.growth_days),
            unlock_score: self.unlock_score.unwrap_or(base.unlock_score),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Bounds for a headless run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop once this day is reached.
    #[serde(default = "default_max_days")]
    pub max_days: u32,

    /// Simulated milliseconds per frame.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u32,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            frame_ms: default_frame_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_map_size() -> u32 {
    50
}

const fn default_noise_scale() -> f64 {
    0.05
}

const fn default_farmhouse_size() -> u32 {
    2
}

const fn default_placement_attempts() -> u32 {
    200
}

const fn default_placement_radius() -> u32 {
    15
}

const fn default_starter_tiles() -> u32 {
    3
}

const fn default_generation_retries() -> u32 {
    8
}

const fn default_day_duration_ms() -> u32 {
    10_000
}

const fn default_starting_money() -> Decimal {
    Decimal::ONE_HUNDRED
}

const fn default_starting_water() -> u32 {
    100
}

const fn default_land_cost() -> u32 {
    100
}

const fn default_tax_per_tile() -> Decimal {
    Decimal::from_parts(25, 0, 0, false, 2)
}

const fn default_max_water() -> u32 {
    999
}

const fn default_water_unit_price() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 1)
}

const fn default_max_water_per_purchase() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_max_days() -> u32 {
    30
}

const fn default_frame_ms() -> u32 {
    16
}
