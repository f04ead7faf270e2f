//! Scripted farmer for headless runs.
//!
//! Each frame the farmer looks at the game and queues the work that is due:
//! harvest ripe plants, hoe away dead ones, water thirsty ones, refill the
//! tank, till and sow owned soil, and finally buy one more tile of land.
//! It tracks the money and water committed within the frame so it never
//! queues more than it can pay for.

use homestead_core::Game;
use homestead_core::decision::IntentSource;
use homestead_types::{CropKind, Intent, PlantStatus, TilePos, TileType};
use homestead_world::farming::{OPTIMAL_MAX, OPTIMAL_MIN, WATERING_STEP};
use rust_decimal::Decimal;
use tracing::debug;

/// Knobs for the scripted farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarmerSettings {
    /// Refill the tank when it holds fewer units than this.
    pub refill_below: u32,
    /// Money kept back when choosing which seed to sow.
    pub sowing_cushion: Decimal,
    /// Money kept on top of the land price before expanding.
    pub land_cushion: Decimal,
}

impl Default for FarmerSettings {
    fn default() -> Self {
        Self {
            refill_below: 20,
            sowing_cushion: Decimal::from(20),
            land_cushion: Decimal::from(50),
        }
    }
}

/// Budget for one frame's worth of intents.
struct Plan {
    intents: Vec<Intent>,
    money: Decimal,
    water: u32,
    sown: bool,
}

impl Plan {
    fn spend(&mut self, amount: Decimal) {
        self.money = self.money.saturating_sub(amount);
    }
}

/// An [`IntentSource`] that plays a cautious, greedy farmer.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    settings: FarmerSettings,
}

impl Autopilot {
    /// Create a farmer with the given settings.
    pub const fn new(settings: FarmerSettings) -> Self {
        Self { settings }
    }

    fn tend_plants(game: &Game, plan: &mut Plan) {
        for (pos, plant) in game.world().plants() {
            match plant.status {
                PlantStatus::Ripe => plan.intents.push(Intent::Harvest { pos }),
                PlantStatus::Withered | PlantStatus::Drowned => {
                    plan.intents.push(Intent::Till { pos });
                }
                PlantStatus::Alive => {
                    let need = game.catalog().def(plant.crop).water_need;
                    if plan.water > 0 && is_thirsty(plant.moisture, need) {
                        plan.water = plan.water.saturating_sub(1);
                        plan.intents.push(Intent::Water { pos });
                    }
                }
            }
        }
    }

    fn refill(&self, game: &Game, plan: &mut Plan) {
        if plan.water >= self.settings.refill_below {
            return;
        }
        let quote = game.water_quote();
        if quote.max_amount == 0 {
            return;
        }
        let Some(cost) = quote
            .unit_price
            .checked_mul(Decimal::from(quote.max_amount))
        else {
            return;
        };
        plan.spend(cost);
        plan.water = plan.water.saturating_add(quote.max_amount);
        plan.intents.push(Intent::BuyWater {
            amount: quote.max_amount,
        });
    }

    fn work_soil(&self, game: &Game, plan: &mut Plan) {
        let owned: Vec<TilePos> = game.world().owned().collect();
        for pos in owned {
            match game.tile_at(pos) {
                Some(TileType::Grass) => plan.intents.push(Intent::Till { pos }),
                Some(TileType::TilledSoil) if game.world().plant(pos).is_none() => {
                    if let Some((crop, price)) = self.choose_seed(game, plan) {
                        plan.spend(price);
                        plan.sown = true;
                        plan.intents.push(Intent::Plant { pos, crop });
                    }
                }
                _ => {}
            }
        }
    }

    /// The priciest seed that leaves the cushion intact, or the cheapest
    /// seed when nothing else would keep the farm alive.
    fn choose_seed(&self, game: &Game, plan: &Plan) -> Option<(CropKind, Decimal)> {
        let crops = game.available_crops();
        let budget = plan.money.saturating_sub(self.settings.sowing_cushion);
        let preferred = crops
            .iter()
            .rev()
            .map(|(kind, def)| (*kind, Decimal::from(def.purchase_price)))
            .find(|(_, price)| *price <= budget);
        if preferred.is_some() {
            return preferred;
        }
        if game.world().has_viable_plant() || plan.sown {
            return None;
        }
        crops
            .first()
            .map(|(kind, def)| (*kind, Decimal::from(def.purchase_price)))
            .filter(|(_, price)| *price <= plan.money)
    }

    fn expand(&self, game: &Game, plan: &mut Plan) {
        let land_cost = Decimal::from(game.config().economy.land_cost);
        let cheapest = Decimal::from(game.cheapest_price().unwrap_or(0));
        let needed = land_cost
            .saturating_add(cheapest)
            .saturating_add(self.settings.land_cushion);
        if plan.money < needed {
            return;
        }

        let world = game.world();
        let target = world
            .owned()
            .flat_map(TilePos::cardinal_neighbors)
            .chain(world.farmhouse().perimeter())
            .find(|pos| game.inspect(*pos).is_some_and(|tile| tile.purchasable));
        if let Some(pos) = target {
            plan.spend(land_cost);
            plan.intents.push(Intent::BuyLand { pos });
        }
    }
}

impl IntentSource for Autopilot {
    fn collect_intents(&mut self, game: &Game) -> Vec<Intent> {
        if game.is_game_over() || game.is_paused() {
            return Vec::new();
        }

        let mut plan = Plan {
            intents: Vec::new(),
            money: game.player().money,
            water: game.player().water,
            sown: false,
        };
        Self::tend_plants(game, &mut plan);
        self.refill(game, &mut plan);
        self.work_soil(game, &mut plan);
        if !plan.sown {
            self.expand(game, &mut plan);
        }

        if !plan.intents.is_empty() {
            debug!(
                day = game.clock().day(),
                queued = plan.intents.len(),
                "farmer queued intents"
            );
        }
        plan.intents
    }
}

/// Water below the optimal floor plus one day of evaporation, as long as
/// a can of water would not push the plant past the optimal ceiling.
#[allow(clippy::arithmetic_side_effects)]
fn is_thirsty(moisture: f64, water_need: f64) -> bool {
    moisture < OPTIMAL_MIN + water_need && moisture + WATERING_STEP <= OPTIMAL_MAX
}
