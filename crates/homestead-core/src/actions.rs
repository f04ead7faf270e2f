//! Player actions.
//!
//! Each `attempt_*` method either applies one action and returns an
//! [`ActionOutcome`], or returns a [`Rejection`] and leaves the game
//! untouched. Checks run in a fixed order so the reason reported for a tile
//! that breaks several rules is stable.
//!
//! Money leaves the purse through seeds, land and water, and enters through
//! harvests. Every movement is recorded in the ledger; purchases end with a
//! game-over check and score gains with an unlock check.

use rust_decimal::Decimal;
use tracing::{debug, info};

use homestead_ledger::pricing;
use homestead_types::{
    ActionEffect, ActionOutcome, CropKind, Intent, Notification, Plant, PlantStatus, Rejection,
    RejectionReason, TilePos, TileType,
};
use homestead_world::farming;

use crate::game::{Game, log_ledger_failure};

impl Game {
    /// Dispatch an intent to the matching `attempt_*` method.
    pub fn apply(&mut self, intent: Intent) -> Result<ActionOutcome, Rejection> {
        match intent {
            Intent::Till { pos } => self.attempt_till(pos),
            Intent::Plant { pos, crop } => self.attempt_plant(pos, crop),
            Intent::Water { pos } => self.attempt_water(pos),
            Intent::Harvest { pos } => self.attempt_harvest(pos),
            Intent::BuyLand { pos } => self.attempt_purchase_land(pos),
            Intent::BuyWater { amount } => self.attempt_purchase_water(amount),
            Intent::SetPaused { paused } => Ok(ActionOutcome::new(ActionEffect::PauseChanged {
                paused: self.set_paused(paused),
            })),
        }
    }

    /// Use the hoe: till owned grass, or clear a dead plant.
    pub fn attempt_till(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        self.till_tile(pos).inspect_err(log_rejection)
    }

    /// Sow `crop` on owned tilled soil.
    pub fn attempt_plant(&mut self, pos: TilePos, crop: CropKind) -> Result<ActionOutcome, Rejection> {
        self.plant_seed(pos, crop).inspect_err(log_rejection)
    }

    /// Use the watering can on an alive plant.
    pub fn attempt_water(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        self.water_plant(pos).inspect_err(log_rejection)
    }

    /// Sell a ripe plant.
    pub fn attempt_harvest(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        self.harvest_plant(pos).inspect_err(log_rejection)
    }

    /// Buy the tile at `pos`.
    pub fn attempt_purchase_land(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        self.buy_land(pos).inspect_err(log_rejection)
    }

    /// Buy up to `amount` units of water.
    ///
    /// The amount is clamped to the per-purchase cap and the free tank space;
    /// the effect reports the units actually bought.
    pub fn attempt_purchase_water(&mut self, amount: u32) -> Result<ActionOutcome, Rejection> {
        self.buy_water(amount).inspect_err(log_rejection)
    }

    /// Check every land-purchase rule without buying.
    pub(crate) fn check_land_purchase(&self, pos: TilePos) -> Result<(), Rejection> {
        let tile = self.tile_in_bounds(pos)?;
        if tile == TileType::Water {
            return Err(Rejection::new(
                RejectionReason::WrongTileType,
                format!("{pos} is water"),
            ));
        }
        if self.world.is_owned(pos) {
            return Err(Rejection::new(
                RejectionReason::AlreadyOwned,
                format!("you already own {pos}"),
            ));
        }
        if tile != TileType::Grass {
            return Err(Rejection::new(
                RejectionReason::WrongTileType,
                format!("only grass can be bought, {pos} is {tile:?}"),
            ));
        }
        if self.world.is_shoreline(pos) {
            return Err(Rejection::new(
                RejectionReason::Shoreline,
                format!("{pos} borders water"),
            ));
        }
        if !self.world.is_owned_or_adjacent(pos) {
            return Err(Rejection::new(
                RejectionReason::InvalidAdjacency,
                format!("{pos} does not touch your land"),
            ));
        }
        let land_cost = self.config.economy.land_cost;
        let cheapest = self.cheapest_price();
        if !pricing::can_afford_land(self.player.money, land_cost, cheapest) {
            let needed = pricing::land_requirement(land_cost, cheapest)
                .map_or_else(|| "more".to_owned(), |n| n.to_string());
            return Err(Rejection::new(
                RejectionReason::InsufficientFunds,
                format!("land needs {needed} to keep a seed in reserve"),
            ));
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Action bodies
    // -------------------------------------------------------------------

    fn till_tile(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        let tile = self.tile_in_bounds(pos)?;
        if !self.world.is_owned(pos) {
            return Err(Rejection::new(
                RejectionReason::NotOwned,
                format!("{pos} is not your land"),
            ));
        }

        if let Some(plant) = self.world.plant(pos) {
            if !plant.status.is_dead() {
                return Err(Rejection::new(
                    RejectionReason::PlantHealthy,
                    format!("the {} at {pos} is still healthy", plant.crop),
                ));
            }
            let (crop, status) = (plant.crop, plant.status);
            self.world.remove_plant(pos);
            info!(%pos, %crop, ?status, "dead plant cleared");
            return Ok(ActionOutcome::new(ActionEffect::Cleared { pos, crop, status }));
        }

        if tile != TileType::Grass {
            return Err(Rejection::new(
                RejectionReason::WrongTileType,
                format!("only grass can be tilled, {pos} is {tile:?}"),
            ));
        }
        self.world
            .till(pos)
            .map_err(|err| Rejection::new(RejectionReason::WrongTileType, err.to_string()))?;
        debug!(%pos, "tile tilled");
        Ok(ActionOutcome::new(ActionEffect::Tilled { pos }))
    }

    fn plant_seed(&mut self, pos: TilePos, crop: CropKind) -> Result<ActionOutcome, Rejection> {
        let tile = self.tile_in_bounds(pos)?;
        if !self.world.is_owned(pos) {
            return Err(Rejection::new(
                RejectionReason::NotOwned,
                format!("{pos} is not your land"),
            ));
        }
        if tile != TileType::TilledSoil {
            return Err(Rejection::new(
                RejectionReason::WrongTileType,
                format!("seeds need tilled soil, {pos} is {tile:?}"),
            ));
        }
        if self.world.plant(pos).is_some() {
            return Err(Rejection::new(
                RejectionReason::AlreadyOccupied,
                format!("something already grows at {pos}"),
            ));
        }

        let def = self.catalog.def(crop);
        if !def.is_unlocked(self.player.score) {
            return Err(Rejection::new(
                RejectionReason::CropLocked,
                format!("{crop} unlocks at score {}", def.unlock_score),
            ));
        }
        let cost = Decimal::from(def.purchase_price);
        if self.player.money < cost {
            return Err(Rejection::new(
                RejectionReason::InsufficientFunds,
                format!("{crop} seeds cost {cost}"),
            ));
        }

        self.world
            .insert_plant(pos, Plant::sown(crop, farming::SEED_MOISTURE))
            .map_err(|err| Rejection::new(RejectionReason::AlreadyOccupied, err.to_string()))?;
        self.player.money = self.player.money.saturating_sub(cost);
        let day = self.clock.day();
        log_ledger_failure(self.ledger.record_seed_purchase(day, cost, pos, crop), cost);
        info!(%pos, %crop, %cost, money = %self.player.money, "seed planted");

        let mut outcome = ActionOutcome::new(ActionEffect::Planted { pos, crop, cost });
        outcome.notifications.extend(self.check_game_over());
        Ok(outcome)
    }

    fn water_plant(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        self.tile_in_bounds(pos)?;
        let Some(plant) = self.world.plant(pos) else {
            return Err(Rejection::new(
                RejectionReason::NoPlant,
                format!("nothing grows at {pos}"),
            ));
        };
        match plant.status {
            PlantStatus::Alive => {}
            PlantStatus::Ripe => {
                return Err(Rejection::new(
                    RejectionReason::AlreadyRipe,
                    format!("the {} at {pos} is ready to harvest", plant.crop),
                ));
            }
            PlantStatus::Withered | PlantStatus::Drowned => {
                return Err(Rejection::new(
                    RejectionReason::PlantUnhealthy,
                    format!("the {} at {pos} is {:?}", plant.crop, plant.status),
                ));
            }
        }
        if self.player.water == 0 {
            return Err(Rejection::new(
                RejectionReason::InsufficientWater,
                "the water tank is empty",
            ));
        }

        let Some((crop, moisture, status)) =
            farming::water_at(&mut self.world, pos).map(|p| (p.crop, p.moisture, p.status))
        else {
            return Err(Rejection::new(
                RejectionReason::NoPlant,
                format!("nothing grows at {pos}"),
            ));
        };
        self.player.water = self.player.water.saturating_sub(1);
        debug!(%pos, moisture, water_left = self.player.water, "plant watered");

        let mut outcome = ActionOutcome::new(ActionEffect::Watered {
            pos,
            moisture,
            status,
            water_left: self.player.water,
        });
        if status == PlantStatus::Drowned {
            outcome
                .notifications
                .push(Notification::PlantDrowned { pos, crop });
        }
        Ok(outcome)
    }

    fn harvest_plant(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        self.tile_in_bounds(pos)?;
        let Some(plant) = self.world.plant(pos) else {
            return Err(Rejection::new(
                RejectionReason::NoPlant,
                format!("nothing grows at {pos}"),
            ));
        };
        if plant.status != PlantStatus::Ripe {
            return Err(Rejection::new(
                RejectionReason::NotRipe,
                format!("the {} at {pos} is not ripe", plant.crop),
            ));
        }

        let crop = plant.crop;
        let sell_price = self.catalog.def(crop).sell_price;
        let revenue = Decimal::from(sell_price);
        self.world.remove_plant(pos);
        self.player.money = self.player.money.saturating_add(revenue);
        self.player.score = self.player.score.saturating_add(u64::from(sell_price));
        let day = self.clock.day();
        log_ledger_failure(self.ledger.record_harvest(day, revenue, pos, crop), revenue);
        info!(
            %pos,
            %crop,
            %revenue,
            money = %self.player.money,
            score = self.player.score,
            "crop harvested"
        );

        let mut outcome = ActionOutcome::new(ActionEffect::Harvested { pos, crop, revenue });
        outcome.notifications = self.check_unlocks();
        Ok(outcome)
    }

    fn buy_land(&mut self, pos: TilePos) -> Result<ActionOutcome, Rejection> {
        self.check_land_purchase(pos)?;
        let land_cost = self.config.economy.land_cost;
        let cost = Decimal::from(land_cost);

        self.world
            .claim(pos)
            .map_err(|err| Rejection::new(RejectionReason::WrongTileType, err.to_string()))?;
        self.player.money = self.player.money.saturating_sub(cost);
        self.player.score = self.player.score.saturating_add(u64::from(land_cost));
        let day = self.clock.day();
        log_ledger_failure(self.ledger.record_land_purchase(day, cost, pos), cost);
        info!(
            %pos,
            %cost,
            money = %self.player.money,
            owned = self.world.owned_count(),
            "land purchased"
        );

        let mut outcome = ActionOutcome::new(ActionEffect::LandPurchased { pos, cost });
        outcome.notifications = self.check_unlocks();
        outcome.notifications.extend(self.check_game_over());
        Ok(outcome)
    }

    fn buy_water(&mut self, amount: u32) -> Result<ActionOutcome, Rejection> {
        if amount == 0 {
            return Err(Rejection::new(
                RejectionReason::InvalidAmount,
                "buy at least one unit of water",
            ));
        }
        let water_pricing = self.water_pricing();
        if self.player.water >= water_pricing.max_water {
            return Err(Rejection::new(
                RejectionReason::TankFull,
                "the water tank is full",
            ));
        }

        let units = pricing::clamp_water_amount(water_pricing, amount, self.player.water);
        if units == 0 {
            return Err(Rejection::new(
                RejectionReason::InvalidAmount,
                "no water can be sold right now",
            ));
        }
        let cost = pricing::water_cost(water_pricing, units);
        let reserve = pricing::water_reserve(self.world.has_viable_plant(), self.cheapest_price());
        if pricing::spendable(self.player.money, reserve) < cost {
            return Err(Rejection::new(
                RejectionReason::InsufficientFunds,
                format!("{units} units cost {cost}"),
            ));
        }

        self.player.water = self
            .player
            .water
            .saturating_add(units)
            .min(water_pricing.max_water);
        self.player.money = self.player.money.saturating_sub(cost);
        let day = self.clock.day();
        log_ledger_failure(self.ledger.record_water_purchase(day, cost), cost);
        info!(units, %cost, water = self.player.water, money = %self.player.money, "water purchased");

        let mut outcome = ActionOutcome::new(ActionEffect::WaterPurchased {
            amount: units,
            cost,
        });
        outcome.notifications.extend(self.check_game_over());
        Ok(outcome)
    }

    fn tile_in_bounds(&self, pos: TilePos) -> Result<TileType, Rejection> {
        self.world.tile_type_at(pos).ok_or_else(|| {
            Rejection::new(
                RejectionReason::OutOfBounds,
                format!("{pos} is outside the map"),
            )
        })
    }
}

fn log_rejection(rejection: &Rejection) {
    debug!(reason = ?rejection.reason, message = %rejection.message, "action rejected");
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use homestead_types::{Farmhouse, LedgerEntryType, Terrain};
    use homestead_world::{TerrainGrid, WorldState};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::GameConfig;

    /// 10x10 grass with a lake in the top-left corner and the farmhouse at
    /// (4, 4). Owns (4, 3) and (6, 4).
    fn game() -> Game {
        let grid = TerrainGrid::from_fn(10, 10, |p| {
            if p.x < 2 && p.y < 2 {
                Terrain::Water
            } else if p.x == 9 && p.y == 9 {
                Terrain::Rock
            } else {
                Terrain::Grass
            }
        })
        .unwrap();
        let farmhouse = Farmhouse::new(TilePos::new(4, 4), 2);
        let owned = [TilePos::new(4, 3), TilePos::new(6, 4)];
        let world = WorldState::new(grid, farmhouse, owned).unwrap();
        Game::from_world(&GameConfig::default(), world, 0).unwrap()
    }

    fn reason(result: Result<ActionOutcome, Rejection>) -> RejectionReason {
        result.err().map(|r| r.reason).unwrap()
    }

    fn sown(game: &mut Game, pos: TilePos, crop: CropKind) {
        game.attempt_till(pos).unwrap();
        game.attempt_plant(pos, crop).unwrap();
    }

    #[test]
    fn till_owned_grass() {
        let mut g = game();
        let outcome = g.attempt_till(TilePos::new(4, 3)).unwrap();
        assert_eq!(outcome.effect, ActionEffect::Tilled { pos: TilePos::new(4, 3) });
        assert_eq!(g.tile_at(TilePos::new(4, 3)), Some(TileType::TilledSoil));
    }

    #[test]
    fn till_rejections() {
        let mut g = game();
        assert_eq!(reason(g.attempt_till(TilePos::new(-1, 3))), RejectionReason::OutOfBounds);
        assert_eq!(reason(g.attempt_till(TilePos::new(0, 9))), RejectionReason::NotOwned);
        assert_eq!(reason(g.attempt_till(TilePos::new(4, 4))), RejectionReason::NotOwned);
        g.attempt_till(TilePos::new(4, 3)).unwrap();
        assert_eq!(
            reason(g.attempt_till(TilePos::new(4, 3))),
            RejectionReason::WrongTileType
        );
    }

    #[test]
    fn hoe_clears_dead_plants_only() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        sown(&mut g, pos, CropKind::Carrot);
        assert_eq!(reason(g.attempt_till(pos)), RejectionReason::PlantHealthy);

        g.world.plant_mut(pos).unwrap().status = PlantStatus::Withered;
        let outcome = g.attempt_till(pos).unwrap();
        assert_eq!(
            outcome.effect,
            ActionEffect::Cleared {
                pos,
                crop: CropKind::Carrot,
                status: PlantStatus::Withered,
            }
        );
        assert!(g.world.plant(pos).is_none());
        assert_eq!(g.tile_at(pos), Some(TileType::TilledSoil));
    }

    #[test]
    fn planting_debits_and_records() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        sown(&mut g, pos, CropKind::Carrot);
        assert_eq!(g.player().money, dec!(90));
        let plant = g.world.plant(pos).unwrap();
        assert_eq!(plant.growth_stage, 0);
        assert_eq!(plant.moisture, 4.0);
        assert_eq!(plant.status, PlantStatus::Alive);
        let entries = g.ledger().all_entries();
        assert_eq!(entries.len(), 1);
        let entry = entries.first().unwrap();
        assert_eq!(entry.entry_type, LedgerEntryType::SeedPurchase);
        assert_eq!(entry.amount, dec!(10));
    }

    #[test]
    fn planting_rejections() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        assert_eq!(
            reason(g.attempt_plant(pos, CropKind::Carrot)),
            RejectionReason::WrongTileType
        );
        g.attempt_till(pos).unwrap();
        assert_eq!(
            reason(g.attempt_plant(pos, CropKind::Pumpkin)),
            RejectionReason::CropLocked
        );
        g.player.money = dec!(9.99);
        assert_eq!(
            reason(g.attempt_plant(pos, CropKind::Carrot)),
            RejectionReason::InsufficientFunds
        );
        g.attempt_plant(pos, CropKind::Sunflower).unwrap();
        assert_eq!(
            reason(g.attempt_plant(pos, CropKind::Sunflower)),
            RejectionReason::AlreadyOccupied
        );
        assert_eq!(
            reason(g.attempt_plant(TilePos::new(0, 9), CropKind::Carrot)),
            RejectionReason::NotOwned
        );
    }

    #[test]
    fn watering_uses_the_tank() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        sown(&mut g, pos, CropKind::Carrot);
        let outcome = g.attempt_water(pos).unwrap();
        assert_eq!(
            outcome.effect,
            ActionEffect::Watered {
                pos,
                moisture: 5.0,
                status: PlantStatus::Alive,
                water_left: 99,
            }
        );
        assert!(outcome.notifications.is_empty());
    }

    #[test]
    fn watering_to_ten_drowns() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        sown(&mut g, pos, CropKind::Carrot);
        g.world.plant_mut(pos).unwrap().moisture = 9.0;
        let outcome = g.attempt_water(pos).unwrap();
        assert_eq!(
            outcome.notifications,
            vec![Notification::PlantDrowned {
                pos,
                crop: CropKind::Carrot
            }]
        );
        assert_eq!(reason(g.attempt_water(pos)), RejectionReason::PlantUnhealthy);
        assert_eq!(g.world.plant(pos).unwrap().moisture, 10.0);
        assert_eq!(g.player().water, 99);
    }

    #[test]
    fn watering_rejections() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        assert_eq!(reason(g.attempt_water(pos)), RejectionReason::NoPlant);
        sown(&mut g, pos, CropKind::Carrot);
        g.player.water = 0;
        assert_eq!(reason(g.attempt_water(pos)), RejectionReason::InsufficientWater);
        g.world.plant_mut(pos).unwrap().status = PlantStatus::Ripe;
        assert_eq!(reason(g.attempt_water(pos)), RejectionReason::AlreadyRipe);
    }

    #[test]
    fn harvest_credits_once() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        sown(&mut g, pos, CropKind::Carrot);
        assert_eq!(reason(g.attempt_harvest(pos)), RejectionReason::NotRipe);

        g.world.plant_mut(pos).unwrap().status = PlantStatus::Ripe;
        let outcome = g.attempt_harvest(pos).unwrap();
        assert_eq!(
            outcome.effect,
            ActionEffect::Harvested {
                pos,
                crop: CropKind::Carrot,
                revenue: dec!(30),
            }
        );
        assert_eq!(g.player().money, dec!(120));
        assert_eq!(g.player().score, 30);
        assert_eq!(g.tile_at(pos), Some(TileType::TilledSoil));

        assert_eq!(reason(g.attempt_harvest(pos)), RejectionReason::NoPlant);
        assert_eq!(g.player().money, dec!(120));
    }

    #[test]
    fn harvest_can_unlock_crops() {
        let mut g = game();
        let pos = TilePos::new(4, 3);
        sown(&mut g, pos, CropKind::Carrot);
        g.player.score = 240;
        g.world.plant_mut(pos).unwrap().status = PlantStatus::Ripe;
        let outcome = g.attempt_harvest(pos).unwrap();
        assert_eq!(
            outcome.notifications,
            vec![Notification::CropUnlocked {
                crop: CropKind::Strawberry
            }]
        );
        assert_eq!(g.player().unlocked_crop_count, 4);
    }

    #[test]
    fn land_purchase_rules() {
        let mut g = game();
        g.player.money = dec!(1000);
        assert_eq!(
            reason(g.attempt_purchase_land(TilePos::new(10, 0))),
            RejectionReason::OutOfBounds
        );
        assert_eq!(
            reason(g.attempt_purchase_land(TilePos::new(0, 0))),
            RejectionReason::WrongTileType
        );
        assert_eq!(
            reason(g.attempt_purchase_land(TilePos::new(4, 3))),
            RejectionReason::AlreadyOwned
        );
        assert_eq!(
            reason(g.attempt_purchase_land(TilePos::new(4, 4))),
            RejectionReason::WrongTileType
        );
        assert_eq!(
            reason(g.attempt_purchase_land(TilePos::new(9, 9))),
            RejectionReason::WrongTileType
        );
        assert_eq!(
            reason(g.attempt_purchase_land(TilePos::new(2, 1))),
            RejectionReason::Shoreline
        );
        assert_eq!(
            reason(g.attempt_purchase_land(TilePos::new(8, 8))),
            RejectionReason::InvalidAdjacency
        );
        assert_eq!(g.player().money, dec!(1000));
    }

    #[test]
    fn land_purchase_keeps_seed_reserve() {
        let mut g = game();
        let pos = TilePos::new(3, 4);
        g.player.money = dec!(5);
        assert_eq!(
            reason(g.attempt_purchase_land(pos)),
            RejectionReason::InsufficientFunds
        );
        g.player.money = dec!(104.99);
        assert_eq!(
            reason(g.attempt_purchase_land(pos)),
            RejectionReason::InsufficientFunds
        );

        g.player.money = dec!(105);
        let outcome = g.attempt_purchase_land(pos).unwrap();
        assert_eq!(outcome.effect, ActionEffect::LandPurchased { pos, cost: dec!(100) });
        assert_eq!(g.player().money, dec!(5));
        assert_eq!(g.player().score, 100);
        assert!(g.world.is_owned(pos));
        assert!(!g.is_game_over());
    }

    #[test]
    fn water_purchase_is_clamped() {
        let mut g = game();
        let outcome = g.attempt_purchase_water(50).unwrap();
        assert_eq!(
            outcome.effect,
            ActionEffect::WaterPurchased {
                amount: 10,
                cost: dec!(5.0),
            }
        );
        assert_eq!(g.player().water, 110);
        assert_eq!(g.player().money, dec!(95));

        g.player.water = 997;
        let outcome = g.attempt_purchase_water(10).unwrap();
        assert!(matches!(
            outcome.effect,
            ActionEffect::WaterPurchased { amount: 2, .. }
        ));
        assert_eq!(reason(g.attempt_purchase_water(1)), RejectionReason::TankFull);
        assert_eq!(reason(g.attempt_purchase_water(0)), RejectionReason::InvalidAmount);
    }

    #[test]
    fn water_purchase_keeps_reserve_without_plants() {
        let mut g = game();
        g.player.money = dec!(9);
        // 9 - 5 reserve leaves 4: ten units cost 5.
        assert_eq!(
            reason(g.attempt_purchase_water(10)),
            RejectionReason::InsufficientFunds
        );
        g.attempt_purchase_water(8).unwrap();
        assert_eq!(g.player().money, dec!(5));

        sown(&mut g, TilePos::new(4, 3), CropKind::Sunflower);
        assert_eq!(g.player().money, Decimal::ZERO);
        assert!(!g.is_game_over());
    }

    #[test]
    fn rejections_leave_state_alone() {
        let mut g = game();
        let before = g.snapshot();
        let _ = g.attempt_purchase_land(TilePos::new(8, 8));
        let _ = g.attempt_plant(TilePos::new(4, 3), CropKind::Carrot);
        let _ = g.attempt_water(TilePos::new(4, 3));
        let _ = g.attempt_harvest(TilePos::new(4, 3));
        assert_eq!(g.snapshot(), before);
        assert!(g.ledger().is_empty());
    }

    #[test]
    fn apply_dispatches_intents() {
        let mut g = game();
        let pos = TilePos::new(6, 4);
        g.apply(Intent::Till { pos }).unwrap();
        g.apply(Intent::Plant {
            pos,
            crop: CropKind::Tomato,
        })
        .unwrap();
        let paused = g.apply(Intent::SetPaused { paused: true }).unwrap();
        assert_eq!(paused.effect, ActionEffect::PauseChanged { paused: true });
        assert!(g.is_paused());
        assert_eq!(g.player().money, dec!(85));
    }
}
