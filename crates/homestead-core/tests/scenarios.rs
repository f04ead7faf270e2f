//! End-to-end game scenarios.
//!
//! Tests drive a [`Game`] only through its public surface: construction,
//! `attempt_*` mutators, `tick`, `advance_day`, and the query methods.
//! Hand-built all-grass maps keep the rule scenarios deterministic; the
//! generated-map tests sweep a range of seeds.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::arithmetic_side_effects)]

use homestead_core::config::{CropOverride, GameConfig};
use homestead_core::{Game, GameError};
use homestead_ledger::conservation::ReconcileResult;
use homestead_types::{
    ActionEffect, CropKind, Farmhouse, LedgerEntryType, Notification, PlantStatus, Rejection,
    RejectionReason, Terrain, TilePos, TileType,
};
use homestead_world::{TerrainGrid, WorldState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const DAY_MS: f64 = 10_000.0;
const PLOT: TilePos = TilePos::new(4, 3);

/// 12x12 grass, farmhouse at (4, 4), starter tiles above and left of it.
fn grass_world() -> WorldState {
    let grid = TerrainGrid::from_fn(12, 12, |_| Terrain::Grass).unwrap();
    let farmhouse = Farmhouse::new(TilePos::new(4, 4), 2);
    WorldState::new(grid, farmhouse, [PLOT, TilePos::new(3, 4)]).unwrap()
}

fn untaxed() -> GameConfig {
    let mut config = GameConfig::default();
    config.economy.tax_per_tile = Decimal::ZERO;
    config
}

fn reason<T: core::fmt::Debug>(result: Result<T, Rejection>) -> RejectionReason {
    result.unwrap_err().reason
}

fn plant_carrot(game: &mut Game) {
    game.attempt_till(PLOT).unwrap();
    game.attempt_plant(PLOT, CropKind::Carrot).unwrap();
}

#[test]
fn carrot_grows_ripens_and_sells() {
    let mut game = Game::from_world(&untaxed(), grass_world(), 1).unwrap();
    plant_carrot(&mut game);
    assert_eq!(game.player().money, dec!(90));

    let mut ripened = false;
    for _ in 0..10 {
        // Watering to 5 and losing 1 over the day keeps the carrot at 4.
        game.attempt_water(PLOT).unwrap();
        let notes = game.tick(DAY_MS);
        ripened |= notes.contains(&Notification::PlantRipe {
            pos: PLOT,
            crop: CropKind::Carrot,
        });
    }
    assert!(ripened);
    let plant = game.world().plant(PLOT).unwrap();
    assert_eq!(plant.growth_stage, 10);
    assert_eq!(plant.status, PlantStatus::Ripe);

    let outcome = game.attempt_harvest(PLOT).unwrap();
    assert_eq!(
        outcome.effect,
        ActionEffect::Harvested {
            pos: PLOT,
            crop: CropKind::Carrot,
            revenue: dec!(30),
        }
    );
    assert_eq!(game.player().money, dec!(120));
    assert_eq!(game.player().score, 30);
    assert_eq!(game.tile_at(PLOT), Some(TileType::TilledSoil));
}

#[test]
fn second_harvest_finds_nothing() {
    let mut game = Game::from_world(&untaxed(), grass_world(), 1).unwrap();
    plant_carrot(&mut game);
    for _ in 0..10 {
        game.attempt_water(PLOT).unwrap();
        game.tick(DAY_MS);
    }
    game.attempt_harvest(PLOT).unwrap();
    let money = game.player().money;

    assert_eq!(reason(game.attempt_harvest(PLOT)), RejectionReason::NoPlant);
    assert_eq!(game.player().money, money);
    assert_eq!(money, dec!(120));
}

#[test]
fn stage_never_passes_growth_days() {
    let mut game = Game::from_world(&untaxed(), grass_world(), 1).unwrap();
    plant_carrot(&mut game);
    for _ in 0..10 {
        game.attempt_water(PLOT).unwrap();
        game.tick(DAY_MS);
    }
    for _ in 0..5 {
        game.advance_day();
    }
    let plant = game.world().plant(PLOT).unwrap();
    assert_eq!(plant.growth_stage, 10);
    assert_eq!(plant.status, PlantStatus::Ripe);
}

#[test]
fn unwatered_carrot_withers_and_stops_growing() {
    let mut game = Game::from_world(&GameConfig::default(), grass_world(), 1).unwrap();
    plant_carrot(&mut game);

    let mut notes = Vec::new();
    for _ in 0..5 {
        notes.extend(game.tick(DAY_MS));
    }
    assert!(notes.contains(&Notification::PlantWithered {
        pos: PLOT,
        crop: CropKind::Carrot,
    }));
    let plant = game.world().plant(PLOT).unwrap();
    assert!(plant.moisture <= 0.0);
    assert_eq!(plant.status, PlantStatus::Withered);

    let stage = plant.growth_stage;
    game.advance_day();
    assert_eq!(game.world().plant(PLOT).unwrap().growth_stage, stage);

    // Dead plants can be hoed away and replanted.
    let outcome = game.attempt_till(PLOT).unwrap();
    assert!(matches!(outcome.effect, ActionEffect::Cleared { .. }));
    game.attempt_plant(PLOT, CropKind::Sunflower).unwrap();
}

#[test]
fn overwatering_drowns() {
    let mut game = Game::from_world(&GameConfig::default(), grass_world(), 1).unwrap();
    plant_carrot(&mut game);
    for _ in 0..5 {
        game.attempt_water(PLOT).unwrap();
    }
    assert_eq!(game.world().plant(PLOT).unwrap().moisture, 9.0);

    let outcome = game.attempt_water(PLOT).unwrap();
    assert!(outcome.notifications.contains(&Notification::PlantDrowned {
        pos: PLOT,
        crop: CropKind::Carrot,
    }));
    let water = game.player().water;

    assert_eq!(
        reason(game.attempt_water(PLOT)),
        RejectionReason::PlantUnhealthy
    );
    let plant = game.world().plant(PLOT).unwrap();
    assert_eq!(plant.moisture, 10.0);
    assert_eq!(plant.status, PlantStatus::Drowned);
    assert_eq!(game.player().water, water);
}

#[test]
fn poor_player_cannot_buy_land() {
    let mut config = GameConfig::default();
    config.crops.insert(
        CropKind::Sunflower,
        CropOverride {
            unlock_score: Some(1_000),
            ..CropOverride::default()
        },
    );
    config.economy.starting_money = dec!(5);
    let mut game = Game::from_world(&config, grass_world(), 1).unwrap();
    assert_eq!(game.cheapest_price(), Some(10));

    // (5, 3) is grass, inland and next to the starter plot.
    let target = TilePos::new(5, 3);
    assert_eq!(
        reason(game.attempt_purchase_land(target)),
        RejectionReason::InsufficientFunds
    );
    assert!(!game.world().is_owned(target));
}

#[test]
fn land_must_touch_owned_territory() {
    let mut config = GameConfig::default();
    config.economy.starting_money = dec!(1000);
    let mut game = Game::from_world(&config, grass_world(), 1).unwrap();

    let far = TilePos::new(4, 1);
    assert!(!game.world().is_owned_or_adjacent(far));
    assert_eq!(
        reason(game.attempt_purchase_land(far)),
        RejectionReason::InvalidAdjacency
    );
    assert_eq!(game.player().money, dec!(1000));

    // Buying the tile in between makes it reachable.
    game.attempt_purchase_land(TilePos::new(4, 2)).unwrap();
    game.attempt_purchase_land(far).unwrap();
    assert!(game.world().is_owned(far));
}

#[test]
fn land_purchases_keep_a_seed_in_reserve() {
    let mut config = GameConfig::default();
    config.economy.starting_money = dec!(450);
    let mut game = Game::from_world(&config, grass_world(), 1).unwrap();

    let candidates = [
        TilePos::new(4, 2),
        TilePos::new(5, 3),
        TilePos::new(6, 3),
        TilePos::new(2, 4),
        TilePos::new(3, 5),
        TilePos::new(6, 5),
    ];
    let mut bought = 0;
    for pos in candidates {
        if game.attempt_purchase_land(pos).is_ok() {
            bought += 1;
            let cheapest = Decimal::from(game.cheapest_price().unwrap());
            assert!(game.player().money >= cheapest);
        }
    }
    assert_eq!(bought, 4);
    assert_eq!(game.player().money, dec!(50));
    assert_eq!(game.player().score, 400);
    assert_eq!(game.player().unlocked_crop_count, 4);
}

#[test]
fn water_quote_matches_purchase() {
    let mut config = GameConfig::default();
    config.economy.starting_money = dec!(8);
    let mut game = Game::from_world(&config, grass_world(), 1).unwrap();

    let quote = game.water_quote();
    assert_eq!(quote.reserve, dec!(5));
    assert_eq!(quote.max_amount, 6);
    assert_eq!(quote.blocked_by, None);

    let outcome = game.attempt_purchase_water(quote.max_amount).unwrap();
    assert_eq!(
        outcome.effect,
        ActionEffect::WaterPurchased {
            amount: 6,
            cost: dec!(3),
        }
    );
    assert_eq!(game.water_quote().max_amount, 0);
    assert_eq!(
        game.water_quote().blocked_by,
        Some(RejectionReason::InsufficientFunds)
    );
    assert!(!game.is_game_over());
}

#[test]
fn game_over_freezes_the_game() {
    let mut config = GameConfig::default();
    config.economy.starting_money = dec!(5.25);
    let mut game = Game::from_world(&config, grass_world(), 1).unwrap();

    let notes = game.tick(DAY_MS);
    assert!(notes.contains(&Notification::GameOver { day: 2, score: 0 }));
    assert!(game.is_game_over());
    assert!(game.is_paused());
    assert_eq!(game.player().money, dec!(4.75));

    let frozen = game.snapshot();
    assert!(game.tick(DAY_MS * 3.0).is_empty());
    assert!(game.advance_day().is_empty());
    assert!(game.set_paused(false));
    assert_eq!(game.snapshot().clock, frozen.clock);
    assert!(frozen.game_over);
}

#[test]
fn ledger_explains_every_coin() {
    let mut game = Game::from_world(&GameConfig::default(), grass_world(), 1).unwrap();
    plant_carrot(&mut game);
    game.attempt_purchase_water(10).unwrap();
    for _ in 0..10 {
        game.attempt_water(PLOT).unwrap();
        game.tick(DAY_MS);
    }
    game.attempt_harvest(PLOT).unwrap();
    game.attempt_purchase_land(TilePos::new(5, 3)).unwrap();

    assert_eq!(game.reconcile(), ReconcileResult::Balanced);
    // 100 - 10 seed - 5 water - 10 days of tax on 2 tiles + 30 harvest - 100 land.
    assert_eq!(game.player().money, dec!(10));
    assert_eq!(game.ledger().len(), 14);
    assert_eq!(game.ledger().net_change(), dec!(-90));

    let totals = game.ledger().totals_by_type();
    assert_eq!(totals.get(&LedgerEntryType::SeedPurchase), Some(&dec!(10)));
    assert_eq!(totals.get(&LedgerEntryType::WaterPurchase), Some(&dec!(5)));
    assert_eq!(totals.get(&LedgerEntryType::DailyTax), Some(&dec!(5)));
    assert_eq!(totals.get(&LedgerEntryType::HarvestSale), Some(&dec!(30)));
    assert_eq!(totals.get(&LedgerEntryType::LandPurchase), Some(&dec!(100)));
}

#[test]
fn generated_worlds_are_playable() {
    let config = GameConfig::default();
    for seed in 0..10_u64 {
        let game = Game::with_seed(&config, seed).unwrap();
        let snap = game.snapshot();
        let farmhouse = snap.farmhouse;

        assert_eq!(snap.tiles.len(), 2_500);
        for cell in farmhouse.cells() {
            assert_eq!(game.tile_at(cell), Some(TileType::Farmhouse));
        }
        assert!(!snap.owned.is_empty());
        for pos in &snap.owned {
            assert_eq!(game.tile_at(*pos), Some(TileType::Grass));
            assert!(farmhouse.is_cardinally_adjacent(*pos));
            assert!(!game.world().is_shoreline(*pos));
        }
    }
}

#[test]
fn generated_terrain_keeps_a_grass_buffer() {
    let config = GameConfig::default();
    for seed in 100..115_u64 {
        let game = Game::with_seed(&config, seed).unwrap();
        let world = game.world();
        for pos in world.grid().positions() {
            let rough = matches!(
                world.terrain_at(pos),
                Some(Terrain::Forest | Terrain::Mountain | Terrain::Rock)
            );
            if rough {
                assert!(
                    pos.surrounding().iter().all(|n| !world.is_water(*n)),
                    "seed {seed}: {pos} touches water"
                );
            }
        }
    }
}

#[test]
fn regeneration_changes_seed_and_resets() {
    let mut game = Game::with_seed(&GameConfig::default(), 3).unwrap();
    game.advance_day();
    let snap = game.generate_world(Some(42)).unwrap();
    assert_eq!(snap.clock.day, 1);
    assert_eq!(snap.player.money, dec!(100));
    assert!(game.ledger().is_empty());

    let again = Game::with_seed(&GameConfig::default(), 42).unwrap();
    assert_eq!(again.snapshot(), snap);
}

#[test]
fn hopeless_config_requires_regeneration() {
    let mut config = GameConfig::default();
    config.world.width = 2;
    config.world.height = 2;
    config.world.generation_retries = 0;
    let result = Game::with_seed(&config, 9);
    assert!(matches!(
        result,
        Err(GameError::RegenerationRequired { attempts: 1 })
    ));
}

#[test]
fn snapshot_serializes() {
    let game = Game::from_world(&GameConfig::default(), grass_world(), 7).unwrap();
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["seed"], 7);
    assert_eq!(json["width"], 12);
    assert_eq!(json["player"]["money"], "100");
    assert_eq!(json["game_over"], false);
}
