//! Frame ticks and the day cycle.
//!
//! A frame hands its elapsed milliseconds to [`Game::tick`]. Time is cut at
//! midnight: evaporation runs up to the boundary, then [`Game::advance_day`]
//! performs the rollover, then the rest of the frame continues on the new
//! day. A single long frame may cross several days.
//!
//! The rollover runs, in order:
//!
//! 1. **Clock**: the day counter advances.
//! 2. **Growth**: plants in the optimal moisture band gain a stage.
//! 3. **Tax**: every owned tile is taxed, even into debt.
//! 4. **Game over**: the player is out if no seed is affordable and
//!    nothing viable grows.

use tracing::{info, warn};

use homestead_ledger::pricing;
use homestead_types::Notification;
use homestead_world::farming;

use crate::game::{Game, log_ledger_failure};

impl Game {
    /// Advance continuous time by `elapsed_ms`.
    ///
    /// Ignored while paused, after game over, and for non-finite or
    /// non-positive input. Returns everything that happened, in order.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn tick(&mut self, elapsed_ms: f64) -> Vec<Notification> {
        let mut notes = Vec::new();
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return notes;
        }

        let mut remaining = elapsed_ms;
        while remaining > 0.0 && !self.game_over && !self.clock.is_paused() {
            let segment = self.clock.take_segment(remaining);
            remaining -= segment.elapsed_ms;
            notes.extend(farming::evaporate_all(
                &mut self.world,
                &self.catalog,
                segment.day_fraction,
            ));
            if !segment.ends_day {
                break;
            }
            notes.extend(self.advance_day());
        }
        notes
    }

    /// Run a day rollover now.
    ///
    /// Called by [`Game::tick`] at midnight; callable directly to skip ahead.
    /// Does nothing once the game is over.
    pub fn advance_day(&mut self) -> Vec<Notification> {
        let mut notes = Vec::new();
        if self.game_over {
            return notes;
        }

        let day = match self.clock.roll_over() {
            Ok(day) => day,
            Err(err) => {
                warn!(error = %err, "clock exhausted, pausing");
                self.clock.set_paused(true);
                return notes;
            }
        };

        notes.extend(farming::grow_all(&mut self.world, &self.catalog));

        let tax = pricing::daily_tax(self.world.owned_count(), self.config.economy.tax_per_tile);
        if !tax.is_zero() {
            self.player.money = self.player.money.saturating_sub(tax);
            log_ledger_failure(self.ledger.record_tax(day, tax), tax);
        }
        info!(
            day,
            %tax,
            money = %self.player.money,
            owned = self.world.owned_count(),
            "day started"
        );
        notes.push(Notification::DayStarted { day, tax });

        notes.extend(self.check_game_over());
        notes
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use homestead_types::{CropKind, Farmhouse, Plant, PlantStatus, Terrain, TilePos};
    use homestead_world::{TerrainGrid, WorldState};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::GameConfig;

    const PLOT: TilePos = TilePos::new(4, 3);

    fn game() -> Game {
        let grid = TerrainGrid::from_fn(10, 10, |_| Terrain::Grass).unwrap();
        let farmhouse = Farmhouse::new(TilePos::new(4, 4), 2);
        let owned = [PLOT, TilePos::new(6, 4), TilePos::new(3, 5)];
        let world = WorldState::new(grid, farmhouse, owned).unwrap();
        Game::from_world(&GameConfig::default(), world, 0).unwrap()
    }

    fn with_carrot() -> Game {
        let mut g = game();
        g.attempt_till(PLOT).unwrap();
        g.attempt_plant(PLOT, CropKind::Carrot).unwrap();
        g
    }

    #[test]
    fn rollover_charges_tax() {
        let mut g = game();
        let notes = g.advance_day();
        assert_eq!(
            notes,
            vec![Notification::DayStarted {
                day: 2,
                tax: dec!(0.75)
            }]
        );
        assert_eq!(g.player().money, dec!(99.25));
        assert_eq!(g.clock().day(), 2);
        assert_eq!(g.ledger().len(), 1);
    }

    #[test]
    fn tax_can_go_negative() {
        let mut g = game();
        g.player.money = dec!(0.5);
        g.attempt_till(PLOT).unwrap();
        g.world
            .insert_plant(PLOT, Plant::sown(CropKind::Carrot, 5.0))
            .unwrap();
        g.advance_day();
        assert_eq!(g.player().money, dec!(-0.25));
        assert!(!g.is_game_over());
    }

    #[test]
    fn tick_splits_at_midnight() {
        let mut g = with_carrot();
        let notes = g.tick(12_500.0);
        assert_eq!(g.clock().day(), 2);
        assert_eq!(g.clock().ms_into_day(), 2_500.0);
        assert!(notes.contains(&Notification::DayStarted {
            day: 2,
            tax: dec!(0.75)
        }));
        // A full day of evaporation before the rollover keeps 3.0 in band,
        // so the carrot grows.
        let plant = g.world().plant(PLOT).unwrap();
        assert_eq!(plant.growth_stage, 1);
        assert!((plant.moisture - 2.75).abs() < 1e-9);
    }

    #[test]
    fn long_frame_crosses_several_days() {
        let mut g = game();
        let notes = g.tick(35_000.0);
        assert_eq!(g.clock().day(), 4);
        let days = notes
            .iter()
            .filter(|n| matches!(n, Notification::DayStarted { .. }))
            .count();
        assert_eq!(days, 3);
    }

    #[test]
    fn bad_or_paused_ticks_are_ignored() {
        let mut g = with_carrot();
        let before = g.snapshot();
        assert!(g.tick(f64::NAN).is_empty());
        assert!(g.tick(-5.0).is_empty());
        assert!(g.tick(0.0).is_empty());
        g.set_paused(true);
        assert!(g.tick(50_000.0).is_empty());
        g.set_paused(false);
        assert_eq!(g.snapshot().clock, before.clock);
    }

    #[test]
    fn moisture_falls_while_alive() {
        let mut g = with_carrot();
        let mut last = g.world().plant(PLOT).unwrap().moisture;
        for _ in 0..20 {
            g.tick(500.0);
            let now = g.world().plant(PLOT).unwrap().moisture;
            assert!(now < last);
            last = now;
        }
    }

    #[test]
    fn drought_withers_and_stops_growth() {
        let mut g = with_carrot();
        let mut notes = Vec::new();
        for _ in 0..5 {
            notes.extend(g.tick(10_000.0));
        }
        let plant = g.world().plant(PLOT).unwrap();
        assert_eq!(plant.status, PlantStatus::Withered);
        assert_eq!(plant.moisture, 0.0);
        assert!(notes.contains(&Notification::PlantWithered {
            pos: PLOT,
            crop: CropKind::Carrot
        }));

        let stage = plant.growth_stage;
        g.advance_day();
        assert_eq!(g.world().plant(PLOT).unwrap().growth_stage, stage);
    }

    #[test]
    fn broke_without_plants_is_game_over() {
        let mut g = game();
        g.player.money = dec!(5.5);
        let notes = g.advance_day();
        assert_eq!(g.player().money, dec!(4.75));
        assert!(g.is_game_over());
        assert!(g.is_paused());
        assert_eq!(
            notes.last(),
            Some(&Notification::GameOver { day: 2, score: 0 })
        );

        assert!(g.advance_day().is_empty());
        assert!(g.tick(10_000.0).is_empty());
        assert_eq!(g.clock().day(), 2);
    }

    #[test]
    fn zero_tax_is_not_recorded() {
        let mut config = GameConfig::default();
        config.economy.tax_per_tile = Decimal::ZERO;
        let grid = TerrainGrid::from_fn(10, 10, |_| Terrain::Grass).unwrap();
        let world = WorldState::new(grid, Farmhouse::new(TilePos::new(4, 4), 2), [PLOT]).unwrap();
        let mut g = Game::from_world(&config, world, 0).unwrap();
        g.advance_day();
        assert!(g.ledger().is_empty());
        assert_eq!(g.player().money, dec!(100));
    }
}
