//! Affordability rules for land, water and seeds.
//!
//! Purchases that could leave the player without a way to recover apply a
//! reserve: enough money must remain to buy the cheapest unlocked seed.
//! Land always keeps that reserve; water keeps it only while nothing viable
//! is growing. A player with no affordable seed and nothing alive or ripe
//! has lost.
//!
//! When no crop is unlocked the cheapest price is treated as infinite,
//! represented here as `None`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use homestead_types::{CropCatalog, CropDef, CropKind, RejectionReason, WaterQuote};

/// Water shop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterPricing {
    /// Price per unit.
    pub unit_price: Decimal,
    /// Tank capacity.
    pub max_water: u32,
    /// Largest amount sold in one purchase.
    pub max_per_purchase: u32,
}

// ---------------------------------------------------------------------------
// Seeds and unlocks
// ---------------------------------------------------------------------------

/// Price of the cheapest crop available at `score`, or `None` if nothing is
/// unlocked.
pub fn cheapest_unlocked_price(catalog: &CropCatalog, score: u64) -> Option<u32> {
    catalog
        .unlocked(score)
        .map(|(_, def)| def.purchase_price)
        .min()
}

/// Crops available at `score`, cheapest first. Ties keep catalog order.
pub fn available_crops(catalog: &CropCatalog, score: u64) -> Vec<(CropKind, &CropDef)> {
    let mut crops: Vec<(CropKind, &CropDef)> = catalog.unlocked(score).collect();
    crops.sort_by_key(|(_, def)| def.purchase_price);
    crops
}

/// Crops that became available since `previous_count` crops were unlocked,
/// in ascending threshold order.
pub fn newly_unlocked(catalog: &CropCatalog, previous_count: u32, score: u64) -> Vec<CropKind> {
    let current = catalog.unlocked_count(score);
    if current <= previous_count {
        return Vec::new();
    }
    let mut by_threshold: Vec<(CropKind, &CropDef)> = catalog.iter().collect();
    by_threshold.sort_by_key(|(_, def)| def.unlock_score);

    let skip = usize::try_from(previous_count).unwrap_or(usize::MAX);
    let take = usize::try_from(current.saturating_sub(previous_count)).unwrap_or(0);
    by_threshold
        .into_iter()
        .skip(skip)
        .take(take)
        .map(|(kind, _)| kind)
        .collect()
}

// ---------------------------------------------------------------------------
// Land
// ---------------------------------------------------------------------------

/// Money needed to buy land and still afford a seed.
pub fn land_requirement(land_cost: u32, cheapest: Option<u32>) -> Option<Decimal> {
    cheapest.map(|price| Decimal::from(land_cost).saturating_add(Decimal::from(price)))
}

/// Whether `money` covers a land purchase plus the seed reserve.
pub fn can_afford_land(money: Decimal, land_cost: u32, cheapest: Option<u32>) -> bool {
    land_requirement(land_cost, cheapest).is_some_and(|needed| money >= needed)
}

/// Tax charged at a rollover for `owned_tiles` tiles.
pub fn daily_tax(owned_tiles: usize, tax_per_tile: Decimal) -> Decimal {
    let tiles = u64::try_from(owned_tiles).unwrap_or(u64::MAX);
    Decimal::from(tiles).saturating_mul(tax_per_tile)
}

// ---------------------------------------------------------------------------
// Water
// ---------------------------------------------------------------------------

/// Money kept back when buying water: nothing while a viable plant grows,
/// otherwise the cheapest seed price (`None` when no seed is unlocked).
pub fn water_reserve(has_viable_plant: bool, cheapest: Option<u32>) -> Option<Decimal> {
    if has_viable_plant {
        Some(Decimal::ZERO)
    } else {
        cheapest.map(Decimal::from)
    }
}

/// Money available for water once the reserve is set aside. Never negative.
pub fn spendable(money: Decimal, reserve: Option<Decimal>) -> Decimal {
    reserve
        .and_then(|r| money.checked_sub(r))
        .filter(|left| !left.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

/// Clamp a requested amount to the per-purchase cap and the tank space.
pub fn clamp_water_amount(pricing: WaterPricing, requested: u32, current_water: u32) -> u32 {
    let space = pricing.max_water.saturating_sub(current_water);
    requested.min(pricing.max_per_purchase).min(space)
}

/// Price of `amount` units.
pub fn water_cost(pricing: WaterPricing, amount: u32) -> Decimal {
    Decimal::from(amount).saturating_mul(pricing.unit_price)
}

/// The largest purchase possible right now, and why it is zero if it is.
pub fn quote_water(
    pricing: WaterPricing,
    money: Decimal,
    current_water: u32,
    has_viable_plant: bool,
    cheapest: Option<u32>,
) -> WaterQuote {
    let reserve = water_reserve(has_viable_plant, cheapest);
    let mut quote = WaterQuote {
        max_amount: 0,
        unit_price: pricing.unit_price,
        reserve: reserve.unwrap_or(Decimal::ZERO),
        blocked_by: None,
    };

    if current_water >= pricing.max_water {
        quote.blocked_by = Some(RejectionReason::TankFull);
        return quote;
    }

    let available = spendable(money, reserve);
    let by_money = available
        .checked_div(pricing.unit_price)
        .map_or(0, |units| units.floor().to_u32().unwrap_or(u32::MAX));

    quote.max_amount = clamp_water_amount(pricing, by_money, current_water);
    if quote.max_amount == 0 {
        quote.blocked_by = Some(if by_money == 0 {
            RejectionReason::InsufficientFunds
        } else {
            RejectionReason::InvalidAmount
        });
    }
    quote
}

// ---------------------------------------------------------------------------
// Game over
// ---------------------------------------------------------------------------

/// Whether the player can neither buy a seed nor profit from a plant.
pub fn is_game_over(money: Decimal, cheapest: Option<u32>, has_viable_plant: bool) -> bool {
    let broke = cheapest.is_none_or(|price| money < Decimal::from(price));
    broke && !has_viable_plant
}
