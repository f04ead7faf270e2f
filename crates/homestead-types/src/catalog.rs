//! The crop catalog: one immutable [`CropDef`] per [`CropKind`].
//!
//! Because the crop set is a closed enum, the catalog stores one entry per
//! variant and lookups are infallible.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::CropKind;

/// Static properties of a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CropDef {
    /// Human-readable name shown by the renderer.
    pub display_name: String,
    /// Seed price in whole currency units.
    pub purchase_price: u32,
    /// Revenue (and score) granted on harvest.
    pub sell_price: u32,
    /// Moisture lost per simulated day.
    pub water_need: f64,
    /// Growth stages (good days) needed to ripen.
    pub growth_days: u32,
    /// Score at which the crop becomes available.
    pub unlock_score: u64,
}

impl CropDef {
    fn new(
        display_name: &str,
        purchase_price: u32,
        sell_price: u32,
        water_need: f64,
        growth_days: u32,
        unlock_score: u64,
    ) -> Self {
        Self {
            display_name: display_name.to_owned(),
            purchase_price,
            sell_price,
            water_need,
            growth_days,
            unlock_score,
        }
    }

    /// Whether the crop is available at the given score.
    pub const fn is_unlocked(&self, score: u64) -> bool {
        score >= self.unlock_score
    }
}

/// All crop definitions, keyed by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CropCatalog {
    sunflower: CropDef,
    carrot: CropDef,
    tomato: CropDef,
    strawberry: CropDef,
    pumpkin: CropDef,
}

impl CropCatalog {
    /// The standard balance: three starter crops and two score unlocks.
    pub fn standard() -> Self {
        Self {
            sunflower: CropDef::new("Sunflower", 5, 15, 0.5, 5, 0),
            carrot: CropDef::new("Carrot", 10, 30, 1.0, 10, 0),
            tomato: CropDef::new("Tomato", 15, 45, 2.0, 15, 0),
            strawberry: CropDef::new("Strawberry", 20, 65, 2.5, 17, 250),
            pumpkin: CropDef::new("Pumpkin", 25, 80, 3.0, 20, 500),
        }
    }

    /// Return the definition for a crop.
    pub const fn def(&self, kind: CropKind) -> &CropDef {
        match kind {
            CropKind::Sunflower => &self.sunflower,
            CropKind::Carrot => &self.carrot,
            CropKind::Tomato => &self.tomato,
            CropKind::Strawberry => &self.strawberry,
            CropKind::Pumpkin => &self.pumpkin,
        }
    }

    /// Replace the definition for one crop, keeping the others.
    #[must_use]
    pub fn with_def(mut self, kind: CropKind, def: CropDef) -> Self {
        let slot = match kind {
            CropKind::Sunflower => &mut self.sunflower,
            CropKind::Carrot => &mut self.carrot,
            CropKind::Tomato => &mut self.tomato,
            CropKind::Strawberry => &mut self.strawberry,
            CropKind::Pumpkin => &mut self.pumpkin,
        };
        *slot = def;
        self
    }

    /// Iterate over all crops in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (CropKind, &CropDef)> {
        CropKind::ALL.into_iter().map(|kind| (kind, self.def(kind)))
    }

    /// Iterate over the crops available at `score`.
    pub fn unlocked(&self, score: u64) -> impl Iterator<Item = (CropKind, &CropDef)> {
        self.iter().filter(move |(_, def)| def.is_unlocked(score))
    }

    /// Number of crops available at `score`.
    pub fn unlocked_count(&self, score: u64) -> u32 {
        let count = self.unlocked(score).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_starts_with_three_crops() {
        let catalog = CropCatalog::standard();
        assert_eq!(catalog.unlocked_count(0), 3);
        assert_eq!(catalog.unlocked_count(250), 4);
        assert_eq!(catalog.unlocked_count(10_000), 5);
    }

    #[test]
    fn carrot_matches_reference_balance() {
        let catalog = CropCatalog::standard();
        let carrot = catalog.def(CropKind::Carrot);
        assert_eq!(carrot.purchase_price, 10);
        assert_eq!(carrot.sell_price, 30);
        assert_eq!(carrot.growth_days, 10);
        assert!((carrot.water_need - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn with_def_replaces_a_single_entry() {
        let cheap_pumpkin = CropDef::new("Pumpkin", 1, 2, 0.1, 1, 0);
        let catalog = CropCatalog::standard().with_def(CropKind::Pumpkin, cheap_pumpkin.clone());
        assert_eq!(catalog.def(CropKind::Pumpkin), &cheap_pumpkin);
        assert_eq!(catalog.def(CropKind::Carrot).purchase_price, 10);
        assert_eq!(catalog.unlocked_count(0), 4);
    }

    #[test]
    fn iteration_follows_catalog_order() {
        let catalog = CropCatalog::standard();
        let kinds: Vec<CropKind> = catalog.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, CropKind::ALL.to_vec());
    }
}
