//! The money ledger: an append-only log of every debit and credit.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Sequenced**: each entry carries a strictly increasing number.
//! - **Precision**: all amounts use [`Decimal`], never floating point.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use homestead_types::{CropKind, LedgerEntry, LedgerEntryType, TilePos};

use crate::conservation::{ReconcileResult, reconcile};
use crate::{LedgerError, TransactionBuilder};

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Every money movement of one game, in order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// All entries, in insertion order.
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Return the number of entries in the ledger.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_sequence(&self) -> Result<u64, LedgerError> {
        let count = u64::try_from(self.entries.len()).map_err(|_e| LedgerError::SequenceOverflow)?;
        count.checked_add(1).ok_or(LedgerError::SequenceOverflow)
    }

    fn push(&mut self, builder: TransactionBuilder) -> Result<&LedgerEntry, LedgerError> {
        let entry = builder.build()?;
        debug!(
            sequence = entry.sequence,
            day = entry.day,
            entry_type = ?entry.entry_type,
            amount = %entry.amount,
            "ledger entry"
        );
        self.entries.push(entry);
        self.entries.last().ok_or(LedgerError::InternalError(
            "failed to retrieve entry after append",
        ))
    }

    /// Record a money movement of any type.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record(
        &mut self,
        day: u32,
        entry_type: LedgerEntryType,
        amount: Decimal,
        tile: Option<TilePos>,
        crop: Option<CropKind>,
    ) -> Result<&LedgerEntry, LedgerError> {
        let mut builder = TransactionBuilder::new(self.next_sequence()?, day, entry_type).amount(amount);
        if let Some(tile) = tile {
            builder = builder.tile(tile);
        }
        if let Some(crop) = crop {
            builder = builder.crop(crop);
        }
        self.push(builder)
    }

    /// Record seeds bought for `tile`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_seed_purchase(
        &mut self,
        day: u32,
        amount: Decimal,
        tile: TilePos,
        crop: CropKind,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record(day, LedgerEntryType::SeedPurchase, amount, Some(tile), Some(crop))
    }

    /// Record a ripe crop sold from `tile`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_harvest(
        &mut self,
        day: u32,
        amount: Decimal,
        tile: TilePos,
        crop: CropKind,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record(day, LedgerEntryType::HarvestSale, amount, Some(tile), Some(crop))
    }

    /// Record a tile of land bought.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_land_purchase(
        &mut self,
        day: u32,
        amount: Decimal,
        tile: TilePos,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record(day, LedgerEntryType::LandPurchase, amount, Some(tile), None)
    }

    /// Record water bought for the tank.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_water_purchase(
        &mut self,
        day: u32,
        amount: Decimal,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record(day, LedgerEntryType::WaterPurchase, amount, None, None)
    }

    /// Record the land tax charged at a day rollover.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_tax(&mut self, day: u32, amount: Decimal) -> Result<&LedgerEntry, LedgerError> {
        self.record(day, LedgerEntryType::DailyTax, amount, None, None)
    }

    /// Check the ledger against the purse.
    pub fn reconcile(&self, starting_money: Decimal, current_money: Decimal) -> ReconcileResult {
        reconcile(starting_money, current_money, &self.entries)
    }

    /// Return a slice of all entries.
    pub fn all_entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Total amount per entry type (unsigned).
    pub fn totals_by_type(&self) -> BTreeMap<LedgerEntryType, Decimal> {
        let mut totals: BTreeMap<LedgerEntryType, Decimal> = BTreeMap::new();
        for entry in &self.entries {
            let total = totals.entry(entry.entry_type).or_insert(Decimal::ZERO);
            *total = total.saturating_add(entry.amount);
        }
        totals
    }

    /// Signed sum of every entry: credits minus debits.
    pub fn net_change(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.signed_amount()))
    }
}
