//! Transaction builder and validation for ledger entries.
//!
//! A [`TransactionBuilder`] collects the fields of one money movement and
//! checks them before producing a [`LedgerEntry`]: the amount must be
//! strictly positive, and crop and land entries must say which crop or tile
//! they concern.

use rust_decimal::Decimal;

use homestead_types::{CropKind, LedgerEntry, LedgerEntryType, TilePos};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Transaction builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`LedgerEntry`] values.
///
/// # Examples
///
/// ```
/// use homestead_ledger::TransactionBuilder;
/// use homestead_types::{CropKind, LedgerEntryType, TilePos};
/// use rust_decimal::Decimal;
///
/// let entry = TransactionBuilder::new(1, 3, LedgerEntryType::HarvestSale)
///     .amount(Decimal::new(30, 0))
///     .tile(TilePos::new(4, 5))
///     .crop(CropKind::Carrot)
///     .build();
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct TransactionBuilder {
    sequence: u64,
    day: u32,
    entry_type: LedgerEntryType,
    amount: Option<Decimal>,
    tile: Option<TilePos>,
    crop: Option<CropKind>,
}

impl TransactionBuilder {
    /// Start building entry number `sequence` for `day`.
    pub const fn new(sequence: u64, day: u32, entry_type: LedgerEntryType) -> Self {
        Self {
            sequence,
            day,
            entry_type,
            amount: None,
            tile: None,
            crop: None,
        }
    }

    /// Set the amount of money moved.
    #[must_use]
    pub const fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the tile involved.
    #[must_use]
    pub const fn tile(mut self, tile: TilePos) -> Self {
        self.tile = Some(tile);
        self
    }

    /// Set the crop involved.
    #[must_use]
    pub const fn crop(mut self, crop: CropKind) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Validate inputs and produce a [`LedgerEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] without an amount,
    /// [`LedgerError::ZeroAmount`] or [`LedgerError::NegativeAmount`] for a
    /// non-positive amount, and [`LedgerError::MissingReference`] when a
    /// required tile or crop is absent.
    pub fn build(self) -> Result<LedgerEntry, LedgerError> {
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;

        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        if amount.is_sign_negative() {
            return Err(LedgerError::NegativeAmount { amount });
        }

        validate_references(self.entry_type, self.tile, self.crop)?;

        Ok(LedgerEntry {
            sequence: self.sequence,
            day: self.day,
            entry_type: self.entry_type,
            amount,
            tile: self.tile,
            crop: self.crop,
        })
    }
}

/// Check that the entry carries the references its type requires.
const fn validate_references(
    entry_type: LedgerEntryType,
    tile: Option<TilePos>,
    crop: Option<CropKind>,
) -> Result<(), LedgerError> {
    let (needs_tile, needs_crop) = required_references(entry_type);
    if needs_tile && tile.is_none() {
        return Err(LedgerError::MissingReference {
            entry_type,
            field: "tile",
        });
    }
    if needs_crop && crop.is_none() {
        return Err(LedgerError::MissingReference {
            entry_type,
            field: "crop",
        });
    }
    Ok(())
}

/// Return whether each [`LedgerEntryType`] needs `(tile, crop)`.
const fn required_references(entry_type: LedgerEntryType) -> (bool, bool) {
    match entry_type {
        LedgerEntryType::SeedPurchase | LedgerEntryType::HarvestSale => (true, true),
        LedgerEntryType::LandPurchase => (true, false),
        LedgerEntryType::WaterPurchase | LedgerEntryType::DailyTax => (false, false),
    }
}
