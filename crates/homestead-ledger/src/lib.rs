//! Money bookkeeping and pricing rules for the Homestead simulation.
//!
//! Every coin the player spends or earns passes through this crate. Money
//! movements are appended to a [`Ledger`]; the pricing module holds the
//! affordability rules that gate land, water and seed purchases.
//!
//! # Architecture
//!
//! - [`ledger`]: The [`Ledger`] struct: append-only log with recording methods.
//! - [`transaction`]: The [`TransactionBuilder`] for validated entry construction.
//! - [`conservation`]: Reconciliation of the ledger against the purse.
//! - [`pricing`]: Reserve rules, tax, water quotes, unlocks, game over.
//!
//! # Reconciliation
//!
//! At any point in the game:
//!
//! ```text
//! starting_money + sum(credits) - sum(debits) == current_money
//! ```
//!
//! A mismatch produces a [`LedgerAnomaly`]. The ledger never panics; it
//! returns errors.
//!
//! | Type | Direction |
//! |------|-----------|
//! | SeedPurchase | debit |
//! | HarvestSale | credit |
//! | LandPurchase | debit |
//! | WaterPurchase | debit |
//! | DailyTax | debit |
//!
//! # Usage
//!
//! ```
//! use homestead_ledger::Ledger;
//! use homestead_ledger::conservation::ReconcileResult;
//! use homestead_types::{CropKind, TilePos};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! let tile = TilePos::new(3, 4);
//!
//! ledger.record_seed_purchase(1, Decimal::new(10, 0), tile, CropKind::Carrot).ok();
//! ledger.record_harvest(11, Decimal::new(30, 0), tile, CropKind::Carrot).ok();
//!
//! let result = ledger.reconcile(Decimal::new(100, 0), Decimal::new(120, 0));
//! assert_eq!(result, ReconcileResult::Balanced);
//! ```

pub mod conservation;
pub mod ledger;
pub mod pricing;
pub mod transaction;

// Re-export primary types at crate root.
pub use conservation::ReconcileResult;
pub use ledger::Ledger;
pub use pricing::WaterPricing;
pub use transaction::TransactionBuilder;

use rust_decimal::Decimal;

use homestead_types::LedgerEntryType;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when recording ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Amount must be strictly positive.
    #[error("ledger entry amount must be non-zero")]
    ZeroAmount,

    /// Amount must not be negative.
    #[error("ledger entry amount must be positive, got {amount}")]
    NegativeAmount {
        /// The invalid amount.
        amount: Decimal,
    },

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The entry type requires a tile or crop reference that was not set.
    #[error("{entry_type:?} entries must reference a {field}")]
    MissingReference {
        /// The entry type being validated.
        entry_type: LedgerEntryType,
        /// The missing reference ("tile" or "crop").
        field: &'static str,
    },

    /// The sequence counter ran out.
    #[error("ledger sequence overflow")]
    SequenceOverflow,

    /// An internal error that should not occur in normal operation.
    #[error("internal ledger error: {0}")]
    InternalError(&'static str),
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A mismatch between the ledger and the player's purse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// Money implied by the starting balance and the ledger.
    pub expected: Decimal,
    /// Money actually held.
    pub actual: Decimal,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
