//! Reconciliation of the ledger against the player's purse.
//!
//! Money only changes through recorded entries, so for any game:
//!
//! ```text
//! starting_money + sum(signed entries) == current_money
//! ```
//!
//! A violation produces a [`LedgerAnomaly`].

use rust_decimal::Decimal;
use tracing::warn;

use homestead_types::LedgerEntry;

use crate::LedgerAnomaly;

/// The result of a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileResult {
    /// The ledger explains the purse exactly.
    Balanced,
    /// The purse and the ledger disagree.
    Anomaly(LedgerAnomaly),
}

/// Verify that `entries` explain the move from `starting_money` to
/// `current_money`.
pub fn reconcile(
    starting_money: Decimal,
    current_money: Decimal,
    entries: &[LedgerEntry],
) -> ReconcileResult {
    let mut expected = starting_money;
    for entry in entries {
        expected = match expected.checked_add(entry.signed_amount()) {
            Some(val) => val,
            None => return overflow_anomaly(current_money, entry.sequence),
        };
    }

    if expected == current_money {
        ReconcileResult::Balanced
    } else {
        warn!(%expected, actual = %current_money, "ledger does not match purse");
        ReconcileResult::Anomaly(LedgerAnomaly {
            expected,
            actual: current_money,
            message: format!(
                "LEDGER_ANOMALY: ledger implies {expected} but the purse holds {current_money}",
            ),
        })
    }
}

/// Construct an anomaly result for arithmetic overflow during summation.
fn overflow_anomaly(current_money: Decimal, sequence: u64) -> ReconcileResult {
    ReconcileResult::Anomaly(LedgerAnomaly {
        expected: Decimal::ZERO,
        actual: current_money,
        message: format!("LEDGER_ANOMALY: arithmetic overflow at entry {sequence}"),
    })
}
