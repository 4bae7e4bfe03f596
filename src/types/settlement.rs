//! Results produced by the allocation engine and the purchase coordinator

use super::coin::CoinCounts;
use super::holdings::{ChangeManifest, CoinHoldings};
use super::product::Product;

/// Coins to take from the buyer and coins to hand back
///
/// `debit.value() - change.value()` is exactly the settled value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allocation {
    /// Coins removed from the buyer's holdings
    pub debit: CoinCounts,

    /// Coins returned to the buyer as change
    pub change: ChangeManifest,
}

impl Allocation {
    /// Net value settled by this allocation
    pub fn settled_value(&self) -> u64 {
        self.debit.value() - self.change.value()
    }
}

/// Outcome of one committed purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Amount charged (`price × quantity`)
    pub total_spent: u64,

    /// Units purchased
    pub quantity: u64,

    /// Buyer holdings after the purchase
    pub holdings: CoinHoldings,

    /// Coins taken from the buyer
    pub debited: CoinCounts,

    /// Coins returned to the buyer as change
    pub change: ChangeManifest,

    /// Product with its stock decremented
    pub product: Product,
}

/// Result of one successfully applied operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Holdings after a deposit
    Deposited(CoinHoldings),

    /// A committed purchase
    Settled(Settlement),

    /// Coins handed back by a reset
    Withdrawn(ChangeManifest),
}
