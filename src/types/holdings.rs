//! Buyer coin holdings
//!
//! `CoinHoldings` is the deposit ledger of one buyer: how many coins of each
//! denomination the buyer has inserted and not yet spent or withdrawn.
//! Every mutation is all-or-nothing.

use super::coin::{CoinCounts, Denomination};
use super::error::VendingError;

/// Coins moved in one operation (returned as change, or withdrawn on reset)
///
/// Transient; never stored.
pub type ChangeManifest = CoinCounts;

/// Coin holdings of a single buyer
///
/// Starts with every count at zero and lives as long as the buyer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinHoldings {
    coins: CoinCounts,
}

impl CoinHoldings {
    /// Create empty holdings
    pub fn new() -> Self {
        CoinHoldings {
            coins: CoinCounts::zero(),
        }
    }

    /// Wrap an existing coin table
    pub fn from_counts(coins: CoinCounts) -> Self {
        CoinHoldings { coins }
    }

    /// Current coin table
    pub fn coins(&self) -> &CoinCounts {
        &self.coins
    }

    /// Coins held of one denomination
    pub fn count(&self, denomination: Denomination) -> u64 {
        self.coins[denomination]
    }

    /// Total value of the holdings in minor units
    pub fn total_value(&self) -> u64 {
        self.coins.value()
    }

    /// Add `count` coins of `denomination`
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `count` is zero
    /// - `ArithmeticOverflow` if the count or the total value would overflow
    pub fn credit(&mut self, denomination: Denomination, count: u64) -> Result<(), VendingError> {
        if count == 0 {
            return Err(VendingError::invalid_quantity(count, "deposit"));
        }
        self.credit_manifest(&CoinCounts::from_pairs([(denomination, count)]))
    }

    /// Add every coin of `manifest`
    ///
    /// Zero entries are allowed. Nothing changes if any addition overflows.
    pub fn credit_manifest(&mut self, manifest: &CoinCounts) -> Result<(), VendingError> {
        let mut updated = self.coins;
        let mut total = 0u64;
        for (denomination, held) in self.coins.iter() {
            let count = held
                .checked_add(manifest[denomination])
                .ok_or_else(|| VendingError::arithmetic_overflow("credit"))?;
            total = count
                .checked_mul(denomination.value())
                .and_then(|value| total.checked_add(value))
                .ok_or_else(|| VendingError::arithmetic_overflow("credit"))?;
            updated[denomination] = count;
        }
        self.coins = updated;
        Ok(())
    }

    /// Remove every coin of `manifest`
    ///
    /// # Errors
    ///
    /// `InsufficientCoins` for the first denomination whose held count is
    /// below the requested count; holdings are left untouched.
    pub fn debit(&mut self, manifest: &CoinCounts) -> Result<(), VendingError> {
        let mut updated = self.coins;
        for (denomination, requested) in manifest.iter() {
            let held = self.coins[denomination];
            updated[denomination] = held.checked_sub(requested).ok_or_else(|| {
                VendingError::insufficient_coins(denomination, held, requested)
            })?;
        }
        self.coins = updated;
        Ok(())
    }

    /// Zero every count and return what was held
    pub fn reset(&mut self) -> ChangeManifest {
        std::mem::take(&mut self.coins)
    }
}
