//! Deposit ledger module
//!
//! This module provides the `DepositLedger` struct which keeps the coin
//! holdings of every buyer and applies deposits and withdrawals to them.
//!
//! The DepositLedger is responsible for:
//! - Creating empty holdings on a buyer's first operation
//! - Crediting deposited coins
//! - Zeroing holdings on reset and reporting what was withdrawn
//! - Providing sorted holdings listings for output

use crate::core::coordinator;
use crate::types::{BuyerId, ChangeManifest, CoinHoldings, VendingError};
use std::collections::HashMap;

/// Coin holdings of all buyers
///
/// Single-threaded; the multi-threaded counterpart is
/// [`AsyncDepositLedger`](crate::core::AsyncDepositLedger).
#[derive(Debug, Default)]
pub struct DepositLedger {
    /// Map of buyer IDs to coin holdings
    holdings: HashMap<BuyerId, CoinHoldings>,
}

impl DepositLedger {
    /// Create a new DepositLedger with no buyers
    pub fn new() -> Self {
        DepositLedger {
            holdings: HashMap::new(),
        }
    }

    /// Get or create the holdings of a buyer
    ///
    /// New buyers start with every count at zero.
    pub fn get_or_create(&mut self, buyer: BuyerId) -> &mut CoinHoldings {
        self.holdings.entry(buyer).or_default()
    }

    /// Snapshot of a buyer's holdings (empty for unknown buyers)
    pub fn holdings(&self, buyer: BuyerId) -> CoinHoldings {
        self.holdings.get(&buyer).copied().unwrap_or_default()
    }

    /// Get all holdings sorted by buyer ID
    pub fn get_all_holdings(&self) -> Vec<(BuyerId, CoinHoldings)> {
        let mut all: Vec<(BuyerId, CoinHoldings)> = self
            .holdings
            .iter()
            .map(|(&buyer, &holdings)| (buyer, holdings))
            .collect();
        all.sort_by_key(|(buyer, _)| *buyer);
        all
    }

    /// Deposit `count` coins of value `coin` for a buyer
    ///
    /// # Errors
    ///
    /// `InvalidDenomination`, `InvalidQuantity` or `ArithmeticOverflow`;
    /// the buyer's holdings are unchanged on error.
    pub fn deposit(&mut self, buyer: BuyerId, coin: u64, count: u64) -> Result<(), VendingError> {
        let holdings = self.get_or_create(buyer);
        *holdings = coordinator::deposit(holdings, coin, count)?;
        Ok(())
    }

    /// Withdraw every coin a buyer holds
    pub fn reset(&mut self, buyer: BuyerId) -> ChangeManifest {
        let holdings = self.get_or_create(buyer);
        let (zeroed, withdrawn) = coordinator::reset_deposit(holdings);
        *holdings = zeroed;
        withdrawn
    }
}
