//! Thread-safe deposit ledger for async batch processing
//!
//! This module provides the `AsyncDepositLedger` struct, which keeps buyer
//! holdings in a concurrent map so that operations for different buyers can
//! run in parallel.
//!
//! # Design
//!
//! The `AsyncDepositLedger` uses `DashMap` to provide fine-grained locking.
//! A buyer's entry stays locked for the whole closure passed to
//! [`AsyncDepositLedger::update`], which is how deposits, resets and purchases
//! get exclusive access to the holdings for their read-compute-write window.
//!
//! # Thread Safety
//!
//! All operations are thread-safe. The closure must not call back into the
//! same ledger, since the entry lock is not re-entrant.

use crate::core::coordinator;
use crate::types::{BuyerId, ChangeManifest, CoinHoldings, VendingError};
use dashmap::DashMap;

/// Thread-safe buyer holdings store
#[derive(Debug, Default)]
pub struct AsyncDepositLedger {
    /// Concurrent map of buyer IDs to holdings
    holdings: DashMap<BuyerId, CoinHoldings>,
}

impl AsyncDepositLedger {
    /// Create a new empty AsyncDepositLedger
    pub fn new() -> Self {
        Self {
            holdings: DashMap::new(),
        }
    }

    /// Snapshot of a buyer's holdings, creating empty holdings if needed
    ///
    /// The value may be stale as soon as it is returned.
    pub fn get_or_create(&self, buyer: BuyerId) -> CoinHoldings {
        *self.holdings.entry(buyer).or_default()
    }

    /// Run `f` with exclusive access to a buyer's holdings
    ///
    /// The holdings are created empty if the buyer is new. `f` is responsible
    /// for leaving the holdings untouched when it returns an error.
    pub fn update<F, T>(&self, buyer: BuyerId, f: F) -> Result<T, VendingError>
    where
        F: FnOnce(&mut CoinHoldings) -> Result<T, VendingError>,
    {
        let mut entry = self.holdings.entry(buyer).or_default();
        f(entry.value_mut())
    }

    /// Deposit coins for a buyer and return the updated holdings
    pub fn deposit(
        &self,
        buyer: BuyerId,
        coin: u64,
        count: u64,
    ) -> Result<CoinHoldings, VendingError> {
        self.update(buyer, |holdings| {
            *holdings = coordinator::deposit(holdings, coin, count)?;
            Ok(*holdings)
        })
    }

    /// Withdraw every coin a buyer holds
    pub fn reset(&self, buyer: BuyerId) -> ChangeManifest {
        let mut entry = self.holdings.entry(buyer).or_default();
        let (zeroed, withdrawn) = coordinator::reset_deposit(entry.value());
        *entry.value_mut() = zeroed;
        withdrawn
    }

    /// Get all holdings sorted by buyer ID
    pub fn get_all_holdings(&self) -> Vec<(BuyerId, CoinHoldings)> {
        let mut all: Vec<(BuyerId, CoinHoldings)> = self
            .holdings
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        all.sort_by_key(|(buyer, _)| *buyer);
        all
    }
}
