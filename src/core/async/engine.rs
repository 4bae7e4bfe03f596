//! Operation processing for async batch processing
//!
//! This module provides the `AsyncVendingEngine` struct, which applies buyer
//! operations against the thread-safe `AsyncDepositLedger` and
//! `AsyncProductCatalog`.
//!
//! # Architecture
//!
//! ```text
//! AsyncVendingEngine
//!     ├── Arc<AsyncDepositLedger>   (per-buyer entry locks)
//!     └── Arc<AsyncProductCatalog>  (per-product entry locks)
//! ```
//!
//! # Locking
//!
//! A purchase locks the buyer's holdings first and the product second, and
//! keeps both locked while it validates, allocates and commits. Every
//! purchase takes the locks in that order, so two purchases cannot wait on
//! each other. Deposits and resets only lock the buyer. No lock is held
//! across an await point or any I/O.

use std::sync::Arc;

use super::{AsyncDepositLedger, AsyncProductCatalog};
use crate::core::coordinator::settle_purchase;
use crate::types::{
    BuyerId, ChangeManifest, CoinHoldings, OperationOutcome, OperationRecord, ProductId,
    Settlement, VendingError,
};
use tracing::debug;

/// Thread-safe vending engine
///
/// Cheap to clone; clones share the same ledger and catalog.
#[derive(Debug, Clone)]
pub struct AsyncVendingEngine {
    ledger: Arc<AsyncDepositLedger>,
    catalog: Arc<AsyncProductCatalog>,
}

impl AsyncVendingEngine {
    /// Create a new AsyncVendingEngine over shared stores
    pub fn new(ledger: Arc<AsyncDepositLedger>, catalog: Arc<AsyncProductCatalog>) -> Self {
        Self { ledger, catalog }
    }

    /// Process a single operation record
    pub fn process_operation(
        &self,
        record: OperationRecord,
    ) -> Result<OperationOutcome, VendingError> {
        match record {
            OperationRecord::Deposit { buyer, coin, count } => self
                .process_deposit(buyer, coin, count)
                .map(OperationOutcome::Deposited),
            OperationRecord::Buy {
                buyer,
                product,
                quantity,
            } => self
                .process_purchase(buyer, product, quantity)
                .map(OperationOutcome::Settled),
            OperationRecord::Reset { buyer } => {
                Ok(OperationOutcome::Withdrawn(self.process_reset(buyer)))
            }
        }
    }

    /// Deposit coins for a buyer
    pub fn process_deposit(
        &self,
        buyer: BuyerId,
        coin: u64,
        count: u64,
    ) -> Result<CoinHoldings, VendingError> {
        self.ledger.deposit(buyer, coin, count)
    }

    /// Buy `quantity` units of a product for a buyer
    ///
    /// Stock is read under the product lock, so a purchase that lost a race
    /// for the last units fails with `InsufficientStock` instead of
    /// overselling.
    pub fn process_purchase(
        &self,
        buyer: BuyerId,
        product_id: ProductId,
        quantity: u64,
    ) -> Result<Settlement, VendingError> {
        let settlement = self.ledger.update(buyer, |holdings| {
            self.catalog.update(product_id, |product| {
                let settlement = settle_purchase(holdings, product, quantity)?;
                *holdings = settlement.holdings;
                product.stock = settlement.product.stock;
                Ok(settlement)
            })
        })?;

        debug!(
            buyer,
            product = product_id,
            total_spent = settlement.total_spent,
            change = %settlement.change,
            "purchase settled"
        );
        Ok(settlement)
    }

    /// Withdraw every coin a buyer holds
    pub fn process_reset(&self, buyer: BuyerId) -> ChangeManifest {
        let withdrawn = self.ledger.reset(buyer);
        debug!(buyer, withdrawn = %withdrawn, "deposit reset");
        withdrawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn engine(stock: u64) -> AsyncVendingEngine {
        let catalog = Arc::new(AsyncProductCatalog::new());
        catalog
            .register(Product::new(1, "Cola", 65, stock).unwrap())
            .unwrap();
        AsyncVendingEngine::new(Arc::new(AsyncDepositLedger::new()), catalog)
    }

    #[test]
    fn test_purchase_commits_holdings_and_stock() {
        let engine = engine(3);
        engine.process_deposit(1, 100, 1).unwrap();

        let settlement = engine.process_purchase(1, 1, 1).unwrap();

        assert_eq!(settlement.total_spent, 65);
        assert_eq!(settlement.holdings.total_value(), 35);
        assert_eq!(engine.ledger.get_or_create(1).total_value(), 35);
        assert_eq!(engine.catalog.get(1).map(|p| p.stock), Some(2));
    }

    #[test]
    fn test_failed_purchase_changes_nothing() {
        let engine = engine(3);
        engine.process_deposit(1, 50, 1).unwrap();

        let result = engine.process_purchase(1, 1, 1);

        assert_eq!(result, Err(VendingError::insufficient_funds(50, 65)));
        assert_eq!(engine.ledger.get_or_create(1).total_value(), 50);
        assert_eq!(engine.catalog.get(1).map(|p| p.stock), Some(3));
    }

    #[test]
    fn test_purchase_unknown_product() {
        let engine = engine(3);
        engine.process_deposit(1, 100, 1).unwrap();

        let result = engine.process_purchase(1, 7, 1);

        assert_eq!(result, Err(VendingError::product_not_found(7)));
        assert_eq!(engine.ledger.get_or_create(1).total_value(), 100);
    }

    #[test]
    fn test_process_operation_routes_reset() {
        let engine = engine(3);
        engine.process_deposit(1, 20, 2).unwrap();

        let outcome = engine
            .process_operation(OperationRecord::Reset { buyer: 1 })
            .unwrap();

        let OperationOutcome::Withdrawn(withdrawn) = outcome else {
            panic!("expected a withdrawal, got {:?}", outcome);
        };
        assert_eq!(withdrawn.value(), 40);
    }

    #[test]
    fn test_racing_buyers_never_oversell() {
        let engine = engine(5);
        for buyer in 0..20 {
            engine.process_deposit(buyer, 100, 1).unwrap();
        }

        let handles: Vec<_> = (0..20)
            .map(|buyer| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.process_purchase(buyer, 1, 1).is_ok())
            })
            .collect();
        let sold = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(sold, 5);
        assert_eq!(engine.catalog.get(1).map(|p| p.stock), Some(0));

        let spent: u64 = engine
            .ledger
            .get_all_holdings()
            .iter()
            .map(|(_, holdings)| 100 - holdings.total_value())
            .sum();
        assert_eq!(spent, 5 * 65);
    }
}
