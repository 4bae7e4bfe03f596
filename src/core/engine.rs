//! Vending engine
//!
//! This module provides the VendingEngine that routes buyer operations to the
//! DepositLedger and ProductCatalog components.
//!
//! The engine enforces business rules such as:
//! - Coins must be legal denominations, counts and quantities positive
//! - A purchase needs enough funds and enough stock
//! - A purchase commits the buyer's holdings and the product's stock together

use crate::core::catalog::ProductCatalog;
use crate::core::coordinator::settle_purchase;
use crate::core::ledger::DepositLedger;
use crate::types::{
    BuyerId, ChangeManifest, CoinHoldings, OperationOutcome, OperationRecord, Product, ProductId,
    Settlement, VendingError,
};
use tracing::debug;

/// Single-threaded vending engine
///
/// Owns the ledger and the catalog outright, so every operation already has
/// exclusive access to the records it touches.
#[derive(Debug, Default)]
pub struct VendingEngine {
    ledger: DepositLedger,
    catalog: ProductCatalog,
}

impl VendingEngine {
    /// Create a new VendingEngine with no buyers and no products
    pub fn new() -> Self {
        VendingEngine {
            ledger: DepositLedger::new(),
            catalog: ProductCatalog::new(),
        }
    }

    /// Create an engine stocked with `products`
    ///
    /// # Errors
    ///
    /// The first `InvalidPrice` or `DuplicateProduct` encountered.
    pub fn with_products<I>(products: I) -> Result<Self, VendingError>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut engine = Self::new();
        for product in products {
            engine.register_product(product)?;
        }
        Ok(engine)
    }

    /// Add a product to the catalog
    pub fn register_product(&mut self, product: Product) -> Result<(), VendingError> {
        self.catalog.register(product)
    }

    /// Process a single operation record
    ///
    /// # Errors
    ///
    /// Whatever the routed operation returns; state is unchanged on error.
    pub fn process(&mut self, record: OperationRecord) -> Result<OperationOutcome, VendingError> {
        match record {
            OperationRecord::Deposit { buyer, coin, count } => self
                .deposit(buyer, coin, count)
                .map(OperationOutcome::Deposited),
            OperationRecord::Buy {
                buyer,
                product,
                quantity,
            } => self
                .purchase(buyer, product, quantity)
                .map(OperationOutcome::Settled),
            OperationRecord::Reset { buyer } => Ok(OperationOutcome::Withdrawn(self.reset(buyer))),
        }
    }

    /// Deposit coins for a buyer and return the updated holdings
    pub fn deposit(
        &mut self,
        buyer: BuyerId,
        coin: u64,
        count: u64,
    ) -> Result<CoinHoldings, VendingError> {
        self.ledger.deposit(buyer, coin, count)?;
        Ok(self.ledger.holdings(buyer))
    }

    /// Buy `quantity` units of a product for a buyer
    ///
    /// # Errors
    ///
    /// `ProductNotFound` for unknown products, otherwise the errors of
    /// [`settle_purchase`]. Nothing is committed on error.
    pub fn purchase(
        &mut self,
        buyer: BuyerId,
        product_id: ProductId,
        quantity: u64,
    ) -> Result<Settlement, VendingError> {
        let holdings = self.ledger.get_or_create(buyer);
        let product = self
            .catalog
            .get_mut(product_id)
            .ok_or_else(|| VendingError::product_not_found(product_id))?;

        let settlement = settle_purchase(holdings, product, quantity)?;

        *holdings = settlement.holdings;
        product.stock = settlement.product.stock;

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
    pub fn reset(&mut self, buyer: BuyerId) -> ChangeManifest {
        let withdrawn = self.ledger.reset(buyer);
        debug!(buyer, withdrawn = %withdrawn, "deposit reset");
        withdrawn
    }

    /// Final holdings of every buyer, sorted by buyer ID
    pub fn get_holdings(&self) -> Vec<(BuyerId, CoinHoldings)> {
        self.ledger.get_all_holdings()
    }

    /// Final state of every product, sorted by product ID
    pub fn get_products(&self) -> Vec<Product> {
        self.catalog.get_all_products()
    }
}
