//! Purchase settlement and the single-step buyer operations
//!
//! The functions in this module work on snapshots: they read the buyer's
//! holdings and the product, and return new values. Callers that own the
//! records commit those values while holding exclusive access to both, which
//! makes the whole settlement atomic.
//!
//! A purchase moves through these states:
//!
//! ```text
//! Validating ──► Allocating ──► Committing ──► Settled
//!     │              │
//!     ▼              ▼
//!  Rejected        Failed
//! ```

use crate::core::allocation::allocate;
use crate::types::{
    validate_price, ChangeManifest, CoinHoldings, Denomination, Product, Settlement, VendingError,
};
use std::fmt;
use tracing::debug;

/// Stage of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    Validating,
    Allocating,
    Committing,
    Settled,
    Rejected,
    Failed,
}

impl fmt::Display for PurchaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PurchaseState::Validating => "validating",
            PurchaseState::Allocating => "allocating",
            PurchaseState::Committing => "committing",
            PurchaseState::Settled => "settled",
            PurchaseState::Rejected => "rejected",
            PurchaseState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Settle the purchase of `quantity` units of `product` from `holdings`
///
/// Neither input is modified. On success the returned [`Settlement`] holds
/// the buyer's new holdings and the product with its stock decremented;
/// the caller stores both together.
///
/// # Errors
///
/// - `InvalidQuantity` if `quantity` is zero
/// - `InvalidPrice` if the price is not a multiple of the smallest coin
/// - `ArithmeticOverflow` if `price × quantity` overflows
/// - `InsufficientFunds` if the holdings are worth less than the cost
/// - `InsufficientStock` if fewer than `quantity` units are in stock
/// - `ChangeUnavailable` if exact change cannot be built
pub fn settle_purchase(
    holdings: &CoinHoldings,
    product: &Product,
    quantity: u64,
) -> Result<Settlement, VendingError> {
    let result = run_purchase(holdings, product, quantity);
    if let Err(e) = &result {
        debug!(product = product.id, state = %e.purchase_state(), error = %e, "purchase stopped");
    }
    result
}

fn run_purchase(
    holdings: &CoinHoldings,
    product: &Product,
    quantity: u64,
) -> Result<Settlement, VendingError> {
    debug!(product = product.id, quantity, state = %PurchaseState::Validating);

    if quantity == 0 {
        return Err(VendingError::invalid_quantity(quantity, "buy"));
    }
    validate_price(product.id, product.price)?;

    let total_cost = product
        .price
        .checked_mul(quantity)
        .ok_or_else(|| VendingError::arithmetic_overflow("purchase cost"))?;

    if product.stock < quantity {
        return Err(VendingError::insufficient_stock(
            product.id,
            product.stock,
            quantity,
        ));
    }
    let available = holdings.total_value();
    if available < total_cost {
        return Err(VendingError::insufficient_funds(available, total_cost));
    }

    debug!(product = product.id, total_cost, state = %PurchaseState::Allocating);
    let allocation = allocate(holdings.coins(), total_cost)?;

    debug!(
        product = product.id,
        debit = %allocation.debit,
        change = %allocation.change,
        state = %PurchaseState::Committing
    );
    let mut updated = *holdings;
    updated.debit(&allocation.debit)?;
    updated.credit_manifest(&allocation.change)?;

    let mut sold = product.clone();
    sold.stock -= quantity;

    debug!(product = product.id, total_cost, state = %PurchaseState::Settled);
    Ok(Settlement {
        total_spent: total_cost,
        quantity,
        holdings: updated,
        debited: allocation.debit,
        change: allocation.change,
        product: sold,
    })
}

/// Return `holdings` with `count` coins of value `coin` added
///
/// # Errors
///
/// - `InvalidDenomination` if `coin` is not a legal denomination
/// - `InvalidQuantity` if `count` is zero
/// - `ArithmeticOverflow` if the holdings would overflow
pub fn deposit(
    holdings: &CoinHoldings,
    coin: u64,
    count: u64,
) -> Result<CoinHoldings, VendingError> {
    let denomination = Denomination::try_from(coin)?;
    let mut updated = *holdings;
    updated.credit(denomination, count)?;
    Ok(updated)
}

/// Return zeroed holdings together with every coin previously held
pub fn reset_deposit(holdings: &CoinHoldings) -> (CoinHoldings, ChangeManifest) {
    let mut updated = *holdings;
    let withdrawn = updated.reset();
    (updated, withdrawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoinCounts;
    use rstest::rstest;

    fn holdings(hundred: u64, fifty: u64, twenty: u64, ten: u64, five: u64) -> CoinHoldings {
        CoinHoldings::from_counts(CoinCounts::from([five, ten, twenty, fifty, hundred]))
    }

    fn product(price: u64, stock: u64) -> Product {
        Product::new(1, "Water", price, stock).unwrap()
    }

    #[test]
    fn test_purchase_returns_change_and_conserves_value() {
        let before = holdings(1, 0, 0, 0, 0);

        let settlement = settle_purchase(&before, &product(15, 4), 1).unwrap();

        assert_eq!(settlement.total_spent, 15);
        assert_eq!(settlement.quantity, 1);
        assert_eq!(settlement.debited, *holdings(1, 0, 0, 0, 0).coins());
        assert_eq!(settlement.change, *holdings(0, 1, 1, 1, 1).coins());
        assert_eq!(settlement.holdings, holdings(0, 1, 1, 1, 1));
        assert_eq!(settlement.product.stock, 3);
        assert_eq!(
            before.total_value(),
            settlement.holdings.total_value() + settlement.total_spent
        );
    }

    #[test]
    fn test_purchase_multiplies_price_by_quantity() {
        let before = holdings(0, 1, 2, 0, 0);

        let settlement = settle_purchase(&before, &product(30, 5), 3).unwrap();

        assert_eq!(settlement.total_spent, 90);
        assert_eq!(settlement.holdings, holdings(0, 0, 0, 0, 0));
        assert_eq!(settlement.product.stock, 2);
    }

    #[test]
    fn test_purchase_insufficient_funds() {
        let before = holdings(0, 1, 0, 0, 0);

        let result = settle_purchase(&before, &product(30, 5), 2);

        assert_eq!(result, Err(VendingError::insufficient_funds(50, 60)));
    }

    #[test]
    fn test_stock_is_checked_before_funds() {
        let before = holdings(0, 0, 0, 0, 1);

        let result = settle_purchase(&before, &product(30, 0), 1);

        assert_eq!(result, Err(VendingError::insufficient_stock(1, 0, 1)));
    }

    #[test]
    fn test_purchase_insufficient_stock() {
        let before = holdings(5, 0, 0, 0, 0);

        let result = settle_purchase(&before, &product(25, 2), 3);

        assert_eq!(result, Err(VendingError::insufficient_stock(1, 2, 3)));
    }

    #[test]
    fn test_purchase_zero_quantity() {
        let result = settle_purchase(&holdings(1, 0, 0, 0, 0), &product(25, 2), 0);

        assert_eq!(result, Err(VendingError::invalid_quantity(0, "buy")));
    }

    #[test]
    fn test_purchase_rejects_unpayable_price() {
        let odd = Product {
            id: 9,
            name: "Gum".to_string(),
            price: 12,
            stock: 1,
        };

        let result = settle_purchase(&holdings(1, 0, 0, 0, 0), &odd, 1);

        assert_eq!(result, Err(VendingError::invalid_price(9, 12)));
    }

    #[test]
    fn test_purchase_cost_overflow() {
        let expensive = product(u64::MAX - 15, 10);

        let result = settle_purchase(&holdings(1, 0, 0, 0, 0), &expensive, 2);

        assert_eq!(result, Err(VendingError::arithmetic_overflow("purchase cost")));
    }

    #[test]
    fn test_free_product_takes_no_coins() {
        let before = holdings(0, 0, 0, 1, 0);

        let settlement = settle_purchase(&before, &product(0, 1), 1).unwrap();

        assert_eq!(settlement.total_spent, 0);
        assert_eq!(settlement.holdings, before);
        assert!(settlement.debited.is_empty());
    }

    #[rstest]
    #[case(5, 1, 5)]
    #[case(100, 3, 300)]
    #[case(20, 2, 40)]
    fn test_deposit_adds_coins(#[case] coin: u64, #[case] count: u64, #[case] expected: u64) {
        let updated = deposit(&CoinHoldings::new(), coin, count).unwrap();
        assert_eq!(updated.total_value(), expected);
    }

    #[rstest]
    #[case::illegal_coin(25, 1, VendingError::invalid_denomination(25))]
    #[case::zero_count(10, 0, VendingError::invalid_quantity(0, "deposit"))]
    fn test_deposit_rejects_bad_requests(
        #[case] coin: u64,
        #[case] count: u64,
        #[case] expected: VendingError,
    ) {
        assert_eq!(deposit(&CoinHoldings::new(), coin, count), Err(expected));
    }

    #[test]
    fn test_reset_deposit_is_idempotent() {
        let (first, withdrawn) = reset_deposit(&holdings(1, 0, 1, 0, 1));
        let (second, nothing) = reset_deposit(&first);

        assert_eq!(withdrawn, *holdings(1, 0, 1, 0, 1).coins());
        assert_eq!(first.total_value(), 0);
        assert_eq!(second.total_value(), 0);
        assert!(nothing.is_empty());
    }
}
