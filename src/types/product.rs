//! Product-related types
//!
//! Products are owned by the catalog collaborator; the core reads their price
//! and stock and hands back a copy with the stock decremented.

use super::coin::Denomination;
use super::error::VendingError;

/// Product identifier
pub type ProductId = u32;

/// A product offered for sale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product ID
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price in minor units, always a multiple of the smallest coin
    pub price: u64,

    /// Units available for sale
    pub stock: u64,
}

impl Product {
    /// Create a product, validating that its price can be paid in coins
    ///
    /// # Errors
    ///
    /// `InvalidPrice` if `price` is not a multiple of the smallest denomination.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: u64,
        stock: u64,
    ) -> Result<Self, VendingError> {
        validate_price(id, price)?;
        Ok(Product {
            id,
            name: name.into(),
            price,
            stock,
        })
    }
}

/// Check that `price` can be settled with exact change
pub fn validate_price(product: ProductId, price: u64) -> Result<(), VendingError> {
    if price % Denomination::SMALLEST.value() != 0 {
        return Err(VendingError::invalid_price(product, price));
    }
    Ok(())
}
