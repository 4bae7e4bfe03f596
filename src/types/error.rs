//! Error types for the coin vending engine
//!
//! This module defines all error types that can occur while depositing coins,
//! purchasing products and withdrawing holdings.
//!
//! # Error Categories
//!
//! - **Request Errors**: illegal coin, non-positive quantity, price not payable in coins
//! - **Business Rejections**: insufficient funds, insufficient stock
//! - **Settlement Failures**: exact change cannot be built, ledger debit out of bounds
//! - **I/O Errors**: file not found, CSV parsing failures

use super::coin::Denomination;
use super::product::ProductId;
use crate::core::coordinator::PurchaseState;
use thiserror::Error;

/// Main error type for the vending engine
///
/// No variant is ever returned after a partial mutation: holdings and stock
/// are left exactly as they were before the failing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VendingError {
    /// Coin value is not one of the legal denominations
    #[error("Invalid denomination {coin}: accepted coins are 5, 10, 20, 50 and 100")]
    InvalidDenomination {
        /// The rejected coin value
        coin: u64,
    },

    /// Coin count or purchase quantity is not positive
    #[error("Invalid quantity {quantity} for {operation}: must be greater than zero")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: u64,
        /// Operation that received it
        operation: String,
    },

    /// Product price cannot be settled in coins
    ///
    /// In order to give change the price must be a multiple of the smallest coin.
    #[error("Invalid price {price} for product {product}: must be a multiple of 5")]
    InvalidPrice {
        /// Product ID
        product: ProductId,
        /// The rejected price
        price: u64,
    },

    /// Buyer's holdings are worth less than the purchase
    #[error("Insufficient funds: holdings worth {available}, purchase costs {requested}")]
    InsufficientFunds {
        /// Total value of the buyer's holdings
        available: u64,
        /// Total purchase cost
        requested: u64,
    },

    /// Product does not have enough units left
    #[error("Insufficient stock for product {product}: available {available}, requested {requested}")]
    InsufficientStock {
        /// Product ID
        product: ProductId,
        /// Units in stock
        available: u64,
        /// Units requested
        requested: u64,
    },

    /// Exact change cannot be constructed from the coin supply
    #[error("Change unavailable: cannot settle {value} exactly from the held coins")]
    ChangeUnavailable {
        /// The value that could not be settled
        value: u64,
    },

    /// Ledger debit would drive a denomination count negative
    #[error("Insufficient coins of {denomination}: held {held}, requested {requested}")]
    InsufficientCoins {
        /// Denomination that ran short
        denomination: Denomination,
        /// Coins held
        held: u64,
        /// Coins requested
        requested: u64,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// Referenced product is not in the catalog
    #[error("Product {product} not found")]
    ProductNotFound {
        /// Product ID
        product: ProductId,
    },

    /// Product ID registered twice
    #[error("Duplicate product ID {product}")]
    DuplicateProduct {
        /// Product ID
        product: ProductId,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for VendingError {
    fn from(error: std::io::Error) -> Self {
        VendingError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for VendingError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        VendingError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl VendingError {
    /// Create an InvalidDenomination error
    pub fn invalid_denomination(coin: u64) -> Self {
        VendingError::InvalidDenomination { coin }
    }

    /// Create an InvalidQuantity error
    pub fn invalid_quantity(quantity: u64, operation: &str) -> Self {
        VendingError::InvalidQuantity {
            quantity,
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidPrice error
    pub fn invalid_price(product: ProductId, price: u64) -> Self {
        VendingError::InvalidPrice { product, price }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: u64, requested: u64) -> Self {
        VendingError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create an InsufficientStock error
    pub fn insufficient_stock(product: ProductId, available: u64, requested: u64) -> Self {
        VendingError::InsufficientStock {
            product,
            available,
            requested,
        }
    }

    /// Create a ChangeUnavailable error
    pub fn change_unavailable(value: u64) -> Self {
        VendingError::ChangeUnavailable { value }
    }

    /// Create an InsufficientCoins error
    pub fn insufficient_coins(denomination: Denomination, held: u64, requested: u64) -> Self {
        VendingError::InsufficientCoins {
            denomination,
            held,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        VendingError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create a ProductNotFound error
    pub fn product_not_found(product: ProductId) -> Self {
        VendingError::ProductNotFound { product }
    }

    /// Create a DuplicateProduct error
    pub fn duplicate_product(product: ProductId) -> Self {
        VendingError::DuplicateProduct { product }
    }

    /// Terminal purchase state this error leaves a purchase in
    ///
    /// Request and business-rule errors reject the purchase during validation;
    /// everything else fails it after validation passed.
    pub fn purchase_state(&self) -> PurchaseState {
        match self {
            VendingError::InvalidQuantity { .. }
            | VendingError::InvalidPrice { .. }
            | VendingError::InsufficientFunds { .. }
            | VendingError::InsufficientStock { .. }
            | VendingError::ProductNotFound { .. }
            | VendingError::ArithmeticOverflow { .. } => PurchaseState::Rejected,
            _ => PurchaseState::Failed,
        }
    }
}
