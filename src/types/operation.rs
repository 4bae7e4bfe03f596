//! Operation-related types
//!
//! This module defines the operations a buyer can request and the record
//! shape they arrive in from the request layer.

use super::product::ProductId;
use serde::{Deserialize, Serialize};

/// Buyer identifier
pub type BuyerId = u32;

/// Operations supported by the vending engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Insert coins of one denomination into the buyer's holdings
    Deposit,

    /// Purchase units of a product, receiving exact change
    Buy,

    /// Withdraw every held coin
    Reset,
}

/// One requested operation
///
/// Field presence depends on the operation: deposits carry `coin` and
/// `count`, purchases carry `product` and `count` (the quantity), resets
/// carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRecord {
    Deposit {
        buyer: BuyerId,
        coin: u64,
        count: u64,
    },
    Buy {
        buyer: BuyerId,
        product: ProductId,
        quantity: u64,
    },
    Reset {
        buyer: BuyerId,
    },
}

impl OperationRecord {
    /// Buyer the operation applies to
    pub fn buyer(&self) -> BuyerId {
        match self {
            OperationRecord::Deposit { buyer, .. }
            | OperationRecord::Buy { buyer, .. }
            | OperationRecord::Reset { buyer } => *buyer,
        }
    }

    pub fn op_type(&self) -> OperationType {
        match self {
            OperationRecord::Deposit { .. } => OperationType::Deposit,
            OperationRecord::Buy { .. } => OperationType::Buy,
            OperationRecord::Reset { .. } => OperationType::Reset,
        }
    }
}
