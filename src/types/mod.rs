//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `coin`: Denominations and coin count tables
//! - `holdings`: Per-buyer coin holdings
//! - `product`: Product-related types
//! - `operation`: Requested operations and identifiers
//! - `settlement`: Allocation and purchase results
//! - `error`: Error types for the vending engine

pub mod coin;
pub mod error;
pub mod holdings;
pub mod operation;
pub mod product;
pub mod settlement;

pub use coin::{CoinCounts, Denomination, DENOMINATION_COUNT};
pub use error::VendingError;
pub use holdings::{ChangeManifest, CoinHoldings};
pub use operation::{BuyerId, OperationRecord, OperationType};
pub use product::{validate_price, Product, ProductId};
pub use settlement::{Allocation, OperationOutcome, Settlement};
