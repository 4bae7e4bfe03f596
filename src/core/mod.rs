//! Core business logic module
//!
//! This module contains the core vending components:
//! - `allocation` - Exact-change allocation engine
//! - `coordinator` - Purchase settlement, deposit and reset on holdings snapshots
//! - `ledger` - Buyer holdings management
//! - `catalog` - Product price and stock storage
//! - `engine` - Operation routing over the ledger and catalog
//! - `async` - Thread-safe implementations

pub mod allocation;
pub mod r#async;
pub mod catalog;
pub mod coordinator;
pub mod engine;
pub mod ledger;

pub use allocation::{allocate, mint_change};
pub use catalog::ProductCatalog;
pub use coordinator::{deposit, reset_deposit, settle_purchase, PurchaseState};
pub use engine::VendingEngine;
pub use ledger::DepositLedger;
pub use r#async::{AsyncDepositLedger, AsyncProductCatalog, AsyncVendingEngine};
