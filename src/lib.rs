//! Coin Vending Engine Library
//! # Overview
//!
//! This library runs a coin-operated vending exchange: buyers deposit coins of
//! fixed denominations, buy products and receive exact change in coins, or
//! withdraw everything they hold. Operations stream in from CSV and run under
//! either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (denominations, holdings, products, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::allocation`] - Exact-change allocation over a buyer's coins
//!   - [`core::coordinator`] - Purchase validation, allocation and commit
//!   - [`core::ledger`] - Per-buyer coin holdings
//!   - [`core::catalog`] - Product prices and stock
//!   - [`core::engine`] - Operation routing
//! - [`io`] - CSV readers and writers
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Denominations
//!
//! Accepted coins are 5, 10, 20, 50 and 100 minor units. Prices must be a
//! multiple of 5 so that every purchase can be paid exactly.
//!
//! # Purchases
//!
//! A purchase debits coins from the largest denomination down. When the held
//! coins cannot cover the cost exactly, one larger coin is broken and the
//! difference comes back as change in smaller coins, so the buyer's holdings
//! always drop by exactly the cost.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{allocate, DepositLedger, ProductCatalog, PurchaseState, VendingEngine};
pub use io::write_holdings_csv;
pub use types::{
    BuyerId, ChangeManifest, CoinCounts, CoinHoldings, Denomination, OperationRecord, Product,
    ProductId, Settlement, VendingError,
};
