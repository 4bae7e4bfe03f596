//! Asynchronous implementations of core components
//!
//! This module provides thread-safe, concurrent implementations of the core
//! components using DashMap for locking.
//!
//! # Architecture
//!
//! The async implementations apply the same coordinator functions as the
//! synchronous versions, but over concurrent stores:
//!
//! - **AsyncDepositLedger**: Thread-safe buyer holdings using DashMap
//! - **AsyncProductCatalog**: Thread-safe product stock using DashMap
//! - **AsyncVendingEngine**: Applies operations against both stores
//! - **BatchProcessor**: Runs each buyer's operations on its own task
//!
//! # Thread Safety
//!
//! - Operations on different buyers proceed in parallel
//! - Operations on the same buyer or the same product are serialized
//! - No global locks - fine-grained locking per entity

pub mod batch_processor;
pub mod catalog;
pub mod engine;
pub mod ledger;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use catalog::AsyncProductCatalog;
pub use engine::AsyncVendingEngine;
pub use ledger::AsyncDepositLedger;
