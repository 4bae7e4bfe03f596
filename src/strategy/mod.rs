//! Processing strategy module for vending operations
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing both CSV parsing and vending engine processing. This allows
//! different processing implementations (synchronous, asynchronous batch) to be
//! selected at runtime.

use crate::cli::StrategyType;
use crate::types::Product;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete vending pipelines
///
/// Each strategy stocks an engine with the given catalog, applies every
/// operation of the input file, writes the final buyer holdings to `output`
/// and returns the final state of the catalog.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from the input file and write holdings to output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog holds a duplicate product or an invalid price
    /// - The input file cannot be opened
    /// - Output cannot be written
    ///
    /// Individual operation failures are logged and do not cause this method
    /// to return an error. Processing continues with the next operation.
    fn process(
        &self,
        input_path: &Path,
        catalog: &[Product],
        output: &mut dyn Write,
    ) -> Result<Vec<Product>, String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` only applies to the async strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
