//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It processes operations in batches using
//! thread-based parallelism with buyer-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (buyer partitioning + tasks)
//!     └── AsyncVendingEngine (thread-safe processing)
//!         ├── AsyncDepositLedger (per-buyer entry locks)
//!         └── AsyncProductCatalog (per-product entry locks)
//! ```
//!
//! # Ordering
//!
//! Batches are processed one after another, so a buyer's operations keep
//! their file order even when they span batches. Within a batch different
//! buyers run in parallel and only meet on product stock; when two buyers
//! compete for the last units of a product, which one wins is not fixed.

use crate::core::r#async::{
    AsyncDepositLedger, AsyncProductCatalog, AsyncVendingEngine, BatchProcessor,
};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_holdings_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::Product;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid worker count, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Uses thread-safe components internally (an Arc-wrapped AsyncVendingEngine
/// over DashMap-based stores).
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        catalog: &[Product],
        output: &mut dyn Write,
    ) -> Result<Vec<Product>, String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let ledger = Arc::new(AsyncDepositLedger::new());
            let products = Arc::new(AsyncProductCatalog::new());
            for product in catalog {
                products
                    .register(product.clone())
                    .map_err(|e| e.to_string())?;
            }
            let engine = Arc::new(AsyncVendingEngine::new(
                Arc::clone(&ledger),
                Arc::clone(&products),
            ));
            let processor = BatchProcessor::new(engine);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut applied = 0usize;
            let mut rejected = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                debug!(size = batch.len(), "processing batch");
                // Wait for the whole batch so a buyer's later operations see its earlier ones
                let results = processor.process_batch(batch).await;
                let failed = results.iter().filter(|r| r.result.is_err()).count();
                applied += results.len() - failed;
                rejected += failed;
            }
            info!(applied, rejected, "async processing finished");

            write_holdings_csv(&ledger.get_all_holdings(), output)?;

            Ok(products.get_all_products())
        })
    }
}
