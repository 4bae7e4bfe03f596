//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating between
//! the SyncReader (for CSV input) and VendingEngine (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Operation processing to `VendingEngine` (business logic)
//! - CSV output to `csv_format::write_holdings_csv` (format handling)
//!
//! Records are streamed one at a time, so memory use is bounded by the number
//! of buyers and products rather than the number of operations.

use crate::core::VendingEngine;
use crate::io::csv_format::write_holdings_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::Product;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use coin_vending_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use coin_vending_engine::types::Product;
/// use std::path::Path;
/// use std::io;
///
/// let catalog = vec![Product::new(1, "Cola", 65, 10).unwrap()];
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("operations.csv"), &catalog, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        catalog: &[Product],
        output: &mut dyn Write,
    ) -> Result<Vec<Product>, String> {
        let mut engine =
            VendingEngine::with_products(catalog.iter().cloned()).map_err(|e| e.to_string())?;

        let reader = SyncReader::new(input_path)?;

        let mut applied = 0usize;
        let mut rejected = 0usize;
        for result in reader {
            match result {
                Ok(record) => {
                    let buyer = record.buyer();
                    let operation = record.op_type();
                    match engine.process(record) {
                        Ok(_) => applied += 1,
                        Err(e) => {
                            rejected += 1;
                            warn!(buyer, ?operation, error = %e, "operation rejected");
                        }
                    }
                }
                Err(e) => {
                    rejected += 1;
                    warn!(error = %e, "skipping operation record");
                }
            }
        }
        info!(applied, rejected, "sync processing finished");

        write_holdings_csv(&engine.get_holdings(), output)?;

        Ok(engine.get_products())
    }
}
