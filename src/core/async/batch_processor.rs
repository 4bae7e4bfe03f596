//! Batch processing with buyer-based partitioning for async operation processing
//!
//! This module provides the `BatchProcessor` struct, which processes a batch of
//! operations with one tokio task per buyer.
//!
//! # Design
//!
//! Operations of different buyers only contend on product stock, which the
//! engine guards with per-product locks, so buyers can run in parallel.
//! Operations of one buyer stay in input order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AsyncVendingEngine>  (shared operation processor)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncVendingEngine;
use crate::types::{BuyerId, OperationOutcome, OperationRecord, VendingError};
use tracing::{error, warn};

/// Result of processing a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was processed
    pub record: OperationRecord,

    /// The result of processing (success or error)
    pub result: Result<OperationOutcome, VendingError>,
}

/// Batch processor with buyer-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe operation processing engine
    engine: Arc<AsyncVendingEngine>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    pub fn new(engine: Arc<AsyncVendingEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch of operations by buyer ID
    ///
    /// # Guarantees
    ///
    /// - Each operation appears in exactly one sub-batch
    /// - Operations for each buyer keep their original order
    pub fn partition_by_buyer(
        &self,
        batch: Vec<OperationRecord>,
    ) -> HashMap<BuyerId, Vec<OperationRecord>> {
        let mut buyer_batches: HashMap<BuyerId, Vec<OperationRecord>> = HashMap::new();

        for record in batch {
            buyer_batches
                .entry(record.buyer())
                .or_default()
                .push(record);
        }

        buyer_batches
    }

    /// Process all operations of a single buyer sequentially
    ///
    /// Failed operations are logged and do not stop the remaining ones.
    pub async fn process_buyer_operations(
        &self,
        operations: Vec<OperationRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(operations.len());

        for record in operations {
            let result = self.engine.process_operation(record.clone());
            if let Err(e) = &result {
                warn!(
                    buyer = record.buyer(),
                    operation = ?record.op_type(),
                    error = %e,
                    "operation rejected"
                );
            }
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a batch with one task per buyer and wait for all of them
    ///
    /// Results are grouped by buyer, not in input order.
    pub async fn process_batch(&self, batch: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let buyer_batches = self.partition_by_buyer(batch);

        let mut tasks = Vec::with_capacity(buyer_batches.len());
        for (_buyer, operations) in buyer_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_buyer_operations(operations).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(buyer_results) => results.extend(buyer_results),
                Err(e) => error!(error = ?e, "buyer task panicked"),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::r#async::{AsyncDepositLedger, AsyncProductCatalog};
    use crate::types::Product;

    fn setup() -> (BatchProcessor, Arc<AsyncDepositLedger>, Arc<AsyncProductCatalog>) {
        let ledger = Arc::new(AsyncDepositLedger::new());
        let catalog = Arc::new(AsyncProductCatalog::new());
        catalog
            .register(Product::new(1, "Cola", 65, 10).unwrap())
            .unwrap();
        let engine = Arc::new(AsyncVendingEngine::new(
            Arc::clone(&ledger),
            Arc::clone(&catalog),
        ));
        (BatchProcessor::new(engine), ledger, catalog)
    }

    fn deposit(buyer: BuyerId, coin: u64, count: u64) -> OperationRecord {
        OperationRecord::Deposit { buyer, coin, count }
    }

    fn buy(buyer: BuyerId, quantity: u64) -> OperationRecord {
        OperationRecord::Buy {
            buyer,
            product: 1,
            quantity,
        }
    }

    #[test]
    fn test_partition_by_buyer_empty_batch() {
        let (processor, _, _) = setup();
        assert!(processor.partition_by_buyer(vec![]).is_empty());
    }

    #[test]
    fn test_partition_by_buyer_maintains_order() {
        let (processor, _, _) = setup();
        let batch = vec![
            deposit(1, 100, 1),
            deposit(2, 50, 1),
            buy(1, 1),
            OperationRecord::Reset { buyer: 2 },
            OperationRecord::Reset { buyer: 1 },
        ];

        let partitioned = processor.partition_by_buyer(batch);

        assert_eq!(partitioned.len(), 2);
        assert_eq!(
            partitioned[&1],
            vec![deposit(1, 100, 1), buy(1, 1), OperationRecord::Reset { buyer: 1 }]
        );
        assert_eq!(
            partitioned[&2],
            vec![deposit(2, 50, 1), OperationRecord::Reset { buyer: 2 }]
        );
    }

    #[tokio::test]
    async fn test_process_buyer_operations_continues_after_error() {
        let (processor, ledger, _) = setup();

        let results = processor
            .process_buyer_operations(vec![
                deposit(1, 50, 1),
                buy(1, 1),
                deposit(1, 20, 1),
                buy(1, 1),
            ])
            .await;

        assert_eq!(results.len(), 4);
        assert_eq!(
            results[1].result,
            Err(VendingError::insufficient_funds(50, 65))
        );
        assert!(results[3].result.is_ok());
        assert_eq!(ledger.get_or_create(1).total_value(), 5);
    }

    #[tokio::test]
    async fn test_process_batch_empty() {
        let (processor, _, _) = setup();
        assert!(processor.process_batch(vec![]).await.is_empty());
    }

    #[tokio::test]
    async fn test_process_batch_interleaved_buyers() {
        let (processor, ledger, catalog) = setup();
        let batch = vec![
            deposit(1, 100, 1),
            deposit(2, 50, 2),
            buy(1, 1),
            buy(2, 1),
            deposit(3, 5, 1),
            OperationRecord::Reset { buyer: 3 },
        ];

        let results = processor.process_batch(batch).await;

        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|r| r.result.is_ok()));
        assert_eq!(ledger.get_or_create(1).total_value(), 35);
        assert_eq!(ledger.get_or_create(2).total_value(), 35);
        assert_eq!(ledger.get_or_create(3).total_value(), 0);
        assert_eq!(catalog.get(1).map(|p| p.stock), Some(8));
    }

    #[tokio::test]
    async fn test_process_batch_many_buyers() {
        let (processor, ledger, _) = setup();
        let batch: Vec<OperationRecord> = (0..100).map(|buyer| deposit(buyer, 10, 2)).collect();

        let results = processor.process_batch(batch).await;

        assert_eq!(results.len(), 100);
        let total: u64 = ledger
            .get_all_holdings()
            .iter()
            .map(|(_, holdings)| holdings.total_value())
            .sum();
        assert_eq!(total, 2000);
    }
}
