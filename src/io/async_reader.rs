//! Asynchronous CSV reader with stream interface
//!
//! Provides a streaming interface over operation records from a CSV file.
//! Supports batch reading for efficient async processing.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - tokio for async runtime and concurrency primitives
//! - Batch reading for efficient processing
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of OperationRecords
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::OperationRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Reads operation records in batches without loading the whole file.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader over CSV data with a header row
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` operation records
    ///
    /// Malformed rows are logged and skipped. An empty batch means the input
    /// is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<OperationRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(record) => batch.push(record),
                    Err(e) => warn!(error = %e, "skipping operation record"),
                },
                Some(Err(e)) => warn!(error = %e, "skipping malformed CSV row"),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    const HEADER: &str = "type,buyer,product,coin,count\n";

    fn reader(rows: &str) -> AsyncReader<Cursor<Vec<u8>>> {
        AsyncReader::new(Cursor::new(format!("{}{}", HEADER, rows).into_bytes()))
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let mut async_reader = reader("deposit,1,,50,1\nbuy,1,3,,1\nreset,2,,,\n");

        let batch = async_reader.read_batch(2).await;
        assert_eq!(
            batch,
            vec![
                OperationRecord::Deposit {
                    buyer: 1,
                    coin: 50,
                    count: 1
                },
                OperationRecord::Buy {
                    buyer: 1,
                    product: 3,
                    quantity: 1
                },
            ]
        );

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch, vec![OperationRecord::Reset { buyer: 2 }]);

        assert!(async_reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut async_reader = reader("");

        assert!(async_reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let mut async_reader = reader("refund,1,,,\ndeposit,1,,ten,1\nbuy,1,,,1\nreset,9,,,\n");

        let batch = async_reader.read_batch(10).await;

        assert_eq!(batch, vec![OperationRecord::Reset { buyer: 9 }]);
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_and_case() {
        let mut async_reader = reader("  Deposit  ,  3  ,  ,  100  ,  2  \n");

        let batch = async_reader.read_batch(10).await;

        assert_eq!(
            batch,
            vec![OperationRecord::Deposit {
                buyer: 3,
                coin: 100,
                count: 2
            }]
        );
    }

    #[tokio::test]
    async fn test_async_reader_multiple_batches() {
        let rows: String = (1..=5).map(|buyer| format!("reset,{},,,\n", buyer)).collect();
        let mut async_reader = reader(&rows);

        let sizes = [
            async_reader.read_batch(2).await.len(),
            async_reader.read_batch(2).await.len(),
            async_reader.read_batch(2).await.len(),
            async_reader.read_batch(2).await.len(),
        ];

        assert_eq!(sizes, [2, 2, 1, 0]);
    }
}
