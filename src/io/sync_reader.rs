//! Synchronous CSV readers
//!
//! Provides a streaming iterator over operation records and a loader for the
//! product catalog. CSV format concerns are delegated to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<OperationRecord, String>` for each CSV row:
//!
//! ```no_run
//! use coin_vending_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Processing operation: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging
//! - The catalog is configuration, so `read_catalog` fails on the first bad row
//!   and reports it as a `VendingError`

use crate::io::csv_format::{convert_csv_record, CsvRecord, ProductCsvRecord};
use crate::types::{OperationRecord, Product, VendingError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

fn open_csv(path: &Path) -> Result<csv::Reader<File>, String> {
    let file =
        File::open(path).map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    Ok(ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .buffer_capacity(8 * 1024)
        .from_reader(file))
}

/// Synchronous operations reader
///
/// Reads one CSV row at a time, so memory use does not grow with the file.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Open an operations CSV file
    ///
    /// The reader trims whitespace from all fields and accepts rows that omit
    /// trailing optional columns.
    pub fn new(path: &Path) -> Result<Self, String> {
        Ok(Self {
            reader: open_csv(path)?,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<OperationRecord, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;

        match next {
            Ok(csv_record) => Some(
                convert_csv_record(csv_record)
                    .map_err(|e| format!("Line {}: {}", self.line_num, e)),
            ),
            Err(e) => Some(Err(format!(
                "Line {}: CSV parse error: {}",
                self.line_num, e
            ))),
        }
    }
}

/// Load every product of a catalog CSV file
///
/// # Errors
///
/// - `FileNotFound` or `IoError` if the file cannot be opened
/// - `ParseError` for a malformed row, with its line number
/// - `InvalidPrice` for a price that is not a multiple of the smallest coin
pub fn read_catalog(path: &Path) -> Result<Vec<Product>, VendingError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VendingError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => VendingError::from(e),
    })?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    reader
        .deserialize::<ProductCsvRecord>()
        .map(|row| {
            let record = row?;
            Product::new(record.product, record.name, record.price, record.stock)
        })
        .collect()
}
