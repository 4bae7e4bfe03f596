//! CSV format handling for operation records, catalog rows and holdings output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for operation rows
//! - ProductCsvRecord structure for catalog rows
//! - Conversion from CSV records to domain types
//! - Holdings and catalog output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{BuyerId, CoinHoldings, Denomination, OperationRecord, Product, ProductId};
use serde::Deserialize;
use std::io::Write;

/// Column header of the catalog input and output files
pub const PRODUCT_HEADER: [&str; 4] = ["product", "name", "price", "stock"];

/// CSV record structure for deserialization of operations
///
/// Matches the input CSV format with columns: type, buyer, product, coin, count.
/// Which optional columns are required depends on the operation type; trailing
/// empty columns may be omitted entirely.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub buyer: BuyerId,
    pub product: Option<ProductId>,
    pub coin: Option<u64>,
    pub count: Option<u64>,
}

/// CSV record structure for catalog rows
///
/// Converted with `Product::new`, which enforces the price rule.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProductCsvRecord {
    pub product: ProductId,
    pub name: String,
    pub price: u64,
    pub stock: u64,
}

/// Convert a CsvRecord to an OperationRecord
///
/// The type is matched case-insensitively. Deposits need `coin` and `count`,
/// purchases need `product` and `count`. Values are not validated here; a zero
/// count or a foreign coin reaches the engine and is rejected there.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, String> {
    let buyer = csv_record.buyer;

    match csv_record.op_type.to_lowercase().as_str() {
        "deposit" => match (csv_record.coin, csv_record.count) {
            (Some(coin), Some(count)) => Ok(OperationRecord::Deposit { buyer, coin, count }),
            _ => Err(format!(
                "Deposit for buyer {} requires a coin and a count",
                buyer
            )),
        },
        "buy" => match (csv_record.product, csv_record.count) {
            (Some(product), Some(quantity)) => Ok(OperationRecord::Buy {
                buyer,
                product,
                quantity,
            }),
            _ => Err(format!(
                "Buy for buyer {} requires a product and a count",
                buyer
            )),
        },
        "reset" => Ok(OperationRecord::Reset { buyer }),
        _ => Err(format!(
            "Invalid operation type: '{}' for buyer {}",
            csv_record.op_type, buyer
        )),
    }
}

/// Write buyer holdings to CSV format
///
/// Columns are the buyer ID, the coin count of each denomination in ascending
/// order, and the total value. Rows are sorted by buyer ID for deterministic
/// output.
pub fn write_holdings_csv(
    holdings: &[(BuyerId, CoinHoldings)],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    let mut header = vec!["buyer".to_string()];
    header.extend(Denomination::ALL.iter().map(|d| d.to_string()));
    header.push("total".to_string());
    writer
        .write_record(&header)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted = holdings.to_vec();
    sorted.sort_by_key(|(buyer, _)| *buyer);

    for (buyer, holdings) in sorted {
        let mut row = vec![buyer.to_string()];
        row.extend(Denomination::ALL.iter().map(|&d| holdings.count(d).to_string()));
        row.push(holdings.total_value().to_string());
        writer
            .write_record(&row)
            .map_err(|e| format!("Failed to write holdings record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write products to CSV format, sorted by product ID
pub fn write_products_csv(products: &[Product], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(PRODUCT_HEADER)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted = products.to_vec();
    sorted.sort_by_key(|product| product.id);

    for product in sorted {
        writer
            .write_record(&[
                product.id.to_string(),
                product.name,
                product.price.to_string(),
                product.stock.to_string(),
            ])
            .map_err(|e| format!("Failed to write product record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
