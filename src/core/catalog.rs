//! Product catalog
//!
//! This module provides the ProductCatalog component that keeps the price and
//! remaining stock of every product on sale. Purchases read a product from
//! the catalog and write back the copy with decremented stock.
//!
//! # Duplicate Handling
//!
//! Registering a product ID that is already present is rejected; the first
//! registration wins.

use crate::types::{validate_price, Product, ProductId, VendingError};
use std::collections::HashMap;

/// Product catalog
///
/// Maintains a HashMap of product ID to product.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    /// Map of product ID to product
    products: HashMap<ProductId, Product>,
}

impl ProductCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        ProductCatalog {
            products: HashMap::new(),
        }
    }

    /// Register a product
    ///
    /// # Errors
    ///
    /// - `InvalidPrice` if the price is not a multiple of the smallest coin
    /// - `DuplicateProduct` if the ID is already registered
    pub fn register(&mut self, product: Product) -> Result<(), VendingError> {
        validate_price(product.id, product.price)?;
        if self.products.contains_key(&product.id) {
            return Err(VendingError::duplicate_product(product.id));
        }
        self.products.insert(product.id, product);
        Ok(())
    }

    /// Get an immutable reference to a product
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Get a mutable reference to a product
    ///
    /// Used to commit a settled purchase's stock.
    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }

    /// Get all products sorted by product ID
    pub fn get_all_products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by_key(|product| product.id);
        products
    }
}
