//! Thread-safe product catalog for async batch processing
//!
//! This module provides the `AsyncProductCatalog` struct, which stores products
//! in a concurrent map. A product's entry stays locked for the whole closure
//! passed to [`AsyncProductCatalog::update`], so concurrent purchases of the
//! same product are serialized and each one sees the stock left by the last.

use crate::types::{validate_price, Product, ProductId, VendingError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Thread-safe product store
#[derive(Debug, Default)]
pub struct AsyncProductCatalog {
    /// Concurrent map of product IDs to products
    products: DashMap<ProductId, Product>,
}

impl AsyncProductCatalog {
    /// Create a new empty AsyncProductCatalog
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
        }
    }

    /// Register a product; the first registration of an ID wins
    pub fn register(&self, product: Product) -> Result<(), VendingError> {
        validate_price(product.id, product.price)?;
        match self.products.entry(product.id) {
            Entry::Occupied(_) => Err(VendingError::duplicate_product(product.id)),
            Entry::Vacant(vacant) => {
                vacant.insert(product);
                Ok(())
            }
        }
    }

    /// Snapshot of a product
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).map(|product| product.value().clone())
    }

    /// Run `f` with exclusive access to a product
    ///
    /// # Errors
    ///
    /// `ProductNotFound` if the ID is unknown, otherwise whatever `f` returns.
    pub fn update<F, T>(&self, id: ProductId, f: F) -> Result<T, VendingError>
    where
        F: FnOnce(&mut Product) -> Result<T, VendingError>,
    {
        let mut product = self
            .products
            .get_mut(&id)
            .ok_or_else(|| VendingError::product_not_found(id))?;
        f(product.value_mut())
    }

    /// Get all products sorted by product ID
    pub fn get_all_products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        products.sort_by_key(|product| product.id);
        products
    }
}
