//! In-memory product store
//!
//! Keeps products in insertion order behind a `RwLock`. Used when the
//! service runs without a database and in tests.

use crate::catalog::{generate_id, NewProduct, Product, ProductFilter, ProductPatch};
use crate::store::{ProductStore, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Product store backed by a vector
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|product| product.id == id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        product.validate().map_err(StoreError::Validation)?;

        let product = Product::from_new(generate_id(), product);
        self.products.write().await.push(product.clone());

        debug!("Inserted product: {}", product.id);
        Ok(product)
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        patch.validate().map_err(StoreError::Validation)?;

        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|product| product.id == id) else {
            return Ok(None);
        };
        patch.apply_to(product);

        debug!("Updated product: {}", id);
        Ok(Some(product.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;
        let removed = products
            .iter()
            .position(|product| product.id == id)
            .map(|index| products.remove(index));

        if removed.is_some() {
            debug!("Deleted product: {}", id);
        }
        Ok(removed)
    }
}
