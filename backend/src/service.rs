//! Product operations
//!
//! The five product operations. Each one validates its input, makes exactly
//! one store call and maps the outcome onto [`AppError`]. Store failures are
//! never retried.

use crate::catalog::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::error::AppError;
use crate::store::ProductStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Stateless handler over an injected product store
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    /// Create a service over `store`
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// All products matching `filter`; an empty result is `NoProductsFound`
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        let products = self.store.find(filter).await.map_err(store_failure)?;
        if products.is_empty() {
            return Err(AppError::NoProductsFound);
        }
        Ok(products)
    }

    /// The product with `id`
    pub async fn get_by_one(&self, id: &str) -> Result<Product, AppError> {
        self.check_id(id)?;
        self.store
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or(AppError::ProductNotFound)
    }

    /// Validate `new_product` and insert it
    pub async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        new_product.validate().map_err(AppError::Validation)?;
        let product = self.store.insert(new_product).await.map_err(store_failure)?;

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Overwrite the supplied fields of product `id`
    pub async fn update(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Product, AppError> {
        self.check_id(id)?;
        patch.validate().map_err(AppError::Validation)?;
        let product = self
            .store
            .update_by_id(id, patch)
            .await
            .map_err(store_failure)?
            .ok_or(AppError::ProductNotFound)?;

        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Remove product `id`, returning what was removed
    pub async fn delete(&self, id: &str) -> Result<Product, AppError> {
        self.check_id(id)?;
        let product = self
            .store
            .delete_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or(AppError::ProductNotFound)?;

        info!(product_id = %product.id, "Product deleted");
        Ok(product)
    }

    /// Reject ids the store could never hold, before any store call
    pub fn check_id(&self, id: &str) -> Result<(), AppError> {
        if id.is_empty() || !self.store.is_valid_id(id) {
            return Err(AppError::InvalidProductId);
        }
        Ok(())
    }
}

fn store_failure(error: crate::store::StoreError) -> AppError {
    warn!(error = %error, "Product store call failed");
    AppError::Store(error)
}
