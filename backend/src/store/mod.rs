//! Product store
//!
//! The persistence contract the product operations run against, plus the
//! SQLite and in-memory implementations.

pub mod memory;
pub mod sqlite;

use crate::catalog::{self, NewProduct, Product, ProductFilter, ProductPatch};
use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors raised by a product store
///
/// The operation layer reports all of these as server errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A write was rejected by the store's field rules
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The underlying database call failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error while preparing the database location
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document collection of products keyed by an opaque id
///
/// Each method is a single store call. Implementations must be safe to
/// share across concurrent requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Whether `id` matches this store's identifier format
    fn is_valid_id(&self, id: &str) -> bool {
        catalog::is_valid_id(id)
    }

    /// All products matching `filter`, in insertion order
    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// The product with `id`, if any
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError>;

    /// Insert a new product; the store assigns the id and applies defaults
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Overwrite the supplied fields; returns the updated product, `None` if missing
    async fn update_by_id(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError>;

    /// Remove the product with `id`; returns it, `None` if missing
    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>, StoreError>;
}
