//! SQLite product store
//!
//! Handles all database interactions for products.

use crate::catalog::{generate_id, NewProduct, Product, ProductFilter, ProductPatch};
use crate::store::{ProductStore, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const PRODUCT_COLUMNS: &str =
    "id, name, brand, category, price, in_stock, created_at, updated_at";

/// Database connection pool for product operations
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database and run migrations
    ///
    /// # Arguments
    /// * `database_url` - `sqlite:` URL or a plain path to the database file
    /// * `max_connections` - Upper bound for the connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let connection_string = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite:{}", database_url)
        };

        // Ensure parent directory exists
        let file_path = connection_string
            .trim_start_matches("sqlite:")
            .trim_start_matches("//");
        let file_path = file_path.split('?').next().unwrap_or_default();
        if !file_path.contains(":memory:") {
            if let Some(parent) = Path::new(file_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(&connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", database_url);

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_products.sql");

        // Strip comment lines, then execute statement by statement
        let cleaned_sql: String = migration_sql
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("--"))
            .collect::<Vec<_>>()
            .join(" ");

        for statement in cleaned_sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }
}

/// Report CHECK constraint failures as validation errors
fn map_write_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_check_violation() => {
            StoreError::Validation(db_error.message().to_string())
        }
        _ => StoreError::Database(error),
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM products WHERE 1 = 1", PRODUCT_COLUMNS));

        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name);
        }
        if let Some(brand) = &filter.brand {
            query.push(" AND brand = ").push_bind(brand);
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(price) = filter.price {
            query.push(" AND price = ").push_bind(price);
        }
        if let Some(in_stock) = filter.in_stock {
            query.push(" AND in_stock = ").push_bind(in_stock);
        }
        query.push(" ORDER BY rowid ASC");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = ?",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        product.validate().map_err(StoreError::Validation)?;
        let product = Product::from_new(generate_id(), product);

        sqlx::query(
            "INSERT INTO products (id, name, brand, category, price, in_stock, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.in_stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        debug!("Inserted product: {}", product.id);
        Ok(product)
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        patch.validate().map_err(StoreError::Validation)?;
        let updated_at = chrono::Utc::now().timestamp();

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET \
             name = COALESCE(?, name), \
             brand = COALESCE(?, brand), \
             category = COALESCE(?, category), \
             price = COALESCE(?, price), \
             in_stock = COALESCE(?, in_stock), \
             updated_at = ? \
             WHERE id = ? RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(patch.name)
        .bind(patch.brand)
        .bind(patch.category)
        .bind(patch.price)
        .bind(patch.in_stock)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        if product.is_some() {
            debug!("Updated product: {}", id);
        }
        Ok(product)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "DELETE FROM products WHERE id = ? RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if product.is_some() {
            debug!("Deleted product: {}", id);
        }
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir) -> SqliteStore {
        let path = dir.path().join("nested").join("products.db");
        SqliteStore::connect(path.to_str().unwrap(), 1).await.unwrap()
    }

    fn new_product(name: &str, category: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            brand: "Acme".to_string(),
            category: category.to_string(),
            price,
            in_stock: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let product = store
            .insert(new_product("Pen", "Stationery", 1.5))
            .await
            .unwrap();
        assert!(product.in_stock);

        let fetched = store.find_by_id(&product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn test_find_with_filters() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        store.insert(new_product("Pen", "Stationery", 1.5)).await.unwrap();
        store.insert(new_product("Mug", "Kitchen", 0.0)).await.unwrap();
        let mut out_of_stock = new_product("Pencil", "Stationery", 0.5);
        out_of_stock.in_stock = Some(false);
        store.insert(out_of_stock).await.unwrap();

        let all = store.find(&ProductFilter::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Pen", "Mug", "Pencil"]);

        let filter = ProductFilter {
            category: Some("Stationery".to_string()),
            in_stock: Some(true),
            ..Default::default()
        };
        let matched = store.find(&filter).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Pen");

        let free = ProductFilter {
            price: Some(0.0),
            ..Default::default()
        };
        assert_eq!(store.find(&free).await.unwrap()[0].name, "Mug");
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let product = store
            .insert(new_product("Pen", "Stationery", 1.5))
            .await
            .unwrap();

        let patch = ProductPatch {
            price: Some(2.0),
            in_stock: Some(false),
            ..Default::default()
        };
        let updated = store
            .update_by_id(&product.id, patch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.price, 2.0);
        assert!(!updated.in_stock);
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.category, "Stationery");
        assert_eq!(updated.created_at, product.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let product = store
            .insert(new_product("Pen", "Stationery", 1.5))
            .await
            .unwrap();

        let patch = ProductPatch {
            price: Some(-1.0),
            ..Default::default()
        };
        let result = store.update_by_id(&product.id, patch).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_check_violation_maps_to_validation() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        // Bypass the store's own checks so the table constraint fires
        let error = sqlx::query(
            "INSERT INTO products (id, name, brand, category, price, in_stock, created_at, updated_at) \
             VALUES (?, 'Pen', 'Acme', 'Stationery', -1.0, 1, 0, 0)",
        )
        .bind(generate_id())
        .execute(&store.pool)
        .await
        .unwrap_err();

        match map_write_error(error) {
            StoreError::Validation(message) => assert!(message.contains("CHECK")),
            other => panic!("Expected Validation, got: {:?}", other),
        }
        assert!(store.find(&ProductFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_write_errors_stay_database_errors() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let product = store
            .insert(new_product("Pen", "Stationery", 1.5))
            .await
            .unwrap();

        let error = sqlx::query(
            "INSERT INTO products (id, name, brand, category, price, in_stock, created_at, updated_at) \
             VALUES (?, 'Pen', 'Acme', 'Stationery', 1.0, 1, 0, 0)",
        )
        .bind(&product.id)
        .execute(&store.pool)
        .await
        .unwrap_err();

        assert!(matches!(map_write_error(error), StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_connect_reports_unusable_directory_as_io() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let path = blocker.join("products.db");
        let result = SqliteStore::connect(path.to_str().unwrap(), 1).await;
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_product() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let product = store
            .insert(new_product("Pen", "Stationery", 1.5))
            .await
            .unwrap();

        let removed = store.delete_by_id(&product.id).await.unwrap();
        assert_eq!(removed, Some(product.clone()));
        assert!(store.find_by_id(&product.id).await.unwrap().is_none());
        assert!(store.delete_by_id(&product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let id = {
            let store = open_store(&dir).await;
            store
                .insert(new_product("Pen", "Stationery", 1.5))
                .await
                .unwrap()
                .id
        };

        let store = open_store(&dir).await;
        assert!(store.find_by_id(&id).await.unwrap().is_some());
    }
}
