//! Request and response bodies for the product endpoints

use crate::catalog::{validate_price, NewProduct, Product, ProductPatch};
use serde::{Deserialize, Serialize};

/// Create product request
///
/// Every field is optional at the JSON level so that a missing field is
/// reported by name instead of as a generic decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductRequest {
    /// Product name (required)
    pub name: Option<String>,
    /// Product brand (required)
    pub brand: Option<String>,
    /// Product category (required)
    pub category: Option<String>,
    /// Unit price (required, zero allowed)
    pub price: Option<f64>,
    /// Availability, defaults to `true`
    pub in_stock: Option<bool>,
}

impl CreateProductRequest {
    /// Check required fields and turn the request into insertable fields
    pub fn into_new_product(self) -> Result<NewProduct, String> {
        let name = required_text("name", self.name)?;
        let brand = required_text("brand", self.brand)?;
        let category = required_text("category", self.category)?;
        let price = self.price.ok_or_else(|| "price is required".to_string())?;
        validate_price(price)?;

        Ok(NewProduct {
            name,
            brand,
            category,
            price,
            in_stock: self.in_stock,
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} is required", field)),
    }
}

/// Update product request; only supplied fields are changed
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProductRequest {
    /// New name
    pub name: Option<String>,
    /// New brand
    pub brand: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New price
    pub price: Option<f64>,
    /// New availability
    pub in_stock: Option<bool>,
}

impl UpdateProductRequest {
    /// Check supplied fields and turn the request into a patch
    pub fn into_patch(self) -> Result<ProductPatch, String> {
        let patch = ProductPatch {
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            in_stock: self.in_stock,
        };
        patch.validate()?;
        Ok(patch)
    }
}

/// Single product response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Human-readable message
    pub message: String,
    /// The product
    pub product: Product,
}

/// Products list response
#[derive(Debug, Serialize)]
pub struct ProductsListResponse {
    /// Human-readable message
    pub message: String,
    /// Number of products returned
    pub count: usize,
    /// Matching products in storage order
    pub products: Vec<Product>,
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}
