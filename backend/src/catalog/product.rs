//! Product data models
//!
//! Defines the persisted product record and the write-side shapes used to
//! create and partially update it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier assigned by the store at creation
    pub id: String,
    /// Display name of the product
    pub name: String,
    /// Brand the product is sold under
    pub brand: String,
    /// Catalog category
    pub category: String,
    /// Unit price, never negative
    pub price: f64,
    /// Whether the product is currently available
    pub in_stock: bool,
    /// When the product was created (Unix timestamp)
    pub created_at: i64,
    /// When the product was last updated (Unix timestamp)
    pub updated_at: i64,
}

impl Product {
    /// Build a stored product from validated fields, applying the `in_stock` default
    pub fn from_new(id: String, new: NewProduct) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id,
            name: new.name,
            brand: new.brand,
            category: new.category,
            price: new.price,
            in_stock: new.in_stock.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields of a product about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Product brand
    pub brand: String,
    /// Product category
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Availability; `None` means the store default (`true`)
    pub in_stock: Option<bool>,
}

impl NewProduct {
    /// Check the field rules every persisted product must satisfy
    pub fn validate(&self) -> Result<(), String> {
        validate_text("name", &self.name)?;
        validate_text("brand", &self.brand)?;
        validate_text("category", &self.category)?;
        validate_price(self.price)
    }
}

/// A partial overwrite; only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
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

impl ProductPatch {
    /// Check the rules for every supplied field
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_text("name", name)?;
        }
        if let Some(brand) = &self.brand {
            validate_text("brand", brand)?;
        }
        if let Some(category) = &self.category {
            validate_text("category", category)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Overwrite the supplied fields of `product` and bump its `updated_at`
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(brand) = self.brand {
            product.brand = brand;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        product.updated_at = Utc::now().timestamp();
    }
}

/// Reject empty or whitespace-only text fields
pub fn validate_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    Ok(())
}

/// Reject negative or non-finite prices
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err("price must be a non-negative number".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> NewProduct {
        NewProduct {
            name: "Pen".to_string(),
            brand: "Acme".to_string(),
            category: "Stationery".to_string(),
            price: 1.5,
            in_stock: None,
        }
    }

    #[test]
    fn test_from_new_defaults_in_stock() {
        let product = Product::from_new("id-1".to_string(), pen());
        assert_eq!(product.id, "id-1");
        assert!(product.in_stock);
        assert_eq!(product.created_at, product.updated_at);

        let mut new = pen();
        new.in_stock = Some(false);
        assert!(!Product::from_new("id-2".to_string(), new).in_stock);
    }

    #[test]
    fn test_new_product_validate() {
        assert!(pen().validate().is_ok());

        let mut zero = pen();
        zero.price = 0.0;
        assert!(zero.validate().is_ok());

        let mut negative = pen();
        negative.price = -0.01;
        assert!(negative.validate().is_err());

        let mut blank = pen();
        blank.brand = "   ".to_string();
        assert_eq!(blank.validate().unwrap_err(), "brand cannot be empty");

        let mut nan = pen();
        nan.price = f64::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut product = Product::from_new("id-1".to_string(), pen());
        let patch = ProductPatch {
            price: Some(2.0),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        patch.apply_to(&mut product);

        assert_eq!(product.price, 2.0);
        assert_eq!(product.name, "Pen");
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.category, "Stationery");
        assert!(product.in_stock);
    }

    #[test]
    fn test_patch_validate_rejects_bad_fields() {
        let empty_name = ProductPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_name.validate().is_err());

        let negative = ProductPatch {
            price: Some(-3.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        assert!(ProductPatch::default().validate().is_ok());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::from_new("id-1".to_string(), pen());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["inStock"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("in_stock").is_none());
    }
}
