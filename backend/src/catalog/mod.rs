//! Catalog module
//!
//! Product model, identifier format, list filters and field rules.

pub mod filter;
pub mod id;
pub mod product;

pub use filter::ProductFilter;
pub use id::{generate_id, is_valid_id};
pub use product::{validate_price, validate_text, NewProduct, Product, ProductPatch};
