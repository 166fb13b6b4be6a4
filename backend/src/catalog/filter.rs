//! Equality filters for listing products

use crate::catalog::Product;

/// Exact-match criteria; every supplied field must match (AND)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Match on name
    pub name: Option<String>,
    /// Match on brand
    pub brand: Option<String>,
    /// Match on category
    pub category: Option<String>,
    /// Match on price
    pub price: Option<f64>,
    /// Match on availability
    pub in_stock: Option<bool>,
}

impl ProductFilter {
    /// Build a filter from raw `field=value` pairs, e.g. a query string
    ///
    /// Unknown fields, repeated fields and values that do not parse for the
    /// field's type are rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let duplicate = match key {
                "name" => filter.name.replace(value.to_string()).is_some(),
                "brand" => filter.brand.replace(value.to_string()).is_some(),
                "category" => filter.category.replace(value.to_string()).is_some(),
                "price" => {
                    let price = value
                        .parse::<f64>()
                        .ok()
                        .filter(|price| price.is_finite())
                        .ok_or_else(|| format!("Invalid value for price filter: {}", value))?;
                    filter.price.replace(price).is_some()
                }
                "inStock" => {
                    let in_stock = value
                        .parse::<bool>()
                        .map_err(|_| format!("Invalid value for inStock filter: {}", value))?;
                    filter.in_stock.replace(in_stock).is_some()
                }
                other => return Err(format!("Unknown filter field: {}", other)),
            };
            if duplicate {
                return Err(format!("Filter field given more than once: {}", key));
            }
        }
        Ok(filter)
    }

    /// True when no criteria are set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `product` satisfies every criterion
    pub fn matches(&self, product: &Product) -> bool {
        self.name.as_ref().map_or(true, |v| *v == product.name)
            && self.brand.as_ref().map_or(true, |v| *v == product.brand)
            && self.category.as_ref().map_or(true, |v| *v == product.category)
            && self.price.map_or(true, |v| v == product.price)
            && self.in_stock.map_or(true, |v| v == product.in_stock)
    }
}
