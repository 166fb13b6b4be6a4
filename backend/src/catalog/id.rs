//! Product identifiers
//!
//! Ids are UUID v4 values in their canonical hyphenated lowercase form.
//! Callers only rely on [`generate_id`] and [`is_valid_id`].

use uuid::Uuid;

/// Generate a new unique product ID
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `id` is syntactically a product ID
///
/// Only the canonical form is accepted so that a valid id always
/// compares equal to the stored key.
pub fn is_valid_id(id: &str) -> bool {
    match Uuid::parse_str(id) {
        Ok(uuid) => uuid.hyphenated().to_string() == id,
        Err(_) => false,
    }
}
