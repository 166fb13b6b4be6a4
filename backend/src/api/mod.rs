//! API module
//!
//! Contains HTTP request handlers for the product endpoints

pub mod dto;
pub mod extract;
pub mod products;
