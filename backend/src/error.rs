//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` so every failure is a JSON object with a
//! human-readable `message`.

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Every product operation fails with one of these. Each variant maps to a
/// fixed status code in `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// The product ID is not in the store's identifier format
    #[error("Invalid product ID")]
    InvalidProductId,

    /// The request payload or query is malformed or incomplete
    #[error("{0}")]
    Validation(String),

    /// No product has the requested ID
    #[error("Product not found")]
    ProductNotFound,

    /// A list query matched nothing
    #[error("No products found")]
    NoProductsFound,

    /// The product store call failed
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidProductId => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ProductNotFound => StatusCode::NOT_FOUND,
            AppError::NoProductsFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            Json(json!({
                "message": "Server error",
                "error": self.to_string(),
            }))
        } else {
            Json(json!({ "message": self.to_string() }))
        };

        (status, body).into_response()
    }
}
