//! Product API handlers
//!
//! Contains HTTP request handlers for product CRUD operations.

use crate::api::dto::{
    CreateProductRequest, MessageResponse, ProductResponse, ProductsListResponse,
    UpdateProductRequest,
};
use crate::api::extract::ApiJson;
use crate::catalog::ProductFilter;
use crate::error::AppError;
use crate::service::ProductService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

/// GET /products - List products, optionally filtered by `field=value` pairs
pub async fn list_products(
    State(service): State<ProductService>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ProductsListResponse>, AppError> {
    let filter = ProductFilter::from_pairs(params).map_err(AppError::Validation)?;
    let products = service.list(&filter).await?;

    Ok(Json(ProductsListResponse {
        message: "Products retrieved successfully".to_string(),
        count: products.len(),
        products,
    }))
}

/// GET /products/:id - Get a specific product
pub async fn get_product(
    State(service): State<ProductService>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = service.get_by_one(&id).await?;

    Ok(Json(ProductResponse {
        message: "Product retrieved successfully".to_string(),
        product,
    }))
}

/// POST /products - Create a new product
pub async fn create_product(
    State(service): State<ProductService>,
    ApiJson(request): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let new_product = request.into_new_product().map_err(AppError::Validation)?;
    let product = service.create(new_product).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product created successfully".to_string(),
            product,
        }),
    ))
}

/// PUT /products/:id - Update a product
///
/// The id is checked before the body, so a malformed id is reported as such
/// whatever the payload looks like.
pub async fn update_product(
    State(service): State<ProductService>,
    Path(id): Path<String>,
    body: Result<ApiJson<UpdateProductRequest>, AppError>,
) -> Result<Json<ProductResponse>, AppError> {
    service.check_id(&id)?;
    let ApiJson(request) = body?;
    let patch = request.into_patch().map_err(AppError::Validation)?;
    let product = service.update(&id, patch).await?;

    Ok(Json(ProductResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// DELETE /products/:id - Delete a product
pub async fn delete_product(
    State(service): State<ProductService>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    service.delete(&id).await?;

    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
