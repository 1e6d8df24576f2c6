//! Product catalog handlers
//!
//! - `GET    /api/products`
//! - `GET    /api/products/:id`
//! - `PUT    /api/products/:id`
//! - `DELETE /api/products/:id`
//! - `GET    /api/sellers/:seller_id/products`
//! - `POST   /api/sellers/:seller_id/products`

use super::{json_body, parse_id};
use crate::{
    models::{CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest},
    state::AppState,
    Result,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<ProductListResponse>> {
    let products = state.catalog_service.list_all().await?;
    Ok(Json(ProductListResponse::new("fetch All Products!", products)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let id = parse_id(&id, "productId")?;
    let product = state.catalog_service.get(id).await?;
    Ok(Json(ProductResponse {
        message: "fetch Product!",
        product,
    }))
}

pub async fn list_seller_products(
    State(state): State<AppState>,
    Path(seller_id): Path<String>,
) -> Result<Json<ProductListResponse>> {
    let seller = parse_id(&seller_id, "sellerId")?;
    let products = state.catalog_service.list_by_seller(seller).await?;
    Ok(Json(ProductListResponse::new(
        "fetch Seller Products!",
        products,
    )))
}

pub async fn create_product(
    State(state): State<AppState>,
    Path(seller_id): Path<String>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let seller = parse_id(&seller_id, "sellerId")?;
    let request = json_body(payload)?;
    let product = state.catalog_service.create(seller, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product Created!",
            product,
        }),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>> {
    let id = parse_id(&id, "productId")?;
    let request = json_body(payload)?;
    let product = state.catalog_service.update(id, request).await?;
    Ok(Json(ProductResponse {
        message: "Product Updated!",
        product,
    }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let id = parse_id(&id, "productId")?;
    let product = state.catalog_service.delete(id).await?;
    Ok(Json(ProductResponse {
        message: "Product Deleted!",
        product,
    }))
}
