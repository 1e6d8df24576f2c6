//! Cart handlers
//!
//! - `GET  /api/carts/:user_id`
//! - `POST /api/carts/:user_id/items`

use super::{json_body, parse_id};
use crate::{
    models::{AddToCartRequest, CartResponse},
    state::AppState,
    Result,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let user = parse_id(&user_id, "userId")?;
    let cart = state.cart_service.get(user).await?;
    Ok(Json(CartResponse {
        message: "fetch Cart!",
        cart,
    }))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartResponse>> {
    let user = parse_id(&user_id, "userId")?;
    let request = json_body(payload)?;
    let cart = state.cart_service.add(user, request).await?;
    Ok(Json(CartResponse {
        message: "Product added to cart",
        cart,
    }))
}
