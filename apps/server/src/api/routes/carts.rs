//! Cart routes

use crate::api::handlers::carts;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/carts/:user_id", get(carts::get_cart))
        .route("/carts/:user_id/items", post(carts::add_to_cart))
}
