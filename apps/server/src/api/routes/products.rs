//! Product catalog and search routes

use crate::api::handlers::{products, search};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list_products))
        // Registered before `:id` so it is not captured as an id
        .route("/products/filter", get(search::filter_products))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/sellers/:seller_id/products",
            get(products::list_seller_products).post(products::create_product),
        )
}
