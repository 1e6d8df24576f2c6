//! Cart service - per-user carts

use crate::models::AddToCartRequest;
use crate::{Error, Result};
use marketplace_search::{Cart, CartStore};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct CartService {
    carts: Arc<dyn CartStore>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartStore>) -> Self {
        Self { carts }
    }

    pub async fn get(&self, user: Uuid) -> Result<Cart> {
        self.carts
            .get_cart(user)
            .await?
            .ok_or_else(|| Error::NotFound("Cart not found".to_string()))
    }

    /// The cart is created on the user's first add.
    pub async fn add(&self, user: Uuid, request: AddToCartRequest) -> Result<Cart> {
        let product = request
            .product_id
            .ok_or_else(|| Error::Validation("Product ID is required".to_string()))?;
        request.validate()?;

        let cart = self
            .carts
            .add_to_cart(user, product, request.quantity)
            .await?;
        tracing::info!(
            user_id = %user,
            product_id = %product,
            quantity = cart.quantity_of(product),
            "Product added to cart"
        );
        Ok(cart)
    }
}
