use marketplace_search::Cart;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    /// Checked by the service so a missing id gets its own message.
    #[serde(default)]
    pub product_id: Option<Uuid>,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: &'static str,
    pub cart: Cart,
}
