//! Per-user shopping carts

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub product: Uuid,
    pub quantity: i64,
}

/// A user's cart. Lines keep the order in which products were first added.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user: Uuid,
    #[serde(rename = "products")]
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add `quantity` of `product`, merging into an existing line.
    pub fn add(&mut self, product: Uuid, quantity: i64, now: DateTime<Utc>) {
        match self.items.iter_mut().find(|item| item.product == product) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem { product, quantity }),
        }
        self.updated_at = now;
    }

    /// Drop every line for `product`. Returns whether anything was removed.
    pub fn remove_product(&mut self, product: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product != product);
        self.items.len() != before
    }

    /// Quantity of `product`, zero when absent.
    pub fn quantity_of(&self, product: Uuid) -> i64 {
        self.items
            .iter()
            .find(|item| item.product == product)
            .map_or(0, |item| item.quantity)
    }

    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }
}
