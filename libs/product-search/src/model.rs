//! Catalog record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product listed by a seller.
///
/// `price` and `stock` are always present; products written through the
/// catalog service are validated to be non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    /// Owning seller, if the product was created on behalf of one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<Uuid>,
    /// Opaque image reference (path or URL); storage lives elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when listing a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub seller: Option<Uuid>,
    pub product_image: Option<String>,
}

impl NewProduct {
    /// Assign an id and timestamps.
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            seller: self.seller,
            product_image: self.product_image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial product update. `None` leaves the field unchanged.
///
/// Ownership is fixed at creation, so there is no seller field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub product_image: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.product_image.is_none()
    }

    /// Apply present fields to `product` and bump `updated_at`.
    pub fn apply(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(image) = &self.product_image {
            product.product_image = Some(image.clone());
        }
        product.updated_at = now;
    }
}
