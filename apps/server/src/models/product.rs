use marketplace_search::{NewProduct, Product, ProductPatch};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Text fields are stored trimmed, so whitespace-only input counts as empty.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i64,
    #[validate(custom(function = "not_blank", message = "category is required"))]
    pub category: String,
    #[serde(default)]
    pub product_image: Option<String>,
}

impl CreateProductRequest {
    pub fn into_new_product(self, seller: Uuid) -> NewProduct {
        NewProduct {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            stock: self.stock,
            category: self.category.trim().to_string(),
            seller: Some(seller),
            product_image: self.product_image,
        }
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(custom(function = "not_blank", message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i64>,
    #[validate(custom(function = "not_blank", message = "category must not be empty"))]
    pub category: Option<String>,
    pub product_image: Option<String>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            price: self.price,
            stock: self.stock,
            category: self.category.map(|c| c.trim().to_string()),
            product_image: self.product_image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: &'static str,
    pub product: Product,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub message: &'static str,
    pub total_products: usize,
    pub products: Vec<Product>,
}

impl ProductListResponse {
    pub fn new(message: &'static str, products: Vec<Product>) -> Self {
        Self {
            message,
            total_products: products.len(),
            products,
        }
    }
}
