//! Catalog service - product CRUD

use crate::models::{CreateProductRequest, UpdateProductRequest};
use crate::{Error, Result};
use chrono::Utc;
use marketplace_search::{Product, ProductRepository};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct CatalogService {
    repo: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Product>> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Product> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Product not found".to_string()))
    }

    pub async fn list_by_seller(&self, seller: Uuid) -> Result<Vec<Product>> {
        Ok(self.repo.list_by_seller(seller).await?)
    }

    pub async fn create(&self, seller: Uuid, request: CreateProductRequest) -> Result<Product> {
        request.validate()?;
        let product = request.into_new_product(seller).into_product(Utc::now());
        let product = self.repo.insert(product).await?;
        tracing::info!(product_id = %product.id, seller_id = %seller, "Product created");
        Ok(product)
    }

    /// Partial update; an empty request returns the product unchanged.
    pub async fn update(&self, id: Uuid, request: UpdateProductRequest) -> Result<Product> {
        request.validate()?;
        let patch = request.into_patch();
        if patch.is_empty() {
            return self.get(id).await;
        }
        let product = self.repo.update(id, &patch).await?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Product> {
        let product = self.repo.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(product)
    }
}
