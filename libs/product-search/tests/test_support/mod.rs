#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use marketplace_search::{
    FacetSummary, InMemoryProductStore, PageWindow, Predicate, Product, ProductStore,
    SearchQueryEngine, SortSpec, StoreError, StoreResult,
};
use std::sync::{Arc, OnceLock};
use tokio::runtime::Runtime;
use uuid::Uuid;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| Runtime::new().expect("failed to create Tokio runtime for tests"))
}

/// Drive a future from synchronous property tests.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    runtime().block_on(future)
}

/// Build a product with a creation time `minutes` after a fixed epoch.
pub fn product(
    name: &str,
    description: &str,
    price: f64,
    stock: i64,
    category: &str,
    minutes: i64,
) -> Product {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        stock,
        category: category.to_string(),
        seller: None,
        product_image: None,
        created_at: created,
        updated_at: created,
    }
}

/// Five products; three mention "phone" in name or description.
pub fn phone_catalog() -> Vec<Product> {
    vec![
        product("Smartphone X", "Flagship device", 899.0, 5, "phones", 1),
        product("Phone case", "Silicone cover", 19.0, 0, "accessories", 2),
        product("Charger", "Works with any PHONE", 150.0, 12, "accessories", 3),
        product("Laptop", "14 inch", 1499.0, 3, "computers", 4),
        product("Desk", "Oak top", 6200.0, 1, "furniture", 5),
    ]
}

/// A larger catalog spread across categories, prices and stock levels.
pub fn mixed_catalog(size: usize) -> Vec<Product> {
    const CATEGORIES: [&str; 4] = ["books", "games", "garden", "tools"];
    const PRICES: [f64; 7] = [0.0, 42.5, 100.0, 250.0, 500.0, 1200.0, 7500.0];

    (0..size)
        .map(|i| {
            product(
                &format!("Item {i}"),
                "generated",
                PRICES[i % PRICES.len()],
                (i % 3) as i64,
                CATEGORIES[i % CATEGORIES.len()],
                i as i64,
            )
        })
        .collect()
}

pub fn engine_for(products: Vec<Product>) -> SearchQueryEngine {
    SearchQueryEngine::new(Arc::new(InMemoryProductStore::with_products(products)))
}

/// Store whose every call fails as if the backend were down.
pub struct UnavailableStore;

#[async_trait]
impl ProductStore for UnavailableStore {
    async fn count(&self, _predicate: &Predicate) -> StoreResult<u64> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_page(
        &self,
        _predicate: &Predicate,
        _sort: &SortSpec,
        _window: PageWindow,
    ) -> StoreResult<Vec<Product>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn facets(&self, _predicate: &Predicate) -> StoreResult<FacetSummary> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Store whose reads never complete.
pub struct StalledStore;

#[async_trait]
impl ProductStore for StalledStore {
    async fn count(&self, _predicate: &Predicate) -> StoreResult<u64> {
        std::future::pending().await
    }

    async fn find_page(
        &self,
        _predicate: &Predicate,
        _sort: &SortSpec,
        _window: PageWindow,
    ) -> StoreResult<Vec<Product>> {
        std::future::pending().await
    }

    async fn facets(&self, _predicate: &Predicate) -> StoreResult<FacetSummary> {
        std::future::pending().await
    }
}
