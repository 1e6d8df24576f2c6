pub mod assertions;
pub mod fixtures;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use marketplace::{
    api::create_router,
    config::{Config, StoreBackend},
    AppState,
};
use marketplace_search::{InMemoryProductStore, Product};
use std::sync::Arc;
use tower::ServiceExt as _;

// Re-export commonly used items
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use postgres::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryProductStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self::with_config(products, |_| {})
    }

    pub fn with_config(products: Vec<Product>, configure: impl FnOnce(&mut Config)) -> Self {
        let mut config = Config::default();
        config.store = StoreBackend::Memory;
        configure(&mut config);

        let store = Arc::new(InMemoryProductStore::with_products(products));
        let state = AppState::with_store(config, store.clone());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            store,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// GET and parse the JSON body.
    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let (status, _, body) = self.request(Method::GET, path_and_query, None).await?;
        Ok((status, parse_json(&body)?))
    }
}

pub fn parse_json(body: &Bytes) -> anyhow::Result<serde_json::Value> {
    serde_json::from_slice(body).context("parse JSON response body")
}
