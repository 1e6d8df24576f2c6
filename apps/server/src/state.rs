//! Shared application state

use crate::config::{Config, StoreBackend};
use crate::db::{self, PostgresProductStore};
use crate::services::{CartService, CatalogService, SearchService};
use crate::Result;
use marketplace_search::{
    CartStore, InMemoryProductStore, ProductRepository, ProductStore, SearchQueryEngine,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present only for the postgres store.
    pub db_pool: Option<PgPool>,
    pub search_service: Arc<SearchService>,
    pub catalog_service: Arc<CatalogService>,
    pub cart_service: Arc<CartService>,
}

impl AppState {
    /// Build state for the configured store backend.
    pub async fn new(config: Config) -> Result<Self> {
        match config.store {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory product store; data is lost on shutdown");
                Ok(Self::with_store(config, Arc::new(InMemoryProductStore::new())))
            }
            StoreBackend::Postgres => {
                let pool = db::create_pool(&config.database).await?;
                if config.database.run_migrations {
                    db::run_migrations(&pool).await?;
                }
                let store = Arc::new(PostgresProductStore::new(pool.clone()));
                Ok(Self::build(config, store, Some(pool)))
            }
        }
    }

    /// Build state over an existing store, without a database pool.
    pub fn with_store<S>(config: Config, store: Arc<S>) -> Self
    where
        S: ProductRepository + CartStore + 'static,
    {
        Self::build(config, store, None)
    }

    fn build<S>(config: Config, store: Arc<S>, db_pool: Option<PgPool>) -> Self
    where
        S: ProductRepository + CartStore + 'static,
    {
        let reader: Arc<dyn ProductStore> = store.clone();
        let carts: Arc<dyn CartStore> = store.clone();
        let repo: Arc<dyn ProductRepository> = store;

        let engine = SearchQueryEngine::with_limits(reader, config.search.page_limits());
        let search_service = SearchService::new(engine, config.search.timeout());

        Self {
            config: Arc::new(config),
            db_pool,
            search_service: Arc::new(search_service),
            catalog_service: Arc::new(CatalogService::new(repo)),
            cart_service: Arc::new(CartService::new(carts)),
        }
    }
}
