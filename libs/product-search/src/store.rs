//! Record store capabilities
//!
//! [`ProductStore`] is everything the search engine needs. [`ProductRepository`]
//! adds the catalog writes used by the HTTP service, and [`CartStore`] the
//! per-user carts.

use crate::cart::Cart;
use crate::facets::FacetSummary;
use crate::model::{Product, ProductPatch};
use crate::pagination::PageWindow;
use crate::predicate::Predicate;
use crate::sort::SortSpec;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Product already exists: {0}")]
    Conflict(Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read capability consumed by the search engine.
///
/// Implementations must evaluate every call against the same predicate
/// semantics as [`Predicate::matches`].
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Number of products matching `predicate`.
    async fn count(&self, predicate: &Predicate) -> StoreResult<u64>;

    /// Matching products, ordered by `sort`, sliced by `window`.
    async fn find_page(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        window: PageWindow,
    ) -> StoreResult<Vec<Product>>;

    /// Category and price-bucket counts over all matches.
    async fn facets(&self, predicate: &Predicate) -> StoreResult<FacetSummary>;
}

/// Catalog read/write operations.
#[async_trait]
pub trait ProductRepository: ProductStore {
    /// Every product, newest first.
    async fn list_all(&self) -> StoreResult<Vec<Product>>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Product>>;

    /// Products owned by `seller`, newest first.
    async fn list_by_seller(&self, seller: Uuid) -> StoreResult<Vec<Product>>;

    /// Fails with [`StoreError::Conflict`] when the id is taken.
    async fn insert(&self, product: Product) -> StoreResult<Product>;

    /// Fails with [`StoreError::NotFound`] when absent.
    async fn update(&self, id: Uuid, patch: &ProductPatch) -> StoreResult<Product>;

    /// Returns the removed product; [`StoreError::NotFound`] when absent.
    /// Cart lines for the product are removed with it.
    async fn delete(&self, id: Uuid) -> StoreResult<Product>;
}

/// Shopping carts, one per user.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get_cart(&self, user: Uuid) -> StoreResult<Option<Cart>>;

    /// Add `quantity` of `product` to the user's cart, creating the cart on
    /// first use and merging quantities for a product already present.
    ///
    /// Fails with [`StoreError::NotFound`] when the product does not exist.
    async fn add_to_cart(&self, user: Uuid, product: Uuid, quantity: i64) -> StoreResult<Cart>;
}
