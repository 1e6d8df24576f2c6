//! Marketplace product search
//!
//! Store-agnostic filtered search over a product catalog:
//!
//! - [`SearchCriteria`]: optional filters, sort and page inputs, with
//!   permissive query-string parsing.
//! - [`Predicate`]: conjunction of conditions built from criteria.
//! - [`PageRequest`]: page/offset math with defaults and an optional size cap.
//! - [`FacetSummary`]: category and price-bucket counts over all matches.
//! - [`SearchQueryEngine`]: runs a search against an injected [`ProductStore`].
//! - [`Cart`]: per-user carts behind [`CartStore`].
//!
//! # Example
//!
//! ```no_run
//! use marketplace_search::{InMemoryProductStore, SearchCriteria, SearchQueryEngine};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), marketplace_search::SearchError> {
//! let engine = SearchQueryEngine::new(Arc::new(InMemoryProductStore::new()));
//! let criteria = SearchCriteria::new().with_text("phone").with_page(1, 2);
//! let page = engine.search(&criteria).await?;
//! println!("{} of {} matches", page.records.len(), page.total);
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod criteria;
pub mod engine;
pub mod facets;
pub mod memory;
pub mod model;
pub mod pagination;
pub mod predicate;
pub mod sort;
pub mod store;

pub use cart::{Cart, CartItem};
pub use criteria::{SearchCriteria, StockState};
pub use engine::{PageResult, SearchError, SearchPlan, SearchQueryEngine};
pub use facets::{
    CategoryCount, FacetAccumulator, FacetSummary, PriceBucket, PriceRangeCount, PRICE_BOUNDARIES,
};
pub use memory::InMemoryProductStore;
pub use model::{NewProduct, Product, ProductPatch};
pub use pagination::{PageLimits, PageRequest, PageWindow};
pub use predicate::{Condition, Predicate};
pub use sort::{SortDirection, SortField, SortSpec};
pub use store::{CartStore, ProductRepository, ProductStore, StoreError, StoreResult};
