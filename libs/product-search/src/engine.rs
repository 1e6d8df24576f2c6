//! Search execution

use crate::criteria::SearchCriteria;
use crate::facets::FacetSummary;
use crate::model::Product;
use crate::pagination::{PageLimits, PageRequest};
use crate::predicate::Predicate;
use crate::sort::SortSpec;
use crate::store::{ProductStore, StoreError};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] StoreError),

    #[error("Search cancelled")]
    Cancelled,
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub records: Vec<Product>,
    /// Absent when facets were not requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<FacetSummary>,
}

/// Everything derived from criteria before the store is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub predicate: Predicate,
    pub sort: SortSpec,
    pub page: PageRequest,
    pub include_facets: bool,
}

/// Builds predicates from criteria and runs them against an injected store.
///
/// The engine holds no mutable state; concurrent searches share nothing but
/// the store handle.
#[derive(Clone)]
pub struct SearchQueryEngine {
    store: Arc<dyn ProductStore>,
    limits: PageLimits,
}

impl std::fmt::Debug for SearchQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchQueryEngine")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl SearchQueryEngine {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self::with_limits(store, PageLimits::default())
    }

    pub fn with_limits(store: Arc<dyn ProductStore>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    pub fn plan(&self, criteria: &SearchCriteria) -> SearchPlan {
        SearchPlan {
            predicate: Predicate::from_criteria(criteria),
            sort: SortSpec::resolve(criteria.sort_by, criteria.sort_direction),
            page: PageRequest::normalize(criteria.page, criteria.page_size, self.limits),
            include_facets: criteria.include_facets,
        }
    }

    /// Run a search.
    ///
    /// Count, page and facets are read concurrently against the same
    /// predicate. Any store failure fails the whole search.
    #[tracing::instrument(
        name = "product_search",
        skip_all,
        fields(
            search.text = criteria.text.as_deref(),
            search.category = criteria.category.as_deref(),
            search.page = tracing::field::Empty,
            search.total = tracing::field::Empty,
        )
    )]
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<PageResult, SearchError> {
        let start = Instant::now();
        let plan = self.plan(criteria);
        tracing::Span::current().record("search.page", plan.page.page);

        let window = plan.page.window();
        let facets = async {
            if plan.include_facets {
                self.store.facets(&plan.predicate).await.map(Some)
            } else {
                Ok(None)
            }
        };

        let (total, records, facets) = tokio::try_join!(
            self.store.count(&plan.predicate),
            self.store.find_page(&plan.predicate, &plan.sort, window),
            facets,
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Product search failed");
            SearchError::Retrieval(e)
        })?;

        tracing::Span::current().record("search.total", total);
        tracing::debug!(
            total,
            returned = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Product search completed"
        );

        Ok(PageResult {
            total,
            page: plan.page.page,
            total_pages: plan.page.total_pages(total),
            page_size: plan.page.page_size,
            records,
            facets,
        })
    }

    /// Like [`search`](Self::search), but gives up with
    /// [`SearchError::Cancelled`] once `cancel` resolves. In-flight store
    /// calls are dropped.
    pub async fn search_cancellable<C>(
        &self,
        criteria: &SearchCriteria,
        cancel: C,
    ) -> Result<PageResult, SearchError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.search(criteria) => result,
            _ = cancel => {
                tracing::debug!("Product search cancelled");
                Err(SearchError::Cancelled)
            }
        }
    }
}
