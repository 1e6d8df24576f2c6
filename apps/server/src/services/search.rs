//! Search service - filtered product search
//!
//! Parses query items into [`SearchCriteria`], runs the engine under the
//! configured timeout, and records search metrics.

use crate::{metrics, Result};
use marketplace_search::{PageResult, SearchCriteria, SearchError, SearchQueryEngine};
use std::time::{Duration, Instant};

pub struct SearchService {
    engine: SearchQueryEngine,
    timeout: Option<Duration>,
}

impl SearchService {
    pub fn new(engine: SearchQueryEngine, timeout: Option<Duration>) -> Self {
        Self { engine, timeout }
    }

    pub fn engine(&self) -> &SearchQueryEngine {
        &self.engine
    }

    /// Search with raw query-string pairs. Unknown keys are ignored.
    pub async fn search(&self, query_items: &[(String, String)]) -> Result<PageResult> {
        let criteria = SearchCriteria::from_query_items(query_items);
        self.search_criteria(&criteria).await
    }

    pub async fn search_criteria(&self, criteria: &SearchCriteria) -> Result<PageResult> {
        let facets_label = if criteria.include_facets { "true" } else { "false" };
        let start = Instant::now();

        let result = match self.timeout {
            Some(timeout) => {
                self.engine
                    .search_cancellable(criteria, tokio::time::sleep(timeout))
                    .await
            }
            None => self.engine.search(criteria).await,
        };

        metrics::SEARCH_DURATION_SECONDS
            .with_label_values(&[facets_label])
            .observe(start.elapsed().as_secs_f64());

        let outcome = match &result {
            Ok(page) => {
                metrics::SEARCH_MATCHES
                    .with_label_values(&[facets_label])
                    .observe(page.total as f64);
                "success"
            }
            Err(SearchError::Cancelled) => {
                tracing::warn!(timeout = ?self.timeout, "Product search timed out");
                "cancelled"
            }
            Err(SearchError::Retrieval(_)) => "failure",
        };
        metrics::SEARCH_TOTAL.with_label_values(&[outcome]).inc();

        Ok(result?)
    }
}
