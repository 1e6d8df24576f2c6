use marketplace_search::{FacetSummary, PageResult, Product};
use serde::Serialize;

pub const SEARCH_MESSAGE: &str = "fetch Filtered Products!";

/// Envelope for `GET /api/products/filter`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: SearchData,
}

#[derive(Debug, Serialize)]
pub struct SearchData {
    pub pagination: Pagination,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<FacetSummary>,
    pub page: u64,
    pub total_pages: u64,
    /// Effective page size after clamping.
    pub limit: u64,
}

impl From<PageResult> for SearchResponse {
    fn from(result: PageResult) -> Self {
        Self {
            status: "success",
            message: SEARCH_MESSAGE,
            data: SearchData {
                pagination: Pagination {
                    total: result.total,
                    facets: result.facets,
                    page: result.page,
                    total_pages: result.total_pages,
                    limit: result.page_size,
                },
                products: result.records,
            },
        }
    }
}
