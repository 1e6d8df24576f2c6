//! Search handler
//!
//! `GET /api/products/filter?search=&minPrice=&maxPrice=&category=&stock=&sortBy=&sortOrder=&page=&limit=`

use crate::{models::SearchResponse, request_context::RequestContext, state::AppState, Result};
use axum::{
    extract::{RawQuery, State},
    response::Json,
    Extension,
};

pub async fn filter_products(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<SearchResponse>> {
    let items = parse_query_items(raw_query.as_deref());

    let result = state.search_service.search(&items).await?;

    tracing::debug!(
        request_id = %ctx.request_id,
        total = result.total,
        returned = result.records.len(),
        elapsed_ms = ctx.elapsed().as_millis() as u64,
        "Product search completed"
    );

    Ok(Json(SearchResponse::from(result)))
}

/// Percent-decoded `(key, value)` pairs in query order ('+' decodes to space).
fn parse_query_items(raw_query: Option<&str>) -> Vec<(String, String)> {
    raw_query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
