//! Prometheus metrics for the marketplace server

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP

    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "marketplace_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "marketplace_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "marketplace_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "marketplace_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Catalog

    /// Catalog operations by name and outcome class
    pub static ref CATALOG_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "marketplace_catalog_operations_total",
        "Total number of catalog operations",
        &["operation", "status"]
    )
    .expect("Failed to register CATALOG_OPERATIONS_TOTAL");

    // Search

    /// Searches by outcome (`success`, `failure`, `cancelled`)
    pub static ref SEARCH_TOTAL: IntCounterVec = register_int_counter_vec!(
        "marketplace_search_total",
        "Total number of product searches",
        &["outcome"]
    )
    .expect("Failed to register SEARCH_TOTAL");

    pub static ref SEARCH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "marketplace_search_duration_seconds",
        "Product search duration in seconds",
        &["facets"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register SEARCH_DURATION_SECONDS");

    /// Total matches per search (not page size)
    pub static ref SEARCH_MATCHES: HistogramVec = register_histogram_vec!(
        "marketplace_search_matches",
        "Number of products matching a search",
        &["facets"],
        vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]
    )
    .expect("Failed to register SEARCH_MATCHES");

    // Database

    pub static ref DB_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "marketplace_db_query_duration_seconds",
        "Database query duration in seconds",
        &["query_type"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("Failed to register DB_QUERY_DURATION_SECONDS");

    pub static ref DB_QUERY_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "marketplace_db_query_errors_total",
        "Total number of database query errors",
        &["query_type", "error_type"]
    )
    .expect("Failed to register DB_QUERY_ERRORS_TOTAL");

    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "marketplace_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "marketplace_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");
}

/// Route template for a request path. Paths the router does not serve
/// collapse to `"other"` so scans cannot grow the label set.
pub fn sanitize_path(path: &str) -> &'static str {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => "/",
        ["health"] => "/health",
        ["metrics"] => "/metrics",
        ["favicon.ico"] => "/favicon.ico",
        ["api", "products"] => "/api/products",
        ["api", "products", "filter"] => "/api/products/filter",
        ["api", "products", _] => "/api/products/{id}",
        ["api", "sellers", _, "products"] => "/api/sellers/{seller_id}/products",
        ["api", "carts", _] => "/api/carts/{user_id}",
        ["api", "carts", _, "items"] => "/api/carts/{user_id}/items",
        _ => "other",
    }
}

/// Catalog operation name for an API request, if it is one.
pub fn extract_operation(method: &str, path: &str) -> Option<&'static str> {
    let rest = path.strip_prefix("/api/")?;
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        ("GET", ["products"]) => Some("list"),
        ("GET", ["products", "filter"]) => Some("search"),
        ("GET", ["products", _]) => Some("read"),
        ("PUT", ["products", _]) => Some("update"),
        ("DELETE", ["products", _]) => Some("delete"),
        ("GET", ["sellers", _, "products"]) => Some("list_by_seller"),
        ("POST", ["sellers", _, "products"]) => Some("create"),
        ("GET", ["carts", _]) => Some("cart_read"),
        ("POST", ["carts", _, "items"]) => Some("cart_add"),
        _ => None,
    }
}

/// Outcome label for a response status.
pub fn status_class(status: u16) -> &'static str {
    match status {
        200..=399 => "success",
        400..=499 => "client_error",
        _ => "server_error",
    }
}
