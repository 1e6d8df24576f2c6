use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "{context}: expected status {expected}, got {actual}"
    );
}

/// `data.products` of a search envelope.
pub fn search_products(body: &Value) -> anyhow::Result<&Vec<Value>> {
    body.pointer("/data/products")
        .and_then(|v| v.as_array())
        .context("data.products is array")
}

/// `data.pagination` of a search envelope.
pub fn search_pagination(body: &Value) -> anyhow::Result<&Value> {
    body.pointer("/data/pagination")
        .context("data.pagination present")
}

/// Product names in response order.
pub fn product_names(products: &[Value]) -> Vec<String> {
    products
        .iter()
        .filter_map(|p| p.get("name").and_then(|v| v.as_str()))
        .map(|s| s.to_string())
        .collect()
}

/// Assert the standard error envelope.
pub fn assert_error(body: &Value, code: &str, message: &str) {
    assert_eq!(
        body.get("error").and_then(|v| v.as_str()),
        Some(code),
        "unexpected error code in {body}"
    );
    assert_eq!(
        body.get("message").and_then(|v| v.as_str()),
        Some(message),
        "unexpected error message in {body}"
    );
}
