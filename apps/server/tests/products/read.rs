use crate::support::*;
use axum::http::StatusCode;
use uuid::Uuid;

#[tokio::test]
async fn list_returns_all_newest_first() -> anyhow::Result<()> {
    let app = TestApp::with_products(phone_catalog());

    let (status, body) = app.get_json("/api/products").await?;

    assert_status(status, StatusCode::OK, "list products");
    assert_eq!(body["totalProducts"], 5);
    let products = body["products"].as_array().cloned().unwrap_or_default();
    assert_eq!(
        product_names(&products),
        vec!["Desk", "Laptop", "Charger", "Phone case", "Smartphone X"]
    );
    Ok(())
}

#[tokio::test]
async fn get_by_id() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let id = catalog[3].id;
    let app = TestApp::with_products(catalog);

    let (status, body) = app.get_json(&format!("/api/products/{id}")).await?;

    assert_status(status, StatusCode::OK, "get product");
    assert_eq!(body["product"]["name"], "Laptop");
    assert_eq!(body["product"]["id"], id.to_string());
    Ok(())
}

#[tokio::test]
async fn get_missing_product_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::with_products(phone_catalog());

    let (status, body) = app
        .get_json(&format!("/api/products/{}", Uuid::new_v4()))
        .await?;

    assert_status(status, StatusCode::NOT_FOUND, "missing product");
    assert_error(&body, "not_found", "Product not found");
    Ok(())
}

#[tokio::test]
async fn get_rejects_bad_product_id() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, body) = app.get_json("/api/products/123").await?;

    assert_status(status, StatusCode::BAD_REQUEST, "bad product id");
    assert_error(&body, "validation", "productId is not valid");
    Ok(())
}

#[tokio::test]
async fn list_by_seller_only_returns_their_products() -> anyhow::Result<()> {
    let seller = Uuid::new_v4();
    let mut catalog = phone_catalog();
    catalog[0] = owned_by(catalog[0].clone(), seller);
    catalog[4] = owned_by(catalog[4].clone(), seller);
    let app = TestApp::with_products(catalog);

    let (status, body) = app
        .get_json(&format!("/api/sellers/{seller}/products"))
        .await?;

    assert_status(status, StatusCode::OK, "seller products");
    assert_eq!(body["totalProducts"], 2);
    let products = body["products"].as_array().cloned().unwrap_or_default();
    assert_eq!(product_names(&products), vec!["Desk", "Smartphone X"]);
    Ok(())
}

#[tokio::test]
async fn health_and_metrics_are_exposed() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, body) = app.get_json("/health").await?;
    assert_status(status, StatusCode::OK, "health");
    assert_eq!(body["status"], "ok");

    // Record at least one request before scraping.
    app.get_json("/api/products").await?;
    let (status, _, metrics) = app
        .request(axum::http::Method::GET, "/metrics", None)
        .await?;
    assert_status(status, StatusCode::OK, "metrics");
    let text = String::from_utf8(metrics.to_vec())?;
    assert!(text.contains("marketplace_http_requests_total"));
    assert!(text.contains("marketplace_server_info"));
    Ok(())
}

#[tokio::test]
async fn unknown_paths_are_counted_under_one_route() -> anyhow::Result<()> {
    let app = TestApp::new();
    let scanned = format!("/scan-{}/admin.php", Uuid::new_v4().simple());

    let (status, _, _) = app
        .request(axum::http::Method::GET, &scanned, None)
        .await?;
    assert_status(status, StatusCode::NOT_FOUND, "unknown path");

    let (_, _, metrics) = app
        .request(axum::http::Method::GET, "/metrics", None)
        .await?;
    let text = String::from_utf8(metrics.to_vec())?;
    assert!(text.contains(r#"path="other""#));
    assert!(!text.contains(&scanned));
    Ok(())
}
