use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn update_changes_only_given_fields() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let id = catalog[0].id;
    let app = TestApp::with_products(catalog);

    let (status, _, body) = app
        .request(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(to_json_body(&json!({"price": 749.0, "stock": 0}))?),
        )
        .await?;

    assert_status(status, StatusCode::OK, "update product");
    let body = parse_json(&body)?;
    assert_eq!(body["message"], "Product Updated!");
    let product = &body["product"];
    assert_eq!(product["price"], 749.0);
    assert_eq!(product["stock"], 0);
    assert_eq!(product["name"], "Smartphone X");
    assert_ne!(product["updatedAt"], product["createdAt"]);

    let (_, search) = app.get_json("/api/products/filter?stock=out").await?;
    let names = product_names(search_products(&search)?);
    assert!(names.contains(&"Smartphone X".to_string()));
    Ok(())
}

#[tokio::test]
async fn update_rejects_negative_price() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let id = catalog[0].id;
    let app = TestApp::with_products(catalog);

    let (status, _, body) = app
        .request(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(to_json_body(&json!({"price": -1.0}))?),
        )
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "negative price");
    assert_eq!(parse_json(&body)?["fields"], json!(["price"]));
    Ok(())
}

#[tokio::test]
async fn update_rejects_whitespace_only_name() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let id = catalog[0].id;
    let app = TestApp::with_products(catalog);

    let (status, _, body) = app
        .request(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(to_json_body(&json!({"name": "   "}))?),
        )
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "blank name");
    assert_eq!(parse_json(&body)?["fields"], json!(["name"]));

    let (_, read) = app.get_json(&format!("/api/products/{id}")).await?;
    assert_eq!(read["product"]["name"], "Smartphone X");
    Ok(())
}

#[tokio::test]
async fn update_missing_product_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _, _) = app
        .request(
            Method::PUT,
            &format!("/api/products/{}", Uuid::new_v4()),
            Some(to_json_body(&json!({"name": "Renamed"}))?),
        )
        .await?;

    assert_status(status, StatusCode::NOT_FOUND, "update missing");
    Ok(())
}

#[tokio::test]
async fn update_rejects_malformed_json() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let id = catalog[0].id;
    let app = TestApp::with_products(catalog);

    let (status, _, body) = app
        .request(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(axum::body::Bytes::from_static(b"{not json")),
        )
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "malformed json");
    assert_eq!(parse_json(&body)?["error"], "validation");
    Ok(())
}

#[tokio::test]
async fn delete_returns_product_and_removes_it() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let id = catalog[1].id;
    let app = TestApp::with_products(catalog);

    let (status, _, body) = app
        .request(Method::DELETE, &format!("/api/products/{id}"), None)
        .await?;

    assert_status(status, StatusCode::OK, "delete product");
    let body = parse_json(&body)?;
    assert_eq!(body["message"], "Product Deleted!");
    assert_eq!(body["product"]["name"], "Phone case");

    let (status, _) = app.get_json(&format!("/api/products/{id}")).await?;
    assert_status(status, StatusCode::NOT_FOUND, "deleted product");

    let (_, search) = app.get_json("/api/products/filter").await?;
    assert_eq!(search_pagination(&search)?["total"], 4);
    Ok(())
}

#[tokio::test]
async fn delete_missing_product_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _, body) = app
        .request(Method::DELETE, &format!("/api/products/{}", Uuid::new_v4()), None)
        .await?;

    assert_status(status, StatusCode::NOT_FOUND, "delete missing");
    assert_eq!(parse_json(&body)?["error"], "not_found");
    Ok(())
}
