use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

async fn add(
    app: &TestApp,
    user: Uuid,
    payload: serde_json::Value,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let (status, _, body) = app
        .request(
            Method::POST,
            &format!("/api/carts/{user}/items"),
            Some(to_json_body(&payload)?),
        )
        .await?;
    Ok((status, parse_json(&body)?))
}

#[tokio::test]
async fn first_add_creates_the_cart() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let phone = catalog[0].id;
    let app = TestApp::with_products(catalog);
    let user = Uuid::new_v4();

    let (status, _) = app.get_json(&format!("/api/carts/{user}")).await?;
    assert_status(status, StatusCode::NOT_FOUND, "no cart yet");

    let (status, body) = add(&app, user, json!({"productId": phone})).await?;

    assert_status(status, StatusCode::OK, "add to cart");
    assert_eq!(body["message"], "Product added to cart");
    assert_eq!(body["cart"]["user"], user.to_string());
    assert_eq!(
        body["cart"]["products"],
        json!([{"product": phone.to_string(), "quantity": 1}])
    );
    Ok(())
}

#[tokio::test]
async fn repeat_add_merges_quantity() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let (phone, case) = (catalog[0].id, catalog[1].id);
    let app = TestApp::with_products(catalog);
    let user = Uuid::new_v4();

    add(&app, user, json!({"productId": phone, "quantity": 2})).await?;
    add(&app, user, json!({"productId": case})).await?;
    let (status, body) = add(&app, user, json!({"productId": phone, "quantity": 3})).await?;

    assert_status(status, StatusCode::OK, "merge");
    assert_eq!(
        body["cart"]["products"],
        json!([
            {"product": phone.to_string(), "quantity": 5},
            {"product": case.to_string(), "quantity": 1},
        ])
    );

    let (status, read) = app.get_json(&format!("/api/carts/{user}")).await?;
    assert_status(status, StatusCode::OK, "read cart");
    assert_eq!(read["message"], "fetch Cart!");
    assert_eq!(read["cart"], body["cart"]);
    Ok(())
}

#[tokio::test]
async fn carts_are_kept_per_user() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let phone = catalog[0].id;
    let app = TestApp::with_products(catalog);
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

    add(&app, alice, json!({"productId": phone, "quantity": 4})).await?;
    let (_, body) = add(&app, bob, json!({"productId": phone})).await?;

    assert_eq!(body["cart"]["products"][0]["quantity"], 1);
    let (_, alices) = app.get_json(&format!("/api/carts/{alice}")).await?;
    assert_eq!(alices["cart"]["products"][0]["quantity"], 4);
    Ok(())
}

#[tokio::test]
async fn missing_product_id_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::with_products(phone_catalog());

    let (status, body) = add(&app, Uuid::new_v4(), json!({"quantity": 1})).await?;

    assert_status(status, StatusCode::BAD_REQUEST, "missing product id");
    assert_error(&body, "validation", "Product ID is required");
    Ok(())
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let phone = catalog[0].id;
    let app = TestApp::with_products(catalog);

    let (status, body) = add(&app, Uuid::new_v4(), json!({"productId": phone, "quantity": 0})).await?;

    assert_status(status, StatusCode::BAD_REQUEST, "zero quantity");
    assert_eq!(body["fields"], json!(["quantity"]));
    Ok(())
}

#[tokio::test]
async fn unknown_product_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::with_products(phone_catalog());

    let (status, body) = add(&app, Uuid::new_v4(), json!({"productId": Uuid::new_v4()})).await?;

    assert_status(status, StatusCode::NOT_FOUND, "unknown product");
    assert_eq!(body["error"], "not_found");
    Ok(())
}

#[tokio::test]
async fn bad_user_id_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::with_products(phone_catalog());

    let (status, body) = app.get_json("/api/carts/not-a-uuid").await?;

    assert_status(status, StatusCode::BAD_REQUEST, "bad user id");
    assert_error(&body, "validation", "userId is not valid");
    Ok(())
}

#[tokio::test]
async fn deleted_products_leave_the_cart() -> anyhow::Result<()> {
    let catalog = phone_catalog();
    let (phone, case) = (catalog[0].id, catalog[1].id);
    let app = TestApp::with_products(catalog);
    let user = Uuid::new_v4();
    add(&app, user, json!({"productId": phone})).await?;
    add(&app, user, json!({"productId": case})).await?;

    app.request(Method::DELETE, &format!("/api/products/{phone}"), None)
        .await?;

    let (_, body) = app.get_json(&format!("/api/carts/{user}")).await?;
    assert_eq!(
        body["cart"]["products"],
        json!([{"product": case.to_string(), "quantity": 1}])
    );
    Ok(())
}
