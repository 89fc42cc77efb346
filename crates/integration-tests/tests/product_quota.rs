//! End-to-end tests for the product form and the active-listing quota.
//!
//! These tests require:
//! - A migrated database with the postcode registry seeded
//! - The server running (cargo run -p shoplokalt-server)
//!
//! Run with: cargo test -p shoplokalt-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Base URL for the server (configurable via environment).
fn base_url() -> String {
    std::env::var("SERVER_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn client() -> Client {
    Client::new()
}

/// Test helper: register a fresh shop and return its ID.
async fn register_test_shop(client: &Client) -> i64 {
    let resp = client
        .post(format!("{}/shops", base_url()))
        .form(&[
            ("name", "Testbutikken"),
            ("address", "Testvej 1"),
            ("postcode", "8000"),
            ("email", "test@testbutikken.dk"),
            ("phone", "12345678"),
        ])
        .send()
        .await
        .expect("Failed to register shop");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to read shop");
    body["id"].as_i64().expect("shop id")
}

/// Test helper: submit a product for a shop.
async fn submit_product(client: &Client, shop: i64, name: &str, active: bool) -> reqwest::Response {
    client
        .post(format!("{}/shops/{shop}/products", base_url()))
        .form(&[
            ("name", name),
            ("description", "Testvare"),
            ("price", "49.50"),
            ("active", if active { "on" } else { "" }),
        ])
        .send()
        .await
        .expect("Failed to submit product")
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_fourth_active_product_is_rejected() {
    let client = client();
    let shop = register_test_shop(&client).await;

    for i in 1..=3 {
        let resp = submit_product(&client, shop, &format!("Vare {i}"), true).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = submit_product(&client, shop, "Vare 4", true).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.expect("Failed to read errors");
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "business-rule");
    assert!(errors[0]["field"].is_null());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_editing_an_active_product_passes_the_quota() {
    let client = client();
    let shop = register_test_shop(&client).await;

    let mut product_ids = Vec::new();
    for i in 1..=3 {
        let resp = submit_product(&client, shop, &format!("Vare {i}"), true).await;
        let body: Value = resp.json().await.expect("Failed to read product");
        product_ids.push(body["id"].as_i64().expect("product id"));
    }

    // Re-saving the first product unchanged must not trip the quota.
    let resp = client
        .put(format!(
            "{}/shops/{shop}/products/{}",
            base_url(),
            product_ids[0]
        ))
        .form(&[
            ("name", "Vare 1"),
            ("description", "Testvare"),
            ("price", "49.50"),
            ("active", "on"),
        ])
        .send()
        .await
        .expect("Failed to edit product");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_inactive_products_are_not_limited() {
    let client = client();
    let shop = register_test_shop(&client).await;

    for i in 1..=5 {
        let resp = submit_product(&client, shop, &format!("Lagervare {i}"), false).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_inverted_dates_are_rejected() {
    let client = client();
    let shop = register_test_shop(&client).await;

    let resp = client
        .post(format!("{}/shops/{shop}/products", base_url()))
        .form(&[
            ("name", "Weekendtilbud"),
            ("description", "Testvare"),
            ("price", "49.50"),
            ("start_datetime", "2026-05-02 12:00"),
            ("end_datetime", "2026-05-01 12:00"),
        ])
        .send()
        .await
        .expect("Failed to submit product");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("Failed to read errors");
    assert_eq!(body["errors"][0]["kind"], "business-rule");
}
