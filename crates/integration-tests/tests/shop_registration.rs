//! End-to-end tests for shop registration and the CVR form.
//!
//! Requires a running server with a migrated, postcode-seeded database.
//!
//! Run with: cargo test -p shoplokalt-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::Value;

fn base_url() -> String {
    std::env::var("SERVER_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

async fn register(client: &Client, postcode: &str) -> reqwest::Response {
    client
        .post(format!("{}/shops", base_url()))
        .form(&[
            ("name", "Bageriet"),
            ("address", "Brogade 3"),
            ("postcode", postcode),
            ("email", "hej@bageriet.dk"),
            ("phone", "+45 98 76 54 32"),
        ])
        .send()
        .await
        .expect("Failed to register shop")
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_registration_resolves_city_from_postcode() {
    let client = Client::new();
    let resp = register(&client, "9000").await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to read shop");
    assert_eq!(body["city"], "Aalborg");
    assert_eq!(body["postcode"], 9000);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_unknown_postcode_is_a_reference_error() {
    let client = Client::new();
    // 9999 is not in the registry.
    let resp = register(&client, "9999").await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("Failed to read errors");
    assert_eq!(body["errors"][0]["field"], "postcode");
    assert_eq!(body["errors"][0]["kind"], "reference");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_non_integer_postcode_is_a_format_error() {
    let client = Client::new();
    let resp = register(&client, "abc").await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("Failed to read errors");
    assert_eq!(body["errors"][0]["field"], "postcode");
    assert_eq!(body["errors"][0]["kind"], "format");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cvr_update_and_duplicate_conflict() {
    let client = Client::new();

    let first: Value = register(&client, "8000")
        .await
        .json()
        .await
        .expect("Failed to read shop");
    let second: Value = register(&client, "8000")
        .await
        .json()
        .await
        .expect("Failed to read shop");

    let resp = client
        .put(format!("{}/shops/{}/cvr", base_url(), first["id"]))
        .form(&[("cvr", "38071563")])
        .send()
        .await
        .expect("Failed to update CVR");
    assert_eq!(resp.status(), StatusCode::OK);

    // The same number on another shop violates uniqueness.
    let resp = client
        .put(format!("{}/shops/{}/cvr", base_url(), second["id"]))
        .form(&[("cvr", "38071563")])
        .send()
        .await
        .expect("Failed to update CVR");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_malformed_cvr_is_rejected() {
    let client = Client::new();
    let shop: Value = register(&client, "8000")
        .await
        .json()
        .await
        .expect("Failed to read shop");

    let resp = client
        .put(format!("{}/shops/{}/cvr", base_url(), shop["id"]))
        .form(&[("cvr", "123")])
        .send()
        .await
        .expect("Failed to update CVR");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
