//! End-to-end tests for the cart pages and form intents.

#![allow(clippy::unwrap_used)]

use bookstore_core::Catalog;
use bookstore_integration_tests::TestServer;
use reqwest::{Client, StatusCode, header};

const CATALOG: &str = r#"{"currency": "USD", "books": [
    {"id": "alpha", "title": "Alpha", "category": "fiction", "price": "5.00"},
    {"id": "beta", "title": "Beta", "category": "horror", "price": "3.50"},
    {"id": "gamma", "title": "Gamma", "category": "fiction", "price": "10.00"}
]}"#;

async fn server() -> TestServer {
    TestServer::with_catalog(Catalog::from_json(CATALOG).unwrap()).await
}

async fn post(client: &Client, server: &TestServer, path: &str, form: &[(&str, &str)]) {
    let response = client.post(server.url(path)).form(form).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {path}");
}

async fn cart_page(client: &Client, server: &TestServer) -> String {
    let response = client.get(server.url("/cart")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.text().await.unwrap()
}

async fn cart_count(client: &Client, server: &TestServer) -> String {
    client
        .get(server.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
        .trim()
        .to_string()
}

// =============================================================================
// Subtotal
// =============================================================================

#[tokio::test]
async fn test_subtotal_is_sum_of_line_totals() {
    let server = server().await;
    let client = server.browser();

    post(&client, &server, "/cart/add", &[("product_id", "alpha"), ("quantity", "2")]).await;
    post(&client, &server, "/cart/add", &[("product_id", "beta")]).await;

    let html = cart_page(&client, &server).await;
    assert!(html.contains("$13.50"));
    assert!(html.contains("$10.00"));
    assert!(html.contains("Clear Cart"));
    assert!(html.contains("/checkout"));
    assert_eq!(cart_count(&client, &server).await, "3");
}

#[tokio::test]
async fn test_empty_cart_hides_summary() {
    let server = server().await;
    let client = server.browser();

    let html = cart_page(&client, &server).await;
    assert!(html.contains("Your cart is empty!"));
    assert!(!html.contains("Subtotal"));
    assert!(!html.contains("Clear Cart"));
    assert_eq!(cart_count(&client, &server).await, "0");
}

// =============================================================================
// Intents
// =============================================================================

#[tokio::test]
async fn test_adding_again_replaces_quantity() {
    let server = server().await;
    let client = server.browser();

    post(&client, &server, "/cart/add", &[("product_id", "gamma")]).await;
    post(&client, &server, "/cart/add", &[("product_id", "gamma"), ("quantity", "3")]).await;

    // 3 x 10.00, not 4 x 10.00
    let html = cart_page(&client, &server).await;
    assert!(html.contains("$30.00"));
    assert!(!html.contains("$40.00"));
    assert_eq!(cart_count(&client, &server).await, "3");
}

#[tokio::test]
async fn test_decrease_stops_at_one() {
    let server = server().await;
    let client = server.browser();

    post(&client, &server, "/cart/add", &[("product_id", "alpha")]).await;
    post(&client, &server, "/cart/decrease", &[("product_id", "alpha")]).await;
    post(&client, &server, "/cart/decrease", &[("product_id", "alpha")]).await;

    assert_eq!(cart_count(&client, &server).await, "1");
    assert!(cart_page(&client, &server).await.contains("Alpha"));
}

#[tokio::test]
async fn test_increase_remove_and_clear() {
    let server = server().await;
    let client = server.browser();

    post(&client, &server, "/cart/add", &[("product_id", "alpha")]).await;
    post(&client, &server, "/cart/add", &[("product_id", "beta")]).await;
    post(&client, &server, "/cart/increase", &[("product_id", "alpha")]).await;
    assert_eq!(cart_count(&client, &server).await, "3");

    post(&client, &server, "/cart/remove", &[("product_id", "alpha")]).await;
    assert_eq!(cart_count(&client, &server).await, "1");

    // Removing again is a no-op, not an error
    post(&client, &server, "/cart/remove", &[("product_id", "alpha")]).await;
    assert_eq!(cart_count(&client, &server).await, "1");

    post(&client, &server, "/cart/clear", &[]).await;
    assert!(cart_page(&client, &server).await.contains("Your cart is empty!"));
}

#[tokio::test]
async fn test_quantity_below_one_is_clamped() {
    let server = server().await;
    let client = server.browser();

    post(&client, &server, "/cart/add", &[("product_id", "alpha"), ("quantity", "-4")]).await;
    assert_eq!(cart_count(&client, &server).await, "1");
}

#[tokio::test]
async fn test_unknown_book_is_rejected() {
    let server = server().await;
    let client = server.browser();

    let response = client
        .post(server.url("/cart/add"))
        .form(&[("product_id", "omega")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(cart_count(&client, &server).await, "0");
}

#[tokio::test]
async fn test_redirects_stay_on_site() {
    let server = server().await;
    let client = server.browser();

    let response = client
        .post(server.url("/cart/add"))
        .form(&[("product_id", "alpha"), ("return_to", "https://evil.example/")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");

    let response = client
        .post(server.url("/cart/increase"))
        .form(&[("product_id", "alpha"), ("return_to", "/books/alpha")])
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/books/alpha"
    );
}

#[tokio::test]
async fn test_mutations_trigger_badge_refresh() {
    let server = server().await;
    let client = server.browser();

    let response = client
        .post(server.url("/cart/add"))
        .form(&[("product_id", "alpha")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("hx-trigger").unwrap(), "cart-updated");

    // Decrease at quantity one changes nothing
    let response = client
        .post(server.url("/cart/decrease"))
        .form(&[("product_id", "alpha")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response.headers().get("hx-trigger").is_none());
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_carts_are_per_session() {
    let server = server().await;
    let first = server.browser();
    let second = server.browser();

    post(&first, &server, "/cart/add", &[("product_id", "alpha")]).await;

    assert_eq!(cart_count(&first, &server).await, "1");
    assert_eq!(cart_count(&second, &server).await, "0");
}
