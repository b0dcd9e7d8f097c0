//! API integration tests.
//!
//! These run against a live server with a migrated database.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a book and return its JSON representation
async fn create_book(client: &Client, title: &str, author: &str) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": title, "author": author }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse create response")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_book_generates_valid_isbn() {
    let client = Client::new();

    let book = create_book(&client, "The Pragmatic Programmer", "Andrew Hunt").await;

    let isbn = book["isbn"].as_str().expect("No isbn in response");
    assert_eq!(isbn.len(), 13);
    assert!(isbn.starts_with("978"));
    assert!(isbn.chars().all(|c| c.is_ascii_digit()));

    // The server's own validator must agree
    let response = client
        .get(format!("{}/isbn/validate", BASE_URL))
        .query(&[("isbn", isbn)])
        .send()
        .await
        .expect("Failed to send validate request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["valid"], true);
    assert_eq!(body["message"], "Valid ISBN");
}

#[tokio::test]
#[ignore]
async fn test_create_books_have_distinct_isbns() {
    let client = Client::new();

    let first = create_book(&client, "Dune", "Frank Herbert").await;
    let second = create_book(&client, "Dune Messiah", "Frank Herbert").await;

    assert_ne!(first["isbn"], second["isbn"]);
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_blank_title() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "", "author": "Nobody" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_get_book_roundtrip() {
    let client = Client::new();

    let created = create_book(&client, "Neuromancer", "William Gibson").await;
    let id = created["id"].as_i64().expect("No id in response");

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Neuromancer");
    assert_eq!(body["author"], "William Gibson");
    assert_eq!(body["isbn"], created["isbn"]);
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book_is_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_book_preserves_isbn() {
    let client = Client::new();

    let created = create_book(&client, "The Hobbit", "JRR Tolkien").await;
    let id = created["id"].as_i64().expect("No id in response");

    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .json(&json!({ "title": "The Hobbit", "author": "J.R.R. Tolkien" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"], "J.R.R. Tolkien");
    assert_eq!(body["isbn"], created["isbn"]);
}

#[tokio::test]
#[ignore]
async fn test_delete_book() {
    let client = Client::new();

    let created = create_book(&client, "Disposable", "Anonymous").await;
    let id = created["id"].as_i64().expect("No id in response");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Deleting again is a 404, not a 5xx
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_search_books_by_title() {
    let client = Client::new();

    create_book(&client, "Searchable Rust Title", "Some Author").await;

    let response = client
        .get(format!("{}/books/search/title", BASE_URL))
        .query(&[("title", "searchable rust")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["items"].as_array().expect("No items in response");
    assert!(items
        .iter()
        .any(|b| b["title"] == "Searchable Rust Title"));
}

#[tokio::test]
#[ignore]
async fn test_search_requires_term() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_validate_isbn_classification() {
    let client = Client::new();

    let cases = [
        ("9780306406157", true, "Valid ISBN"),
        ("   ", false, "ISBN cannot be blank"),
        ("978030640615", false, "ISBN must be exactly 13 digits, got 12"),
        ("9790306406157", false, "ISBN must start with 978"),
        ("9780306406158", false, "Invalid check digit"),
    ];

    for (isbn, valid, message) in cases {
        let response = client
            .get(format!("{}/isbn/validate", BASE_URL))
            .query(&[("isbn", isbn)])
            .send()
            .await
            .expect("Failed to send request");

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["valid"], valid, "isbn {:?}", isbn);
        assert_eq!(body["message"], message, "isbn {:?}", isbn);
    }
}

#[tokio::test]
#[ignore]
async fn test_validate_isbn_missing_param_is_null_case() {
    let client = Client::new();

    let response = client
        .get(format!("{}/isbn/validate", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], "ISBN cannot be null");
}

#[tokio::test]
#[ignore]
async fn test_list_books_pagination_shape() {
    let client = Client::new();

    create_book(&client, "Pagination Fixture", "Fixture Author").await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("page", "1"), ("per_page", "5")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 5);
    assert!(body["total"].as_i64().expect("No total") >= 1);
    assert!(body["items"].as_array().expect("No items").len() <= 5);
}
