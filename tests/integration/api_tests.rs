//! API integration tests
//!
//! These tests run against a live server with an empty-ish database and a
//! seeded admin account (admin@lectern.local / admin). Run with:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Helper to get an admin token
async fn admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@lectern.local",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to register a fresh member and return their token
async fn member_token(client: &Client) -> String {
    let email = format!("{}@example.com", unique("member"));
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Test Member",
            "email": email,
            "password": "password1"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create an author + publisher + book, returning their ids
async fn seed_book(client: &Client, token: &str, copies: i32) -> (i64, i64, i64) {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(token)
        .json(&json!({"name": unique("Author")}))
        .send()
        .await
        .expect("Failed to create author");
    assert_eq!(response.status(), 201);
    let author: Value = response.json().await.unwrap();
    let author_id = author["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/publishers", BASE_URL))
        .bearer_auth(token)
        .json(&json!({"name": unique("Publisher")}))
        .send()
        .await
        .expect("Failed to create publisher");
    assert_eq!(response.status(), 201);
    let publisher: Value = response.json().await.unwrap();
    let publisher_id = publisher["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": unique("Book"),
            "author_id": author_id,
            "publisher_id": publisher_id,
            "publication_year": 2000,
            "total_quantity": copies
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.unwrap();
    let book_id = book["id"].as_i64().unwrap();

    (author_id, publisher_id, book_id)
}

// Checkout accepts any start date >= today, so a far-future fixed date
// avoids formatting the local date here
fn today() -> String {
    "2099-01-01".to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
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
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@lectern.local",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_and_me() {
    let client = Client::new();
    let token = member_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Test Member");
    assert_eq!(body["role"], "member");
}

#[tokio::test]
#[ignore]
async fn test_cart_add_merges_quantities() {
    // Cookie store keeps the cart token across calls
    let client = Client::builder().cookie_store(true).build().unwrap();
    let admin = admin_token(&client).await;
    let (_, _, book_id) = seed_book(&client, &admin, 10).await;

    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .json(&json!({"quantity": 2}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .json(&json!({"quantity": 3}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    let entries = body["entries"].as_array().unwrap();
    let entry = entries
        .iter()
        .find(|e| e["book_id"].as_i64() == Some(book_id))
        .expect("Book missing from cart");
    assert_eq!(entry["quantity"].as_i64(), Some(5));
}

#[tokio::test]
#[ignore]
async fn test_cart_survives_sign_in() {
    let client = Client::builder().cookie_store(true).build().unwrap();
    let admin = admin_token(&client).await;
    let (_, _, book_id) = seed_book(&client, &admin, 5).await;

    // Build the cart anonymously
    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .json(&json!({"quantity": 1}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    // Sign in; the cart cookie is independent of the auth token
    let _token = member_token(&client).await;

    let response = client
        .get(format!("{}/cart", BASE_URL))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let entries = body["entries"].as_array().unwrap();
    assert!(entries
        .iter()
        .any(|e| e["book_id"].as_i64() == Some(book_id)));
}

#[tokio::test]
#[ignore]
async fn test_checkout_reserves_inventory() {
    let client = Client::builder().cookie_store(true).build().unwrap();
    let admin = admin_token(&client).await;
    let (_, _, book_id) = seed_book(&client, &admin, 5).await;
    let token = member_token(&client).await;

    let response = client
        .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
        .json(&json!({"quantity": 2}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/cart/checkout", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "start_date": today(),
            "end_date": "2099-01-08"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["items"][0]["quantity"].as_i64(), Some(2));

    // Availability dropped from 5 to 3
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .unwrap();
    let book: Value = response.json().await.unwrap();
    assert_eq!(book["available_quantity"].as_i64(), Some(3));

    // The cart was cleared by the successful checkout
    let response = client
        .get(format!("{}/cart", BASE_URL))
        .send()
        .await
        .unwrap();
    let cart: Value = response.json().await.unwrap();
    assert_eq!(cart["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_checkout_rejects_overdraw_all_or_nothing() {
    let client = Client::builder().cookie_store(true).build().unwrap();
    let admin = admin_token(&client).await;
    let (_, _, plentiful_id) = seed_book(&client, &admin, 10).await;
    let (_, _, scarce_id) = seed_book(&client, &admin, 1).await;
    let token = member_token(&client).await;

    for (book_id, quantity) in [(plentiful_id, 2), (scarce_id, 2)] {
        let response = client
            .post(format!("{}/books/{}/borrow", BASE_URL, book_id))
            .json(&json!({"quantity": quantity}))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let response = client
        .post(format!("{}/cart/checkout", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "start_date": today(),
            "end_date": "2099-01-08"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    // Neither book lost availability: the failed line rolled everything back
    for (book_id, expected) in [(plentiful_id, 10), (scarce_id, 1)] {
        let response = client
            .get(format!("{}/books/{}", BASE_URL, book_id))
            .send()
            .await
            .unwrap();
        let book: Value = response.json().await.unwrap();
        assert_eq!(book["available_quantity"].as_i64(), Some(expected));
    }
}

#[tokio::test]
#[ignore]
async fn test_most_borrowed_year_filter() {
    let client = Client::new();

    // 2099 checkouts above land in the current year's window; a year with
    // no requests must come back empty
    let response = client
        .get(format!("{}/books/most-borrowed?year=1980", BASE_URL))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);

    let response = client
        .get(format!("{}/books/most-borrowed?month=13", BASE_URL))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_author_delete_blocked_by_books() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (author_id, _, _) = seed_book(&client, &admin, 1).await;

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    // The author survived the rejected delete
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    // An author without books deletes cleanly
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({"name": unique("Childless")}))
        .send()
        .await
        .unwrap();
    let author: Value = response.json().await.unwrap();
    let lone_id = author["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, lone_id))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_favorite_conflicts() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (author_id, _, _) = seed_book(&client, &admin, 1).await;
    let token = member_token(&client).await;

    let response = client
        .post(format!("{}/authors/{}/favorite", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/authors/{}/favorite", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    let response = client
        .delete(format!("{}/authors/{}/favorite", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    // Removing again reports not-found
    let response = client
        .delete(format!("{}/authors/{}/favorite", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_review_scores_and_average() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, _, book_id) = seed_book(&client, &admin, 1).await;

    // A fresh book rates 0
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .unwrap();
    let book: Value = response.json().await.unwrap();
    assert_eq!(book["average_rating"].as_f64(), Some(0.0));

    for score in [4, 5] {
        let token = member_token(&client).await;
        let response = client
            .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
            .bearer_auth(&token)
            .json(&json!({"score": score, "comment": "fine"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .unwrap();
    let book: Value = response.json().await.unwrap();
    assert_eq!(book["average_rating"].as_f64(), Some(4.5));

    // Scores outside 1-5 are rejected
    let token = member_token(&client).await;
    let response = client
        .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .bearer_auth(&token)
        .json(&json!({"score": 10}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_search_unknown_type_behaves_as_all() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, _, book_id) = seed_book(&client, &admin, 1).await;

    // Fetch the generated title so both searches target the same book
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .unwrap();
    let book: Value = response.json().await.unwrap();
    let title = book["title"].as_str().unwrap();

    let all: Value = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[("q", title), ("search_type", "all")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let invalid: Value = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[("q", title), ("search_type", "invalid_type")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(all["total"], invalid["total"]);
    assert_eq!(all["items"], invalid["items"]);
    assert_eq!(all["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_admin_routes_reject_members() {
    let client = Client::new();
    let token = member_token(&client).await;

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({"name": "Nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);
}
