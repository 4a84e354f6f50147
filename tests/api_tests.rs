//! API integration tests
//!
//! These tests run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique natural keys so tests can be re-run against the same database
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_book(client: &Client, isbn: &str, total_copies: i32) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "isbn": isbn,
            "title": "Test Book",
            "author": "Test Author",
            "total_copies": total_copies
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book response")
}

async fn create_member(client: &Client, id_number: &str) -> Value {
    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "id_number": id_number,
            "first_name": "Test",
            "last_name": "Member"
        }))
        .send()
        .await
        .expect("Failed to send create member request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse member response")
}

async fn create_loan(client: &Client, book_id: i64, member_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id, "member_id": member_id }))
        .send()
        .await
        .expect("Failed to send create loan request")
}

async fn return_loan(client: &Client, loan_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send return request")
}

async fn get_book(client: &Client, book_id: i64) -> Value {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send get book request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse book response")
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
async fn test_readiness_reports_database_connectivity() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_new_book_starts_with_full_stock() {
    let client = Client::new();

    let book = create_book(&client, &unique("isbn"), 4).await;
    assert_eq!(book["total_copies"], 4);
    assert_eq!(book["available_copies"], 4);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_rejected() {
    let client = Client::new();
    let isbn = unique("isbn");

    create_book(&client, &isbn, 1).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "isbn": isbn,
            "title": "Another Title",
            "author": "Another Author",
            "total_copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "duplicate");
}

#[tokio::test]
#[ignore]
async fn test_blank_required_fields_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "isbn": unique("isbn"),
            "title": "   ",
            "author": "Author",
            "total_copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_negative_copies_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "isbn": unique("isbn"),
            "title": "Title",
            "author": "Author",
            "total_copies": -1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_update_cannot_raise_available_above_total() {
    let client = Client::new();
    let isbn = unique("isbn");

    let book = create_book(&client, &isbn, 2).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({
            "isbn": isbn,
            "title": "Test Book",
            "author": "Test Author",
            "total_copies": 2,
            "available_copies": 3
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle_round_trip() {
    let client = Client::new();

    // Single-copy book: the stock must go 1 -> 0 -> 1
    let book = create_book(&client, &unique("111"), 1).await;
    let book_id = book["id"].as_i64().unwrap();
    let member = create_member(&client, &unique("M1")).await;
    let member_id = member["id"].as_i64().unwrap();

    let response = create_loan(&client, book_id, member_id).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.unwrap();
    assert_eq!(loan["status"], "ACTIVE");
    let loan_id = loan["id"].as_i64().unwrap();

    assert_eq!(get_book(&client, book_id).await["available_copies"], 0);

    // Last copy is out: another member cannot borrow it
    let other = create_member(&client, &unique("M2")).await;
    let response = create_loan(&client, book_id, other["id"].as_i64().unwrap()).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("not available for loan"));

    // Return on time: no fine, stock restored
    let response = return_loan(&client, loan_id).await;
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "returned");
    assert_eq!(body["loan"]["status"], "RETURNED");
    let fine: f64 = body["loan"]["fine_amount"]
        .as_str()
        .expect("fine_amount should be a decimal string")
        .parse()
        .unwrap();
    assert_eq!(fine, 0.0);

    assert_eq!(get_book(&client, book_id).await["available_copies"], 1);

    // Returning twice is a conflict
    let response = return_loan(&client, loan_id).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("already been returned"));
}

#[tokio::test]
#[ignore]
async fn test_member_loan_cap_is_three() {
    let client = Client::new();

    let book = create_book(&client, &unique("isbn"), 5).await;
    let book_id = book["id"].as_i64().unwrap();
    let member = create_member(&client, &unique("M")).await;
    let member_id = member["id"].as_i64().unwrap();

    // Two existing active loans: the third still succeeds
    for _ in 0..3 {
        let response = create_loan(&client, book_id, member_id).await;
        assert_eq!(response.status(), 201);
    }

    // The fourth hits the cap
    let response = create_loan(&client, book_id, member_id).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("maximum of 3 active loans"));
}

#[tokio::test]
#[ignore]
async fn test_delete_book_blocked_while_copies_outstanding() {
    let client = Client::new();

    let book = create_book(&client, &unique("isbn"), 1).await;
    let book_id = book["id"].as_i64().unwrap();
    let member = create_member(&client, &unique("M")).await;

    let response = create_loan(&client, book_id, member["id"].as_i64().unwrap()).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.unwrap();

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // After the return the delete goes through
    return_loan(&client, loan["id"].as_i64().unwrap()).await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_deactivation_blocked_by_active_loans_and_is_irreversible() {
    let client = Client::new();

    let book = create_book(&client, &unique("isbn"), 1).await;
    let book_id = book["id"].as_i64().unwrap();
    let member = create_member(&client, &unique("M")).await;
    let member_id = member["id"].as_i64().unwrap();

    let response = create_loan(&client, book_id, member_id).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.unwrap();

    let response = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    return_loan(&client, loan["id"].as_i64().unwrap()).await;

    let response = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Deactivated members stay inactive and cannot borrow
    let response = client
        .get(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["active"], false);

    let response = create_loan(&client, book_id, member_id).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("not active"));
}

#[tokio::test]
#[ignore]
async fn test_return_unknown_loan_is_not_found() {
    let client = Client::new();

    let response = return_loan(&client, 0).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_stats_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_books"].is_number());
    assert!(body["active_loans"].is_number());
    assert!(body["overdue_loans"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_books_csv_export() {
    let client = Client::new();

    let response = client
        .get(format!("{}/export/books.csv", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("id,isbn,title,author"));
}
