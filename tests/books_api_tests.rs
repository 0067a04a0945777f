use std::sync::Arc;

use bookstore::{
    error::ErrorVerbosity,
    server::router,
    state::ApiState,
    store::MemoryBookStore,
};
use serde_json::{json, Value};

/// Spin up the HTTP server on an OS-assigned port with an in-memory store,
/// returning the base URL.
async fn spawn_test_server() -> String {
    let state = ApiState::new(ErrorVerbosity::Full, Arc::new(MemoryBookStore::new()));
    let app = router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

fn book_payload(isbn: &str, title: &str, year: i64) -> Value {
    json!({
        "isbn": isbn,
        "title": title,
        "author": "Tester",
        "publisher": "Test Pub",
        "year": year
    })
}

#[tokio::test]
async fn create_book_with_valid_data_returns_201() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/books", base))
        .json(&book_payload("1234567890", "Test Book", 2024))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["book"]["isbn"], "1234567890");
    assert_eq!(body["book"]["title"], "Test Book");
    assert_eq!(body["book"]["author"], "Tester");
    assert_eq!(body["book"]["publisher"], "Test Pub");
    assert_eq!(body["book"]["year"], 2024);
}

#[tokio::test]
async fn create_book_with_missing_fields_returns_400_with_one_error_per_field() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/books", base))
        .json(&json!({ "title": "Incomplete Book" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 4);

    for field in ["isbn", "author", "publisher", "year"] {
        assert!(
            errors.iter().any(|e| e.as_str().unwrap().contains(field)),
            "no error mentions {}",
            field
        );
    }
}

#[tokio::test]
async fn create_book_with_negative_year_returns_400_mentioning_year() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/books", base))
        .json(&book_payload("0987654321", "Bad Year", -1))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("year")));
}

#[tokio::test]
async fn create_book_with_non_integer_year_returns_400_mentioning_year() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let mut payload = book_payload("0987654321", "Bad Year", 2024);
    payload["year"] = json!("not a number");

    let resp = client
        .post(format!("{}/books", base))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("year")));
}

#[tokio::test]
async fn create_book_with_taken_isbn_returns_409_and_keeps_the_original() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/books", base))
        .json(&book_payload("5555555555", "Original", 2024))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{}/books", base))
        .json(&book_payload("5555555555", "Impostor", 2025))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let body: Value = reqwest::get(format!("{}/books/5555555555", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["book"]["title"], "Original");
}

#[tokio::test]
async fn created_book_round_trips_through_get() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/books", base))
        .json(&book_payload("2222222222", "Get Me", 2024))
        .send()
        .await
        .unwrap();

    let resp = reqwest::get(format!("{}/books/2222222222", base)).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["book"]["isbn"], "2222222222");
    assert_eq!(body["book"]["title"], "Get Me");
    assert_eq!(body["book"]["year"], 2024);
}

#[tokio::test]
async fn get_missing_book_returns_404() {
    let base = spawn_test_server().await;

    let resp = reqwest::get(format!("{}/books/9999999999", base)).await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn list_books_returns_titles_in_ascending_order() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    for (isbn, title) in [("2", "Beta"), ("1", "Alpha"), ("3", "Gamma")] {
        let resp = client
            .post(format!("{}/books", base))
            .json(&book_payload(isbn, title, 2024))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let body: Value = reqwest::get(format!("{}/books", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let titles: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn update_book_with_valid_data_returns_200_and_persists() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/books", base))
        .json(&book_payload("1111111111", "Update Me", 2024))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(format!("{}/books/1111111111", base))
        .json(&book_payload("1111111111", "Updated Book", 2025))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["book"]["title"], "Updated Book");
    assert_eq!(body["book"]["year"], 2025);

    let body: Value = reqwest::get(format!("{}/books/1111111111", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["book"]["title"], "Updated Book");
}

#[tokio::test]
async fn update_book_with_invalid_year_returns_400_mentioning_year() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/books", base))
        .json(&book_payload("1111111111", "Update Me", 2024))
        .send()
        .await
        .unwrap();

    let mut payload = book_payload("1111111111", "Still Bad", 2024);
    payload["year"] = json!("not a number");

    let resp = client
        .put(format!("{}/books/1111111111", base))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("year")));
}

#[tokio::test]
async fn update_book_with_mismatched_isbn_returns_400_mentioning_isbn() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/books", base))
        .json(&book_payload("1111111111", "Update Me", 2024))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(format!("{}/books/1111111111", base))
        .json(&book_payload("2222222222", "Wrong Key", 2024))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("isbn")));
}

#[tokio::test]
async fn update_missing_book_returns_404() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{}/books/9999999999", base))
        .json(&book_payload("9999999999", "Ghost", 2024))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_book_returns_confirmation_then_404() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/books", base))
        .json(&book_payload("3333333333", "Delete Me", 2024))
        .send()
        .await
        .unwrap();

    let resp = client
        .delete(format!("{}/books/3333333333", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Book deleted");

    let resp = reqwest::get(format!("{}/books/3333333333", base)).await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{}/books/3333333333", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base = spawn_test_server().await;

    let resp = reqwest::get(format!("{}/nonexistent", base)).await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn unsupported_method_returns_405() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .patch(format!("{}/books/1234567890", base))
        .json(&book_payload("1234567890", "Patchwork", 2024))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let base = spawn_test_server().await;

    let resp = reqwest::get(format!("{}/api-docs/openapi.json", base)).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/books/{isbn}"].is_object());
}
