mod common;

use affiliate_links_api::infrastructure::persistence::MemoryGraphStore;
use axum::http::StatusCode;
use common::{CountingStore, make_server, seed, stored_link};
use serde_json::{Value, json};

fn urls(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|link| link["affiliateUrl"].as_str().unwrap())
        .collect()
}

// ─── POST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_affiliate_link() {
    let memory = MemoryGraphStore::new();
    let store = CountingStore::new(memory.clone());
    let server = make_server(store.clone());

    let response = server
        .post("/api/affiliates")
        .json(&json!({
            "affiliateUrl": "https://example.com/ref123",
            "tags": ["electronics", "gadgets"],
            "comment": "Test comment"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["affiliateUrl"], "https://example.com/ref123");
    assert_eq!(body["tags"], json!(["electronics", "gadgets"]));
    assert_eq!(body["sharedUrl"], "https://example.com/ref123");
    assert_eq!(body["merchant"], "amazon");
    assert_eq!(body["comment"], "Test comment");
    assert!(body["createdAt"].is_string());

    assert_eq!(memory.len().await, 1);
    assert_eq!(store.statements(), 2);
    assert_eq!(store.opened(), 1);
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_create_returns_stored_representation() {
    let memory = MemoryGraphStore::new();
    let server = make_server(CountingStore::new(memory.clone()));

    let created = server
        .post("/api/affiliates")
        .json(&json!({ "affiliateUrl": "https://example.com/a", "tags": ["books"] }))
        .await
        .json::<Value>();

    let listed = server.get("/api/affiliates").await.json::<Value>();

    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn test_create_conflict_on_same_url() {
    let memory = MemoryGraphStore::new();
    let existing = stored_link(
        "https://example.com/ref123",
        &["electronics"],
        "amazon",
        "2024-01-01T00:00:00Z",
    );
    seed(&memory, &[existing.clone()]).await;

    let store = CountingStore::new(memory.clone());
    let server = make_server(store.clone());

    let response = server
        .post("/api/affiliates")
        .json(&json!({ "affiliateUrl": "https://example.com/ref123", "tags": ["books"] }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "Affiliate link or the given tags already exists");
    assert_eq!(body["existingLink"], serde_json::to_value(&existing).unwrap());

    assert_eq!(memory.len().await, 1);
    assert_eq!(store.statements(), 1);
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_create_conflict_when_tags_already_covered() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[stored_link(
            "https://example.com/other",
            &["electronics", "gadgets", "sale"],
            "amazon",
            "2024-01-01T00:00:00Z",
        )],
    )
    .await;

    let server = make_server(CountingStore::new(memory.clone()));

    let response = server
        .post("/api/affiliates")
        .json(&json!({ "affiliateUrl": "https://example.com/new", "tags": ["gadgets", "electronics"] }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["existingLink"]["affiliateUrl"], "https://example.com/other");
}

#[tokio::test]
async fn test_create_allows_partial_tag_overlap() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[stored_link(
            "https://example.com/other",
            &["electronics"],
            "amazon",
            "2024-01-01T00:00:00Z",
        )],
    )
    .await;

    let server = make_server(CountingStore::new(memory.clone()));

    server
        .post("/api/affiliates")
        .json(&json!({ "affiliateUrl": "https://example.com/new", "tags": ["electronics", "books"] }))
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(memory.len().await, 2);
}

#[tokio::test]
async fn test_create_malformed_body_hits_last_resort_handler() {
    let store = CountingStore::new(MemoryGraphStore::new());
    let server = make_server(store.clone());

    let response = server
        .post("/api/affiliates")
        .bytes("{\"affiliateUrl\": ".into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Something went wrong!" })
    );

    // Rejected before the handler ran, so no session was opened.
    assert_eq!(store.opened(), 0);
}

#[tokio::test]
async fn test_create_without_json_content_type_stores_empty_link() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[stored_link("https://example.com/1", &["books"], "amazon", "2024-01-01T00:00:00Z")],
    )
    .await;

    let store = CountingStore::new(memory.clone());
    let server = make_server(store.clone());

    let response = server
        .post("/api/affiliates")
        .text(r#"{"affiliateUrl": "https://example.com/ignored"}"#)
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["merchant"], "amazon");
    assert!(body["createdAt"].is_string());
    assert!(body.get("affiliateUrl").is_none());
    assert!(body.get("sharedUrl").is_none());
    assert!(body.get("tags").is_none());

    assert_eq!(memory.len().await, 2);
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_create_without_body() {
    let memory = MemoryGraphStore::new();
    let server = make_server(CountingStore::new(memory.clone()));

    server
        .post("/api/affiliates")
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(memory.len().await, 1);
}

#[tokio::test]
async fn test_create_store_error() {
    let store = CountingStore::failing(MemoryGraphStore::new(), "Neo.TransientError.General");
    let server = make_server(store.clone());

    let response = server
        .post("/api/affiliates")
        .json(&json!({ "affiliateUrl": "https://example.com/ref123", "tags": [] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Neo.TransientError.General" })
    );
    assert_eq!(store.closed(), 1);
}

// ─── GET / ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_newest_first() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[
            stored_link("https://example.com/1", &["electronics"], "amazon", "2024-01-01T00:00:00Z"),
            stored_link("https://example.com/3", &["books"], "amazon", "2024-03-01T00:00:00Z"),
            stored_link("https://example.com/2", &["toys"], "ebay", "2024-02-01T00:00:00Z"),
        ],
    )
    .await;

    let store = CountingStore::new(memory);
    let server = make_server(store.clone());

    let response = server.get("/api/affiliates").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(
        urls(&body),
        vec!["https://example.com/3", "https://example.com/2", "https://example.com/1"]
    );
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_list_filtered_by_tag() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[
            stored_link("https://example.com/e", &["electronics"], "amazon", "2024-01-01T00:00:00Z"),
            stored_link("https://example.com/b", &["books"], "amazon", "2024-01-02T00:00:00Z"),
        ],
    )
    .await;

    let server = make_server(CountingStore::new(memory));

    let response = server
        .get("/api/affiliates")
        .add_query_param("tags", "electronics")
        .await;

    response.assert_status_ok();
    assert_eq!(urls(&response.json::<Value>()), vec!["https://example.com/e"]);
}

#[tokio::test]
async fn test_list_filter_matches_any_tag() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[
            stored_link("https://example.com/e", &["electronics"], "amazon", "2024-01-01T00:00:00Z"),
            stored_link("https://example.com/b", &["books"], "amazon", "2024-01-02T00:00:00Z"),
            stored_link("https://example.com/t", &["toys"], "amazon", "2024-01-03T00:00:00Z"),
        ],
    )
    .await;

    let server = make_server(CountingStore::new(memory));

    let response = server
        .get("/api/affiliates")
        .add_query_param("tags[]", "electronics")
        .add_query_param("tags[]", "books")
        .await;

    response.assert_status_ok();
    assert_eq!(
        urls(&response.json::<Value>()),
        vec!["https://example.com/b", "https://example.com/e"]
    );
}

#[tokio::test]
async fn test_list_with_empty_tags_value_returns_everything() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[
            stored_link("https://example.com/e", &["electronics"], "amazon", "2024-01-01T00:00:00Z"),
            stored_link("https://example.com/b", &["books"], "amazon", "2024-01-02T00:00:00Z"),
        ],
    )
    .await;

    let server = make_server(CountingStore::new(memory));

    let response = server.get("/api/affiliates?tags=").await;

    response.assert_status_ok();
    assert_eq!(
        urls(&response.json::<Value>()),
        vec!["https://example.com/b", "https://example.com/e"]
    );
}

#[tokio::test]
async fn test_list_empty_store() {
    let server = make_server(CountingStore::new(MemoryGraphStore::new()));

    let response = server.get("/api/affiliates").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_store_error() {
    let store = CountingStore::failing(MemoryGraphStore::new(), "Connection refused");
    let server = make_server(store.clone());

    let response = server.get("/api/affiliates").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Connection refused" }));
    assert_eq!(store.opened(), 1);
    assert_eq!(store.closed(), 1);
}

// ─── GET /merchant/{merchant} ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_by_merchant() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[
            stored_link("https://example.com/a", &["electronics"], "amazon", "2024-01-01T00:00:00Z"),
            stored_link("https://example.com/e", &["books"], "ebay", "2024-01-02T00:00:00Z"),
            stored_link("https://example.com/A", &["toys"], "Amazon", "2024-01-03T00:00:00Z"),
        ],
    )
    .await;

    let store = CountingStore::new(memory);
    let server = make_server(store.clone());

    let response = server.get("/api/affiliates/merchant/amazon").await;

    response.assert_status_ok();
    assert_eq!(urls(&response.json::<Value>()), vec!["https://example.com/a"]);
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_list_by_merchant_store_error() {
    let store = CountingStore::failing(MemoryGraphStore::new(), "Database unavailable");
    let server = make_server(store.clone());

    let response = server.get("/api/affiliates/merchant/amazon").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Database unavailable");
    assert_eq!(store.closed(), 1);
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_encoded_affiliate_url() {
    let memory = MemoryGraphStore::new();
    seed(
        &memory,
        &[stored_link(
            "https://example.com/ref123",
            &["electronics"],
            "amazon",
            "2024-01-01T00:00:00Z",
        )],
    )
    .await;

    let store = CountingStore::new(memory.clone());
    let server = make_server(store.clone());

    let response = server
        .delete("/api/affiliates/https%3A%2F%2Fexample.com%2Fref123")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());
    assert!(memory.is_empty().await);
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = CountingStore::new(MemoryGraphStore::new());
    let server = make_server(store.clone());

    let response = server
        .delete("/api/affiliates/https%3A%2F%2Fexample.com%2Fmissing")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());
    assert_eq!(store.closed(), 1);
}

#[tokio::test]
async fn test_delete_store_error() {
    let store = CountingStore::failing(MemoryGraphStore::new(), "Neo.ClientError.Security.Forbidden");
    let server = make_server(store.clone());

    let response = server
        .delete("/api/affiliates/https%3A%2F%2Fexample.com%2Fref123")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Neo.ClientError.Security.Forbidden" })
    );
    assert_eq!(store.closed(), 1);
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_every_request_releases_exactly_one_session() {
    let store = CountingStore::new(MemoryGraphStore::new());
    let server = make_server(store.clone());

    server
        .post("/api/affiliates")
        .json(&json!({ "affiliateUrl": "https://example.com/1", "tags": ["a"] }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/affiliates")
        .json(&json!({ "affiliateUrl": "https://example.com/1", "tags": ["b"] }))
        .await
        .assert_status(StatusCode::CONFLICT);
    server.get("/api/affiliates").await.assert_status_ok();
    server
        .get("/api/affiliates/merchant/amazon")
        .await
        .assert_status_ok();
    server
        .delete("/api/affiliates/https%3A%2F%2Fexample.com%2F1")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(store.opened(), 5);
    assert_eq!(store.closed(), 5);
}
