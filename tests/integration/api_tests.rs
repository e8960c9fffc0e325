//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api::create_router, AppConfig, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

/// Send a request to the in-process router and decode the JSON body
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, body)
}

async fn create(app: &Router, book: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No book ID").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_create_without_name() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"year": 2010, "pageCount": 10, "readPage": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "name is required to add a book");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_create_with_read_page_over_page_count() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "A", "pageCount": 10, "readPage": 11})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "readPage must not exceed pageCount");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_uses_envelope() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "A", "pageCount": -3})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_malformed_query_uses_envelope() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books?name=a&name=b", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"]
        .as_str()
        .expect("No message")
        .starts_with("invalid request:"));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_create_and_get_book() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({
            "name": "Buku A",
            "year": 2010,
            "author": "John Doe",
            "summary": "Lorem ipsum",
            "publisher": "Dicoding",
            "pageCount": 100,
            "readPage": 25,
            "reading": false
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "book added");
    let id = body["data"]["bookId"].as_str().expect("No book ID").to_string();
    assert_eq!(id.len(), 16);

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let book = &body["data"]["book"];
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["name"], "Buku A");
    assert_eq!(book["year"], 2010);
    assert_eq!(book["publisher"], "Dicoding");
    assert_eq!(book["pageCount"], 100);
    assert_eq!(book["readPage"], 25);
    assert_eq!(book["finished"], false);
    assert_eq!(book["reading"], false);
    assert_eq!(book["insertedAt"], book["updatedAt"]);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(
        body["data"]["books"],
        json!([{"id": id, "name": "Buku A", "publisher": "Dicoding"}])
    );

    let (_, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/xxxxxxxxxxxxxxxx", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "book not found");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_list_projects_in_insertion_order() {
    let app = app();
    let first = create(&app, json!({"name": "First", "publisher": "P1", "pageCount": 5})).await;
    let second = create(&app, json!({"name": "Second", "publisher": "P2", "pageCount": 5})).await;
    let third = create(&app, json!({"name": "Third", "publisher": "P3", "pageCount": 5})).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["data"]["books"],
        json!([
            {"id": first, "name": "First", "publisher": "P1"},
            {"id": second, "name": "Second", "publisher": "P2"},
            {"id": third, "name": "Third", "publisher": "P3"},
        ])
    );
}

#[tokio::test]
async fn test_list_filters() {
    let app = app();
    let dune = create(&app, json!({"name": "Dune", "pageCount": 10, "readPage": 10, "reading": false})).await;
    let emma = create(&app, json!({"name": "Emma", "pageCount": 10, "readPage": 4, "reading": true})).await;
    let dune_upper = create(&app, json!({"name": "DUNE", "pageCount": 10, "readPage": 0, "reading": false})).await;

    let ids = |body: &Value| -> Vec<String> {
        body["data"]["books"]
            .as_array()
            .expect("books is not an array")
            .iter()
            .map(|b| b["id"].as_str().unwrap_or_default().to_string())
            .collect()
    };

    let (_, body) = send(&app, Method::GET, "/books?name=dune", None).await;
    assert_eq!(ids(&body), [dune.clone(), dune_upper.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(ids(&body), [emma.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?reading=0", None).await;
    assert_eq!(ids(&body), [dune.clone(), dune_upper.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(ids(&body), [dune.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?finished=0", None).await;
    assert_eq!(ids(&body), [emma.clone(), dune_upper.clone()]);

    // name takes precedence over the other filters
    let (_, body) = send(&app, Method::GET, "/books?name=emma&finished=1", None).await;
    assert_eq!(ids(&body), [emma]);
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = create(&app, json!({"name": "A", "pageCount": 100, "readPage": 10})).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({"name": "A revised", "publisher": "P", "pageCount": 200, "readPage": 20, "reading": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "book updated");

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let (before, after) = (&before["data"]["book"], &after["data"]["book"]);
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert_ne!(after["updatedAt"], before["updatedAt"]);
    assert_eq!(after["name"], "A revised");
    assert_eq!(after["pageCount"], 200);
    assert_eq!(after["readPage"], 20);
    assert_eq!(after["reading"], true);
}

#[tokio::test]
async fn test_update_validation() {
    let app = app();
    let id = create(&app, json!({"name": "A", "pageCount": 10})).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"pageCount": 10}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "update failed: name is required");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "A", "pageCount": 10, "readPage": 11})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "update failed: readPage must not exceed pageCount");

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["book"]["readPage"], 0);
}

#[tokio::test]
async fn test_update_unknown_book() {
    let app = app();
    let id = create(&app, json!({"name": "A", "pageCount": 10})).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/xxxxxxxxxxxxxxxx",
        Some(json!({"name": "B", "pageCount": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "update failed: id not found");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([{"id": id, "name": "A", "publisher": null}]));
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let id = create(&app, json!({"name": "A", "pageCount": 10})).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "book deleted");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "delete failed: id not found");
}

#[tokio::test]
async fn test_finished_is_kept_on_update() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "A", "pageCount": 100, "readPage": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["bookId"].as_str().expect("No book ID").to_string();
    let uri = format!("/books/{}", id);

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["book"]["finished"], true);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "A", "pageCount": 100, "readPage": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["book"]["readPage"], 50);
    assert_eq!(body["data"]["book"]["finished"], true);
}
