//! Integration tests for Project API endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use utoipa::OpenApi;

use crate::api::routes::ApiDoc;
use crate::api::{AppState, STORE_FAULT_MESSAGE, create_router};
use crate::assets::FsAssetStore;
use crate::db::{Database, SqliteDatabase};

type TestState = AppState<SqliteDatabase, FsAssetStore>;

/// Create test state with an in-memory database and a temporary asset dir
async fn test_state() -> (TestState, TempDir) {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let dir = TempDir::new().unwrap();
    let assets = FsAssetStore::new(dir.path()).await.unwrap();
    (AppState::new(db, assets), dir)
}

async fn test_app() -> (Router, TempDir) {
    let (state, dir) = test_state().await;
    (create_router(state), dir)
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn sample() -> Value {
    json!({
        "name": "X",
        "description": "d",
        "category": "web",
        "year": 2024,
        "state": "active"
    })
}

async fn save(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/project/save", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

// =============================================================================
// POST /api/project/save
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn save_returns_project_with_generated_fields() {
    let (app, _dir) = test_app().await;

    let body = save(&app, sample()).await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Project saved");
    let project = &body["project"];
    assert_eq!(project["name"], "X");
    assert_eq!(project["description"], "d");
    assert_eq!(project["category"], "web");
    assert_eq!(project["year"], 2024);
    assert_eq!(project["state"], "active");
    assert_eq!(project["image"], "default.png");
    assert!(!project["id"].as_str().unwrap().is_empty());
    assert!(!project["created_at"].as_str().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn save_ignores_client_supplied_id() {
    let (app, _dir) = test_app().await;

    let mut body = sample();
    body["id"] = json!("my-own-id");
    let body = save(&app, body).await;

    assert_ne!(body["project"]["id"], "my-own-id");
}

#[tokio::test(flavor = "multi_thread")]
async fn save_without_year_is_rejected_and_stores_nothing() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/project/save",
            json!({"name": "X", "description": "d", "category": "web", "state": "active"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("year"));

    let response = app
        .oneshot(empty_request("GET", "/api/project/list"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["projects"].as_array().unwrap().len(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn save_reports_every_missing_field() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/project/save",
            json!({"name": "", "description": "d", "category": "web", "year": 2024}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "missing required fields: name, state");
}

#[tokio::test(flavor = "multi_thread")]
async fn save_accepts_year_zero() {
    let (app, _dir) = test_app().await;

    let mut body = sample();
    body["year"] = json!(0);
    let body = save(&app, body).await;

    assert_eq!(body["project"]["year"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn save_with_malformed_json_is_bad_request() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/project/save")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test(flavor = "multi_thread")]
async fn save_with_non_numeric_year_is_bad_request() {
    let (app, _dir) = test_app().await;

    let mut body = sample();
    body["year"] = json!("2024");
    let response = app
        .oneshot(json_request("POST", "/api/project/save", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// GET /api/project/list and /api/project/item/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_is_empty_initially() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(empty_request("GET", "/api/project/list"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["projects"], json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_returns_projects_in_insertion_order() {
    let (app, _dir) = test_app().await;

    for name in ["first", "second", "third"] {
        let mut body = sample();
        body["name"] = json!(name);
        save(&app, body).await;
    }

    let response = app
        .oneshot(empty_request("GET", "/api/project/list"))
        .await
        .unwrap();
    let body = json_body(response).await;
    let names: Vec<&str> = body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["first", "second", "third"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn item_returns_saved_project() {
    let (app, _dir) = test_app().await;
    let saved = save(&app, sample()).await;
    let id = saved["project"]["id"].as_str().unwrap();

    let response = app
        .oneshot(empty_request("GET", &format!("/api/project/item/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["project"], saved["project"]);
    assert!(body.get("message").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn item_with_unknown_id_is_not_found() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(empty_request("GET", "/api/project/item/ffffffffffffffff"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Project 'ffffffffffffffff' not found");
}

// =============================================================================
// PUT /api/project/update/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_supplied_fields() {
    let (app, _dir) = test_app().await;
    let saved = save(&app, sample()).await;
    let id = saved["project"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/project/update/{id}"),
            json!({"state": "archived"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Project updated");
    let mut expected = saved["project"].clone();
    expected["state"] = json!("archived");
    assert_eq!(body["project"], expected);

    let response = app
        .oneshot(empty_request("GET", &format!("/api/project/item/{id}")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["project"]["state"], "archived");
    assert_eq!(body["project"]["name"], "X");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_can_set_image_name() {
    let (app, _dir) = test_app().await;
    let saved = save(&app, sample()).await;
    let id = saved["project"]["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/project/update/{id}"),
            json!({"image": "project-1-0-cover.png"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["project"]["image"], "project-1-0-cover.png");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_id_is_not_found() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/project/update/ffffffffffffffff",
            json!({"name": "Y"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_without_id_is_bad_request() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(json_request("PUT", "/api/project/update", json!({"name": "Y"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "project id is required");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_blank_field_is_bad_request() {
    let (app, _dir) = test_app().await;
    let saved = save(&app, sample()).await;
    let id = saved["project"]["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/project/update/{id}"),
            json!({"name": "  "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// DELETE /api/project/delete/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_removed_project_then_item_is_gone() {
    let (app, _dir) = test_app().await;
    let saved = save(&app, sample()).await;
    let id = saved["project"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/project/delete/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Project deleted");
    assert_eq!(body["project"], saved["project"]);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/project/item/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/api/project/delete/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Store faults and system routes
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn store_fault_returns_generic_message() {
    let (state, _dir) = test_state().await;
    let app = create_router(state.clone());
    state.db().close().await;

    let response = app
        .oneshot(empty_request("GET", "/api/project/list"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], STORE_FAULT_MESSAGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok() {
    let (app, _dir) = test_app().await;

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_unreachable_store() {
    let (state, _dir) = test_state().await;
    let app = create_router(state.clone());
    state.db().close().await;

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store"], false);
}

#[test]
fn openapi_license_matches_package() {
    let doc = ApiDoc::openapi();
    let license = doc.info.license.expect("license should be declared");
    assert_eq!(license.name, env!("CARGO_PKG_LICENSE"));
}
