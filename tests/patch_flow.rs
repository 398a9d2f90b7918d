mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, get, json_request, raw_json, send};

async fn seed_movie(app: &axum::Router) -> i64 {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/movies",
            &json!({
                "title": "First Cut",
                "showcasing": true,
                "premiere_date": "2024-03-01",
                "genre_ids": [1, 2]
            }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn patch_changes_only_named_fields() {
    let app = app();
    let id = seed_movie(&app).await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/movies/{id}"),
            &json!([{"op": "replace", "path": "/title", "value": "Second Cut"}]),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Second Cut");
    assert_eq!(response.body["showcasing"], true);
    assert_eq!(response.body["genre_ids"], json!([1, 2]));
}

#[tokio::test]
async fn empty_patch_succeeds_without_changes() {
    let app = app();
    let id = seed_movie(&app).await;

    let response = send(
        &app,
        json_request("PATCH", &format!("/api/movies/{id}"), &json!([])),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "First Cut");
}

#[tokio::test]
async fn patch_on_missing_id_is_not_found() {
    let app = app();
    let response = send(
        &app,
        json_request(
            "PATCH",
            "/api/movies/99",
            &json!([{"op": "replace", "path": "/title", "value": "x"}]),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_patch_leaves_the_resource_unchanged() {
    let app = app();
    let id = seed_movie(&app).await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/movies/{id}"),
            &json!([
                {"op": "replace", "path": "/title", "value": "Changed"},
                {"op": "replace", "path": "/box_office", "value": 7}
            ]),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = response.body["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "box_office");

    // Re-read: the valid operation in the failing document did not land.
    let after = send(&app, get(&format!("/api/movies/{id}"))).await;
    assert_eq!(after.body["title"], "First Cut");
}

#[tokio::test]
async fn patched_document_must_still_validate() {
    let app = app();
    let id = seed_movie(&app).await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/movies/{id}"),
            &json!([{"op": "remove", "path": "/title"}]),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let after = send(&app, get(&format!("/api/movies/{id}"))).await;
    assert_eq!(after.body["title"], "First Cut");
}

#[tokio::test]
async fn unsupported_ops_are_violations() {
    let app = app();
    let id = seed_movie(&app).await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/movies/{id}"),
            &json!([{"op": "test", "path": "/title", "value": "First Cut"}]),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = response.body["errors"].as_array().unwrap();
    assert_eq!(errors[0]["code"], "unsupported_op");
}

#[tokio::test]
async fn malformed_patch_body_is_a_structured_400() {
    let app = app();
    let id = seed_movie(&app).await;

    let response = send(
        &app,
        raw_json("PATCH", &format!("/api/movies/{id}"), "{not json"),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "BAD_REQUEST");
    assert_eq!(response.body["status"], 400);

    let after = send(&app, get(&format!("/api/movies/{id}"))).await;
    assert_eq!(after.body["title"], "First Cut");
}

#[tokio::test]
async fn patch_cannot_reach_beyond_the_patchable_surface() {
    let app = app();
    let id = seed_movie(&app).await;

    // genre links are not on the patch surface
    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/movies/{id}"),
            &json!([{"op": "replace", "path": "/genre_ids", "value": [9]}]),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let after = send(&app, get(&format!("/api/movies/{id}"))).await;
    assert_eq!(after.body["genre_ids"], json!([1, 2]));
}
