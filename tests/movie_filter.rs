mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, get, json_request, send};

async fn seed_movies(app: &axum::Router) {
    let movies = [
        json!({
            "title": "Quiet Harbor",
            "showcasing": false,
            "premiere_date": "2020-01-10",
            "genre_ids": [1]
        }),
        json!({
            "title": "Harbor Lights",
            "showcasing": true,
            "premiere_date": "2023-06-01",
            "genre_ids": [2]
        }),
        json!({
            "title": "Distant Shore",
            "showcasing": false,
            "premiere_date": "2999-12-31",
            "genre_ids": [1, 2]
        }),
    ];
    for movie in &movies {
        let response = send(app, json_request("POST", "/api/movies", movie)).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
}

fn titles(body: &serde_json::Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn title_filter_matches_substrings_case_insensitively() {
    let app = app();
    seed_movies(&app).await;

    let response = send(&app, get("/api/movies/filter?title=harbor")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Quiet Harbor", "Harbor Lights"]);
}

#[tokio::test]
async fn filters_compose_conjunctively() {
    let app = app();
    seed_movies(&app).await;

    let response = send(&app, get("/api/movies/filter?title=harbor&showcasing=true")).await;
    assert_eq!(titles(&response.body), vec!["Harbor Lights"]);
}

#[tokio::test]
async fn upcoming_selects_future_premieres() {
    let app = app();
    seed_movies(&app).await;

    let response = send(&app, get("/api/movies/filter?upcoming=true")).await;
    assert_eq!(titles(&response.body), vec!["Distant Shore"]);
}

#[tokio::test]
async fn genre_filter_tests_membership() {
    let app = app();
    seed_movies(&app).await;

    let response = send(&app, get("/api/movies/filter?genre_id=2")).await;
    assert_eq!(titles(&response.body), vec!["Harbor Lights", "Distant Shore"]);
}

#[tokio::test]
async fn sorting_honors_the_allow_list() {
    let app = app();
    seed_movies(&app).await;

    let response = send(&app, get("/api/movies/filter?sort=title")).await;
    assert_eq!(
        titles(&response.body),
        vec!["Distant Shore", "Harbor Lights", "Quiet Harbor"]
    );

    let response = send(&app, get("/api/movies/filter?sort=premiere_date&descending=true")).await;
    assert_eq!(
        titles(&response.body),
        vec!["Distant Shore", "Harbor Lights", "Quiet Harbor"]
    );
}

#[tokio::test]
async fn unknown_sort_degrades_to_natural_order() {
    let app = app();
    seed_movies(&app).await;

    let natural = send(&app, get("/api/movies/filter")).await;
    let degraded = send(&app, get("/api/movies/filter?sort=box_office")).await;

    assert_eq!(degraded.status, StatusCode::OK);
    assert_eq!(titles(&degraded.body), titles(&natural.body));
}

#[tokio::test]
async fn filter_results_paginate_with_metadata() {
    let app = app();
    seed_movies(&app).await;

    let response = send(&app, get("/api/movies/filter?page=2&per_page=2")).await;
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(response.body["pagination"]["total"], 3);
    assert_eq!(response.headers.get("x-total-pages").unwrap(), "2");
}
