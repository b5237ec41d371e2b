use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use movieflix_sources::{TimeWindow, TmdbClient};
use serde_json::{json, Value};
use std::collections::HashMap;

async fn listing(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "results": [],
        "page": page,
        "total_pages": 9,
    }))
}

async fn trending(Path(_window): Path<String>, query: Query<HashMap<String, String>>) -> Json<Value> {
    listing(query).await
}

async fn similar(Path(_movie_id): Path<u64>, query: Query<HashMap<String, String>>) -> Json<Value> {
    listing(query).await
}

async fn spawn_tmdb() -> String {
    let app = Router::new()
        .route("/trending/movie/:window", get(trending))
        .route("/movie/:id/similar", get(similar));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_trending_requests_the_given_page() {
    let client = TmdbClient::new(spawn_tmdb().await, "test-key".to_string());

    let page = client.trending(TimeWindow::Week, 4).await.unwrap();
    assert_eq!(page.page, Some(4));
    assert_eq!(page.total_pages, Some(9));
}

#[tokio::test]
async fn test_similar_requests_the_given_page() {
    let client = TmdbClient::new(spawn_tmdb().await, "test-key".to_string());

    let page = client.similar(603, 2).await.unwrap();
    assert_eq!(page.page, Some(2));
    assert!(page.results.is_empty());
}
