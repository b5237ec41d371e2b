use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use movieflix_config::{CredentialStore, SharedCredentials};
use movieflix_models::LoginCredentials;
use movieflix_sources::{BackendClient, RecommendationSource, SourceError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Recorded {
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
}

impl Recorded {
    fn take(&self) -> Vec<Option<String>> {
        std::mem::take(&mut *self.auth_headers.lock().unwrap())
    }
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

#[derive(Deserialize)]
struct RecommendQuery {
    id: u64,
    top_k: Option<u32>,
}

async fn recommend(Query(q): Query<RecommendQuery>) -> Result<Json<Value>, StatusCode> {
    if q.id == 500 {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let top: Vec<Value> = (0..q.top_k.unwrap_or(3))
        .map(|i| json!({"item_index": i, "asin": format!("B{:03}", i), "title": format!("Movie {}", i), "score": 0.5}))
        .collect();
    Ok(Json(json!({
        "user_index": q.id,
        "watched_items": [{"item_index": 99, "asin": "W099", "title": "Watched"}],
        "top_recommendations": top,
    })))
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "token": "fresh-token",
        "user": {"id": 1, "username": "neo", "email": body["email"]},
    }))
}

async fn logout(State(rec): State<Recorded>, headers: HeaderMap) -> StatusCode {
    rec.auth_headers.lock().unwrap().push(auth_header(&headers));
    StatusCode::NO_CONTENT
}

async fn me() -> StatusCode {
    StatusCode::UNAUTHORIZED
}

async fn watch_history(State(rec): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    rec.auth_headers.lock().unwrap().push(auth_header(&headers));
    Json(json!([{"movieId": 7, "watchedAt": "2024-05-01T12:00:00Z"}]))
}

async fn spawn_backend() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/recommend", get(recommend))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/preferences/watch-history", get(watch_history))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}

fn temp_credentials() -> (TempDir, SharedCredentials) {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("credentials.toml"));
    (dir, store.shared())
}

#[tokio::test]
async fn test_recommend_passes_id_and_top_k() {
    let (base_url, _) = spawn_backend().await;
    let (_dir, creds) = temp_credentials();
    let client = BackendClient::new(base_url, creds);

    let rec = client.fetch_recommendation(4, Some(5)).await.unwrap();
    assert_eq!(rec.user_index, 4);
    assert_eq!(rec.top_recommendations.len(), 5);
    assert_eq!(rec.watched_items[0].score, None);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let (base_url, _) = spawn_backend().await;
    let (_dir, creds) = temp_credentials();
    let client = BackendClient::new(base_url, creds);

    let err = client.recommend(500, None).await.unwrap_err();
    match err {
        SourceError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_later_requests_omit_bearer() {
    let (base_url, recorded) = spawn_backend().await;
    let (dir, creds) = temp_credentials();
    creds.lock().unwrap().set_token("stale-token".to_string());
    let client = BackendClient::new(base_url, creds.clone());

    client.get_watch_history().await.unwrap();
    assert_eq!(recorded.take(), vec![Some("Bearer stale-token".to_string())]);

    let err = client.current_user().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(creds.lock().unwrap().get_token(), None);

    // Removal is persisted, not only in memory
    let on_disk = CredentialStore::open(dir.path().join("credentials.toml")).unwrap();
    assert_eq!(on_disk.get_token(), None);

    let history = client.get_watch_history().await.unwrap();
    assert_eq!(history[0].movie_id, 7);
    assert_eq!(recorded.take(), vec![None]);
}

#[tokio::test]
async fn test_login_persists_token_and_logout_clears_it() {
    let (base_url, recorded) = spawn_backend().await;
    let (dir, creds) = temp_credentials();
    let client = BackendClient::new(base_url, creds.clone());

    let auth = client
        .login(&LoginCredentials {
            email: "neo@example.com".to_string(),
            password: "redpill".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(auth.user.username, "neo");

    let on_disk = CredentialStore::open(dir.path().join("credentials.toml")).unwrap();
    assert_eq!(on_disk.get_token(), Some(&"fresh-token".to_string()));

    client.get_watch_history().await.unwrap();
    assert_eq!(recorded.take(), vec![Some("Bearer fresh-token".to_string())]);

    client.logout().await.unwrap();
    assert_eq!(creds.lock().unwrap().get_token(), None);
    // The logout call itself already goes out without a credential
    assert_eq!(recorded.take(), vec![None]);

    client.get_watch_history().await.unwrap();
    assert_eq!(recorded.take(), vec![None]);
}
