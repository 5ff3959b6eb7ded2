//! In-process stand-in for the REST backend.
//!
//! Unrouted requests hit `echo`, which reflects the method, path, query,
//! auth/content headers, and JSON body back to the caller so tests can assert
//! exactly what went over the wire. Misbehaving peers (a slow route, a 401
//! cut off mid-body) cover the failure paths.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::Json;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::config::{ClientConfig, REQUEST_TIMEOUT};
use crate::navigation::RecordingNavigator;
use crate::session::SessionStore;
use crate::storage::MemoryStorage;

use super::ApiClient;

pub(crate) const GOOD_PASSWORD: &str = "hunter22";
pub(crate) const ISSUED_TOKEN: &str = "tok-123";
/// `POST /auth/register` answers 409 for this address.
pub(crate) const TAKEN_EMAIL: &str = "taken@example.com";

/// Bind an ephemeral port and serve the fake backend on it.
pub(crate) async fn spawn() -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/expired", any(expired))
        .route("/missing", any(missing))
        .route("/plain", get(|| async { "pong" }))
        .route("/no-content", post(|| async { StatusCode::NO_CONTENT }))
        .route("/slow", get(slow))
        .route("/auth/register", post(register))
        .fallback(echo);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub(crate) struct Harness {
    pub client: ApiClient,
    pub session: SessionStore,
    pub nav: Arc<RecordingNavigator>,
}

/// Raw socket server whose single response is a 401 that promises more body
/// than it sends before hanging up.
pub(crate) async fn spawn_truncated_unauthorized() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0_u8; 4096];
        let _ = socket.read(&mut request).await;
        let response = "HTTP/1.1 401 Unauthorized\r\n\
                        Content-Type: application/json\r\n\
                        Content-Length: 200\r\n\r\n\
                        {\"error\":";
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });
    format!("http://{addr}")
}

/// Client wired to a fresh backend, empty session, and recording navigator.
pub(crate) async fn harness() -> Harness {
    harness_at(&spawn().await)
}

/// Same wiring against an already running backend.
pub(crate) fn harness_at(base_url: &str) -> Harness {
    let config = ClientConfig::new(Some(base_url), None).unwrap();
    let session = SessionStore::new(MemoryStorage::new());
    let nav = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(&config, session.clone(), nav.clone()).unwrap();
    Harness { client, session, nav }
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let parsed = serde_json::from_slice::<Value>(&body).ok();
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "authorization": header("authorization"),
        "content_type": header("content-type"),
        "body": parsed,
        "body_len": body.len(),
    }))
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == GOOD_PASSWORD {
        let user = json!({ "id": "u-7", "name": "Ada", "email": body["email"] });
        (StatusCode::OK, Json(json!({ "message": "Login successful", "token": ISSUED_TOKEN, "user": user })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid email or password" })))
    }
}

async fn register(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let taken = serde_json::from_slice::<Value>(&body).is_ok_and(|b| b["email"] == TAKEN_EMAIL);
    if taken {
        return (StatusCode::CONFLICT, Json(json!({ "error": "User already exists" }))).into_response();
    }
    echo(method, uri, headers, body).await.into_response()
}

async fn slow() -> &'static str {
    tokio::time::sleep(REQUEST_TIMEOUT + Duration::from_secs(5)).await;
    "late"
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    let expected = format!("Bearer {ISSUED_TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(auth) if auth == expected => {
            (StatusCode::OK, Json(json!({ "user": { "id": "u-7", "name": "Ada", "email": "ada@example.com" } })))
        }
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid or expired token" }))),
    }
}

async fn expired() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid or expired token", "message": "Signature has expired" })))
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Job application not found" })))
}
