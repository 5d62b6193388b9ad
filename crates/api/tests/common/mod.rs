#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use vitrine_api::auth::password::hash_password;
use vitrine_api::auth::session::SessionConfig;
use vitrine_api::config::{OrderStoreBackend, OrderingConfig, ServerConfig, StorageConfig};
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_core::ordering::{InMemoryOrderStore, OrderStore};
use vitrine_storage::{MediaStore, MemoryStore};

pub const ADMIN_USERNAME: &str = "editor";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const MEDIA_BASE_URL: &str = "https://cdn.test/media";

/// Smallest valid PNG: 1x1 transparent pixel.
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

const MULTIPART_BOUNDARY: &str = "vitrine-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the in-memory order and media backends, a non-secure session cookie
/// (tests talk plain HTTP) and the default overlay kinds.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4321".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        session: SessionConfig {
            secret: "test-session-secret".to_string(),
            ttl_hours: 1,
            cookie_secure: false,
            admin_username: ADMIN_USERNAME.to_string(),
            admin_password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
        },
        storage: StorageConfig::Memory {
            public_base_url: MEDIA_BASE_URL.to_string(),
        },
        ordering: OrderingConfig {
            backend: OrderStoreBackend::Memory,
            ..OrderingConfig::default()
        },
    }
}

/// Handles onto the stores behind a test app, for asserting side effects.
pub struct TestApp {
    pub router: Router,
    pub media: MemoryStore,
    pub state: AppState,
}

impl TestApp {
    /// A fresh clone of the router (each `oneshot` consumes one).
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with the in-memory order and media
/// stores.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(
        pool,
        test_config(),
        Some(Arc::new(InMemoryOrderStore::new())),
    )
}

/// Build the application with a custom config and order store.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    order_store: Option<Arc<dyn OrderStore>>,
) -> TestApp {
    let media = MemoryStore::new(MEDIA_BASE_URL);
    let media_store: Arc<dyn MediaStore> = Arc::new(media.clone());
    let state = AppState::new(pool, config.clone(), order_store, media_store);

    TestApp {
        router: build_app_router(state.clone(), &config),
        media,
        state,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        request(Method::GET, uri, Some(cookie))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn get_bearer(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::GET, uri, None)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(
        app,
        request(method, uri, cookie)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(app: Router, uri: &str, cookie: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, Some(cookie), body).await
}

pub async fn put_json_auth(app: Router, uri: &str, cookie: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, Some(cookie), body).await
}

pub async fn delete_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        request(Method::DELETE, uri, Some(cookie))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// POST a `multipart/form-data` body with one `file` part and text fields.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    cookie: &str,
    filename: &str,
    data: &[u8],
    fields: &[(&str, &str)],
) -> Response<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    send(
        app,
        request(Method::POST, uri, Some(cookie))
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// The `name=value` pair from a response's `Set-Cookie` header.
pub fn session_cookie_pair(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("response must set a cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().trim().to_string()
}

/// Log in as the test administrator and return the `Cookie` header value.
pub async fn login(app: Router) -> String {
    let body = serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    session_cookie_pair(&response)
}

/// Create a record through the admin API and return its id.
pub async fn create_via_api(app: Router, uri: &str, cookie: &str, body: Value) -> i64 {
    let response = post_json_auth(app, uri, cookie, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// The `id` of every element of `json["data"]`.
pub fn data_ids(json: &Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
