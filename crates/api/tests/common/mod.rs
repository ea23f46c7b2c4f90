#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use dealership_api::config::{ServerConfig, DEFAULT_UPLOAD_MAX_BYTES};
use dealership_api::router::build_app_router;
use dealership_api::state::AppState;
use dealership_api::storage::{ObjectStore, StorageConfig, StorageError};
use dealership_core::geo::Coordinates;
use dealership_notify::{EmailConfig, EmailError, EmailMessage, EmailProvider, Mailer};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_ADMIN_PASSWORD: &str = "showroom-2024";
pub const TEST_SESSION_SECRET: &str = "test-session-secret";
pub const TEST_MERCHANT_EMAIL: &str = "shop@example.com";

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Records every message; fails for messages addressed to `fail_for`.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail_for: Option<String>,
}

impl RecordingMailer {
    pub fn failing_for(recipient: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(recipient.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Wait for a spawned notification to arrive.
    pub async fn wait_for(&self, count: usize) -> Vec<EmailMessage> {
        for _ in 0..50 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if self
            .fail_for
            .as_ref()
            .is_some_and(|r| message.to.contains(r))
        {
            return Err(EmailError::HttpStatus(503));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Keeps uploaded objects in memory.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryObjectStore {
    pub fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(format!("https://cdn.test/{key}"))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        site_url: "http://localhost:3000".to_string(),
        admin_password: TEST_ADMIN_PASSWORD.to_string(),
        session_secret: TEST_SESSION_SECRET.to_string(),
        session_ttl_hours: 168,
        cookie_secure: false,
        merchant_email: TEST_MERCHANT_EMAIL.to_string(),
        email: EmailConfig {
            provider: EmailProvider::None,
            from_address: "noreply@example.com".to_string(),
        },
        storage: StorageConfig::Local {
            dir: std::env::temp_dir().join("dealership-test-uploads"),
        },
        upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        dealership_location: Coordinates::new(48.8566, 2.3522).unwrap(),
        static_dir: None,
    }
}

/// Handles on the test doubles behind an app.
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub store: Arc<MemoryObjectStore>,
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    spawn_app(pool, RecordingMailer::default(), test_config()).router
}

/// Build the app and keep handles on the mailer and object store.
pub fn spawn_app(pool: PgPool, mailer: RecordingMailer, config: ServerConfig) -> TestApp {
    let mailer = Arc::new(mailer);
    let store = Arc::new(MemoryObjectStore::default());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: mailer.clone(),
        object_store: store.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        mailer,
        store,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(cookie))).await
}

pub async fn delete_auth(app: Router, uri: &str, cookie: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(cookie))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, body, Some(cookie))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response {
    send(app, json_request(Method::PUT, uri, body, Some(cookie))).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The raw `Set-Cookie` header, if any.
pub fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// Log in with `password` and return the `name=value` cookie pair.
pub async fn login(app: Router, password: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/admin/login",
        serde_json::json!({ "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).expect("login must set a cookie");
    cookie
        .split(';')
        .next()
        .expect("cookie has a name=value pair")
        .to_string()
}
