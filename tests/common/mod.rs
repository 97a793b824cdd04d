#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use contact_intake::services::{
    EmailNotification, MemoryNotifier, MemoryStore, Notifier, NotifyError, Ports, StoreError,
    SubmissionStore,
};
use contact_intake::types::SubmissionRecord;
use contact_intake::{app, AppConfig, AppState};

pub const OPERATOR: &str = "owner@example.com";

pub fn valid_payload() -> Value {
    serde_json::json!({
        "name": "John Doe",
        "email": "john.doe@example.com",
        "message": "This is a test message that is long enough to pass validation."
    })
}

/// Router wired to in-memory ports, plus handles to inspect them
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<MemoryNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::development(OPERATOR))
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(MemoryNotifier::new());
        let ports = Ports {
            store: store.clone(),
            notifier: notifier.clone(),
        };
        let router = build_router(&config, ports);
        Self {
            router,
            store,
            notifier,
        }
    }
}

pub fn build_router(config: &AppConfig, ports: Ports) -> Router {
    let state = AppState::new(config, ports).expect("valid test state");
    app(state, config.api.max_body_bytes)
}

/// Router whose ports are the given doubles
pub fn router_with(
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn Notifier>,
) -> Router {
    build_router(
        &AppConfig::development(OPERATOR),
        Ports { store, notifier },
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error(&self) -> String {
        self.body["error"].as_str().unwrap_or_default().to_string()
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn post(path: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("valid request")
}

pub fn post_json(path: &str, payload: &Value) -> Request<Body> {
    post(path, serde_json::to_vec(payload).expect("serializable payload"))
}

pub fn request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("valid request")
}

pub struct FailingStore;

#[async_trait]
impl SubmissionStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn save(&self, _record: SubmissionRecord) -> Result<(), StoreError> {
        Err(StoreError::Backend("ProvisionedThroughputExceededException".to_string()))
    }
}

pub struct PanickingStore;

#[async_trait]
impl SubmissionStore for PanickingStore {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn save(&self, _record: SubmissionRecord) -> Result<(), StoreError> {
        panic!("store client exploded")
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _notification: &EmailNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected("Email address is not verified".to_string()))
    }
}

/// Serve `router` on a free local port; returns the base URL
pub async fn spawn_server(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("server");
    });

    Ok(format!("http://{}", addr))
}
