// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::Query,
    http::{header, Method, Request, StatusCode},
    routing::get as get_route,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use folio_server::{
    config::DeploymentMode,
    metadata::{LocalResolver, MetadataResolver, RemoteResolver},
    models::ResumeConfig,
    state::AppState,
};

pub const TEST_API_KEY: &str = "test-key";

/// Local resolver with the simulated delay switched off.
pub fn local_resolver() -> Arc<LocalResolver> {
    Arc::new(LocalResolver::with_delay(Duration::ZERO))
}

pub fn test_state(resolver: Arc<dyn MetadataResolver>) -> AppState {
    AppState {
        resolver,
        mode: DeploymentMode::Development,
        resume: None,
    }
}

pub fn create_test_app(state: AppState) -> Router {
    folio_server::router(state)
}

pub fn resume_from_json(raw: &str) -> Arc<ResumeConfig> {
    Arc::new(ResumeConfig::from_json(raw).expect("test resume config should be valid"))
}

// ── Request helpers ────────────────────────────────────────────────────────

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

// ── Mock link preview API ──────────────────────────────────────────────────

/// A stand-in for the link preview API on an ephemeral local port.
pub struct MockApi {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl MockApi {
    /// Serve `body` with `status` for every request to `/`.
    pub async fn spawn(status: StatusCode, body: &'static str) -> MockApi {
        let hits = Arc::new(AtomicUsize::new(0));
        let last_query = Arc::new(Mutex::new(None));

        let handler_hits = hits.clone();
        let handler_query = last_query.clone();
        let app = Router::new().route(
            "/",
            get_route(move |Query(params): Query<HashMap<String, String>>| {
                let hits = handler_hits.clone();
                let last_query = handler_query.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    *last_query.lock().unwrap() = Some(params);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockApi {
            base_url: format!("http://{addr}"),
            hits,
            last_query,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.last_query.lock().unwrap().clone()
    }

    /// Remote resolver pointed at this mock, plus the local fallback it wraps.
    pub fn resolver(&self, api_key: Option<&str>) -> (RemoteResolver, Arc<LocalResolver>) {
        let local = local_resolver();
        let remote = RemoteResolver::new(
            reqwest::Client::new(),
            self.base_url.clone(),
            api_key.map(str::to_string),
            local.clone(),
        );
        (remote, local)
    }
}
