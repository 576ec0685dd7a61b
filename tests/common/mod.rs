#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, Bytes, to_bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use carshare_gateway::{GatewayState, config::Config, gateway_router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

pub const ANON_KEY: &str = "anon-key";
pub const SERVICE_KEY: &str = "service-key";

/// A request received by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub apikey: Option<String>,
    pub raw_body: String,
    pub body: Value,
}

type Responder = Arc<dyn Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct FakeState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
}

/// HTTP server standing in for the backend or the payments provider.
pub struct FakeUpstream {
    pub url: Url,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeUpstream {
    pub async fn spawn<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake upstream");
        let addr = listener.local_addr().expect("listener has no address");
        let calls = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(record).with_state(FakeState {
            calls: calls.clone(),
            responder: Arc::new(responder),
        });
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("fake upstream crashed");
        });
        Self {
            url: Url::parse(&format!("http://{addr}")).expect("bad fake upstream url"),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

async fn record(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let call = RecordedCall {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        apikey: header("apikey"),
        raw_body: String::from_utf8_lossy(&body).into_owned(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    let (status, value) = (state.responder)(&call);
    state.calls.lock().expect("calls lock poisoned").push(call);
    (status, Json(value)).into_response()
}

pub fn live_config(backend: &FakeUpstream) -> Config {
    let mut cfg = Config::default();
    cfg.backend.url = Some(backend.url.clone());
    cfg.backend.anon_key = Some(ANON_KEY.to_string());
    cfg.backend.service_role_key = Some(SERVICE_KEY.to_string());
    cfg.backend.timeout_secs = 5;
    cfg
}

/// Live config pointing at a local port nothing listens on.
pub async fn unreachable_config() -> Config {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to reserve a local port");
    let addr = listener.local_addr().expect("listener has no address");
    drop(listener);

    let mut cfg = Config::default();
    cfg.backend.url = Some(Url::parse(&format!("http://{addr}")).expect("bad closed-port url"));
    cfg.backend.anon_key = Some(ANON_KEY.to_string());
    cfg.backend.service_role_key = Some(SERVICE_KEY.to_string());
    cfg.backend.timeout_secs = 5;
    cfg
}

pub fn app(cfg: Config) -> Router {
    gateway_router(GatewayState::new(cfg).expect("failed to build gateway state"))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, headers, body)
}

pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, req).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}
