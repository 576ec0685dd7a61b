use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
};
use std::{future::Ready, sync::Arc, time::Duration};

use crate::config::Config;
use crate::error::GatewayError;
use crate::handlers::{health, licenses, payments, placeholder, session, users, vehicles};

/// JSON bodies accepted by the gateway are a handful of ids and strings.
const BODY_LIMIT: usize = 64 * 1024;

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct GatewayState {
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl GatewayState {
    pub fn new(config: Config) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("carshare-gateway/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.backend.timeout())
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }
}

/// Answer any method other than `allowed` with a 405.
fn method_not_allowed(
    allowed: Method,
) -> impl FnOnce() -> Ready<GatewayError> + Clone + Send + Sync + 'static {
    move || std::future::ready(GatewayError::MethodNotAllowed { allowed })
}

fn admin_routes() -> Router<GatewayState> {
    Router::new()
        .route(
            "/api/licenses",
            get(licenses::list_licenses).fallback(method_not_allowed(Method::GET)),
        )
        .route(
            "/api/license-action",
            post(licenses::license_action).fallback(method_not_allowed(Method::POST)),
        )
        .route(
            "/api/vehicles",
            get(vehicles::list_vehicles).fallback(method_not_allowed(Method::GET)),
        )
        .route(
            "/api/session",
            post(session::bootstrap_session).fallback(method_not_allowed(Method::POST)),
        )
}

fn web_routes() -> Router<GatewayState> {
    Router::new()
        .route(
            "/api/admin/delete-user",
            post(users::delete_user).fallback(method_not_allowed(Method::POST)),
        )
        .route(
            "/api/payments/intent",
            post(payments::create_intent).fallback(method_not_allowed(Method::POST)),
        )
        .route(
            "/api/placeholder",
            get(placeholder::placeholder_default).fallback(method_not_allowed(Method::GET)),
        )
        .route(
            "/api/placeholder/",
            get(placeholder::placeholder_default).fallback(method_not_allowed(Method::GET)),
        )
        .route(
            "/api/placeholder/{*size}",
            get(placeholder::placeholder).fallback(method_not_allowed(Method::GET)),
        )
}

pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .merge(admin_routes())
        .merge(web_routes())
        .route(
            "/api/health",
            get(health::health).fallback(method_not_allowed(Method::GET)),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}
