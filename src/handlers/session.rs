use axum::{Json, extract::State};

use crate::api::BackendClient;
use crate::error::GatewayError;
use crate::middleware::BearerToken;
use crate::router::GatewayState;
use crate::service::admin_bootstrap;
use crate::types::users::SessionBootstrap;

/// POST /api/session -> ensure the caller's profile exists and apply the admin bootstrap.
pub async fn bootstrap_session(
    State(state): State<GatewayState>,
    token: BearerToken,
) -> Result<Json<SessionBootstrap>, GatewayError> {
    let client = BackendClient::for_user(&state, token.as_str())?;
    let bootstrap_email = state.config.admin.bootstrap_email.as_deref();

    let session = admin_bootstrap::bootstrap_session(&client, bootstrap_email).await?;
    Ok(Json(session))
}
