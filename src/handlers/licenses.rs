use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::Value;
use tracing::info;

use crate::api::BackendClient;
use crate::error::GatewayError;
use crate::middleware::{BearerToken, JsonBody};
use crate::router::GatewayState;
use crate::types::license::{LicenseActionBody, LicenseDecision, LicenseListQuery};

pub const LIST_LICENSES_RPC: &str = "list_driver_licenses";
pub const UPDATE_LICENSE_RPC: &str = "update_driver_license_status";

/// GET /api/licenses?status=&q= -> rows from `list_driver_licenses`, as the caller sees them.
pub async fn list_licenses(
    State(state): State<GatewayState>,
    token: BearerToken,
    query: Result<Query<LicenseListQuery>, QueryRejection>,
) -> Result<Json<Value>, GatewayError> {
    let Query(query) = query.map_err(|e| GatewayError::BadRequest(e.body_text()))?;
    let client = BackendClient::for_user(&state, token.as_str())?;

    let rows = client.rpc(LIST_LICENSES_RPC, &query.rpc_params()).await?;
    Ok(Json(rows))
}

/// POST /api/license-action {userId, action, reason?}
pub async fn license_action(
    State(state): State<GatewayState>,
    token: BearerToken,
    JsonBody(body): JsonBody<LicenseActionBody>,
) -> Result<Json<Value>, GatewayError> {
    let decision = LicenseDecision::try_from(body)?;
    let client = BackendClient::for_user(&state, token.as_str())?;

    let result = client
        .rpc(UPDATE_LICENSE_RPC, &decision.rpc_params())
        .await?;
    info!(
        user_id = %decision.user_id,
        status = decision.action.target_status().as_str(),
        "driver license status updated"
    );
    Ok(Json(result))
}
