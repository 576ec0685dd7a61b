use axum::{Json, extract::State};
use serde_json::Value;
use tracing::warn;

use crate::api::BackendClient;
use crate::error::GatewayError;
use crate::router::GatewayState;

const VEHICLE_LIMIT: usize = 100;

/// GET /api/vehicles -> up to 100 rows; an absent table reads as an empty fleet.
pub async fn list_vehicles(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Value>>, GatewayError> {
    let client = BackendClient::service_role(&state)?;

    match client.select("vehicles", VEHICLE_LIMIT).await {
        Ok(rows) => Ok(Json(rows)),
        Err(GatewayError::Backend(err)) if err.is_missing_table() => {
            warn!(
                code = err.code.as_deref().unwrap_or("-"),
                "vehicles table is missing; returning empty list"
            );
            Ok(Json(Vec::new()))
        }
        Err(e) => Err(e),
    }
}
