use axum::{Json, extract::State};

use crate::api::BackendClient;
use crate::error::GatewayError;
use crate::middleware::JsonBody;
use crate::router::GatewayState;
use crate::service::user_deletion;
use crate::types::non_blank;
use crate::types::users::{DeleteUserBody, MessageResponse};

/// POST /api/admin/delete-user {userId}
pub async fn delete_user(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody<DeleteUserBody>,
) -> Result<Json<MessageResponse>, GatewayError> {
    let Some(user_id) = non_blank(body.user_id.as_deref()) else {
        return Err(GatewayError::BadRequest("User ID is required".to_string()));
    };
    let client = BackendClient::service_role(&state)?;

    user_deletion::delete_user(&client, user_id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
