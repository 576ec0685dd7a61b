use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/admin/delete-user`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserBody {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Result of the admin session bootstrap.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBootstrap {
    pub profile: Value,
    pub admin_granted: bool,
}
