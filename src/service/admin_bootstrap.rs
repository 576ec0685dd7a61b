use serde_json::{Value, json};
use tracing::info;

use crate::api::BackendClient;
use crate::error::GatewayError;
use crate::types::users::SessionBootstrap;

pub const ENSURE_PROFILE_RPC: &str = "ensure_user_profile";
pub const GRANT_ADMIN_RPC: &str = "grant_admin_if_primary";

/// Make sure the caller has a profile row, then let the backend promote the
/// caller to admin when their email matches the configured bootstrap address.
pub async fn bootstrap_session(
    client: &BackendClient,
    bootstrap_email: Option<&str>,
) -> Result<SessionBootstrap, GatewayError> {
    let profile = client.rpc(ENSURE_PROFILE_RPC, &json!({})).await?;

    let Some(email) = bootstrap_email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(SessionBootstrap {
            profile,
            admin_granted: false,
        });
    };

    let granted = client
        .rpc(GRANT_ADMIN_RPC, &json!({ "p_admin_email": email }))
        .await?;
    let admin_granted = matches!(granted, Value::Bool(true));
    if !admin_granted {
        return Ok(SessionBootstrap {
            profile,
            admin_granted,
        });
    }

    info!("bootstrap admin role granted");
    // the row read before the grant still carries the old role
    let profile = client.rpc(ENSURE_PROFILE_RPC, &json!({})).await?;
    Ok(SessionBootstrap {
        profile,
        admin_granted,
    })
}
