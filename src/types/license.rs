use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::non_blank;
use crate::error::GatewayError;

/// Review state of a driver license as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Pending,
    Verified,
    Rejected,
}

impl LicenseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

/// Reviewer decision submitted from the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseAction {
    Approve,
    Reject,
}

impl LicenseAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    pub fn target_status(self) -> LicenseStatus {
        match self {
            Self::Approve => LicenseStatus::Verified,
            Self::Reject => LicenseStatus::Rejected,
        }
    }
}

/// Query string of `GET /api/licenses`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicenseListQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}

impl LicenseListQuery {
    /// Parameters for `list_driver_licenses`; blank values become `null`.
    pub fn rpc_params(&self) -> Value {
        json!({
            "p_status": non_blank(self.status.as_deref()),
            "p_search": non_blank(self.q.as_deref()),
        })
    }
}

/// Body of `POST /api/license-action`. Every field is optional so that
/// missing fields surface as a 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseActionBody {
    pub user_id: Option<String>,
    pub action: Option<String>,
    pub reason: Option<String>,
}

/// A validated license decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseDecision {
    pub user_id: String,
    pub action: LicenseAction,
    pub reason: Option<String>,
}

impl LicenseDecision {
    /// Parameters for `update_driver_license_status`.
    pub fn rpc_params(&self) -> Value {
        json!({
            "p_user_id": self.user_id,
            "p_status": self.action.target_status().as_str(),
            "p_reason": self.reason,
        })
    }
}

impl TryFrom<LicenseActionBody> for LicenseDecision {
    type Error = GatewayError;

    fn try_from(body: LicenseActionBody) -> Result<Self, Self::Error> {
        let (Some(user_id), Some(action)) = (
            non_blank(body.user_id.as_deref()),
            non_blank(body.action.as_deref()),
        ) else {
            return Err(GatewayError::BadRequest(
                "Missing userId or action".to_string(),
            ));
        };
        let action = LicenseAction::parse(action).ok_or_else(|| {
            GatewayError::BadRequest(format!(
                "Invalid action '{action}'; expected 'approve' or 'reject'"
            ))
        })?;
        Ok(Self {
            user_id: user_id.to_string(),
            action,
            reason: non_blank(body.reason.as_deref()).map(str::to_string),
        })
    }
}
