use axum::{
    Json,
    http::{Method, StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error as ThisError;

use crate::types::BackendError;

#[derive(Debug, ThisError)]
pub enum GatewayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Missing or invalid authorization token")]
    Unauthorized,

    #[error("Method not allowed; expected {allowed}")]
    MethodNotAllowed { allowed: Method },

    #[error("Backend is not configured")]
    BackendUnconfigured,

    #[error("{0}")]
    Backend(BackendError),

    /// A workflow step failed; the message names the step.
    #[error("{0}")]
    StepFailed(String),

    #[error("Payments provider is not configured")]
    PaymentsUnconfigured,

    #[error("{0}")]
    Payments(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<BackendError> for GatewayError {
    fn from(e: BackendError) -> Self {
        GatewayError::Backend(e)
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Reqwest(_)
            | GatewayError::Json(_)
            | GatewayError::BackendUnconfigured
            | GatewayError::Backend(_)
            | GatewayError::StepFailed(_)
            | GatewayError::PaymentsUnconfigured
            | GatewayError::Payments(_)
            | GatewayError::UrlParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) => "BAD_REQUEST",
            GatewayError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            GatewayError::Unauthorized => "UNAUTHORIZED",
            GatewayError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            GatewayError::BackendUnconfigured => "BACKEND_UNCONFIGURED",
            GatewayError::Backend(_) => "BACKEND_ERROR",
            GatewayError::StepFailed(_) => "STEP_FAILED",
            GatewayError::PaymentsUnconfigured => "PAYMENTS_UNCONFIGURED",
            GatewayError::Payments(_) => "PAYMENTS_ERROR",
            GatewayError::Reqwest(_) | GatewayError::Json(_) => "UPSTREAM_UNAVAILABLE",
            GatewayError::UrlParse(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            GatewayError::Reqwest(_) | GatewayError::Json(_) => {
                "Upstream service is unavailable.".to_string()
            }
            GatewayError::UrlParse(_) => "An internal server error occurred.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        }
        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: self.code().to_string(),
                message: self.public_message(),
            },
        };
        match self {
            GatewayError::MethodNotAllowed { allowed } => (
                status,
                [(header::ALLOW, allowed.as_str().to_string())],
                Json(body),
            )
                .into_response(),
            _ => (status, Json(body)).into_response(),
        }
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
