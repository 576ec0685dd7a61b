use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// JSON body whose rejections render as 400 in the gateway's error shape.
///
/// An empty body decodes as `T::default()` so that handlers can report the
/// specific missing field.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => GatewayError::PayloadTooLarge,
                _ => GatewayError::BadRequest(e.body_text()),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)
            .map_err(|e| GatewayError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}
