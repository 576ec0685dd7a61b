use axum::body::Bytes;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::GatewayError;
use crate::types::BackendError;

/// Stateless wire helpers for the backend's REST, RPC and auth endpoints.
pub struct BackendApi;

impl BackendApi {
    /// Append path segments to the project URL, percent-encoding each one.
    pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a prepared request and return the raw body of a 2xx response.
    /// Non-2xx responses become [`GatewayError::Backend`].
    pub async fn send(request: reqwest::RequestBuilder) -> Result<Bytes, GatewayError> {
        let resp = request.send().await?;
        let status = resp.status();
        let url = resp.url().path().to_string();
        let body = resp.bytes().await?;

        if status.is_success() {
            debug!(path = %url, status = status.as_u16(), "backend call succeeded");
            return Ok(body);
        }

        let err = BackendError::from_body(status, &body);
        warn!(
            path = %url,
            status = status.as_u16(),
            code = err.code.as_deref().unwrap_or("-"),
            message = %err.message,
            "backend call failed"
        );
        Err(GatewayError::Backend(err))
    }

    /// Decode a JSON body; an empty body (void procedures) is `null`.
    pub fn json_or_null(body: &[u8]) -> Result<Value, GatewayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments_to_project_url() {
        let base = Url::parse("https://project.example.co").unwrap();
        let url =
            BackendApi::endpoint(&base, &["rest", "v1", "rpc", "list_driver_licenses"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://project.example.co/rest/v1/rpc/list_driver_licenses"
        );

        let base = Url::parse("http://127.0.0.1:54321/").unwrap();
        let url =
            BackendApi::endpoint(&base, &["auth", "v1", "admin", "users", "a/b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:54321/auth/v1/admin/users/a%2Fb"
        );
    }

    #[test]
    fn empty_body_decodes_to_null() {
        assert_eq!(BackendApi::json_or_null(b"").unwrap(), Value::Null);
        assert_eq!(BackendApi::json_or_null(b"[1]").unwrap(), serde_json::json!([1]));
        assert!(BackendApi::json_or_null(b"{oops").is_err());
    }
}
