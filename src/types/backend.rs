use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Postgres `undefined_table`, and the REST layer's "not in schema cache" code.
const MISSING_TABLE_CODES: &[&str] = &["42P01", "PGRST205"];

/// Error payload returned by the backend's REST, RPC and auth endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: Option<String>,
    #[serde(default, alias = "msg", alias = "error_description")]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl BackendError {
    /// Decode an error body; falls back to the HTTP status when the body says nothing useful.
    pub fn from_body(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let mut err = serde_json::from_slice::<BackendError>(body).unwrap_or_default();
        if err.message.is_empty() {
            err.message = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("backend responded with status {}", status.as_u16()));
        }
        if err.code.is_none() {
            err.code = Some(status.as_u16().to_string());
        }
        err
    }

    pub fn is_missing_table(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| MISSING_TABLE_CODES.contains(&code))
    }
}

/// Auth endpoints report numeric codes, REST endpoints report SQLSTATE strings.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn decodes_rest_error_payload() {
        let body = br#"{"code":"42P01","message":"relation \"public.vehicles\" does not exist","details":null,"hint":null}"#;
        let err = BackendError::from_body(StatusCode::NOT_FOUND, body);
        assert!(err.is_missing_table());
        assert_eq!(err.message, "relation \"public.vehicles\" does not exist");
    }

    #[test]
    fn auth_errors_use_msg_field() {
        let body = br#"{"code":400,"msg":"User not allowed"}"#;
        let err = BackendError::from_body(StatusCode::FORBIDDEN, body);
        assert_eq!(err.message, "User not allowed");
        assert_eq!(err.code.as_deref(), Some("400"));

        let body = br#"{"msg":"User not allowed"}"#;
        let err = BackendError::from_body(StatusCode::FORBIDDEN, body);
        assert_eq!(err.message, "User not allowed");
        assert_eq!(err.code.as_deref(), Some("403"));
        assert!(!err.is_missing_table());
    }

    #[test]
    fn empty_body_falls_back_to_status_text() {
        let err = BackendError::from_body(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(err.message, "Bad Gateway");
        assert_eq!(err.code.as_deref(), Some("502"));
    }

    #[test]
    fn schema_cache_code_counts_as_missing_table() {
        let err = BackendError {
            code: Some("PGRST205".into()),
            ..Default::default()
        };
        assert!(err.is_missing_table());
    }
}
