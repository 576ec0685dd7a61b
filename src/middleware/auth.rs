use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::error::GatewayError;

/// Bearer token taken from `Authorization: Bearer <token>`.
///
/// The token is not verified here; it is forwarded to the backend, whose
/// row-level policies decide what the caller may see.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| GatewayError::Unauthorized)?;

        let token = bearer.token().trim();
        if token.is_empty() {
            return Err(GatewayError::Unauthorized);
        }
        Ok(Self(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<BearerToken, GatewayError> {
        let mut builder = Request::builder().uri("/api/licenses");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        BearerToken::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_bearer_scheme() {
        let token = extract(Some("Bearer abc.def")).await.unwrap();
        assert_eq!(token.as_str(), "abc.def");
    }

    #[tokio::test]
    async fn rejects_missing_or_foreign_schemes() {
        assert!(matches!(extract(None).await, Err(GatewayError::Unauthorized)));
        assert!(matches!(
            extract(Some("Basic dXNlcjpwdw==")).await,
            Err(GatewayError::Unauthorized)
        ));
    }
}
