use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;
use url::Url;

use super::backend_api::BackendApi;
use crate::error::GatewayError;
use crate::router::GatewayState;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");
const PREFER_HEADER: HeaderName = HeaderName::from_static("prefer");
const PREFER_MINIMAL: HeaderValue = HeaderValue::from_static("return=minimal");

/// Privilege level a [`BackendClient`] was minted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendScope {
    /// Caller's own token; row-level policies apply.
    User,
    /// Service key; bypasses row-level policies.
    ServiceRole,
}

impl fmt::Display for BackendScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendScope::User => f.write_str("user"),
            BackendScope::ServiceRole => f.write_str("service_role"),
        }
    }
}

/// Per-request backend client sharing the state's connection pool.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
    api_key: String,
    bearer: String,
    scope: BackendScope,
}

impl fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendClient")
            .field("base", &self.base.as_str())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    /// Client acting as the caller identified by `token`.
    pub fn for_user(state: &GatewayState, token: &str) -> Result<Self, GatewayError> {
        let backend = &state.config.backend;
        let (Some(base), Some(anon_key)) = (backend.url.as_ref(), backend.anon_key.as_ref())
        else {
            return Err(GatewayError::BackendUnconfigured);
        };
        Ok(Self {
            http: state.http.clone(),
            base: base.clone(),
            api_key: anon_key.clone(),
            bearer: token.to_string(),
            scope: BackendScope::User,
        })
    }

    /// Client with elevated privileges, for server-side maintenance routes.
    pub fn service_role(state: &GatewayState) -> Result<Self, GatewayError> {
        let backend = &state.config.backend;
        let (Some(base), Some(service_key)) =
            (backend.url.as_ref(), backend.service_role_key.as_ref())
        else {
            return Err(GatewayError::BackendUnconfigured);
        };
        Ok(Self {
            http: state.http.clone(),
            base: base.clone(),
            api_key: service_key.clone(),
            bearer: service_key.clone(),
            scope: BackendScope::ServiceRole,
        })
    }

    pub fn scope(&self) -> BackendScope {
        self.scope
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .bearer_auth(&self.bearer)
    }

    /// Invoke a named remote procedure.
    pub async fn rpc<P>(&self, name: &str, params: &P) -> Result<Value, GatewayError>
    where
        P: Serialize + ?Sized,
    {
        let url = BackendApi::endpoint(&self.base, &["rest", "v1", "rpc", name])?;
        debug!(procedure = name, scope = %self.scope, "calling remote procedure");
        let body = BackendApi::send(self.request(reqwest::Method::POST, url).json(params)).await?;
        BackendApi::json_or_null(&body)
    }

    /// `select *` from `table`, capped at `limit` rows.
    pub async fn select(&self, table: &str, limit: usize) -> Result<Vec<Value>, GatewayError> {
        let mut url = BackendApi::endpoint(&self.base, &["rest", "v1", table])?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("limit", &limit.to_string());
        let body = BackendApi::send(self.request(reqwest::Method::GET, url)).await?;
        match BackendApi::json_or_null(&body)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }

    /// Delete every row of `table` whose `column` equals `value`.
    pub async fn delete_where(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<(), GatewayError> {
        let mut url = BackendApi::endpoint(&self.base, &["rest", "v1", table])?;
        url.query_pairs_mut()
            .append_pair(column, &format!("eq.{value}"));
        let req = self
            .request(reqwest::Method::DELETE, url)
            .header(PREFER_HEADER, PREFER_MINIMAL);
        BackendApi::send(req).await?;
        Ok(())
    }

    /// Remove an account from the auth provider. Needs the service role.
    pub async fn delete_auth_user(&self, user_id: &str) -> Result<(), GatewayError> {
        let url = BackendApi::endpoint(&self.base, &["auth", "v1", "admin", "users", user_id])?;
        BackendApi::send(self.request(reqwest::Method::DELETE, url)).await?;
        Ok(())
    }
}
