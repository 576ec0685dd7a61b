use tracing::{info, warn};
use url::Url;

use super::backend_api::BackendApi;
use crate::config::PaymentsConfig;
use crate::error::GatewayError;
use crate::types::payments::{PaymentIntent, ProviderErrorEnvelope};

/// Payments provider client. Construction fails without a secret key.
#[derive(Clone)]
pub struct PaymentsClient {
    http: reqwest::Client,
    api_base: Url,
    secret_key: String,
}

impl PaymentsClient {
    pub fn new(config: &PaymentsConfig, http: reqwest::Client) -> Result<Self, GatewayError> {
        let secret_key = config
            .secret_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(GatewayError::PaymentsUnconfigured)?;
        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            secret_key: secret_key.to_string(),
        })
    }

    /// Create a payment intent for `amount` minor units of `currency`.
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        booking_id: Option<&str>,
    ) -> Result<PaymentIntent, GatewayError> {
        let url = BackendApi::endpoint(&self.api_base, &["v1", "payment_intents"])?;
        let amount = amount.to_string();
        let mut form = vec![
            ("amount", amount.as_str()),
            ("currency", currency),
            ("automatic_payment_methods[enabled]", "true"),
        ];
        if let Some(booking_id) = booking_id {
            form.push(("metadata[booking_id]", booking_id));
        }

        let resp = self
            .http
            .post(url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let provider_err = serde_json::from_slice::<ProviderErrorEnvelope>(&body)
                .ok()
                .map(|env| env.error);
            let kind = provider_err.as_ref().and_then(|e| e.kind.clone());
            let message = provider_err
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("payments provider responded with status {status}"));
            warn!(
                status = status.as_u16(),
                kind = kind.as_deref().unwrap_or("-"),
                message = %message,
                "payment intent creation failed"
            );
            return Err(GatewayError::Payments(message));
        }

        let intent: PaymentIntent = serde_json::from_slice(&body)?;
        info!(
            intent_id = %intent.id,
            status = intent.status.as_deref().unwrap_or("-"),
            "payment intent created"
        );
        Ok(intent)
    }
}
