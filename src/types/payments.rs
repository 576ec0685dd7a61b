use serde::{Deserialize, Serialize};

/// Body of `POST /api/payments/intent`. Amount is in minor currency units.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentBody {
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub booking_id: Option<String>,
}

/// Subset of the provider's payment intent object that callers need.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub id: String,
    pub client_secret: Option<String>,
}

impl From<PaymentIntent> for CreateIntentResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            id: intent.id,
            client_secret: intent.client_secret,
        }
    }
}

/// Provider error envelope: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
pub struct ProviderErrorEnvelope {
    pub error: ProviderError,
}

#[derive(Debug, Deserialize)]
pub struct ProviderError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
