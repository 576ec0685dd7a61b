use axum::{Json, extract::State};

use crate::api::PaymentsClient;
use crate::error::GatewayError;
use crate::middleware::JsonBody;
use crate::router::GatewayState;
use crate::types::non_blank;
use crate::types::payments::{CreateIntentBody, CreateIntentResponse};

/// POST /api/payments/intent {amount, currency?, bookingId?}
pub async fn create_intent(
    State(state): State<GatewayState>,
    JsonBody(body): JsonBody<CreateIntentBody>,
) -> Result<Json<CreateIntentResponse>, GatewayError> {
    let amount = match body.amount {
        Some(amount) if amount > 0 => amount,
        _ => {
            return Err(GatewayError::BadRequest(
                "amount must be a positive integer in minor units".to_string(),
            ));
        }
    };
    let payments = &state.config.payments;
    let currency = non_blank(body.currency.as_deref())
        .unwrap_or(payments.currency.as_str())
        .to_ascii_lowercase();

    let client = PaymentsClient::new(payments, state.http.clone())?;
    let intent = client
        .create_payment_intent(amount, &currency, non_blank(body.booking_id.as_deref()))
        .await?;
    Ok(Json(intent.into()))
}
