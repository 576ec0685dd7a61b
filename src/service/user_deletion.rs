use std::fmt;
use tracing::{info, warn};

use crate::api::BackendClient;
use crate::error::GatewayError;

/// Steps of an account deletion, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStep {
    Bookings,
    Reviews,
    Profile,
    AuthAccount,
}

impl DeletionStep {
    pub const ORDER: [DeletionStep; 4] = [
        DeletionStep::Bookings,
        DeletionStep::Reviews,
        DeletionStep::Profile,
        DeletionStep::AuthAccount,
    ];

    /// A failed critical step aborts the deletion; others are logged and skipped.
    pub fn is_critical(self) -> bool {
        matches!(self, DeletionStep::Profile | DeletionStep::AuthAccount)
    }

    async fn run(self, client: &BackendClient, user_id: &str) -> Result<(), GatewayError> {
        match self {
            DeletionStep::Bookings => client.delete_where("bookings", "user_id", user_id).await,
            DeletionStep::Reviews => client.delete_where("reviews", "user_id", user_id).await,
            DeletionStep::Profile => client.delete_where("users", "id", user_id).await,
            DeletionStep::AuthAccount => client.delete_auth_user(user_id).await,
        }
    }

    /// What the step removes, as named in failure messages and logs.
    fn subject(self) -> &'static str {
        match self {
            DeletionStep::Bookings => "user bookings",
            DeletionStep::Reviews => "user reviews",
            DeletionStep::Profile => "user profile",
            DeletionStep::AuthAccount => "auth user",
        }
    }

    fn failure_message(self, err: &GatewayError) -> String {
        format!("Failed to delete {}: {err}", self.subject())
    }
}

impl fmt::Display for DeletionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeletionStep::Bookings => "bookings",
            DeletionStep::Reviews => "reviews",
            DeletionStep::Profile => "profile",
            DeletionStep::AuthAccount => "auth_account",
        };
        f.write_str(name)
    }
}

/// Delete a user's bookings, reviews, profile row and auth account, in that order.
///
/// Nothing is rolled back: a critical failure leaves earlier steps applied.
pub async fn delete_user(client: &BackendClient, user_id: &str) -> Result<(), GatewayError> {
    let mut skipped = Vec::new();

    for step in DeletionStep::ORDER {
        match step.run(client, user_id).await {
            Ok(()) => info!(%user_id, %step, "deletion step completed"),
            Err(e) if step.is_critical() => {
                warn!(%user_id, %step, error = %e, "deletion aborted");
                return Err(GatewayError::StepFailed(step.failure_message(&e)));
            }
            Err(e) => {
                warn!(
                    %user_id,
                    %step,
                    error = %step.failure_message(&e),
                    "deletion step failed; continuing"
                );
                skipped.push(step.subject());
            }
        }
    }

    if skipped.is_empty() {
        info!(%user_id, "user deleted");
    } else {
        warn!(%user_id, skipped = ?skipped, "user deleted with leftover rows");
    }
    Ok(())
}
