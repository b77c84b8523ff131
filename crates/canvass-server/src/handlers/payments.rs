//! Payment endpoints. Recording a payment promotes the payer to
//! pro-user.

use axum::Json;
use axum::extract::State;
use canvass_core::models::payment::{CreatePayment, Payment};
use canvass_core::promotion::{PromotionEvent, apply_promotion};
use canvass_core::repository::{InsertOutcome, PaymentRepository, UpdateOutcome};
use serde::Serialize;
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecorded {
    pub result: InsertOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_user_role: Option<UpdateOutcome>,
}

/// Append the payment, then promote the payer. Steps are not
/// transactional; a committed append stays committed even if the
/// promotion fails.
pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    Json(input): Json<CreatePayment>,
) -> Result<Json<PaymentRecorded>, ApiError> {
    let payer = input.payer_email.clone();
    let result = state.payments().append(input).await?;

    let update_user_role =
        apply_promotion(&state.users(), &payer, PromotionEvent::PaymentCompleted).await?;

    Ok(Json(PaymentRecorded {
        result,
        update_user_role,
    }))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    Ok(Json(state.payments().list().await?))
}
