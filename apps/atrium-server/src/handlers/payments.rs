//! Payment-order handler. Amounts are in the smallest currency unit.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use atrium_payments::PaymentOrder;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub amount: Option<i64>,
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<PaymentOrder>, ApiError> {
    let amount = req
        .amount
        .ok_or_else(|| ApiError::BadRequest("amount is required".into()))?;
    if amount <= 0 {
        return Err(ApiError::BadRequest("amount must be positive".into()));
    }

    let order = state
        .payments
        .create_order(amount)
        .await
        .map_err(ApiError::upstream)?;

    Ok(Json(order))
}
