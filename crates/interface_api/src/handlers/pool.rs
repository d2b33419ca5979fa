//! Pool handlers

use axum::{extract::State, Extension, Json};
use validator::Validate;

use core_kernel::Money;

use crate::auth::Caller;
use crate::dto::pool::*;
use crate::{error::ApiError, AppState};

/// Deposits funds into the payout pool
pub async fn deposit(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<PoolResponse>, ApiError> {
    request.validate()?;
    let currency = state.network.config().currency;

    let balance = state
        .network
        .fund_pool(caller, Money::new(request.amount, currency))
        .await?;

    Ok(Json(pool_response(&state, balance)))
}

/// Gets the pool balance
pub async fn get_pool(State(state): State<AppState>) -> Json<PoolResponse> {
    let balance = state.network.pool_balance().await;
    Json(pool_response(&state, balance))
}

fn pool_response(state: &AppState, balance: Money) -> PoolResponse {
    PoolResponse {
        balance: balance.amount(),
        currency: balance.currency(),
        unit: state.network.config().unit,
    }
}
