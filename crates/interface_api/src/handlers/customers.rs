//! Customer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::Identity;

use crate::auth::Caller;
use crate::dto::customers::*;
use crate::handlers::parse_path;
use crate::{error::ApiError, AppState};

/// Onboards or re-registers a customer
pub async fn add_customer(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<AddCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    request.validate()?;

    state
        .network
        .add_customer(caller, request.identity, &request.name, request.policy_kind)
        .await?;
    let customer = state.network.customer(request.identity).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Revokes a customer's right to submit claims
pub async fn deactivate_customer(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(identity): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let identity: Identity = parse_path(&identity)?;

    state.network.deactivate_customer(caller, identity).await?;
    let customer = state.network.customer(identity).await?;

    Ok(Json(customer.into()))
}

/// Gets a customer by identity
pub async fn get_customer(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let identity: Identity = parse_path(&identity)?;
    let customer = state.network.customer(identity).await?;

    Ok(Json(customer.into()))
}
