//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{ClaimId, Identity, PolicyKind};

use crate::auth::Caller;
use crate::dto::claims::*;
use crate::handlers::parse_path;
use crate::{error::ApiError, AppState};

/// Files a third-party claim; it is assessed before the response is sent
pub async fn submit_third_party(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<ThirdPartyClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    request.validate()?;
    submit(&state, caller, PolicyKind::ThirdParty, request.percentage).await
}

/// Files an all-risk claim; it is assessed before the response is sent
pub async fn submit_all_risk(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<AllRiskClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    request.validate()?;
    submit(&state, caller, PolicyKind::AllRisk, request.damage).await
}

async fn submit(
    state: &AppState,
    caller: Identity,
    policy_kind: PolicyKind,
    percentage_or_damage: u32,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim_id = state
        .network
        .submit_claim(caller, policy_kind, percentage_or_damage)
        .await?;
    let claim = state.network.claim(claim_id).await?;

    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Gets a claim's live payout snapshot
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PayoutInfoResponse>, ApiError> {
    let claim_id: ClaimId = parse_path(&id)?;
    let info = state.network.claim_payout_info(claim_id).await?;

    Ok(Json(PayoutInfoResponse::new(claim_id, info)))
}

/// Pays an approved third-party claim to its claimant
pub async fn pay_third_party(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<PayoutResponse>, ApiError> {
    let claim_id: ClaimId = parse_path(&id)?;
    state.network.pay_to_third(caller, claim_id).await?;

    payout_response(&state, claim_id).await
}

/// Pays an authorized all-risk claim to the repairing garage
pub async fn pay_garage(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
    Json(request): Json<PayGarageRequest>,
) -> Result<Json<PayoutResponse>, ApiError> {
    request.validate()?;
    let claim_id: ClaimId = parse_path(&id)?;
    state
        .network
        .pay_to_garage(caller, claim_id, request.garage_recipient)
        .await?;

    payout_response(&state, claim_id).await
}

async fn payout_response(state: &AppState, claim_id: ClaimId) -> Result<Json<PayoutResponse>, ApiError> {
    let info = state.network.claim_payout_info(claim_id).await?;
    let pool_balance = state.network.pool_balance().await;

    Ok(Json(PayoutResponse {
        claim_id,
        status: info.status,
        pool_balance: pool_balance.amount(),
    }))
}
