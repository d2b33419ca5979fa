//! Repair order handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use core_kernel::RepairOrderId;

use crate::auth::Caller;
use crate::dto::repairs::RepairOrderResponse;
use crate::handlers::parse_path;
use crate::{error::ApiError, AppState};

/// Reports a repair order done
pub async fn complete_repair(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<RepairOrderResponse>, ApiError> {
    let order_id: RepairOrderId = parse_path(&id)?;

    state.network.complete_repair(caller, order_id).await?;
    let order = state.network.repair_order(order_id).await?;

    Ok(Json(order.into()))
}

/// Gets a repair order
pub async fn get_repair(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RepairOrderResponse>, ApiError> {
    let order_id: RepairOrderId = parse_path(&id)?;
    let order = state.network.repair_order(order_id).await?;

    Ok(Json(order.into()))
}
