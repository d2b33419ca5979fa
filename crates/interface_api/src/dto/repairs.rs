//! Repair order DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, Identity, RepairOrderId};
use domain_garage::RepairOrder;

#[derive(Debug, Serialize, Deserialize)]
pub struct RepairOrderResponse {
    pub id: RepairOrderId,
    pub claim_id: ClaimId,
    pub estimated_cost: Decimal,
    pub currency: Currency,
    pub completed: bool,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<Identity>,
}

impl From<RepairOrder> for RepairOrderResponse {
    fn from(order: RepairOrder) -> Self {
        Self {
            id: order.id,
            claim_id: order.claim_id,
            estimated_cost: order.estimated_cost.amount(),
            currency: order.estimated_cost.currency(),
            completed: order.completed,
            requested_at: order.requested_at,
            completed_at: order.completed_at,
            completed_by: order.completed_by,
        }
    }
}
