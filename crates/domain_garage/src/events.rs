//! Events recorded by the garage service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Identity, Money, RepairOrderId};

/// Events emitted by the GarageService
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GarageEvent {
    /// A repair order was opened
    RepairRequested {
        order_id: RepairOrderId,
        claim_id: ClaimId,
        estimated_cost: Money,
        timestamp: DateTime<Utc>,
    },

    /// A repair order was completed
    RepairCompleted {
        order_id: RepairOrderId,
        claim_id: ClaimId,
        completed_by: Identity,
        timestamp: DateTime<Utc>,
    },
}

impl GarageEvent {
    /// Returns the repair order this event concerns
    pub fn order_id(&self) -> RepairOrderId {
        match self {
            GarageEvent::RepairRequested { order_id, .. }
            | GarageEvent::RepairCompleted { order_id, .. } => *order_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            GarageEvent::RepairRequested { timestamp, .. }
            | GarageEvent::RepairCompleted { timestamp, .. } => *timestamp,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            GarageEvent::RepairRequested { .. } => "RepairRequested",
            GarageEvent::RepairCompleted { .. } => "RepairCompleted",
        }
    }
}
