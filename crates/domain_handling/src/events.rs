//! Events recorded by the claims handling service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Identity, Money, RepairOrderId};

/// Events emitted by the ClaimsHandlingService
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HandlingEvent {
    /// Funds were deposited into the pool
    PoolFunded {
        funder: Identity,
        amount: Money,
        balance: Money,
        timestamp: DateTime<Utc>,
    },

    /// A third-party claim was assessed
    ThirdPartyAssessed {
        claim_id: ClaimId,
        percentage: u32,
        positive: bool,
        payout: Money,
        timestamp: DateTime<Utc>,
    },

    /// An all-risk claim was assessed
    AllRiskAssessed {
        claim_id: ClaimId,
        damage: u32,
        positive: bool,
        garage_cost: Money,
        repair_order: Option<RepairOrderId>,
        timestamp: DateTime<Utc>,
    },

    /// The claimant was paid
    PaidToThirdParty {
        claim_id: ClaimId,
        recipient: Identity,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    /// The repairing garage was paid
    PaidToGarage {
        claim_id: ClaimId,
        recipient: Identity,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    /// A transfer failed after the payout checkpoint committed
    PayoutTransferFailed {
        claim_id: ClaimId,
        recipient: Identity,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl HandlingEvent {
    /// Returns the claim this event concerns, if any
    pub fn claim_id(&self) -> Option<ClaimId> {
        match self {
            HandlingEvent::PoolFunded { .. } => None,
            HandlingEvent::ThirdPartyAssessed { claim_id, .. }
            | HandlingEvent::AllRiskAssessed { claim_id, .. }
            | HandlingEvent::PaidToThirdParty { claim_id, .. }
            | HandlingEvent::PaidToGarage { claim_id, .. }
            | HandlingEvent::PayoutTransferFailed { claim_id, .. } => Some(*claim_id),
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            HandlingEvent::PoolFunded { timestamp, .. } => *timestamp,
            HandlingEvent::ThirdPartyAssessed { timestamp, .. } => *timestamp,
            HandlingEvent::AllRiskAssessed { timestamp, .. } => *timestamp,
            HandlingEvent::PaidToThirdParty { timestamp, .. } => *timestamp,
            HandlingEvent::PaidToGarage { timestamp, .. } => *timestamp,
            HandlingEvent::PayoutTransferFailed { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            HandlingEvent::PoolFunded { .. } => "PoolFunded",
            HandlingEvent::ThirdPartyAssessed { .. } => "ThirdPartyAssessed",
            HandlingEvent::AllRiskAssessed { .. } => "AllRiskAssessed",
            HandlingEvent::PaidToThirdParty { .. } => "PaidToThirdParty",
            HandlingEvent::PaidToGarage { .. } => "PaidToGarage",
            HandlingEvent::PayoutTransferFailed { .. } => "PayoutTransferFailed",
        }
    }
}
