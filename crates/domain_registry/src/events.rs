//! Events recorded by the claim registry
//!
//! Events are part of the registry's state: an invocation that is rolled back
//! takes its events with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ClaimStatus, Identity, Money, PayoutTarget, PolicyKind};

/// Events emitted by the ClaimRegistry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A customer record was created or overwritten
    CustomerAdded {
        customer: Identity,
        name: String,
        policy_kind: PolicyKind,
        timestamp: DateTime<Utc>,
    },

    /// A customer may no longer submit claims
    CustomerDeactivated {
        customer: Identity,
        timestamp: DateTime<Utc>,
    },

    /// A claim was recorded
    ClaimSubmitted {
        claim_id: ClaimId,
        claimant: Identity,
        policy_kind: PolicyKind,
        percentage_or_damage: u32,
        timestamp: DateTime<Utc>,
    },

    /// The handling service resolved a claim
    ClaimDecision {
        claim_id: ClaimId,
        positive: bool,
        status: ClaimStatus,
        third_party_payout: Money,
        garage_cost: Money,
        timestamp: DateTime<Utc>,
    },

    /// The payout checkpoint committed
    ClaimMarkedPaid {
        claim_id: ClaimId,
        target: PayoutTarget,
        timestamp: DateTime<Utc>,
    },
}

impl RegistryEvent {
    /// Returns the claim this event concerns, if any
    pub fn claim_id(&self) -> Option<ClaimId> {
        match self {
            RegistryEvent::ClaimSubmitted { claim_id, .. }
            | RegistryEvent::ClaimDecision { claim_id, .. }
            | RegistryEvent::ClaimMarkedPaid { claim_id, .. } => Some(*claim_id),
            RegistryEvent::CustomerAdded { .. } | RegistryEvent::CustomerDeactivated { .. } => None,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            RegistryEvent::CustomerAdded { timestamp, .. } => *timestamp,
            RegistryEvent::CustomerDeactivated { timestamp, .. } => *timestamp,
            RegistryEvent::ClaimSubmitted { timestamp, .. } => *timestamp,
            RegistryEvent::ClaimDecision { timestamp, .. } => *timestamp,
            RegistryEvent::ClaimMarkedPaid { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            RegistryEvent::CustomerAdded { .. } => "CustomerAdded",
            RegistryEvent::CustomerDeactivated { .. } => "CustomerDeactivated",
            RegistryEvent::ClaimSubmitted { .. } => "ClaimSubmitted",
            RegistryEvent::ClaimDecision { .. } => "ClaimDecision",
            RegistryEvent::ClaimMarkedPaid { .. } => "ClaimMarkedPaid",
        }
    }
}
