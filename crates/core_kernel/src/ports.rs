//! Ports between the services of the settlement network
//!
//! The registry, the handling service and the garage service only ever reach
//! each other through these traits. Each service implements the port its
//! counterparts need and holds the ports it calls in late-bound slots, so the
//! registry ↔ handling-service cycle never appears in a constructor.
//!
//! ```text
//!   ClaimRegistry ──AssessmentPort──▶ ClaimsHandlingService ──RepairPort──▶ GarageService
//!         ▲                                   │
//!         └─────────ClaimLedgerPort───────────┘──TransferRail──▶ (funds)
//! ```
//!
//! Every guarded operation takes the calling [`Identity`] explicitly; the
//! callee verifies it against its own role bindings.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ProtocolError;
use crate::identifiers::{ClaimId, Identity, RepairOrderId};
use crate::lifecycle::{ClaimDecision, ClaimPayoutInfo, PayoutTarget};
use crate::money::Money;

/// Marker trait for all service ports
///
/// Ports are shared across tasks behind `Arc`, so they must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

/// Registry side: the authoritative claim store
#[async_trait]
pub trait ClaimLedgerPort: DomainPort {
    /// Identity the registry calls its counterparts with
    fn identity(&self) -> Identity;

    /// Records an assessment outcome and resolves the claim's status
    ///
    /// Only the configured handling service may call this.
    async fn decision(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        decision: ClaimDecision,
    ) -> Result<(), ProtocolError>;

    /// Payout checkpoint: advances an approved claim to its paid status
    ///
    /// Only the configured handling service may call this. Must commit before
    /// the caller moves any funds.
    async fn mark_paid(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        target: PayoutTarget,
    ) -> Result<(), ProtocolError>;

    /// Live payout snapshot of a claim
    async fn claim_payout_info(&self, claim_id: ClaimId) -> Result<ClaimPayoutInfo, ProtocolError>;
}

/// Handling-service side: deterministic assessment entry points
#[async_trait]
pub trait AssessmentPort: DomainPort {
    /// Identity the handling service calls its counterparts with
    fn identity(&self) -> Identity;

    /// Assesses a third-party claim from the reported fault percentage
    async fn third_party_assessment(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        percentage: u32,
    ) -> Result<(), ProtocolError>;

    /// Assesses an all-risk claim from the reported damage
    async fn all_risk_assessment(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        damage: u32,
    ) -> Result<(), ProtocolError>;
}

/// Garage side: repair-order intake
#[async_trait]
pub trait RepairPort: DomainPort {
    /// Identity of the garage service
    fn identity(&self) -> Identity;

    /// Opens a repair order for an authorized all-risk claim
    async fn request_repair(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        estimated_cost: Money,
    ) -> Result<RepairOrderId, ProtocolError>;
}

/// Failure reported by a transfer rail
///
/// Transfers are atomic: a failed transfer moved nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct TransferError {
    pub reason: String,
}

impl TransferError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// The monetary transfer primitive the handling service pays out through
///
/// Implementations may call back into the network (a recipient reacting to
/// the incoming funds); the payout protocol stays correct under such
/// re-entrant calls.
#[async_trait]
pub trait TransferRail: DomainPort {
    /// Moves `amount` to `recipient`, all or nothing
    async fn transfer(&self, recipient: Identity, amount: Money) -> Result<(), TransferError>;
}
