//! Error taxonomy shared by every service in the settlement network
//!
//! Cross-service calls propagate the callee's error unchanged, so a failure
//! deep inside a nested call surfaces to the top-level caller with its
//! original kind.

use thiserror::Error;

use crate::identifiers::{ClaimId, Identity, RepairOrderId};
use crate::lifecycle::{ClaimStatus, PolicyKind};
use crate::money::{Money, MoneyError};

/// Errors raised by registry, handling and garage operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unauthorized: {caller} does not hold the {required} role")]
    Unauthorized { caller: Identity, required: String },

    #[error("Policy mismatch: customer is registered for {registered}, claim filed under {submitted}")]
    PolicyMismatch {
        registered: PolicyKind,
        submitted: PolicyKind,
    },

    #[error("Unknown customer: {0}")]
    UnknownCustomer(Identity),

    #[error("Unknown claim: {0}")]
    UnknownClaim(ClaimId),

    #[error("Unknown repair order: {0}")]
    UnknownOrder(RepairOrderId),

    #[error("Claim {claim_id} cannot be paid in status {status}")]
    InvalidStateForPayment { claim_id: ClaimId, status: ClaimStatus },

    #[error("Invalid status transition for claim {claim_id} from {from} to {to}")]
    InvalidStatusTransition {
        claim_id: ClaimId,
        from: ClaimStatus,
        to: ClaimStatus,
    },

    #[error("Insufficient funds: pool holds {available}, payout requires {required}")]
    InsufficientFunds { available: Money, required: Money },

    #[error("Transfer failed for claim {claim_id}: {reason}")]
    TransferFailed { claim_id: ClaimId, reason: String },

    #[error("Not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl ProtocolError {
    pub fn validation(message: impl Into<String>) -> Self {
        ProtocolError::Validation(message.into())
    }

    /// Returns true for failures caused by the caller's identity
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ProtocolError::Unauthorized { .. })
    }

    /// Returns true if the error names a record that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProtocolError::UnknownCustomer(_)
                | ProtocolError::UnknownClaim(_)
                | ProtocolError::UnknownOrder(_)
        )
    }

    /// Returns true if the failure happened after the payout checkpoint committed
    pub fn is_transfer_failure(&self) -> bool {
        matches!(self, ProtocolError::TransferFailed { .. })
    }
}
