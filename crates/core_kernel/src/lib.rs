//! Core Kernel - Shared vocabulary for the claim settlement network
//!
//! This crate provides the building blocks used by the registry, handling and
//! garage services:
//! - Money types with precise decimal arithmetic
//! - Participant identities and dense record identifiers
//! - The claim lifecycle state machine
//! - Role-based access control
//! - The protocol error taxonomy
//! - Cross-service ports and the checkpoint/rollback contract

pub mod money;
pub mod identifiers;
pub mod lifecycle;
pub mod access;
pub mod error;
pub mod ports;
pub mod journal;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{Identity, ClaimId, RepairOrderId, SequenceIdError};
pub use lifecycle::{PolicyKind, ClaimStatus, PayoutTarget, ClaimDecision, ClaimPayoutInfo};
pub use access::{AccessPolicy, Role, RoleBindings};
pub use error::ProtocolError;
pub use ports::{
    DomainPort, ClaimLedgerPort, AssessmentPort, RepairPort, TransferRail, TransferError,
};
pub use journal::Journaled;
