//! Claim lifecycle vocabulary shared by the registry and its counterparts
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> InReview -> Rejected
//!                       -> Approved         -> PaidToThirdParty
//!                       -> GarageAuthorized -> PaidToGarage
//! ```
//!
//! Transitions only ever move forward; `Rejected` and both `Paid*` states are
//! terminal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::Identity;
use crate::money::Money;

/// Coverage category a customer is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Registered without coverage; cannot submit claims
    None,
    /// Third-party liability cover, paid to the claimant
    ThirdParty,
    /// All-risk cover, paid to the repairing garage
    AllRisk,
}

impl PolicyKind {
    /// Returns true if claims can be filed under this policy kind
    pub fn is_claimable(&self) -> bool {
        !matches!(self, PolicyKind::None)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::None => "none",
            PolicyKind::ThirdParty => "third_party",
            PolicyKind::AllRisk => "all_risk",
        };
        f.write_str(name)
    }
}

/// Claim status as recorded by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Recorded, not yet forwarded for assessment
    Submitted,
    /// Forwarded to the handling service
    InReview,
    /// Negative decision
    Rejected,
    /// Positive third-party decision, awaiting payout
    Approved,
    /// Positive all-risk decision, awaiting garage payout
    GarageAuthorized,
    /// Third-party payout checkpoint committed
    PaidToThirdParty,
    /// Garage payout checkpoint committed
    PaidToGarage,
}

impl ClaimStatus {
    /// Checks if moving to `target` is a forward step of the lifecycle
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self, target),
            (Submitted, InReview)
                | (InReview, Rejected)
                | (InReview, Approved)
                | (InReview, GarageAuthorized)
                | (Approved, PaidToThirdParty)
                | (GarageAuthorized, PaidToGarage)
        )
    }

    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Rejected | ClaimStatus::PaidToThirdParty | ClaimStatus::PaidToGarage
        )
    }

    /// Returns true once either payout checkpoint has been committed
    pub fn is_paid(&self) -> bool {
        matches!(self, ClaimStatus::PaidToThirdParty | ClaimStatus::PaidToGarage)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Who a payout is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutTarget {
    /// The claimant, for approved third-party claims
    ThirdParty,
    /// The repairing garage, for authorized all-risk claims
    Garage,
}

impl PayoutTarget {
    /// Status a claim must hold for this payout to be allowed
    pub fn required_status(&self) -> ClaimStatus {
        match self {
            PayoutTarget::ThirdParty => ClaimStatus::Approved,
            PayoutTarget::Garage => ClaimStatus::GarageAuthorized,
        }
    }

    /// Status the payout checkpoint moves the claim to
    pub fn paid_status(&self) -> ClaimStatus {
        match self {
            PayoutTarget::ThirdParty => ClaimStatus::PaidToThirdParty,
            PayoutTarget::Garage => ClaimStatus::PaidToGarage,
        }
    }

    /// Selects the amount this payout disburses
    pub fn amount_of(&self, info: &ClaimPayoutInfo) -> Money {
        match self {
            PayoutTarget::ThirdParty => info.third_party_payout,
            PayoutTarget::Garage => info.garage_cost,
        }
    }
}

/// Outcome of an assessment, handed to the registry's `decision`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDecision {
    pub positive: bool,
    pub third_party_payout: Money,
    pub garage_cost: Money,
}

impl ClaimDecision {
    /// Status the decision resolves an in-review claim to
    pub fn resolved_status(&self, policy_kind: PolicyKind) -> Option<ClaimStatus> {
        match (self.positive, policy_kind) {
            (false, _) => Some(ClaimStatus::Rejected),
            (true, PolicyKind::ThirdParty) => Some(ClaimStatus::Approved),
            (true, PolicyKind::AllRisk) => Some(ClaimStatus::GarageAuthorized),
            (true, PolicyKind::None) => None,
        }
    }
}

/// Live payout snapshot served by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimPayoutInfo {
    pub claimant: Identity,
    pub status: ClaimStatus,
    pub third_party_payout: Money,
    pub garage_cost: Money,
}
