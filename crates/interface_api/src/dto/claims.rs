//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, ClaimPayoutInfo, ClaimStatus, Currency, Identity, PolicyKind};
use domain_registry::Claim;

/// Third-party claim form
#[derive(Debug, Deserialize, Validate)]
pub struct ThirdPartyClaimRequest {
    /// Claimant's share of the fault
    #[validate(range(max = 100))]
    pub percentage: u32,
}

/// All-risk claim form
#[derive(Debug, Deserialize, Validate)]
pub struct AllRiskClaimRequest {
    pub damage: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PayGarageRequest {
    pub garage_recipient: Identity,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub claimant: Identity,
    pub policy_kind: PolicyKind,
    pub percentage_or_damage: u32,
    pub status: ClaimStatus,
    pub positive: bool,
    pub third_party_payout: Decimal,
    pub garage_cost: Decimal,
    pub currency: Currency,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id,
            claimant: claim.claimant,
            policy_kind: claim.policy_kind,
            percentage_or_damage: claim.percentage_or_damage,
            status: claim.status,
            positive: claim.positive,
            third_party_payout: claim.third_party_payout.amount(),
            garage_cost: claim.garage_cost.amount(),
            currency: claim.third_party_payout.currency(),
            submitted_at: claim.submitted_at,
            updated_at: claim.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayoutInfoResponse {
    pub claim_id: ClaimId,
    pub claimant: Identity,
    pub status: ClaimStatus,
    pub third_party_payout: Decimal,
    pub garage_cost: Decimal,
    pub currency: Currency,
}

impl PayoutInfoResponse {
    pub fn new(claim_id: ClaimId, info: ClaimPayoutInfo) -> Self {
        Self {
            claim_id,
            claimant: info.claimant,
            status: info.status,
            third_party_payout: info.third_party_payout.amount(),
            garage_cost: info.garage_cost.amount(),
            currency: info.third_party_payout.currency(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayoutResponse {
    pub claim_id: ClaimId,
    pub status: ClaimStatus,
    pub pool_balance: Decimal,
}
