//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    ClaimDecision, ClaimId, ClaimPayoutInfo, ClaimStatus, Currency, Identity, Money, PolicyKind,
    ProtocolError,
};

/// A claim recorded by the registry
///
/// Claims are never deleted. After submission only the assessment decision
/// and the payout checkpoint mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Dense identifier, starting at 1
    pub id: ClaimId,
    /// Customer who filed the claim
    pub claimant: Identity,
    /// Policy kind the claim was filed under
    pub policy_kind: PolicyKind,
    /// Fault percentage (third party) or damage figure (all risk)
    pub percentage_or_damage: u32,
    /// Status
    pub status: ClaimStatus,
    /// Outcome of the assessment
    pub positive: bool,
    /// Amount owed to the claimant
    pub third_party_payout: Money,
    /// Amount owed to the repairing garage
    pub garage_cost: Money,
    /// Submitted timestamp
    pub submitted_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a freshly submitted claim
    pub fn submitted(
        id: ClaimId,
        claimant: Identity,
        policy_kind: PolicyKind,
        percentage_or_damage: u32,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            claimant,
            policy_kind,
            percentage_or_damage,
            status: ClaimStatus::Submitted,
            positive: false,
            third_party_payout: Money::zero(currency),
            garage_cost: Money::zero(currency),
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Advances the status along the lifecycle
    pub fn advance(&mut self, status: ClaimStatus) -> Result<(), ProtocolError> {
        if !self.status.can_transition_to(status) {
            return Err(ProtocolError::InvalidStatusTransition {
                claim_id: self.id,
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Records the assessment outcome and resolves the status
    ///
    /// Amounts can only be recorded while the claim is in review, which
    /// makes them write-once.
    pub fn record_decision(&mut self, decision: ClaimDecision) -> Result<ClaimStatus, ProtocolError> {
        let currency = self.third_party_payout.currency();
        for amount in [decision.third_party_payout, decision.garage_cost] {
            if amount.currency() != currency {
                return Err(core_kernel::MoneyError::CurrencyMismatch(
                    currency.to_string(),
                    amount.currency().to_string(),
                )
                .into());
            }
            if amount.is_negative() {
                return Err(ProtocolError::validation("decision amounts cannot be negative"));
            }
        }

        let resolved = decision
            .resolved_status(self.policy_kind)
            .ok_or_else(|| ProtocolError::validation("claims under no policy cannot be decided"))?;

        self.advance(resolved)?;
        self.positive = decision.positive;
        self.third_party_payout = decision.third_party_payout;
        self.garage_cost = decision.garage_cost;
        Ok(resolved)
    }

    /// Live payout snapshot
    pub fn payout_info(&self) -> ClaimPayoutInfo {
        ClaimPayoutInfo {
            claimant: self.claimant,
            status: self.status,
            third_party_payout: self.third_party_payout,
            garage_cost: self.garage_cost,
        }
    }
}
