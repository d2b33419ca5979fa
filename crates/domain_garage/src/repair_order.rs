//! Repair order records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Identity, Money, RepairOrderId};

/// A repair order opened for an all-risk claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairOrder {
    pub id: RepairOrderId,
    /// Claim the repair settles
    pub claim_id: ClaimId,
    /// Cost the handling service assessed
    pub estimated_cost: Money,
    pub completed: bool,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Identity that reported the repair done
    pub completed_by: Option<Identity>,
}

impl RepairOrder {
    /// Creates an open order
    pub fn open(id: RepairOrderId, claim_id: ClaimId, estimated_cost: Money) -> Self {
        Self {
            id,
            claim_id,
            estimated_cost,
            completed: false,
            requested_at: Utc::now(),
            completed_at: None,
            completed_by: None,
        }
    }

    /// Marks the order completed
    ///
    /// Returns false if it already was, leaving the first completion intact.
    pub fn complete(&mut self, completed_by: Identity) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = Some(Utc::now());
        self.completed_by = Some(completed_by);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_completion_is_recorded_once() {
        let mut order = RepairOrder::open(
            RepairOrderId::FIRST,
            ClaimId::FIRST,
            Money::new(dec!(800), Currency::USD),
        );
        let mechanic = Identity::new();

        assert!(order.complete(mechanic));
        let first_completion = order.completed_at;

        assert!(!order.complete(Identity::new()));
        assert_eq!(order.completed_by, Some(mechanic));
        assert_eq!(order.completed_at, first_completion);
    }
}
