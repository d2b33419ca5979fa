//! Deterministic assessment tables
//!
//! Both tables are pure functions of their input and the configured unit, so
//! the same claim always assesses to the same outcome.

use serde::{Deserialize, Serialize};

use core_kernel::{ClaimDecision, Money};

/// Third-party bands: (upper bound on fault percentage, payout in units)
const THIRD_PARTY_BANDS: [(u32, u32); 2] = [(30, 7), (70, 3)];

/// All-risk bands: (upper bound on damage, garage cost in units)
const ALL_RISK_BANDS: [(u32, u32); 4] = [(30, 3), (60, 6), (80, 8), (100, 10)];

/// Largest multiple of the unit either table can award
pub const MAX_UNITS: u32 = max_units(&ALL_RISK_BANDS, max_units(&THIRD_PARTY_BANDS, 0));

const fn max_units(bands: &[(u32, u32)], floor: u32) -> u32 {
    let mut max = floor;
    let mut i = 0;
    while i < bands.len() {
        if bands[i].1 > max {
            max = bands[i].1;
        }
        i += 1;
    }
    max
}

/// Outcome of applying an assessment table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Amount owed (zero when rejected)
    pub amount: Money,
    /// Whether the claim is accepted
    pub positive: bool,
}

impl Assessment {
    fn from_bands(bands: &[(u32, u32)], value: u32, unit: Money) -> Self {
        let units = bands
            .iter()
            .find(|(upper, _)| value <= *upper)
            .map_or(0, |(_, units)| *units);
        let amount = unit.times(units);

        Self {
            amount,
            positive: amount.is_positive(),
        }
    }

    /// Decision for a third-party claim: the amount is the claimant's payout
    pub fn third_party_decision(&self) -> ClaimDecision {
        ClaimDecision {
            positive: self.positive,
            third_party_payout: self.amount,
            garage_cost: Money::zero(self.amount.currency()),
        }
    }

    /// Decision for an all-risk claim: the amount is the garage's cost
    pub fn all_risk_decision(&self) -> ClaimDecision {
        ClaimDecision {
            positive: self.positive,
            third_party_payout: Money::zero(self.amount.currency()),
            garage_cost: self.amount,
        }
    }
}

/// Assesses a third-party claim from the claimant's reported fault percentage
///
/// # Example
///
/// ```rust
/// use core_kernel::{Currency, Money};
/// use domain_handling::assess_third_party;
///
/// let unit = Money::from_minor(100, Currency::USD);
/// let assessment = assess_third_party(25, unit);
/// assert!(assessment.positive);
/// assert_eq!(assessment.amount, unit.times(7));
/// ```
pub fn assess_third_party(percentage: u32, unit: Money) -> Assessment {
    Assessment::from_bands(&THIRD_PARTY_BANDS, percentage, unit)
}

/// Assesses an all-risk claim from the reported damage
pub fn assess_all_risk(damage: u32, unit: Money) -> Assessment {
    Assessment::from_bands(&ALL_RISK_BANDS, damage, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use proptest::prelude::*;

    fn unit() -> Money {
        Money::from_minor(1_000, Currency::USD)
    }

    #[test]
    fn test_third_party_band_edges() {
        assert_eq!(assess_third_party(0, unit()).amount, unit().times(7));
        assert_eq!(assess_third_party(30, unit()).amount, unit().times(7));
        assert_eq!(assess_third_party(31, unit()).amount, unit().times(3));
        assert_eq!(assess_third_party(70, unit()).amount, unit().times(3));

        let rejected = assess_third_party(71, unit());
        assert!(!rejected.positive);
        assert!(rejected.amount.is_zero());
    }

    #[test]
    fn test_all_risk_band_edges() {
        assert_eq!(assess_all_risk(30, unit()).amount, unit().times(3));
        assert_eq!(assess_all_risk(60, unit()).amount, unit().times(6));
        assert_eq!(assess_all_risk(75, unit()).amount, unit().times(8));
        assert_eq!(assess_all_risk(100, unit()).amount, unit().times(10));
        assert!(!assess_all_risk(101, unit()).positive);
    }

    #[test]
    fn test_decisions_zero_the_other_amount() {
        let third_party = assess_third_party(25, unit()).third_party_decision();
        assert!(third_party.garage_cost.is_zero());
        assert_eq!(third_party.third_party_payout, unit().times(7));

        let all_risk = assess_all_risk(75, unit()).all_risk_decision();
        assert!(all_risk.third_party_payout.is_zero());
        assert_eq!(all_risk.garage_cost, unit().times(8));
    }

    #[test]
    fn test_max_units_covers_both_tables() {
        assert_eq!(MAX_UNITS, 10);
    }

    proptest! {
        #[test]
        fn third_party_table(percentage in 0u32..=1_000u32) {
            let assessment = assess_third_party(percentage, unit());
            let expected = match percentage {
                0..=30 => 7,
                31..=70 => 3,
                _ => 0,
            };
            prop_assert_eq!(assessment.amount, unit().times(expected));
            prop_assert_eq!(assessment.positive, expected > 0);
        }

        #[test]
        fn all_risk_table(damage in 0u32..=1_000u32) {
            let assessment = assess_all_risk(damage, unit());
            let expected = match damage {
                0..=30 => 3,
                31..=60 => 6,
                61..=80 => 8,
                81..=100 => 10,
                _ => 0,
            };
            prop_assert_eq!(assessment.amount, unit().times(expected));
            prop_assert_eq!(assessment.positive, expected > 0);
        }
    }
}
