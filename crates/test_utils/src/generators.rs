//! Property-Based Test Generators
//!
//! Provides proptest strategies for claim inputs and amounts.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money, PolicyKind};

/// Strategy for fault percentages, including values past the rejection band
pub fn percentage_strategy() -> impl Strategy<Value = u32> {
    0u32..=150u32
}

/// Strategy for damage figures, including values past the rejection band
pub fn damage_strategy() -> impl Strategy<Value = u32> {
    0u32..=200u32
}

/// Strategy for policy kinds that have an assessment route
pub fn claimable_policy_strategy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![Just(PolicyKind::ThirdParty), Just(PolicyKind::AllRisk)]
}

/// Strategy for any policy kind
pub fn policy_kind_strategy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![
        Just(PolicyKind::None),
        Just(PolicyKind::ThirdParty),
        Just(PolicyKind::AllRisk),
    ]
}

/// Strategy for positive assessment units (0.01 to 10,000.00)
pub fn unit_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for valid USD Money values with positive amounts
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..1_000_000_000i64).prop_map(|amount| Money::from_minor(amount, Currency::USD))
}
