//! Network configuration

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, ProtocolError};
use domain_garage::CompletionGuard;
use domain_handling::MAX_UNITS;

/// What a failed payout transfer leaves behind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFailurePolicy {
    /// The claim stays paid, the pool keeps the funds, and the failure is
    /// recorded as a `PayoutTransferFailed` event for manual settlement
    #[default]
    RetainPaidMark,
    /// The whole payout is rolled back and the claim can be paid again
    Unwind,
}

/// Network configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// The single currency every amount is held in
    pub currency: Currency,
    /// Base unit of the assessment tables, in the currency's major units
    pub unit: Decimal,
    pub transfer_failure: TransferFailurePolicy,
    /// Deploy a garage service and open repair orders for all-risk claims
    pub garage_enabled: bool,
    pub completion_guard: CompletionGuard,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            unit: Decimal::ONE_HUNDRED,
            transfer_failure: TransferFailurePolicy::default(),
            garage_enabled: true,
            completion_guard: CompletionGuard::default(),
        }
    }
}

impl NetworkConfig {
    /// Configured unit as money
    pub fn unit(&self) -> Money {
        Money::new(self.unit, self.currency)
    }

    /// Rejects configurations the network cannot run with
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if !self.unit().is_positive() {
            return Err(ProtocolError::validation("assessment unit must be positive"));
        }
        if self.unit().checked_times(MAX_UNITS).is_err() {
            return Err(ProtocolError::validation(format!(
                "assessment unit {} is too large: {} units would overflow",
                self.unit, MAX_UNITS
            )));
        }
        Ok(())
    }
}
