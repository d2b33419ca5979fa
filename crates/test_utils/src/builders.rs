//! Test Data Builders
//!
//! Deploys a fully wired network with sensible defaults. Tests override only
//! the settings they care about.

use std::sync::Arc;

use rust_decimal::Decimal;

use claims_network::{ClaimsNetwork, NetworkConfig, TransferFailurePolicy};
use core_kernel::{ClaimId, ClaimStatus, Identity, Money, PolicyKind, TransferRail};
use domain_garage::CompletionGuard;

use crate::fixtures::{init_test_tracing, NameFixtures};

/// Builder for a deployed test network
pub struct TestNetworkBuilder {
    config: NetworkConfig,
    authority: Identity,
}

impl Default for TestNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestNetworkBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            config: NetworkConfig::default(),
            authority: Identity::new(),
        }
    }

    /// Sets the assessment unit, in major units of the network currency
    pub fn with_unit(mut self, unit: Decimal) -> Self {
        self.config.unit = unit;
        self
    }

    /// Sets what a failed transfer leaves behind
    pub fn with_transfer_failure(mut self, policy: TransferFailurePolicy) -> Self {
        self.config.transfer_failure = policy;
        self
    }

    /// Sets who may complete repair orders
    pub fn with_completion_guard(mut self, guard: CompletionGuard) -> Self {
        self.config.completion_guard = guard;
        self
    }

    /// Deploys without a garage service
    pub fn without_garage(mut self) -> Self {
        self.config.garage_enabled = false;
        self
    }

    /// Sets the authority identity
    pub fn with_authority(mut self, authority: Identity) -> Self {
        self.authority = authority;
        self
    }

    /// Returns the configuration the network will deploy with
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Deploys the network, paying out through `rail`
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected.
    pub async fn build(self, rail: Arc<dyn TransferRail>) -> TestNetwork {
        init_test_tracing();

        let network = ClaimsNetwork::deploy(self.config, self.authority, rail)
            .await
            .expect("test network should deploy");

        TestNetwork {
            network: Arc::new(network),
            authority: self.authority,
        }
    }
}

/// A deployed network and its authority
#[derive(Clone)]
pub struct TestNetwork {
    pub network: Arc<ClaimsNetwork>,
    pub authority: Identity,
}

impl TestNetwork {
    /// Base amount of the assessment tables
    pub fn unit(&self) -> Money {
        self.network.config().unit()
    }

    /// Onboards a fresh customer under `policy_kind`
    pub async fn onboard(&self, policy_kind: PolicyKind) -> Identity {
        let customer = Identity::new();
        self.network
            .add_customer(self.authority, customer, &NameFixtures::customer_name(), policy_kind)
            .await
            .expect("authority should onboard customers");
        customer
    }

    /// Funds the pool with a whole number of units
    pub async fn fund(&self, units: u32) -> Money {
        self.network
            .fund_pool(self.authority, self.unit().times(units))
            .await
            .expect("funding should succeed")
    }

    /// Onboards a customer and files one claim for them
    pub async fn file_claim(&self, policy_kind: PolicyKind, percentage_or_damage: u32) -> (Identity, ClaimId) {
        let customer = self.onboard(policy_kind).await;
        let claim_id = self
            .network
            .submit_claim(customer, policy_kind, percentage_or_damage)
            .await
            .expect("claim should be accepted");
        (customer, claim_id)
    }

    /// Current status of a claim
    pub async fn status(&self, claim_id: ClaimId) -> ClaimStatus {
        self.network
            .claim(claim_id)
            .await
            .expect("claim should exist")
            .status
    }
}
