//! The deployed settlement network

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use core_kernel::{
    ClaimId, ClaimPayoutInfo, ClaimLedgerPort, Identity, Journaled, Money, PolicyKind,
    ProtocolError, RepairOrderId, TransferRail,
};
use domain_garage::{GarageEvent, GarageService, GarageState, RepairOrder};
use domain_handling::{ClaimsHandlingService, HandlingEvent, HandlingState};
use domain_registry::{Claim, ClaimRegistry, Customer, RegistryEvent, RegistryState};

use crate::config::{NetworkConfig, TransferFailurePolicy};

tokio::task_local! {
    /// Set while the current task is inside a network invocation
    static IN_INVOCATION: ();
}

/// Whether the current task already holds the network's turn
fn in_invocation() -> bool {
    IN_INVOCATION.try_with(|_| ()).is_ok()
}

/// State of every service at the start of an invocation
struct NetworkCheckpoint {
    registry: RegistryState,
    handling: HandlingState,
    garage: Option<GarageState>,
}

/// The three services, wired together, behind a single invocation gate
pub struct ClaimsNetwork {
    authority: Identity,
    config: NetworkConfig,
    registry: Arc<ClaimRegistry>,
    handling: Arc<ClaimsHandlingService>,
    garage: Option<Arc<GarageService>>,
    turn: Mutex<()>,
}

impl ClaimsNetwork {
    /// Deploys and wires the services
    ///
    /// `authority` owns all three services. Payouts go out through `rail`.
    pub async fn deploy(
        config: NetworkConfig,
        authority: Identity,
        rail: Arc<dyn TransferRail>,
    ) -> Result<Self, ProtocolError> {
        config.validate()?;

        let registry = Arc::new(ClaimRegistry::new(Identity::new(), authority, config.currency));
        let handling = Arc::new(ClaimsHandlingService::new(
            Identity::new(),
            authority,
            config.unit(),
            rail,
        ));

        registry
            .connect_handling_service(authority, handling.clone())
            .await?;
        handling.connect_registry(authority, registry.clone()).await?;

        let garage = if config.garage_enabled {
            let garage = Arc::new(GarageService::new(
                Identity::new(),
                authority,
                config.completion_guard,
            ));
            garage
                .connect_handling_service(authority, handling.identity())
                .await?;
            handling.connect_garage(authority, garage.clone()).await?;
            Some(garage)
        } else {
            None
        };

        info!(
            authority = %authority,
            registry = %registry.identity(),
            handling_service = %handling.identity(),
            garage_enabled = garage.is_some(),
            unit = %config.unit(),
            "claims network deployed"
        );

        Ok(Self {
            authority,
            config,
            registry,
            handling,
            garage,
            turn: Mutex::new(()),
        })
    }

    pub fn authority(&self) -> Identity {
        self.authority
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// The registry service itself
    ///
    /// Calls made on the returned handle bypass the network's turn and
    /// rollback. Use the network's own methods to change state.
    pub fn registry(&self) -> &Arc<ClaimRegistry> {
        &self.registry
    }

    /// The handling service itself
    ///
    /// Calls made on the returned handle bypass the network's turn and
    /// rollback. Use the network's own methods to change state.
    pub fn handling(&self) -> &Arc<ClaimsHandlingService> {
        &self.handling
    }

    pub fn garage(&self) -> Option<&Arc<GarageService>> {
        self.garage.as_ref()
    }

    // ------------------------------------------------------------------
    // Invocations
    // ------------------------------------------------------------------

    pub async fn add_customer(
        &self,
        caller: Identity,
        customer: Identity,
        name: &str,
        policy_kind: PolicyKind,
    ) -> Result<(), ProtocolError> {
        self.invoke("add_customer", || {
            self.registry.add_customer(caller, customer, name, policy_kind)
        })
        .await
    }

    pub async fn deactivate_customer(
        &self,
        caller: Identity,
        customer: Identity,
    ) -> Result<(), ProtocolError> {
        self.invoke("deactivate_customer", || {
            self.registry.deactivate_customer(caller, customer)
        })
        .await
    }

    /// Files a claim, which is assessed before this returns
    pub async fn submit_claim(
        &self,
        caller: Identity,
        policy_kind: PolicyKind,
        percentage_or_damage: u32,
    ) -> Result<ClaimId, ProtocolError> {
        self.invoke("submit_claim", || {
            self.registry
                .submit_claim(caller, policy_kind, percentage_or_damage)
        })
        .await
    }

    pub async fn fund_pool(&self, funder: Identity, amount: Money) -> Result<Money, ProtocolError> {
        self.invoke("fund_pool", || self.handling.fund_pool(funder, amount))
            .await
    }

    pub async fn pay_to_third(&self, caller: Identity, claim_id: ClaimId) -> Result<(), ProtocolError> {
        self.invoke("pay_to_third", || self.handling.pay_to_third(caller, claim_id))
            .await
    }

    pub async fn pay_to_garage(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        garage_recipient: Identity,
    ) -> Result<(), ProtocolError> {
        self.invoke("pay_to_garage", || {
            self.handling
                .pay_to_garage(caller, claim_id, garage_recipient)
        })
        .await
    }

    pub async fn complete_repair(
        &self,
        caller: Identity,
        order_id: RepairOrderId,
    ) -> Result<(), ProtocolError> {
        let garage = self.garage_service()?;
        self.invoke("complete_repair", || garage.complete_repair(caller, order_id))
            .await
    }

    /// Runs one invocation
    ///
    /// A top-level invocation waits for its turn. An invocation made from
    /// inside another one, such as a transfer rail calling back into the
    /// network, already holds the turn and runs inline.
    ///
    /// On failure every service is restored to the checkpoint taken before
    /// the invocation, except for a transfer failure under
    /// [`TransferFailurePolicy::RetainPaidMark`], which commits. A nested
    /// invocation restores only its own checkpoint, leaving the enclosing
    /// invocation's progress intact.
    async fn invoke<T, F, Fut>(&self, operation: &'static str, run: F) -> Result<T, ProtocolError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProtocolError>>,
    {
        if in_invocation() {
            debug!(operation, "nested invocation, running inside the current turn");
            return self.run_checkpointed(operation, run).await;
        }

        let _turn = self.turn.lock().await;
        IN_INVOCATION
            .scope((), self.run_checkpointed(operation, run))
            .await
    }

    async fn run_checkpointed<T, F, Fut>(
        &self,
        operation: &'static str,
        run: F,
    ) -> Result<T, ProtocolError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProtocolError>>,
    {
        let checkpoint = self.checkpoint().await;

        let outcome = run().await;
        if let Err(error) = &outcome {
            if error.is_transfer_failure()
                && self.config.transfer_failure == TransferFailurePolicy::RetainPaidMark
            {
                warn!(operation, error = %error, "transfer failed, keeping the paid mark");
            } else {
                warn!(operation, error = %error, "invocation failed, rolling back");
                self.rollback(checkpoint).await;
            }
        }

        outcome
    }

    /// Waits for the turn unless the current task already holds it
    async fn read_turn(&self) -> Option<MutexGuard<'_, ()>> {
        if in_invocation() {
            None
        } else {
            Some(self.turn.lock().await)
        }
    }

    async fn checkpoint(&self) -> NetworkCheckpoint {
        let garage = match &self.garage {
            Some(garage) => Some(garage.checkpoint().await),
            None => None,
        };

        NetworkCheckpoint {
            registry: self.registry.checkpoint().await,
            handling: self.handling.checkpoint().await,
            garage,
        }
    }

    async fn rollback(&self, checkpoint: NetworkCheckpoint) {
        self.registry.rollback(checkpoint.registry).await;
        self.handling.rollback(checkpoint.handling).await;
        if let (Some(garage), Some(state)) = (&self.garage, checkpoint.garage) {
            garage.rollback(state).await;
        }
    }

    fn garage_service(&self) -> Result<&Arc<GarageService>, ProtocolError> {
        self.garage
            .as_ref()
            .ok_or(ProtocolError::NotConfigured("garage service"))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub async fn customer(&self, customer: Identity) -> Result<Customer, ProtocolError> {
        let _turn = self.read_turn().await;
        self.registry
            .customer(customer)
            .await
            .ok_or(ProtocolError::UnknownCustomer(customer))
    }

    pub async fn claim(&self, claim_id: ClaimId) -> Result<Claim, ProtocolError> {
        let _turn = self.read_turn().await;
        self.registry
            .claim(claim_id)
            .await
            .ok_or(ProtocolError::UnknownClaim(claim_id))
    }

    pub async fn claim_payout_info(&self, claim_id: ClaimId) -> Result<ClaimPayoutInfo, ProtocolError> {
        let _turn = self.read_turn().await;
        self.registry.claim_payout_info(claim_id).await
    }

    pub async fn claims_of(&self, claimant: Identity) -> Vec<Claim> {
        let _turn = self.read_turn().await;
        self.registry.claims_of(claimant).await
    }

    pub async fn pool_balance(&self) -> Money {
        let _turn = self.read_turn().await;
        self.handling.pool_balance().await
    }

    pub async fn repair_order(&self, order_id: RepairOrderId) -> Result<RepairOrder, ProtocolError> {
        let garage = self.garage_service()?;
        let _turn = self.read_turn().await;
        garage
            .order(order_id)
            .await
            .ok_or(ProtocolError::UnknownOrder(order_id))
    }

    pub async fn orders_for_claim(&self, claim_id: ClaimId) -> Result<Vec<RepairOrder>, ProtocolError> {
        let garage = self.garage_service()?;
        let _turn = self.read_turn().await;
        Ok(garage.orders_for_claim(claim_id).await)
    }

    pub async fn registry_events(&self) -> Vec<RegistryEvent> {
        let _turn = self.read_turn().await;
        self.registry.events().await
    }

    pub async fn handling_events(&self) -> Vec<HandlingEvent> {
        let _turn = self.read_turn().await;
        self.handling.events().await
    }

    pub async fn garage_events(&self) -> Vec<GarageEvent> {
        let _turn = self.read_turn().await;
        match &self.garage {
            Some(garage) => garage.events().await,
            None => Vec::new(),
        }
    }
}
