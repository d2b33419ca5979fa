//! The claims handling service
//!
//! The handling service assesses every claim the registry forwards, reports
//! the outcome back through the registry's `decision`, opens repair orders
//! for authorized all-risk claims, and pays out of its pool on the
//! authority's request.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use core_kernel::{
    AccessPolicy, AssessmentPort, ClaimId, ClaimLedgerPort, DomainPort, Identity, Journaled,
    Money, PayoutTarget, ProtocolError, RepairOrderId, RepairPort, Role, RoleBindings,
    TransferRail,
};

use crate::assessment::{assess_all_risk, assess_third_party};
use crate::events::HandlingEvent;
use crate::pool::FundPool;

/// Mutable handling-service state, captured whole by checkpoints
#[derive(Debug, Clone)]
pub struct HandlingState {
    access: RoleBindings,
    unit: Money,
    pool: FundPool,
    repair_orders: BTreeMap<ClaimId, RepairOrderId>,
    events: Vec<HandlingEvent>,
}

impl HandlingState {
    fn new(authority: Identity, unit: Money) -> Self {
        Self {
            access: RoleBindings::with_authority(authority),
            unit,
            pool: FundPool::new(unit.currency()),
            repair_orders: BTreeMap::new(),
            events: Vec::new(),
        }
    }
}

/// The claims handling service
pub struct ClaimsHandlingService {
    identity: Identity,
    state: RwLock<HandlingState>,
    registry: RwLock<Option<Arc<dyn ClaimLedgerPort>>>,
    garage: RwLock<Option<Arc<dyn RepairPort>>>,
    rail: Arc<dyn TransferRail>,
}

impl ClaimsHandlingService {
    /// Creates a handling service owned by `authority`
    ///
    /// Assessment amounts are multiples of `unit`, and the pool holds funds in
    /// the unit's currency. Registry and garage are wired later.
    pub fn new(
        identity: Identity,
        authority: Identity,
        unit: Money,
        rail: Arc<dyn TransferRail>,
    ) -> Self {
        Self {
            identity,
            state: RwLock::new(HandlingState::new(authority, unit)),
            registry: RwLock::new(None),
            garage: RwLock::new(None),
            rail,
        }
    }

    /// Identity the handling service calls its counterparts with
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Fills the registry slot and grants it the registry role
    pub async fn connect_registry(
        &self,
        caller: Identity,
        port: Arc<dyn ClaimLedgerPort>,
    ) -> Result<(), ProtocolError> {
        let registry_identity = port.identity();
        {
            let mut state = self.state.write().await;
            state.access.verify(&caller, Role::Authority)?;
            state.access.bind(Role::Registry, registry_identity);
        }
        *self.registry.write().await = Some(port);

        info!(registry = %registry_identity, "handling service connected to registry");
        Ok(())
    }

    /// Fills the garage slot
    pub async fn connect_garage(
        &self,
        caller: Identity,
        port: Arc<dyn RepairPort>,
    ) -> Result<(), ProtocolError> {
        self.state.read().await.access.verify(&caller, Role::Authority)?;

        let garage_identity = port.identity();
        *self.garage.write().await = Some(port);

        info!(garage = %garage_identity, "handling service connected to garage");
        Ok(())
    }

    /// Deposits out-of-band funds into the pool and returns the new balance
    pub async fn fund_pool(&self, funder: Identity, amount: Money) -> Result<Money, ProtocolError> {
        let mut state = self.state.write().await;
        let balance = state.pool.deposit(amount)?;
        state.events.push(HandlingEvent::PoolFunded {
            funder,
            amount,
            balance,
            timestamp: Utc::now(),
        });

        info!(funder = %funder, amount = %amount, balance = %balance, "pool funded");
        Ok(balance)
    }

    /// Pays an approved third-party claim to its claimant
    pub async fn pay_to_third(&self, caller: Identity, claim_id: ClaimId) -> Result<(), ProtocolError> {
        self.pay(caller, claim_id, PayoutTarget::ThirdParty, None).await
    }

    /// Pays an authorized all-risk claim to the repairing garage
    pub async fn pay_to_garage(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        garage_recipient: Identity,
    ) -> Result<(), ProtocolError> {
        self.pay(caller, claim_id, PayoutTarget::Garage, Some(garage_recipient))
            .await
    }

    /// Runs the payout protocol: check live status, mark paid, then transfer
    async fn pay(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        target: PayoutTarget,
        recipient: Option<Identity>,
    ) -> Result<(), ProtocolError> {
        self.state.read().await.access.verify(&caller, Role::Authority)?;
        let registry = self.registry_port().await?;

        let info = registry.claim_payout_info(claim_id).await?;
        let amount = target.amount_of(&info);
        if info.status != target.required_status() || !amount.is_positive() {
            return Err(ProtocolError::InvalidStateForPayment {
                claim_id,
                status: info.status,
            });
        }
        self.state.read().await.pool.ensure_covers(amount)?;

        registry.mark_paid(self.identity, claim_id, target).await?;
        self.state.write().await.pool.debit(amount)?;

        let recipient = recipient.unwrap_or(info.claimant);
        debug!(claim_id = %claim_id, recipient = %recipient, amount = %amount, "transferring payout");

        match self.rail.transfer(recipient, amount).await {
            Ok(()) => {
                let timestamp = Utc::now();
                let event = match target {
                    PayoutTarget::ThirdParty => HandlingEvent::PaidToThirdParty {
                        claim_id,
                        recipient,
                        amount,
                        timestamp,
                    },
                    PayoutTarget::Garage => HandlingEvent::PaidToGarage {
                        claim_id,
                        recipient,
                        amount,
                        timestamp,
                    },
                };
                self.state.write().await.events.push(event);

                info!(claim_id = %claim_id, recipient = %recipient, amount = %amount, "payout transferred");
                Ok(())
            }
            Err(error) => {
                let mut state = self.state.write().await;
                state.pool.credit(amount)?;
                state.events.push(HandlingEvent::PayoutTransferFailed {
                    claim_id,
                    recipient,
                    amount,
                    reason: error.reason.clone(),
                    timestamp: Utc::now(),
                });

                warn!(claim_id = %claim_id, recipient = %recipient, reason = %error, "payout transfer failed");
                Err(ProtocolError::TransferFailed {
                    claim_id,
                    reason: error.reason,
                })
            }
        }
    }

    async fn registry_port(&self) -> Result<Arc<dyn ClaimLedgerPort>, ProtocolError> {
        self.registry
            .read()
            .await
            .clone()
            .ok_or(ProtocolError::NotConfigured("registry"))
    }

    /// Current pool balance
    pub async fn pool_balance(&self) -> Money {
        self.state.read().await.pool.balance()
    }

    /// Base amount the assessment tables multiply
    pub async fn unit(&self) -> Money {
        self.state.read().await.unit
    }

    /// Repair order opened for a claim, if any
    pub async fn repair_order_for(&self, claim_id: ClaimId) -> Option<RepairOrderId> {
        self.state.read().await.repair_orders.get(&claim_id).copied()
    }

    /// Returns the event trail
    pub async fn events(&self) -> Vec<HandlingEvent> {
        self.state.read().await.events.clone()
    }
}

impl DomainPort for ClaimsHandlingService {}

#[async_trait]
impl AssessmentPort for ClaimsHandlingService {
    fn identity(&self) -> Identity {
        self.identity
    }

    async fn third_party_assessment(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        percentage: u32,
    ) -> Result<(), ProtocolError> {
        let unit = {
            let state = self.state.read().await;
            state.access.verify(&caller, Role::Registry)?;
            state.unit
        };
        let registry = self.registry_port().await?;

        let assessment = assess_third_party(percentage, unit);
        registry
            .decision(self.identity, claim_id, assessment.third_party_decision())
            .await?;

        self.state.write().await.events.push(HandlingEvent::ThirdPartyAssessed {
            claim_id,
            percentage,
            positive: assessment.positive,
            payout: assessment.amount,
            timestamp: Utc::now(),
        });

        info!(
            claim_id = %claim_id,
            percentage,
            positive = assessment.positive,
            payout = %assessment.amount,
            "third-party claim assessed"
        );
        Ok(())
    }

    async fn all_risk_assessment(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        damage: u32,
    ) -> Result<(), ProtocolError> {
        let unit = {
            let state = self.state.read().await;
            state.access.verify(&caller, Role::Registry)?;
            state.unit
        };
        let registry = self.registry_port().await?;

        let assessment = assess_all_risk(damage, unit);
        registry
            .decision(self.identity, claim_id, assessment.all_risk_decision())
            .await?;

        let garage = self.garage.read().await.clone();
        let repair_order = match garage {
            Some(garage) if assessment.positive => Some(
                garage
                    .request_repair(self.identity, claim_id, assessment.amount)
                    .await?,
            ),
            Some(_) => None,
            None => {
                debug!(claim_id = %claim_id, "no garage connected, skipping repair order");
                None
            }
        };

        let mut state = self.state.write().await;
        if let Some(order_id) = repair_order {
            state.repair_orders.insert(claim_id, order_id);
        }
        state.events.push(HandlingEvent::AllRiskAssessed {
            claim_id,
            damage,
            positive: assessment.positive,
            garage_cost: assessment.amount,
            repair_order,
            timestamp: Utc::now(),
        });

        info!(
            claim_id = %claim_id,
            damage,
            positive = assessment.positive,
            garage_cost = %assessment.amount,
            "all-risk claim assessed"
        );
        Ok(())
    }
}

#[async_trait]
impl Journaled for ClaimsHandlingService {
    type Snapshot = HandlingState;

    async fn checkpoint(&self) -> HandlingState {
        self.state.read().await.clone()
    }

    async fn rollback(&self, snapshot: HandlingState) {
        *self.state.write().await = snapshot;
    }
}
