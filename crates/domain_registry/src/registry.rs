//! The claim registry service
//!
//! The registry owns customers and claims and is the only authority on a
//! claim's status. It forwards each new claim to the handling service for
//! assessment and serves as the payout checkpoint that makes double payment
//! impossible.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use core_kernel::{
    AccessPolicy, AssessmentPort, ClaimDecision, ClaimId, ClaimLedgerPort, ClaimPayoutInfo,
    ClaimStatus, Currency, DomainPort, Identity, Journaled, PayoutTarget, PolicyKind,
    ProtocolError, Role, RoleBindings,
};

use crate::claim::Claim;
use crate::customer::Customer;
use crate::events::RegistryEvent;

/// Mutable registry state, captured whole by checkpoints
#[derive(Debug, Clone)]
pub struct RegistryState {
    access: RoleBindings,
    currency: Currency,
    customers: HashMap<Identity, Customer>,
    claims: BTreeMap<ClaimId, Claim>,
    next_claim_id: ClaimId,
    events: Vec<RegistryEvent>,
}

impl RegistryState {
    fn new(authority: Identity, currency: Currency) -> Self {
        Self {
            access: RoleBindings::with_authority(authority),
            currency,
            customers: HashMap::new(),
            claims: BTreeMap::new(),
            next_claim_id: ClaimId::FIRST,
            events: Vec::new(),
        }
    }

    /// Validates the claimant and records a claim that is ready for review
    fn open_claim(
        &mut self,
        caller: Identity,
        policy_kind: PolicyKind,
        percentage_or_damage: u32,
    ) -> Result<ClaimId, ProtocolError> {
        let customer = self
            .customers
            .get(&caller)
            .filter(|customer| customer.valid)
            .ok_or_else(|| ProtocolError::Unauthorized {
                caller,
                required: "registered customer".to_string(),
            })?;

        if customer.policy_kind != policy_kind || !policy_kind.is_claimable() {
            return Err(ProtocolError::PolicyMismatch {
                registered: customer.policy_kind,
                submitted: policy_kind,
            });
        }

        let claim_id = self.next_claim_id;
        self.next_claim_id = claim_id
            .next()
            .ok_or(ProtocolError::validation("claim counter exhausted"))?;

        let mut claim = Claim::submitted(
            claim_id,
            caller,
            policy_kind,
            percentage_or_damage,
            self.currency,
        );
        self.events.push(RegistryEvent::ClaimSubmitted {
            claim_id,
            claimant: caller,
            policy_kind,
            percentage_or_damage,
            timestamp: claim.submitted_at,
        });
        claim.advance(ClaimStatus::InReview)?;
        self.claims.insert(claim_id, claim);

        Ok(claim_id)
    }

    fn decide(&mut self, claim_id: ClaimId, decision: ClaimDecision) -> Result<ClaimStatus, ProtocolError> {
        let claim = self
            .claims
            .get_mut(&claim_id)
            .ok_or(ProtocolError::UnknownClaim(claim_id))?;

        let status = claim.record_decision(decision)?;
        self.events.push(RegistryEvent::ClaimDecision {
            claim_id,
            positive: decision.positive,
            status,
            third_party_payout: decision.third_party_payout,
            garage_cost: decision.garage_cost,
            timestamp: Utc::now(),
        });

        Ok(status)
    }

    fn checkpoint_payout(&mut self, claim_id: ClaimId, target: PayoutTarget) -> Result<(), ProtocolError> {
        let claim = self
            .claims
            .get_mut(&claim_id)
            .ok_or(ProtocolError::UnknownClaim(claim_id))?;

        let invalid = ProtocolError::InvalidStateForPayment {
            claim_id,
            status: claim.status,
        };
        if claim.status != target.required_status() {
            return Err(invalid);
        }
        if !target.amount_of(&claim.payout_info()).is_positive() {
            return Err(invalid);
        }

        claim.advance(target.paid_status())?;
        self.events.push(RegistryEvent::ClaimMarkedPaid {
            claim_id,
            target,
            timestamp: Utc::now(),
        });

        Ok(())
    }
}

/// The claim registry
pub struct ClaimRegistry {
    identity: Identity,
    state: RwLock<RegistryState>,
    handling: RwLock<Option<Arc<dyn AssessmentPort>>>,
}

impl ClaimRegistry {
    /// Creates a registry owned by `authority`
    ///
    /// The handling service is wired later with
    /// [`connect_handling_service`](Self::connect_handling_service).
    pub fn new(identity: Identity, authority: Identity, currency: Currency) -> Self {
        Self {
            identity,
            state: RwLock::new(RegistryState::new(authority, currency)),
            handling: RwLock::new(None),
        }
    }

    /// Identity the registry calls its counterparts with
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Fills the handling-service slot and grants it the handling-service role
    pub async fn connect_handling_service(
        &self,
        caller: Identity,
        port: Arc<dyn AssessmentPort>,
    ) -> Result<(), ProtocolError> {
        let handling_identity = port.identity();
        {
            let mut state = self.state.write().await;
            state.access.verify(&caller, Role::Authority)?;
            state.access.bind(Role::HandlingService, handling_identity);
        }
        *self.handling.write().await = Some(port);

        info!(handling_service = %handling_identity, "registry connected to handling service");
        Ok(())
    }

    /// Creates or overwrites a customer record
    pub async fn add_customer(
        &self,
        caller: Identity,
        customer: Identity,
        name: &str,
        policy_kind: PolicyKind,
    ) -> Result<(), ProtocolError> {
        let mut state = self.state.write().await;
        state.access.verify(&caller, Role::Authority)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ProtocolError::validation("customer name must not be empty"));
        }

        let record = Customer::new(customer, name, policy_kind);
        let timestamp = record.registered_at;
        if state.customers.insert(customer, record).is_some() {
            debug!(customer = %customer, "overwriting existing customer record");
        }
        state.events.push(RegistryEvent::CustomerAdded {
            customer,
            name: name.to_string(),
            policy_kind,
            timestamp,
        });

        info!(customer = %customer, policy_kind = %policy_kind, "customer added");
        Ok(())
    }

    /// Revokes a customer's right to submit claims
    pub async fn deactivate_customer(
        &self,
        caller: Identity,
        customer: Identity,
    ) -> Result<(), ProtocolError> {
        let mut state = self.state.write().await;
        state.access.verify(&caller, Role::Authority)?;

        let record = state
            .customers
            .get_mut(&customer)
            .ok_or(ProtocolError::UnknownCustomer(customer))?;
        record.valid = false;
        state.events.push(RegistryEvent::CustomerDeactivated {
            customer,
            timestamp: Utc::now(),
        });

        info!(customer = %customer, "customer deactivated");
        Ok(())
    }

    /// Records a claim and forwards it for assessment
    ///
    /// The submission is all-or-nothing: if the assessment fails, the claim,
    /// its events and its id are rolled back.
    pub async fn submit_claim(
        &self,
        caller: Identity,
        policy_kind: PolicyKind,
        percentage_or_damage: u32,
    ) -> Result<ClaimId, ProtocolError> {
        let checkpoint = self.checkpoint().await;

        let claim_id = self
            .state
            .write()
            .await
            .open_claim(caller, policy_kind, percentage_or_damage)?;

        let handling = self.handling.read().await.clone();
        let forwarded = match handling {
            Some(handling) => match policy_kind {
                PolicyKind::ThirdParty => {
                    handling
                        .third_party_assessment(self.identity, claim_id, percentage_or_damage)
                        .await
                }
                PolicyKind::AllRisk => {
                    handling
                        .all_risk_assessment(self.identity, claim_id, percentage_or_damage)
                        .await
                }
                PolicyKind::None => Err(ProtocolError::validation("claims under no policy cannot be assessed")),
            },
            None => Err(ProtocolError::NotConfigured("handling service")),
        };

        if let Err(error) = forwarded {
            warn!(claim_id = %claim_id, error = %error, "assessment failed, rolling back submission");
            self.rollback(checkpoint).await;
            return Err(error);
        }

        info!(claim_id = %claim_id, claimant = %caller, policy_kind = %policy_kind, "claim submitted");
        Ok(claim_id)
    }

    /// Returns a customer record
    pub async fn customer(&self, customer: Identity) -> Option<Customer> {
        self.state.read().await.customers.get(&customer).cloned()
    }

    /// Returns a claim
    pub async fn claim(&self, claim_id: ClaimId) -> Option<Claim> {
        self.state.read().await.claims.get(&claim_id).cloned()
    }

    /// Returns every claim filed by `claimant`, oldest first
    pub async fn claims_of(&self, claimant: Identity) -> Vec<Claim> {
        self.state
            .read()
            .await
            .claims
            .values()
            .filter(|claim| claim.claimant == claimant)
            .cloned()
            .collect()
    }

    /// Number of claims recorded
    pub async fn claim_count(&self) -> usize {
        self.state.read().await.claims.len()
    }

    /// Returns the event trail
    pub async fn events(&self) -> Vec<RegistryEvent> {
        self.state.read().await.events.clone()
    }
}

impl DomainPort for ClaimRegistry {}

#[async_trait]
impl ClaimLedgerPort for ClaimRegistry {
    fn identity(&self) -> Identity {
        self.identity
    }

    async fn decision(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        decision: ClaimDecision,
    ) -> Result<(), ProtocolError> {
        let mut state = self.state.write().await;
        state.access.verify(&caller, Role::HandlingService)?;

        let status = state.decide(claim_id, decision)?;
        info!(claim_id = %claim_id, positive = decision.positive, status = %status, "claim decided");
        Ok(())
    }

    async fn mark_paid(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        target: PayoutTarget,
    ) -> Result<(), ProtocolError> {
        let mut state = self.state.write().await;
        state.access.verify(&caller, Role::HandlingService)?;

        state.checkpoint_payout(claim_id, target)?;
        info!(claim_id = %claim_id, payout = ?target, "payout checkpoint committed");
        Ok(())
    }

    async fn claim_payout_info(&self, claim_id: ClaimId) -> Result<ClaimPayoutInfo, ProtocolError> {
        self.state
            .read()
            .await
            .claims
            .get(&claim_id)
            .map(Claim::payout_info)
            .ok_or(ProtocolError::UnknownClaim(claim_id))
    }
}

#[async_trait]
impl Journaled for ClaimRegistry {
    type Snapshot = RegistryState;

    async fn checkpoint(&self) -> RegistryState {
        self.state.read().await.clone()
    }

    async fn rollback(&self, snapshot: RegistryState) {
        *self.state.write().await = snapshot;
    }
}
