//! The garage service

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use core_kernel::{
    AccessPolicy, ClaimId, DomainPort, Identity, Journaled, Money, ProtocolError, RepairOrderId,
    RepairPort, Role, RoleBindings,
};

use crate::events::GarageEvent;
use crate::repair_order::RepairOrder;

/// Who may report a repair order completed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionGuard {
    /// Any caller; the completing identity is still recorded
    #[default]
    Open,
    /// Only the authority
    Authority,
}

/// Mutable garage state, captured whole by checkpoints
#[derive(Debug, Clone)]
pub struct GarageState {
    access: RoleBindings,
    orders: BTreeMap<RepairOrderId, RepairOrder>,
    next_order_id: RepairOrderId,
    events: Vec<GarageEvent>,
}

/// The garage service
pub struct GarageService {
    identity: Identity,
    guard: CompletionGuard,
    state: RwLock<GarageState>,
}

impl GarageService {
    pub fn new(identity: Identity, authority: Identity, guard: CompletionGuard) -> Self {
        Self {
            identity,
            guard,
            state: RwLock::new(GarageState {
                access: RoleBindings::with_authority(authority),
                orders: BTreeMap::new(),
                next_order_id: RepairOrderId::FIRST,
                events: Vec::new(),
            }),
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn completion_guard(&self) -> CompletionGuard {
        self.guard
    }

    /// Grants `handling_service` the right to open repair orders
    pub async fn connect_handling_service(
        &self,
        caller: Identity,
        handling_service: Identity,
    ) -> Result<(), ProtocolError> {
        let mut state = self.state.write().await;
        state.access.verify(&caller, Role::Authority)?;
        state.access.bind(Role::HandlingService, handling_service);

        info!(handling_service = %handling_service, "garage connected to handling service");
        Ok(())
    }

    /// Reports a repair order done
    ///
    /// Completing an order twice succeeds but records nothing new.
    pub async fn complete_repair(
        &self,
        caller: Identity,
        order_id: RepairOrderId,
    ) -> Result<(), ProtocolError> {
        let mut state = self.state.write().await;
        if self.guard == CompletionGuard::Authority {
            state.access.verify(&caller, Role::Authority)?;
        }

        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or(ProtocolError::UnknownOrder(order_id))?;
        if !order.complete(caller) {
            debug!(order_id = %order_id, caller = %caller, "repair order already completed");
            return Ok(());
        }

        let claim_id = order.claim_id;
        state.events.push(GarageEvent::RepairCompleted {
            order_id,
            claim_id,
            completed_by: caller,
            timestamp: Utc::now(),
        });

        info!(order_id = %order_id, claim_id = %claim_id, completed_by = %caller, "repair completed");
        Ok(())
    }

    pub async fn order(&self, order_id: RepairOrderId) -> Option<RepairOrder> {
        self.state.read().await.orders.get(&order_id).cloned()
    }

    /// Every order opened for a claim, oldest first
    pub async fn orders_for_claim(&self, claim_id: ClaimId) -> Vec<RepairOrder> {
        self.state
            .read()
            .await
            .orders
            .values()
            .filter(|order| order.claim_id == claim_id)
            .cloned()
            .collect()
    }

    pub async fn events(&self) -> Vec<GarageEvent> {
        self.state.read().await.events.clone()
    }
}

impl DomainPort for GarageService {}

#[async_trait]
impl RepairPort for GarageService {
    fn identity(&self) -> Identity {
        self.identity
    }

    async fn request_repair(
        &self,
        caller: Identity,
        claim_id: ClaimId,
        estimated_cost: Money,
    ) -> Result<RepairOrderId, ProtocolError> {
        let mut state = self.state.write().await;
        state.access.verify(&caller, Role::HandlingService)?;

        if !estimated_cost.is_positive() {
            return Err(ProtocolError::validation("estimated repair cost must be positive"));
        }

        let order_id = state.next_order_id;
        state.next_order_id = order_id
            .next()
            .ok_or(ProtocolError::validation("repair order counter exhausted"))?;

        let order = RepairOrder::open(order_id, claim_id, estimated_cost);
        state.events.push(GarageEvent::RepairRequested {
            order_id,
            claim_id,
            estimated_cost,
            timestamp: order.requested_at,
        });
        state.orders.insert(order_id, order);

        info!(order_id = %order_id, claim_id = %claim_id, estimated_cost = %estimated_cost, "repair requested");
        Ok(order_id)
    }
}

#[async_trait]
impl Journaled for GarageService {
    type Snapshot = GarageState;

    async fn checkpoint(&self) -> GarageState {
        self.state.read().await.clone()
    }

    async fn rollback(&self, snapshot: GarageState) {
        *self.state.write().await = snapshot;
    }
}
