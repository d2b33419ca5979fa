//! Scripted Transfer Rails
//!
//! Rails that record what they were asked to move and can be told to fail
//! or to call back into the network from inside a transfer.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use claims_network::ClaimsNetwork;
use core_kernel::{
    ClaimId, ClaimPayoutInfo, DomainPort, Identity, Money, ProtocolError, TransferError,
    TransferRail,
};

/// A transfer the rail settled
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTransfer {
    pub recipient: Identity,
    pub amount: Money,
}

/// Rail that records every settled transfer
#[derive(Debug, Default)]
pub struct RecordingRail {
    transfers: Mutex<Vec<RecordedTransfer>>,
    refusing: Mutex<HashSet<Identity>>,
    fail_all: AtomicBool,
}

impl RecordingRail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every transfer settled so far, oldest first
    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.transfers.lock().unwrap().clone()
    }

    /// Transfers settled to `recipient`
    pub fn transfers_to(&self, recipient: Identity) -> Vec<RecordedTransfer> {
        self.transfers()
            .into_iter()
            .filter(|transfer| transfer.recipient == recipient)
            .collect()
    }

    /// Makes every transfer to `recipient` fail
    pub fn refuse(&self, recipient: Identity) {
        self.refusing.lock().unwrap().insert(recipient);
    }

    /// Makes every transfer fail (or succeed again)
    pub fn fail_all(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    fn settle(&self, recipient: Identity, amount: Money) -> Result<(), TransferError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(TransferError::new("rail offline"));
        }
        if self.refusing.lock().unwrap().contains(&recipient) {
            return Err(TransferError::new(format!("{recipient} refused the transfer")));
        }

        self.transfers
            .lock()
            .unwrap()
            .push(RecordedTransfer { recipient, amount });
        Ok(())
    }
}

impl DomainPort for RecordingRail {}

#[async_trait]
impl TransferRail for RecordingRail {
    async fn transfer(&self, recipient: Identity, amount: Money) -> Result<(), TransferError> {
        self.settle(recipient, amount)
    }
}

/// Payout a [`ReentrantRail`] attempts from inside a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reentry {
    ThirdParty,
    Garage { recipient: Identity },
}

struct ArmedReentry {
    network: Arc<ClaimsNetwork>,
    caller: Identity,
    claim_id: ClaimId,
    route: Reentry,
}

/// Rail whose recipient reacts to incoming funds by requesting the same
/// payout again, through the network, before the transfer settles
///
/// The rail is armed once the network is deployed and fires on the next
/// transfer only. Firing drops its handle on the network.
#[derive(Default)]
pub struct ReentrantRail {
    ledger: RecordingRail,
    armed: Mutex<Option<ArmedReentry>>,
    outcomes: Mutex<Vec<Result<(), ProtocolError>>>,
    observed: Mutex<Vec<Result<ClaimPayoutInfo, ProtocolError>>>,
}

impl ReentrantRail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the rail to re-request a payout of `claim_id` as `caller`
    pub fn arm(
        &self,
        network: Arc<ClaimsNetwork>,
        caller: Identity,
        claim_id: ClaimId,
        route: Reentry,
    ) {
        *self.armed.lock().unwrap() = Some(ArmedReentry {
            network,
            caller,
            claim_id,
            route,
        });
    }

    /// Results of the re-entrant payout attempts
    pub fn outcomes(&self) -> Vec<Result<(), ProtocolError>> {
        self.outcomes.lock().unwrap().clone()
    }

    /// Claim snapshots the recipient read from inside the transfer
    pub fn observed(&self) -> Vec<Result<ClaimPayoutInfo, ProtocolError>> {
        self.observed.lock().unwrap().clone()
    }

    /// Transfers that actually settled
    pub fn ledger(&self) -> &RecordingRail {
        &self.ledger
    }
}

impl DomainPort for ReentrantRail {}

#[async_trait]
impl TransferRail for ReentrantRail {
    async fn transfer(&self, recipient: Identity, amount: Money) -> Result<(), TransferError> {
        let armed = self.armed.lock().unwrap().take();
        if let Some(reentry) = armed {
            let network = reentry.network;
            let observed = network.claim_payout_info(reentry.claim_id).await;
            self.observed.lock().unwrap().push(observed);

            let outcome = match reentry.route {
                Reentry::ThirdParty => network.pay_to_third(reentry.caller, reentry.claim_id).await,
                Reentry::Garage { recipient: garage } => {
                    network
                        .pay_to_garage(reentry.caller, reentry.claim_id, garage)
                        .await
                }
            };
            self.outcomes.lock().unwrap().push(outcome);
        }

        self.ledger.settle(recipient, amount)
    }
}
