//! In-process transfer rail

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, Identity, Money, TransferError, TransferRail};

#[derive(Debug, Default)]
struct Ledger {
    balances: HashMap<Identity, Money>,
    refusing: HashSet<Identity>,
    transfers: usize,
}

/// Transfer rail that credits balances held in memory
///
/// Recipients can be marked as refusing, which makes every transfer to them
/// fail without moving anything.
#[derive(Debug, Default)]
pub struct InMemoryRail {
    ledger: RwLock<Ledger>,
}

impl InMemoryRail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total received by `recipient`, if anything
    pub async fn balance_of(&self, recipient: Identity) -> Option<Money> {
        self.ledger.read().await.balances.get(&recipient).copied()
    }

    /// Number of successful transfers
    pub async fn transfer_count(&self) -> usize {
        self.ledger.read().await.transfers
    }

    /// Makes transfers to `recipient` fail (or succeed again)
    pub async fn set_refusing(&self, recipient: Identity, refusing: bool) {
        let mut ledger = self.ledger.write().await;
        if refusing {
            ledger.refusing.insert(recipient);
        } else {
            ledger.refusing.remove(&recipient);
        }
    }
}

impl DomainPort for InMemoryRail {}

#[async_trait]
impl TransferRail for InMemoryRail {
    async fn transfer(&self, recipient: Identity, amount: Money) -> Result<(), TransferError> {
        let mut ledger = self.ledger.write().await;
        if ledger.refusing.contains(&recipient) {
            return Err(TransferError::new(format!("{recipient} refused the transfer")));
        }

        let balance = match ledger.balances.get(&recipient) {
            Some(balance) => balance
                .checked_add(&amount)
                .map_err(|error| TransferError::new(error.to_string()))?,
            None => amount,
        };
        ledger.balances.insert(recipient, balance);
        ledger.transfers += 1;

        debug!(recipient = %recipient, amount = %amount, balance = %balance, "rail transfer settled");
        Ok(())
    }
}
