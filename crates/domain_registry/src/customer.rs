//! Registered customers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Identity, PolicyKind};

/// A customer onboarded by the authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub identity: Identity,
    pub name: String,
    pub policy_kind: PolicyKind,
    /// Only valid customers may submit claims
    pub valid: bool,
    pub registered_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a valid customer record
    pub fn new(identity: Identity, name: impl Into<String>, policy_kind: PolicyKind) -> Self {
        Self {
            identity,
            name: name.into(),
            policy_kind,
            valid: true,
            registered_at: Utc::now(),
        }
    }
}
