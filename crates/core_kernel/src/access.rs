//! Role-based access control for cross-service calls
//!
//! Every guarded operation asks an [`AccessPolicy`] whether the calling
//! identity holds a role, instead of comparing against a hard-wired address.
//! [`RoleBindings`] is the default policy: one identity per role, assigned
//! explicitly at configuration time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::ProtocolError;
use crate::identifiers::Identity;

/// Roles a caller can hold towards a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Onboards customers, triggers payouts, wires services
    Authority,
    /// The claim registry
    Registry,
    /// The claims handling service
    HandlingService,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Authority => "authority",
            Role::Registry => "registry",
            Role::HandlingService => "handling_service",
        };
        f.write_str(name)
    }
}

/// Decides whether a caller holds a role
pub trait AccessPolicy: Send + Sync {
    /// Returns `Ok(())` if `caller` holds `role`, `Unauthorized` otherwise
    fn verify(&self, caller: &Identity, role: Role) -> Result<(), ProtocolError>;
}

/// Explicit role assignments, one identity per role
///
/// A role with no binding denies every caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBindings {
    bindings: HashMap<Role, Identity>,
}

impl RoleBindings {
    /// Creates bindings with only the authority assigned
    pub fn with_authority(authority: Identity) -> Self {
        let mut bindings = Self::default();
        bindings.bind(Role::Authority, authority);
        bindings
    }

    /// Assigns `identity` to `role`, replacing any previous holder
    pub fn bind(&mut self, role: Role, identity: Identity) -> Option<Identity> {
        self.bindings.insert(role, identity)
    }

    /// Returns the identity bound to `role`, if any
    pub fn holder(&self, role: Role) -> Option<Identity> {
        self.bindings.get(&role).copied()
    }
}

impl AccessPolicy for RoleBindings {
    fn verify(&self, caller: &Identity, role: Role) -> Result<(), ProtocolError> {
        match self.bindings.get(&role) {
            Some(holder) if holder == caller => Ok(()),
            _ => {
                tracing::warn!(caller = %caller, role = %role, "access denied");
                Err(ProtocolError::Unauthorized {
                    caller: *caller,
                    required: role.to_string(),
                })
            }
        }
    }
}
