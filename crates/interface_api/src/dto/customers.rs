//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Identity, PolicyKind};
use domain_registry::Customer;

#[derive(Debug, Deserialize, Validate)]
pub struct AddCustomerRequest {
    pub identity: Identity,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub policy_kind: PolicyKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub identity: Identity,
    pub name: String,
    pub policy_kind: PolicyKind,
    pub valid: bool,
    pub registered_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            identity: customer.identity,
            name: customer.name,
            policy_kind: customer.policy_kind,
            valid: customer.valid,
            registered_at: customer.registered_at,
        }
    }
}
