//! Claim Registry Domain
//!
//! This crate implements the registry side of the settlement network:
//! customer onboarding, claim submission, and the authoritative claim store
//! that the handling service consults and advances.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> InReview -> Rejected | Approved -> PaidToThirdParty
//!                                   | GarageAuthorized -> PaidToGarage
//! ```
//!
//! Only the configured handling service may resolve a claim (`decision`) or
//! commit its payout checkpoint (`mark_paid`).

pub mod claim;
pub mod customer;
pub mod events;
pub mod registry;

pub use claim::Claim;
pub use customer::Customer;
pub use events::RegistryEvent;
pub use registry::{ClaimRegistry, RegistryState};
