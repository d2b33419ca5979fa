//! Garage Domain
//!
//! Bookkeeping for repair orders opened against authorized all-risk claims.
//! Orders are numbered densely from 1 and are only ever marked completed,
//! never removed.

pub mod events;
pub mod repair_order;
pub mod service;

pub use events::GarageEvent;
pub use repair_order::RepairOrder;
pub use service::{CompletionGuard, GarageService, GarageState};
