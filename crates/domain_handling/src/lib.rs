//! Claims Handling Domain
//!
//! This crate implements the handling side of the settlement network: the
//! deterministic assessment tables, custody of the pooled funds, and the
//! payout protocol that disburses them.
//!
//! # Payout Protocol
//!
//! A payout always runs in the same strict order:
//!
//! 1. Read the registry's live claim snapshot (never a cached copy)
//! 2. Commit the registry's payout checkpoint (`mark_paid`)
//! 3. Debit the pool and transfer through the [`TransferRail`](core_kernel::TransferRail)
//!
//! Because the checkpoint commits before any funds move, a re-entrant or
//! repeated payout for the same claim fails with `InvalidStateForPayment`.
//!
//! # Assessment Tables
//!
//! Amounts are whole multiples of the network's configured unit:
//!
//! | Third-party fault % | Payout   |
//! |---------------------|----------|
//! | 0 - 30              | 7 units  |
//! | 31 - 70             | 3 units  |
//! | above 70            | rejected |
//!
//! | All-risk damage | Garage cost |
//! |-----------------|-------------|
//! | 0 - 30          | 3 units     |
//! | 31 - 60         | 6 units     |
//! | 61 - 80         | 8 units     |
//! | 81 - 100        | 10 units    |
//! | above 100       | rejected    |

pub mod assessment;
pub mod events;
pub mod pool;
pub mod service;

pub use assessment::{assess_all_risk, assess_third_party, Assessment, MAX_UNITS};
pub use events::HandlingEvent;
pub use pool::FundPool;
pub use service::{ClaimsHandlingService, HandlingState};
