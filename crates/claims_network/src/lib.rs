//! Settlement Network Runtime
//!
//! Deploys the registry, handling and garage services, wires their ports to
//! one another, and serves as the execution environment for every top-level
//! invocation.
//!
//! # Invocation Model
//!
//! - Top-level invocations take turns: none interleaves with another
//! - Each invocation checkpoints all three services before it runs and
//!   restores the checkpoint if it fails, so a failed call leaves nothing
//!   behind (see [`TransferFailurePolicy`] for the one configurable case)
//! - Cross-service calls inside an invocation are awaited in sequence and
//!   may re-enter a service that is already on the call stack
//! - A call back into the network from inside an invocation, such as a
//!   transfer rail's recipient requesting another payout, runs within the
//!   current turn instead of waiting for a new one

pub mod config;
pub mod network;
pub mod rail;

pub use config::{NetworkConfig, TransferFailurePolicy};
pub use network::ClaimsNetwork;
pub use rail::InMemoryRail;
