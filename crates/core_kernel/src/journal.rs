//! Checkpoint and rollback of service state
//!
//! Top-level invocations are all-or-nothing across every service they touch.
//! Each service exposes its state as a cloneable snapshot; the execution
//! environment checkpoints all services before an invocation and rolls them
//! back together if it fails.

use async_trait::async_trait;

/// A service whose state can be checkpointed and restored
#[async_trait]
pub trait Journaled: Send + Sync {
    /// Captured state; restoring it undoes every mutation made since capture
    type Snapshot: Clone + Send + Sync + 'static;

    /// Captures the current state
    async fn checkpoint(&self) -> Self::Snapshot;

    /// Restores a previously captured state
    async fn rollback(&self, snapshot: Self::Snapshot);
}
