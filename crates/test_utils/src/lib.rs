//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim settlement test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data and log capture
//! - `builders`: Deploys a ready-wired network with test-friendly defaults
//! - `rails`: Scripted transfer rails (recording, failing, re-entrant)
//! - `assertions`: Custom assertion helpers for protocol outcomes
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod rails;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use rails::*;
pub use assertions::*;
pub use generators::*;
