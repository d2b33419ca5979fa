//! Strongly-typed identifiers for network participants and records
//!
//! Participants (customers, the authority, and each service) are identified by
//! UUID-backed [`Identity`] values. Claims and repair orders are numbered from
//! dense monotonic counters starting at 1; zero is reserved for "does not
//! exist" and cannot be represented.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU64, ParseIntError};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

/// Error parsing a sequence identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceIdError {
    #[error("identifier must be a positive integer: {0}")]
    Malformed(#[from] ParseIntError),

    #[error("identifier 0 is reserved")]
    Reserved,
}

macro_rules! define_sequence_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// The first identifier a counter hands out
            pub const FIRST: Self = Self(NonZeroU64::MIN);

            /// Creates an identifier, returning `None` for the reserved value 0
            pub fn new(value: u64) -> Option<Self> {
                NonZeroU64::new(value).map(Self)
            }

            /// Returns the numeric value
            pub fn get(&self) -> u64 {
                self.0.get()
            }

            /// Returns the identifier that follows this one
            pub fn next(&self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = SequenceIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                let value: u64 = digits.parse()?;
                Self::new(value).ok_or(SequenceIdError::Reserved)
            }
        }
    };
}

// Participants
define_id!(Identity, "IDN");

// Records
define_sequence_id!(ClaimId, "CLM");
define_sequence_id!(RepairOrderId, "RPO");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display() {
        let id = Identity::new();
        assert!(id.to_string().starts_with("IDN-"));
    }

    #[test]
    fn test_identity_parsing() {
        let original = Identity::new_v7();
        let parsed: Identity = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_claim_id_zero_is_reserved() {
        assert!(ClaimId::new(0).is_none());
        assert_eq!("0".parse::<ClaimId>(), Err(SequenceIdError::Reserved));
    }

    #[test]
    fn test_claim_id_sequence() {
        let first = ClaimId::FIRST;
        assert_eq!(first.get(), 1);
        assert_eq!(first.next().map(|id| id.get()), Some(2));
        assert_eq!(first.to_string(), "CLM-1");
    }

    #[test]
    fn test_repair_order_id_parsing() {
        assert_eq!("RPO-12".parse::<RepairOrderId>().unwrap().get(), 12);
        assert_eq!("7".parse::<RepairOrderId>().unwrap().get(), 7);
        assert!(matches!(
            "RPO-x".parse::<RepairOrderId>(),
            Err(SequenceIdError::Malformed(_))
        ));
    }
}
