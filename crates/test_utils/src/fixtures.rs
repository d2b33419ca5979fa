//! Pre-built Test Fixtures
//!
//! Consistent amounts and names for tests, plus a one-time tracing
//! subscriber so service logs show up in failing test output.

use fake::faker::name::en::Name;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

use core_kernel::{Currency, Money};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Installs the test log subscriber once per test binary
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The assessment unit test networks deploy with
    pub fn unit() -> Money {
        Money::new(dec!(100), Currency::USD)
    }

    /// A whole number of assessment units
    pub fn units(count: u32) -> Money {
        Self::unit().times(count)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for customer names
pub struct NameFixtures;

impl NameFixtures {
    /// A random realistic customer name
    pub fn customer_name() -> String {
        Name().fake()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_scale_the_unit() {
        assert_eq!(MoneyFixtures::units(7), Money::new(dec!(700), Currency::USD));
        assert!(MoneyFixtures::usd_zero().is_zero());
    }

    #[test]
    fn test_customer_name_is_not_blank() {
        assert!(!NameFixtures::customer_name().trim().is_empty());
    }
}
