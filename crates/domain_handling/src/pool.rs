//! Pooled funds held by the handling service

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, ProtocolError};

/// The monetary pool payouts are drawn from
///
/// The pool is only ever credited by funding (or by restoring a debit whose
/// transfer failed) and only ever debited by a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundPool {
    balance: Money,
}

impl FundPool {
    /// Creates an empty pool
    pub fn new(currency: Currency) -> Self {
        Self {
            balance: Money::zero(currency),
        }
    }

    /// Current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Credits an out-of-band deposit and returns the new balance
    pub fn deposit(&mut self, amount: Money) -> Result<Money, ProtocolError> {
        if !amount.is_positive() {
            return Err(ProtocolError::validation("deposit must be positive"));
        }
        self.credit(amount)
    }

    /// Fails with `InsufficientFunds` unless the pool covers `amount`
    pub fn ensure_covers(&self, amount: Money) -> Result<(), ProtocolError> {
        if !self.balance.covers(&amount)? {
            return Err(ProtocolError::InsufficientFunds {
                available: self.balance,
                required: amount,
            });
        }
        Ok(())
    }

    /// Removes a payout from the pool
    pub fn debit(&mut self, amount: Money) -> Result<Money, ProtocolError> {
        self.ensure_covers(amount)?;
        self.balance = self.balance.checked_sub(&amount)?;
        Ok(self.balance)
    }

    /// Returns funds to the pool
    pub fn credit(&mut self, amount: Money) -> Result<Money, ProtocolError> {
        self.balance = self.balance.checked_add(&amount)?;
        Ok(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::MoneyError;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    #[test]
    fn test_deposit_and_debit() {
        let mut pool = FundPool::new(Currency::USD);
        pool.deposit(usd(dec!(100))).unwrap();

        assert_eq!(pool.debit(usd(dec!(70))).unwrap(), usd(dec!(30)));
        assert_eq!(pool.balance(), usd(dec!(30)));
    }

    #[test]
    fn test_debit_beyond_balance() {
        let mut pool = FundPool::new(Currency::USD);
        pool.deposit(usd(dec!(10))).unwrap();

        let result = pool.debit(usd(dec!(10.01)));
        assert_eq!(
            result,
            Err(ProtocolError::InsufficientFunds {
                available: usd(dec!(10)),
                required: usd(dec!(10.01)),
            })
        );
        assert_eq!(pool.balance(), usd(dec!(10)));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut pool = FundPool::new(Currency::USD);

        assert!(matches!(pool.deposit(usd(dec!(0))), Err(ProtocolError::Validation(_))));
        assert!(matches!(pool.deposit(usd(dec!(-5))), Err(ProtocolError::Validation(_))));
    }

    #[test]
    fn test_deposit_rejects_foreign_currency() {
        let mut pool = FundPool::new(Currency::USD);

        let result = pool.deposit(Money::new(dec!(5), Currency::EUR));
        assert!(matches!(
            result,
            Err(ProtocolError::Money(MoneyError::CurrencyMismatch(_, _)))
        ));
    }
}
