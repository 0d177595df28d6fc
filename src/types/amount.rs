//! Validated monetary amounts
//!
//! Deposits and withdrawals only accept strictly positive amounts. Balances
//! and running totals stay plain `Decimal`s.

use super::error::BankError;
use rust_decimal::Decimal;
use std::fmt;

/// A strictly positive amount of money for a deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Validate a raw value
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidAmount` for zero or negative values.
    pub fn new(value: Decimal) -> Result<Self, BankError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BankError::invalid_amount(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = BankError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
