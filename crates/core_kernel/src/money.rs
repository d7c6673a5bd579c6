//! Money types with precise decimal arithmetic
//!
//! Claim amounts are hourly rates multiplied by fractional hours, so every
//! monetary value is carried as a `rust_decimal::Decimal` tagged with its
//! currency. No floating-point value ever touches an amount.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// South African rand, the currency lecturers are paid in
    #[default]
    ZAR,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ZAR => "R",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ZAR => "ZAR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// The amount is kept exactly as given; rounding to the currency's decimal
/// places happens only when the value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a rand amount
    pub fn zar(amount: Decimal) -> Self {
        Self::new(amount, Currency::ZAR)
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Multiplies by a scalar, e.g. an hourly rate by a number of hours
    pub fn checked_mul(&self, factor: Decimal) -> Result<Money, MoneyError> {
        let product = self
            .amount
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(product, self.currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
            dp = dp as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_creation() {
        let m = Money::zar(dec!(500.50));
        assert_eq!(m.amount(), dec!(500.50));
        assert_eq!(m.currency(), Currency::ZAR);
    }

    #[test]
    fn test_rate_times_hours() {
        let rate = Money::zar(dec!(450));
        let amount = rate.checked_mul(dec!(8)).unwrap();
        assert_eq!(amount.amount(), dec!(3600));
    }

    #[test]
    fn test_fractional_product_is_kept_exactly() {
        let rate = Money::zar(dec!(0.333));
        let amount = rate.checked_mul(dec!(0.333)).unwrap();
        assert_eq!(amount.amount(), dec!(0.110889));

        let rate = Money::zar(dec!(100.00005));
        assert_eq!(rate.amount(), dec!(100.00005));
        assert_eq!(rate.checked_mul(dec!(10)).unwrap().amount(), dec!(1000.0005));
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = Money::zar(Decimal::MAX);
        assert_eq!(big.checked_mul(dec!(2)), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_display_uses_symbol() {
        let m = Money::zar(dec!(6000));
        assert_eq!(m.to_string(), "R 6000.00");
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Money::zar(dec!(0.110889)).to_string(), "R 0.11");
        assert_eq!(Money::zar(dec!(1000.0051)).to_string(), "R 1000.01");
    }
}
