//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept exact. Rounding to two decimal places happens only in
//! [`Price::display`], never in stored values.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Quantity;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Exact for catalog prices (see [`MAX_PRICE`](super::MAX_PRICE)); saturates
    /// at `Decimal::MAX` instead of panicking for anything larger.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self {
            amount: self
                .amount
                .saturating_mul(Decimal::from(quantity.get())),
            currency_code: self.currency_code,
        }
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Format for display with exactly two decimals (e.g., "$13.50").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{}",
            self.currency_code.symbol(),
            format_amount(self.amount)
        )
    }
}

/// Format an amount with exactly two decimal places, rounding half away from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn usd(s: &str) -> Price {
        Price::new(Decimal::from_str(s).unwrap(), CurrencyCode::USD)
    }

    #[test]
    fn test_display_pads_to_two_decimals() {
        assert_eq!(usd("13.5").display(), "$13.50");
        assert_eq!(usd("0").display(), "$0.00");
        assert_eq!(usd("7").display(), "$7.00");
    }

    #[test]
    fn test_display_rounds_only_at_presentation() {
        let price = usd("0.125");
        assert_eq!(price.display(), "$0.13");
        assert_eq!(price.amount, Decimal::from_str("0.125").unwrap());
    }

    #[test]
    fn test_times_is_exact() {
        let line = usd("0.1").times(Quantity::new(3).unwrap());
        assert_eq!(line.amount, Decimal::from_str("0.3").unwrap());
    }

    #[test]
    fn test_is_negative() {
        assert!(usd("-0.01").is_negative());
        assert!(!usd("0").is_negative());
        assert!(!usd("-0").is_negative());
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Price::zero(CurrencyCode::GBP).display(), "£0.00");
        assert_eq!(CurrencyCode::EUR.code(), "EUR");
    }
}
