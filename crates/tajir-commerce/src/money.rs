//! Money type for representing monetary values.
//!
//! Amounts are stored in the smallest unit of the currency (whole
//! dinars for IQD, cents for USD) to avoid floating-point precision
//! issues in price calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Iraqi dinar. Priced in whole dinars (no minor unit in practice).
    #[default]
    IQD,
    USD,
    EUR,
    GBP,
    SAR,
    AED,
}

impl Currency {
    /// Get the currency code (e.g., "IQD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::IQD => "IQD",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::SAR => "SAR",
            Currency::AED => "AED",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::IQD => "\u{62f}.\u{639}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::SAR => "SR",
            Currency::AED => "AED",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::IQD => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "IQD" => Some(Currency::IQD),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "SAR" => Some(Currency::SAR),
            "AED" => Some(Currency::AED),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest currency unit as `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Check if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Checked addition. `None` on overflow or currency mismatch.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Checked multiplication by a scalar quantity. `None` on overflow.
    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.amount
            .checked_mul(quantity)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Format for display, e.g. "5000 IQD" or "49.99 USD".
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        if places == 0 {
            format!("{} {}", self.amount, self.currency.code())
        } else {
            let divisor = 10_i64.pow(places);
            format!(
                "{}.{:0width$} {}",
                self.amount / divisor,
                (self.amount % divisor).abs(),
                self.currency.code(),
                width = places as usize
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
