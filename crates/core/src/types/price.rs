//! Type-safe price representation in integer minor units.
//!
//! Prices are stored as a count of the currency's smallest unit (cents for
//! USD) so that totals never accumulate floating-point error. A
//! [`rust_decimal::Decimal`] view is available for display.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's minor unit (e.g., cents, not dollars).
    amount_minor: u64,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn from_minor(amount_minor: u64, currency_code: CurrencyCode) -> Self {
        Self {
            amount_minor,
            currency_code,
        }
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::from_minor(0, currency_code)
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn amount_minor(&self) -> u64 {
        self.amount_minor
    }

    /// Currency of this price.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Amount in the currency's standard unit (e.g., dollars).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::from_i128_with_scale(
            i128::from(self.amount_minor),
            self.currency_code.minor_digits(),
        )
    }

    /// Price of `quantity` units, saturating at `u64::MAX` minor units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::from_minor(
            self.amount_minor.saturating_mul(u64::from(quantity)),
            self.currency_code,
        )
    }

    /// Add two prices of the same currency.
    ///
    /// Returns `None` if the currencies differ. The sum saturates.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        (self.currency_code == other.currency_code).then(|| {
            Self::from_minor(
                self.amount_minor.saturating_add(other.amount_minor),
                self.currency_code,
            )
        })
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.amount())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
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
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 alphabetic code.
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

    /// Number of digits in the minor unit.
    #[must_use]
    pub const fn minor_digits(self) -> u32 {
        2
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}
