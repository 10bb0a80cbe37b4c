//! Donation amounts with an embedded currency.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Currencies accepted for hosted checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    NGN,
}

impl Currency {
    /// Returns the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::NGN => 2,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NGN => "₦",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A strictly positive donation amount in major currency units.
///
/// The gateway takes amounts as decimals (e.g. `5000.50`), so the value is
/// kept as a [`Decimal`] rather than minor units. Trailing zeros are
/// normalized away and at most [`Currency::decimal_places`] fractional digits
/// are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    value: Decimal,
    currency: Currency,
}

impl Amount {
    /// Creates a new amount in the service currency.
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        let currency = Currency::NGN;

        if value <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount);
        }

        let value = value.normalize();
        if value.scale() > currency.decimal_places() {
            return Err(DomainError::AmountTooPrecise {
                max_places: currency.decimal_places(),
            });
        }

        Ok(Self { value, currency })
    }

    /// Parses an amount from its textual form (`"5000"`, `"2500.50"`, `"1e3"`).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        let value = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| DomainError::InvalidAmount(raw.to_string()))?;
        Self::new(value)
    }

    /// Returns the decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency.symbol(), self.value)
    }
}
