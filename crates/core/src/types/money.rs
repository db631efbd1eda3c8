//! Money representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dong, not hao).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }
}

/// ISO 4217 currency codes accepted for quotations.
///
/// `VND` is the settlement currency and the default for new drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    VND,
    USD,
    EUR,
    JPY,
    KRW,
    CNY,
}

impl CurrencyCode {
    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::VND => "VND",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::JPY => "JPY",
            Self::KRW => "KRW",
            Self::CNY => "CNY",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VND" => Ok(Self::VND),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "JPY" => Ok(Self::JPY),
            "KRW" => Ok(Self::KRW),
            "CNY" => Ok(Self::CNY),
            _ => Err(format!("invalid currency code: {s}")),
        }
    }
}
