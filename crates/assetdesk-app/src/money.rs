// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

pub const DEFAULT_INR_PER_USD: f64 = 83.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub const ALL: [Self; 2] = [Self::Usd, Self::Inr];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Inr => "INR",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Inr => "₹",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "INR" => Some(Self::Inr),
            _ => None,
        }
    }
}

/// An amount in minor units (cents, paise) paired with its currency.
///
/// The two halves never travel apart; aggregation across currencies goes
/// through [`ExchangeRates::convert`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub minor: i64,
    pub currency: Currency,
}

impl Money {
    pub const fn new(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    pub const fn zero(currency: Currency) -> Self {
        Self { minor: 0, currency }
    }

    pub const fn usd(minor: i64) -> Self {
        Self::new(minor, Currency::Usd)
    }

    pub const fn inr(minor: i64) -> Self {
        Self::new(minor, Currency::Inr)
    }

    /// Adds two amounts of the same currency; `None` for mixed currencies.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        Some(Self::new(self.minor.checked_add(other.minor)?, self.currency))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub inr_per_usd: f64,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            inr_per_usd: DEFAULT_INR_PER_USD,
        }
    }
}

impl ExchangeRates {
    pub fn new(inr_per_usd: f64) -> Self {
        Self { inr_per_usd }
    }

    /// Converts to `to`, rounding to the nearest minor unit. Both currencies
    /// carry two decimal places, so only the rate applies.
    pub fn convert(&self, money: Money, to: Currency) -> Money {
        if money.currency == to {
            return money;
        }
        let minor = match to {
            Currency::Inr => (money.minor as f64 * self.inr_per_usd).round() as i64,
            Currency::Usd if self.inr_per_usd <= 0.0 => 0,
            Currency::Usd => (money.minor as f64 / self.inr_per_usd).round() as i64,
        };
        Money::new(minor, to)
    }
}
