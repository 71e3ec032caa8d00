//! Value objects for the package domain.

use serde::{Deserialize, Serialize};

use crate::carrier::CarrierId;

use super::PackageError;

/// Money amount represented in cents to avoid floating point issues.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = R$10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole currency units.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after whole units).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies a per-kilogram rate by a weight, rounding to the nearest cent.
    pub fn per_kg(&self, weight: Weight) -> Money {
        let cents = (self.cents as f64 * weight.kg()).round() as i64;
        Money { cents }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-R${}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "R${}.{:02}", self.units(), self.cents_part())
        }
    }
}

/// Package weight in kilograms. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Validates and wraps a weight in kilograms.
    pub fn from_kg(kg: f64) -> Result<Self, PackageError> {
        if kg.is_finite() && kg > 0.0 {
            Ok(Self(kg))
        } else {
            Err(PackageError::InvalidWeight { weight_kg: kg })
        }
    }

    /// Returns the weight in kilograms.
    pub fn kg(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = PackageError;

    fn try_from(kg: f64) -> Result<Self, Self::Error> {
        Self::from_kg(kg)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kg", self.0)
    }
}

/// A carrier's computed price and lead time for a specific package.
///
/// Quotes are only produced by [`Carrier::quote`](crate::Carrier::quote);
/// there is no public constructor and no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    carrier_id: CarrierId,
    carrier_name: String,
    estimated_price: Money,
    estimated_days: u32,
}

impl ShippingQuote {
    pub(crate) fn new(
        carrier_id: CarrierId,
        carrier_name: impl Into<String>,
        estimated_price: Money,
        estimated_days: u32,
    ) -> Self {
        Self {
            carrier_id,
            carrier_name: carrier_name.into(),
            estimated_price,
            estimated_days,
        }
    }

    pub fn carrier_id(&self) -> &CarrierId {
        &self.carrier_id
    }

    pub fn carrier_name(&self) -> &str {
        &self.carrier_name
    }

    pub fn estimated_price(&self) -> Money {
        self.estimated_price
    }

    pub fn estimated_days(&self) -> u32 {
        self.estimated_days
    }
}
