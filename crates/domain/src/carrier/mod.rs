//! Carriers, their regional offers, and shipping price calculation.

mod catalog;
mod directory;

pub use catalog::{CatalogError, default_catalog, load_catalog, parse_catalog};
pub use directory::{CarrierDirectory, InMemoryCarrierDirectory};

use serde::{Deserialize, Serialize};

use crate::package::{Money, ShippingQuote, Weight};
use crate::region::Region;

/// Carrier identifier (e.g. `"nebulix"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierId(String);

impl CarrierId {
    /// Creates a new carrier ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the carrier ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CarrierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CarrierId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CarrierId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A carrier's coverage of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierRegionOffer {
    /// The region served.
    pub region: Region,

    /// Lead time in days, independent of weight.
    pub estimated_days: u32,

    /// Rate charged per kilogram.
    #[serde(rename = "price_per_kg_cents")]
    pub price_per_kg: Money,
}

impl CarrierRegionOffer {
    pub fn new(region: Region, estimated_days: u32, price_per_kg: Money) -> Self {
        Self {
            region,
            estimated_days,
            price_per_kg,
        }
    }

    /// Price for a weight, never less than one kilogram's worth.
    pub fn price_for(&self, weight: Weight) -> Money {
        let price = self.price_per_kg.per_kg(weight);
        if price < self.price_per_kg {
            self.price_per_kg
        } else {
            price
        }
    }
}

/// A transportation provider with per-region offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    id: CarrierId,
    name: String,
    #[serde(rename = "regions")]
    offers: Vec<CarrierRegionOffer>,
}

impl Carrier {
    pub fn new(
        id: impl Into<CarrierId>,
        name: impl Into<String>,
        offers: Vec<CarrierRegionOffer>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            offers,
        }
    }

    pub fn id(&self) -> &CarrierId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offers(&self) -> &[CarrierRegionOffer] {
        &self.offers
    }

    /// Returns the offer for a region. The first matching offer wins.
    pub fn offer_for(&self, region: Region) -> Option<&CarrierRegionOffer> {
        self.offers.iter().find(|offer| offer.region == region)
    }

    /// Returns true if the carrier serves the region.
    pub fn is_available_for_region(&self, region: Region) -> bool {
        self.offer_for(region).is_some()
    }

    /// Calculates price and lead time for a region, or `None` if the
    /// region is not served.
    pub fn calculate_shipping(&self, region: Region, weight: Weight) -> Option<(Money, u32)> {
        self.offer_for(region)
            .map(|offer| (offer.price_for(weight), offer.estimated_days))
    }

    /// Builds a quote for shipping a weight to a region.
    pub fn quote(&self, region: Region, weight: Weight) -> Option<ShippingQuote> {
        self.calculate_shipping(region, weight)
            .map(|(price, days)| ShippingQuote::new(self.id.clone(), &self.name, price, days))
    }
}
