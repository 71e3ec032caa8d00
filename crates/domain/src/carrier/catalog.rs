//! Carrier catalog: the built-in reference data and JSON loading.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::package::Money;
use crate::region::Region;

use super::{Carrier, CarrierId, CarrierRegionOffer};

/// Errors raised while loading a carrier catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read carrier catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed carrier catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Carrier catalog contains an empty carrier id")]
    EmptyCarrierId,

    #[error("Duplicate carrier id in catalog: {0}")]
    DuplicateCarrier(CarrierId),

    #[error("Invalid offer for carrier {carrier_id} in the {region} region: {reason}")]
    InvalidOffer {
        carrier_id: CarrierId,
        region: Region,
        reason: &'static str,
    },
}

/// The reference carrier catalog.
///
/// Nobody serves the north region.
pub fn default_catalog() -> Vec<Carrier> {
    vec![
        Carrier::new(
            "nebulix",
            "Nebulix Logística",
            vec![
                CarrierRegionOffer::new(Region::South, 4, Money::from_cents(590)),
                CarrierRegionOffer::new(Region::Southeast, 4, Money::from_cents(590)),
            ],
        ),
        Carrier::new(
            "rotafacil",
            "RotaFácil Transportes",
            vec![
                CarrierRegionOffer::new(Region::South, 7, Money::from_cents(435)),
                CarrierRegionOffer::new(Region::Southeast, 7, Money::from_cents(435)),
                CarrierRegionOffer::new(Region::Midwest, 9, Money::from_cents(622)),
                CarrierRegionOffer::new(Region::Northeast, 13, Money::from_cents(800)),
            ],
        ),
        Carrier::new(
            "moventra",
            "Moventra Express",
            vec![
                CarrierRegionOffer::new(Region::Midwest, 7, Money::from_cents(730)),
                CarrierRegionOffer::new(Region::Northeast, 10, Money::from_cents(950)),
            ],
        ),
    ]
}

/// Parses and validates a JSON catalog.
///
/// The document is an array of carriers:
/// `[{"id": "...", "name": "...", "regions": [{"region": "south",
/// "estimated_days": 4, "price_per_kg_cents": 590}]}]`.
pub fn parse_catalog(json: &str) -> Result<Vec<Carrier>, CatalogError> {
    let carriers: Vec<Carrier> = serde_json::from_str(json)?;
    validate(&carriers)?;
    Ok(carriers)
}

/// Reads a JSON catalog from disk.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Carrier>, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    parse_catalog(&contents)
}

fn validate(carriers: &[Carrier]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for carrier in carriers {
        if carrier.id().as_str().is_empty() {
            return Err(CatalogError::EmptyCarrierId);
        }
        if !seen.insert(carrier.id()) {
            return Err(CatalogError::DuplicateCarrier(carrier.id().clone()));
        }
        for offer in carrier.offers() {
            let reason = if offer.estimated_days == 0 {
                Some("estimated days must be positive")
            } else if offer.price_per_kg.is_negative() {
                Some("price per kg must not be negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(CatalogError::InvalidOffer {
                    carrier_id: carrier.id().clone(),
                    region: offer.region,
                    reason,
                });
            }
        }
    }
    Ok(())
}
