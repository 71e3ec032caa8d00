//! Package entity implementation.

use chrono::{DateTime, Utc};
use common::{PackageId, Version};
use serde::{Deserialize, Serialize};

use crate::carrier::Carrier;
use crate::region::{Region, resolve_region};

use super::{PackageError, PackageStatus, ShippingQuote, Weight};

/// A shipment package.
///
/// Starts in [`PackageStatus::Created`] without a carrier. Hiring a
/// carrier attaches a [`ShippingQuote`] and moves the package to
/// [`PackageStatus::WaitingPickup`]; from then on any status may be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    id: PackageId,

    /// Current version for optimistic concurrency.
    version: Version,

    /// Description of the shipped product.
    product: String,

    weight: Weight,

    destination_region: Region,

    /// Two-letter state code as supplied at creation.
    destination_state: String,

    status: PackageStatus,

    /// The hired carrier's quote, if any.
    shipping: Option<ShippingQuote>,

    created_at: DateTime<Utc>,

    updated_at: DateTime<Utc>,
}

impl Package {
    /// Creates a new package bound for a state.
    ///
    /// Fails if the state code is unknown or the weight is not positive.
    pub fn create(
        product: impl Into<String>,
        weight_kg: f64,
        state_code: &str,
    ) -> Result<Self, PackageError> {
        let destination_region =
            resolve_region(state_code).ok_or_else(|| PackageError::UnknownStateCode {
                state_code: state_code.to_string(),
            })?;
        let weight = Weight::from_kg(weight_kg)?;

        let now = Utc::now();
        Ok(Self {
            id: PackageId::new(),
            version: Version::first(),
            product: product.into(),
            weight,
            destination_region,
            destination_state: state_code.to_string(),
            status: PackageStatus::Created,
            shipping: None,
            created_at: now,
            updated_at: now,
        })
    }
}

// Query methods
impl Package {
    pub fn id(&self) -> PackageId {
        self.id
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn destination_region(&self) -> Region {
        self.destination_region
    }

    pub fn destination_state(&self) -> &str {
        &self.destination_state
    }

    pub fn status(&self) -> PackageStatus {
        self.status
    }

    /// Returns the hired carrier's quote.
    pub fn shipping(&self) -> Option<&ShippingQuote> {
        self.shipping.as_ref()
    }

    /// Returns true if a carrier has been hired.
    pub fn has_carrier(&self) -> bool {
        self.shipping.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// Command methods
impl Package {
    /// Moves the package to a new status.
    ///
    /// Every status except `Created` requires an assigned carrier. The
    /// order of statuses is not checked.
    pub fn update_status(&mut self, status: PackageStatus) -> Result<(), PackageError> {
        if status.requires_carrier() && self.shipping.is_none() {
            return Err(PackageError::CarrierRequired { status });
        }

        self.status = status;
        self.touch();
        Ok(())
    }

    /// Attaches a quote and moves the package to `WaitingPickup`.
    ///
    /// Unconditional: callers that must not overwrite an existing carrier
    /// go through [`Package::hire`].
    pub fn assign_shipping(&mut self, quote: ShippingQuote) {
        self.shipping = Some(quote);
        self.status = PackageStatus::WaitingPickup;
        self.touch();
    }

    /// Fails with `CarrierAlreadyAssigned` if a carrier was hired before.
    pub fn ensure_no_carrier(&self) -> Result<(), PackageError> {
        match &self.shipping {
            Some(quote) => Err(PackageError::CarrierAlreadyAssigned {
                carrier_id: quote.carrier_id().clone(),
            }),
            None => Ok(()),
        }
    }

    /// Hires a carrier: prices the package with it and assigns the quote.
    pub fn hire(&mut self, carrier: &Carrier) -> Result<(), PackageError> {
        self.ensure_no_carrier()?;

        let region = self.destination_region;
        if !carrier.is_available_for_region(region) {
            return Err(PackageError::RegionNotServed {
                carrier_id: carrier.id().clone(),
                region,
            });
        }

        let quote = carrier.quote(region, self.weight).ok_or_else(|| {
            PackageError::ShippingCalculationFailed {
                carrier_id: carrier.id().clone(),
                region,
            }
        })?;

        self.assign_shipping(quote);
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version = self.version.next();
    }
}
