//! Package entity and related types.

mod commands;
mod entity;
mod quoting;
mod repository;
mod service;
mod state;
mod value_objects;

pub use commands::{CreatePackage, HireCarrier, UpdateStatus};
pub use entity::Package;
pub use quoting::quote_available_shippings;
pub use repository::{InMemoryPackageRepository, PackageRepository, SaveOptions};
pub use service::PackageService;
pub use state::PackageStatus;
pub use value_objects::{Money, ShippingQuote, Weight};

use thiserror::Error;

use crate::carrier::CarrierId;
use crate::error::ErrorKind;
use crate::region::Region;

/// Errors that can occur during package operations.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The destination state code is not in the region table.
    #[error("Unknown destination state: {state_code}")]
    UnknownStateCode { state_code: String },

    /// Weight is zero, negative or not a number.
    #[error("Invalid weight: {weight_kg} kg (must be greater than 0)")]
    InvalidWeight { weight_kg: f64 },

    /// The requested status is not one of the known statuses.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// The status needs a carrier and none is assigned.
    #[error("Package cannot be marked as '{status}' without a carrier assigned")]
    CarrierRequired { status: PackageStatus },

    /// A carrier was already hired for this package.
    #[error("Package already has a carrier: {carrier_id}")]
    CarrierAlreadyAssigned { carrier_id: CarrierId },

    /// The carrier has no offer for the package's destination region.
    #[error("Carrier {carrier_id} does not serve the {region} region")]
    RegionNotServed { carrier_id: CarrierId, region: Region },

    /// A carrier reported a region as served but could not price it.
    #[error("Failed to calculate shipping for carrier {carrier_id} in the {region} region")]
    ShippingCalculationFailed { carrier_id: CarrierId, region: Region },
}

impl PackageError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PackageError::UnknownStateCode { .. }
            | PackageError::InvalidWeight { .. }
            | PackageError::InvalidStatus { .. }
            | PackageError::CarrierRequired { .. }
            | PackageError::RegionNotServed { .. } => ErrorKind::InvalidInput,
            PackageError::CarrierAlreadyAssigned { .. } => ErrorKind::Conflict,
            PackageError::ShippingCalculationFailed { .. } => ErrorKind::Internal,
        }
    }
}
