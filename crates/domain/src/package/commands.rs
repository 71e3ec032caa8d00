//! Package commands.

use common::PackageId;

use crate::carrier::CarrierId;

/// Command to register a new package.
#[derive(Debug, Clone)]
pub struct CreatePackage {
    /// Description of the shipped product.
    pub product: String,

    /// Weight in kilograms.
    pub weight_kg: f64,

    /// Two-letter destination state code.
    pub state_code: String,
}

impl CreatePackage {
    /// Creates a new CreatePackage command.
    pub fn new(product: impl Into<String>, weight_kg: f64, state_code: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            weight_kg,
            state_code: state_code.into(),
        }
    }
}

/// Command to hire a carrier for a package.
#[derive(Debug, Clone)]
pub struct HireCarrier {
    pub package_id: PackageId,
    pub carrier_id: CarrierId,
}

impl HireCarrier {
    /// Creates a new HireCarrier command.
    pub fn new(package_id: PackageId, carrier_id: impl Into<CarrierId>) -> Self {
        Self {
            package_id,
            carrier_id: carrier_id.into(),
        }
    }
}

/// Command to move a package to another status.
///
/// The status is kept raw so that unknown values are rejected by the
/// domain with the same error as every other invalid input.
#[derive(Debug, Clone)]
pub struct UpdateStatus {
    pub package_id: PackageId,
    pub status: String,
}

impl UpdateStatus {
    /// Creates a new UpdateStatus command.
    pub fn new(package_id: PackageId, status: impl Into<String>) -> Self {
        Self {
            package_id,
            status: status.into(),
        }
    }
}
