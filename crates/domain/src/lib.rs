//! Domain layer for the package manager.
//!
//! This crate provides:
//! - Region resolution from destination state codes
//! - Carrier catalog, directory, and shipping price calculation
//! - Package entity with its guarded status transitions
//! - Quoting and carrier hiring through `PackageService`

pub mod carrier;
pub mod error;
pub mod package;
pub mod region;

pub use carrier::{
    Carrier, CarrierDirectory, CarrierId, CarrierRegionOffer, CatalogError,
    InMemoryCarrierDirectory, default_catalog, load_catalog, parse_catalog,
};
pub use error::{DomainError, ErrorKind, VersionExpectation};
pub use package::{
    CreatePackage, HireCarrier, InMemoryPackageRepository, Money, Package, PackageError,
    PackageRepository, PackageService, PackageStatus, SaveOptions, ShippingQuote, UpdateStatus,
    Weight, quote_available_shippings,
};
pub use region::{Region, STATE_REGIONS, resolve_region};
