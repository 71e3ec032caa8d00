//! Package service: the operations exposed to request handlers.

use common::PackageId;

use crate::carrier::{Carrier, CarrierDirectory};
use crate::error::DomainError;

use super::{
    CreatePackage, HireCarrier, Package, PackageRepository, PackageStatus, SaveOptions,
    ShippingQuote, UpdateStatus, quote_available_shippings,
};

/// Service for managing packages.
///
/// Loads packages from the store, runs the entity's guarded methods, and
/// saves the result with an optimistic version check so that two racing
/// requests on the same package cannot both succeed.
pub struct PackageService<R, D>
where
    R: PackageRepository,
    D: CarrierDirectory,
{
    packages: R,
    carriers: D,
}

impl<R, D> PackageService<R, D>
where
    R: PackageRepository,
    D: CarrierDirectory,
{
    /// Creates a new package service.
    pub fn new(packages: R, carriers: D) -> Self {
        Self { packages, carriers }
    }

    /// Returns a reference to the package store.
    pub fn packages(&self) -> &R {
        &self.packages
    }

    /// Registers a new package.
    #[tracing::instrument(skip(self))]
    pub async fn create_package(&self, cmd: CreatePackage) -> Result<Package, DomainError> {
        let package = record_outcome(self.try_create_package(cmd).await)?;
        metrics::counter!("packages_created_total").increment(1);
        tracing::info!(
            package_id = %package.id(),
            region = %package.destination_region(),
            "package created"
        );
        Ok(package)
    }

    /// Loads a package by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_package(&self, package_id: PackageId) -> Result<Package, DomainError> {
        record_outcome(self.packages.get_by_id(package_id).await)
    }

    /// Returns every package, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_packages(&self) -> Result<Vec<Package>, DomainError> {
        record_outcome(self.packages.get_all().await)
    }

    /// Returns every carrier in the directory.
    #[tracing::instrument(skip(self))]
    pub async fn list_carriers(&self) -> Result<Vec<Carrier>, DomainError> {
        record_outcome(self.carriers.get_all().await)
    }

    /// Quotes every carrier serving the package's region, fastest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_quotes(
        &self,
        package_id: PackageId,
    ) -> Result<Vec<ShippingQuote>, DomainError> {
        let quotes = record_outcome(self.try_get_quotes(package_id).await)?;
        metrics::counter!("shipping_quotes_total").increment(1);
        tracing::debug!(%package_id, quotes = quotes.len(), "shipping quoted");
        Ok(quotes)
    }

    /// Hires a carrier for a package.
    ///
    /// A package whose carrier is already hired is rejected before the
    /// carrier is looked up, so the conflict wins over an unknown carrier.
    #[tracing::instrument(skip(self))]
    pub async fn hire_carrier(&self, cmd: HireCarrier) -> Result<Package, DomainError> {
        let carrier_id = cmd.carrier_id.clone();
        let package = record_outcome(self.try_hire_carrier(cmd).await)?;
        metrics::counter!("carriers_hired_total").increment(1);
        tracing::info!(
            package_id = %package.id(),
            %carrier_id,
            "carrier hired"
        );
        Ok(package)
    }

    /// Moves a package to another status.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, cmd: UpdateStatus) -> Result<Package, DomainError> {
        let package = record_outcome(self.try_update_status(cmd).await)?;
        metrics::counter!("package_status_updates_total", "status" => package.status().as_str())
            .increment(1);
        tracing::info!(
            package_id = %package.id(),
            status = %package.status(),
            "package status updated"
        );
        Ok(package)
    }
}

impl<R, D> PackageService<R, D>
where
    R: PackageRepository,
    D: CarrierDirectory,
{
    async fn try_create_package(&self, cmd: CreatePackage) -> Result<Package, DomainError> {
        let package = Package::create(cmd.product, cmd.weight_kg, &cmd.state_code)?;
        self.packages
            .save(&package, SaveOptions::expect_new())
            .await?;
        Ok(package)
    }

    async fn try_get_quotes(
        &self,
        package_id: PackageId,
    ) -> Result<Vec<ShippingQuote>, DomainError> {
        let package = self.packages.get_by_id(package_id).await?;
        let carriers = self.carriers.get_all().await?;
        Ok(quote_available_shippings(&package, &carriers)?)
    }

    async fn try_hire_carrier(&self, cmd: HireCarrier) -> Result<Package, DomainError> {
        let mut package = self.packages.get_by_id(cmd.package_id).await?;
        package.ensure_no_carrier()?;

        let carrier = self.carriers.get_by_id(&cmd.carrier_id).await?;
        let loaded_version = package.version();
        package.hire(&carrier)?;

        self.packages
            .save(&package, SaveOptions::expect_version(loaded_version))
            .await?;
        Ok(package)
    }

    async fn try_update_status(&self, cmd: UpdateStatus) -> Result<Package, DomainError> {
        let status: PackageStatus = cmd.status.parse()?;
        let mut package = self.packages.get_by_id(cmd.package_id).await?;
        let loaded_version = package.version();
        package.update_status(status)?;

        self.packages
            .save(&package, SaveOptions::expect_version(loaded_version))
            .await?;
        Ok(package)
    }
}

/// Counts and logs a failed operation, passing the result through.
fn record_outcome<T>(result: Result<T, DomainError>) -> Result<T, DomainError> {
    if let Err(err) = &result {
        let kind = err.kind();
        metrics::counter!("domain_errors_total", "kind" => kind.as_str()).increment(1);
        tracing::warn!(error = %err, %kind, "package operation rejected");
    }
    result
}
