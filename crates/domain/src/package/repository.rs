//! Package store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{PackageId, Version};
use tokio::sync::RwLock;

use crate::error::{DomainError, VersionExpectation};

use super::Package;

/// Options for saving a package.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Expected stored version for optimistic concurrency control.
    /// If None, no version check is performed (use with caution).
    pub expected_version: Option<VersionExpectation>,
}

impl SaveOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the package to be stored at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(VersionExpectation::At(version)),
        }
    }

    /// Expects the package not to be stored yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(VersionExpectation::Absent),
        }
    }
}

/// Storage for packages, keyed by ID.
///
/// Implementations must make the version check and the write of
/// [`PackageRepository::save`] atomic with respect to other saves of the
/// same package.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Stores the package, replacing any previous value with the same ID.
    ///
    /// Fails with `ConcurrencyConflict` if `options.expected_version` does
    /// not match what is currently stored.
    async fn save(&self, package: &Package, options: SaveOptions) -> Result<(), DomainError>;

    /// Returns a package by ID, or `PackageNotFound`.
    async fn get_by_id(&self, id: PackageId) -> Result<Package, DomainError>;

    /// Returns every stored package, oldest first.
    async fn get_all(&self) -> Result<Vec<Package>, DomainError>;
}

/// In-memory package store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPackageRepository {
    packages: Arc<RwLock<HashMap<PackageId, Package>>>,
}

impl InMemoryPackageRepository {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored packages.
    pub async fn package_count(&self) -> usize {
        self.packages.read().await.len()
    }

    /// Removes every package.
    pub async fn clear(&self) {
        self.packages.write().await.clear();
    }
}

#[async_trait]
impl PackageRepository for InMemoryPackageRepository {
    async fn save(&self, package: &Package, options: SaveOptions) -> Result<(), DomainError> {
        let mut packages = self.packages.write().await;

        let actual = match packages.get(&package.id()) {
            Some(stored) => VersionExpectation::At(stored.version()),
            None => VersionExpectation::Absent,
        };

        if let Some(expected) = options.expected_version
            && expected != actual
        {
            return Err(DomainError::ConcurrencyConflict {
                package_id: package.id(),
                expected,
                actual,
            });
        }

        packages.insert(package.id(), package.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: PackageId) -> Result<Package, DomainError> {
        self.packages
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DomainError::PackageNotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Package>, DomainError> {
        let mut packages: Vec<_> = self.packages.read().await.values().cloned().collect();
        packages.sort_by_key(|p| p.created_at());
        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::default_catalog;
    use crate::package::PackageStatus;

    fn package() -> Package {
        Package::create("Livros", 3.2, "PE").unwrap()
    }

    #[tokio::test]
    async fn test_save_and_get_roundtrip() {
        let store = InMemoryPackageRepository::new();
        let package = package();

        store.save(&package, SaveOptions::expect_new()).await.unwrap();

        let loaded = store.get_by_id(package.id()).await.unwrap();
        assert_eq!(loaded, package);
    }

    #[tokio::test]
    async fn test_roundtrip_after_mutation() {
        let store = InMemoryPackageRepository::new();
        let mut package = package();
        store.save(&package, SaveOptions::expect_new()).await.unwrap();

        let loaded_version = package.version();
        package.hire(&default_catalog()[1]).unwrap();
        package.update_status(PackageStatus::Shipped).unwrap();
        store
            .save(&package, SaveOptions::expect_version(loaded_version))
            .await
            .unwrap();

        let loaded = store.get_by_id(package.id()).await.unwrap();
        assert_eq!(loaded, package);
        assert_eq!(loaded.status(), PackageStatus::Shipped);
        assert_eq!(loaded.shipping().unwrap().carrier_id().as_str(), "rotafacil");
    }

    #[tokio::test]
    async fn test_get_missing_package() {
        let store = InMemoryPackageRepository::new();
        let id = PackageId::new();
        let result = store.get_by_id(id).await;
        assert!(matches!(result, Err(DomainError::PackageNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_stale_save_is_rejected() {
        let store = InMemoryPackageRepository::new();
        let package = package();
        store.save(&package, SaveOptions::expect_new()).await.unwrap();

        let mut first = store.get_by_id(package.id()).await.unwrap();
        let mut second = store.get_by_id(package.id()).await.unwrap();
        let loaded_version = first.version();

        first.hire(&default_catalog()[1]).unwrap();
        second.hire(&default_catalog()[2]).unwrap();

        store
            .save(&first, SaveOptions::expect_version(loaded_version))
            .await
            .unwrap();
        let result = store
            .save(&second, SaveOptions::expect_version(loaded_version))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::ConcurrencyConflict {
                expected: VersionExpectation::At(v1),
                actual: VersionExpectation::At(v2),
                ..
            }) if v1 == Version::first() && v2 == Version::new(2)
        ));
        let stored = store.get_by_id(package.id()).await.unwrap();
        assert_eq!(stored.shipping().unwrap().carrier_id().as_str(), "rotafacil");
    }

    #[tokio::test]
    async fn test_expect_new_rejects_existing() {
        let store = InMemoryPackageRepository::new();
        let package = package();
        store.save(&package, SaveOptions::expect_new()).await.unwrap();

        let result = store.save(&package, SaveOptions::expect_new()).await;
        assert!(matches!(
            result,
            Err(DomainError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_unchecked_save_overwrites() {
        let store = InMemoryPackageRepository::new();
        let package = package();
        store.save(&package, SaveOptions::new()).await.unwrap();
        store.save(&package, SaveOptions::new()).await.unwrap();
        assert_eq!(store.package_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_all_oldest_first() {
        let store = InMemoryPackageRepository::new();
        let first = package();
        let second = Package::create("Ferramentas", 8.7, "AM").unwrap();
        store.save(&second, SaveOptions::expect_new()).await.unwrap();
        store.save(&first, SaveOptions::expect_new()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at() <= all[1].created_at());

        store.clear().await;
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
