//! Domain error types.

use common::{PackageId, Version};
use thiserror::Error;

use crate::carrier::CarrierId;
use crate::package::PackageError;

/// Broad category of a domain failure, with an HTTP-like status hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// Status code a request-handling layer should report for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A package rule was violated.
    #[error(transparent)]
    Package(#[from] PackageError),

    /// No package with this ID exists in the store.
    #[error("Package not found: {0}")]
    PackageNotFound(PackageId),

    /// No carrier with this ID exists in the directory.
    #[error("Carrier not found: {0}")]
    CarrierNotFound(CarrierId),

    /// The stored package changed between load and save.
    #[error(
        "Concurrency conflict for package {package_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        package_id: PackageId,
        expected: VersionExpectation,
        actual: VersionExpectation,
    },
}

impl DomainError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Package(err) => err.kind(),
            DomainError::PackageNotFound(_) | DomainError::CarrierNotFound(_) => {
                ErrorKind::NotFound
            }
            DomainError::ConcurrencyConflict { .. } => ErrorKind::Conflict,
        }
    }
}

/// Version state of a stored package, as seen by a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionExpectation {
    /// The package is not in the store.
    Absent,
    /// The package is stored at this version.
    At(Version),
}

impl std::fmt::Display for VersionExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionExpectation::Absent => write!(f, "none"),
            VersionExpectation::At(version) => write!(f, "{version}"),
        }
    }
}
