//! Package status state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PackageError;

/// The status of a package in its lifecycle.
///
/// Nominal flow:
/// ```text
/// Created ──► WaitingPickup ──► Collected ──► Shipped ──► Delivered
///                  │                │            │
///                  └────────────────┴────────────┴──► Lost
/// ```
///
/// Only the carrier-presence guard is enforced: any status other than
/// `Created` needs an assigned carrier, and no ordering between statuses
/// is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    /// Package registered, no carrier hired yet.
    #[default]
    Created,

    /// Carrier hired, waiting for pickup.
    WaitingPickup,

    /// Collected by the carrier.
    Collected,

    /// In transit.
    Shipped,

    /// Delivered to the recipient.
    Delivered,

    /// Lost in transit.
    Lost,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 6] = [
        PackageStatus::Created,
        PackageStatus::WaitingPickup,
        PackageStatus::Collected,
        PackageStatus::Shipped,
        PackageStatus::Delivered,
        PackageStatus::Lost,
    ];

    /// Returns true if a package must have a carrier assigned to enter this status.
    pub fn requires_carrier(&self) -> bool {
        !matches!(self, PackageStatus::Created)
    }

    /// Returns true for statuses after which nothing is expected to happen.
    ///
    /// Informational only; transitions out of these statuses are not rejected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PackageStatus::Delivered | PackageStatus::Lost)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageStatus::Created => "created",
            PackageStatus::WaitingPickup => "waiting_pickup",
            PackageStatus::Collected => "collected",
            PackageStatus::Shipped => "shipped",
            PackageStatus::Delivered => "delivered",
            PackageStatus::Lost => "lost",
        }
    }
}

impl std::fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| PackageError::InvalidStatus {
                status: s.to_string(),
            })
    }
}
