//! Carrier directory trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DomainError;

use super::{Carrier, CarrierId, default_catalog};

/// Source of carrier data.
///
/// Carriers are returned in catalog order; quoting relies on that order
/// to break ties between equal lead times.
#[async_trait]
pub trait CarrierDirectory: Send + Sync {
    /// Returns every carrier in the catalog.
    async fn get_all(&self) -> Result<Vec<Carrier>, DomainError>;

    /// Returns a carrier by ID, or `CarrierNotFound`.
    async fn get_by_id(&self, id: &CarrierId) -> Result<Carrier, DomainError>;
}

/// Directory serving a fixed catalog held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCarrierDirectory {
    carriers: Arc<Vec<Carrier>>,
}

impl InMemoryCarrierDirectory {
    /// Creates a directory over the given catalog.
    pub fn new(carriers: Vec<Carrier>) -> Self {
        Self {
            carriers: Arc::new(carriers),
        }
    }
}

impl Default for InMemoryCarrierDirectory {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

#[async_trait]
impl CarrierDirectory for InMemoryCarrierDirectory {
    async fn get_all(&self) -> Result<Vec<Carrier>, DomainError> {
        Ok(self.carriers.as_ref().clone())
    }

    async fn get_by_id(&self, id: &CarrierId) -> Result<Carrier, DomainError> {
        self.carriers
            .iter()
            .find(|carrier| carrier.id() == id)
            .cloned()
            .ok_or_else(|| DomainError::CarrierNotFound(id.clone()))
    }
}
