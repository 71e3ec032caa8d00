//! Carrier catalog endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::{Carrier, CarrierDirectory, PackageRepository};
use serde::Serialize;

use super::packages::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct CarrierOfferResponse {
    pub region: String,
    pub estimated_days: u32,
    pub price_per_kg_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct CarrierResponse {
    pub id: String,
    pub name: String,
    pub regions: Vec<CarrierOfferResponse>,
}

impl From<&Carrier> for CarrierResponse {
    fn from(carrier: &Carrier) -> Self {
        Self {
            id: carrier.id().to_string(),
            name: carrier.name().to_string(),
            regions: carrier
                .offers()
                .iter()
                .map(|offer| CarrierOfferResponse {
                    region: offer.region.to_string(),
                    estimated_days: offer.estimated_days,
                    price_per_kg_cents: offer.price_per_kg.cents(),
                })
                .collect(),
        }
    }
}

/// GET /carriers — list the carrier catalog.
#[tracing::instrument(skip(state))]
pub async fn list<R, D>(
    State(state): State<Arc<AppState<R, D>>>,
) -> Result<Json<Vec<CarrierResponse>>, ApiError>
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    let carriers = state.package_service.list_carriers().await?;
    Ok(Json(carriers.iter().map(CarrierResponse::from).collect()))
}
