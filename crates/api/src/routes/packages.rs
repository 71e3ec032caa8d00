//! Package, quoting and carrier hiring endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::PackageId;
use domain::{
    CarrierDirectory, CreatePackage, HireCarrier, Package, PackageRepository, PackageService,
    ShippingQuote, UpdateStatus,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Heaviest package accepted, in kilograms.
pub const MAX_WEIGHT_KG: f64 = 1000.0;

/// Shared application state accessible from all handlers.
pub struct AppState<R: PackageRepository, D: CarrierDirectory> {
    pub package_service: PackageService<R, D>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreatePackageRequest {
    pub product: String,
    pub weight_kg: f64,
    pub state_code: String,
}

impl CreatePackageRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let product_len = self.product.trim().chars().count();
        if !(2..=100).contains(&product_len) {
            return Err(ApiError::BadRequest(
                "product must be between 2 and 100 characters".to_string(),
            ));
        }
        if !(self.weight_kg > 0.0 && self.weight_kg <= MAX_WEIGHT_KG) {
            return Err(ApiError::BadRequest(format!(
                "weight_kg must be greater than 0 and at most {MAX_WEIGHT_KG}"
            )));
        }
        if self.state_code.len() != 2 || !self.state_code.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ApiError::BadRequest(
                "state_code must be a two-letter code".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct HireCarrierRequest {
    pub package_id: String,
    pub carrier_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub package_id: String,
    pub status: String,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct PackageCreatedResponse {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ShippingQuoteResponse {
    pub carrier_id: String,
    pub carrier_name: String,
    pub estimated_price_cents: i64,
    pub estimated_days: u32,
}

impl From<&ShippingQuote> for ShippingQuoteResponse {
    fn from(quote: &ShippingQuote) -> Self {
        Self {
            carrier_id: quote.carrier_id().to_string(),
            carrier_name: quote.carrier_name().to_string(),
            estimated_price_cents: quote.estimated_price().cents(),
            estimated_days: quote.estimated_days(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackageResponse {
    pub id: String,
    pub product: String,
    pub weight_kg: f64,
    pub destination_state: String,
    pub destination_region: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingQuoteResponse>,
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Package> for PackageResponse {
    fn from(package: &Package) -> Self {
        Self {
            id: package.id().to_string(),
            product: package.product().to_string(),
            weight_kg: package.weight().kg(),
            destination_state: package.destination_state().to_string(),
            destination_region: package.destination_region().to_string(),
            status: package.status().to_string(),
            shipping: package.shipping().map(ShippingQuoteResponse::from),
            version: package.version().as_u64(),
            created_at: package.created_at().to_rfc3339(),
            updated_at: package.updated_at().to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /packages — register a new package.
#[tracing::instrument(skip(state))]
pub async fn create<R, D>(
    State(state): State<Arc<AppState<R, D>>>,
    Json(req): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<PackageCreatedResponse>), ApiError>
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    req.validate()?;

    let package = state
        .package_service
        .create_package(CreatePackage::new(
            req.product.trim(),
            req.weight_kg,
            req.state_code,
        ))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PackageCreatedResponse {
            id: package.id().to_string(),
            status: package.status().to_string(),
        }),
    ))
}

/// GET /packages — list every package.
#[tracing::instrument(skip(state))]
pub async fn list<R, D>(
    State(state): State<Arc<AppState<R, D>>>,
) -> Result<Json<Vec<PackageResponse>>, ApiError>
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    let packages = state.package_service.list_packages().await?;
    Ok(Json(packages.iter().map(PackageResponse::from).collect()))
}

/// GET /packages/:id — load a package by ID.
#[tracing::instrument(skip(state))]
pub async fn get<R, D>(
    State(state): State<Arc<AppState<R, D>>>,
    Path(id): Path<String>,
) -> Result<Json<PackageResponse>, ApiError>
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    let package_id = parse_package_id(&id)?;
    let package = state.package_service.get_package(package_id).await?;
    Ok(Json(PackageResponse::from(&package)))
}

/// POST /packages/:id/quote — quote every carrier serving the package, fastest first.
#[tracing::instrument(skip(state))]
pub async fn quote<R, D>(
    State(state): State<Arc<AppState<R, D>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ShippingQuoteResponse>>, ApiError>
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    let package_id = parse_package_id(&id)?;
    let quotes = state.package_service.get_quotes(package_id).await?;
    Ok(Json(quotes.iter().map(ShippingQuoteResponse::from).collect()))
}

/// POST /packages/hire-carrier — hire a carrier for a package.
#[tracing::instrument(skip(state))]
pub async fn hire_carrier<R, D>(
    State(state): State<Arc<AppState<R, D>>>,
    Json(req): Json<HireCarrierRequest>,
) -> Result<Json<PackageResponse>, ApiError>
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    let package_id = parse_package_id(&req.package_id)?;
    if req.carrier_id.trim().is_empty() {
        return Err(ApiError::BadRequest("carrier_id is required".to_string()));
    }

    let package = state
        .package_service
        .hire_carrier(HireCarrier::new(package_id, req.carrier_id))
        .await?;
    Ok(Json(PackageResponse::from(&package)))
}

/// PUT /packages/status — move a package to another status.
#[tracing::instrument(skip(state))]
pub async fn update_status<R, D>(
    State(state): State<Arc<AppState<R, D>>>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<PackageResponse>, ApiError>
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    let package_id = parse_package_id(&req.package_id)?;
    if req.status.is_empty() {
        return Err(ApiError::BadRequest("status is required".to_string()));
    }

    let package = state
        .package_service
        .update_status(UpdateStatus::new(package_id, req.status))
        .await?;
    Ok(Json(PackageResponse::from(&package)))
}

fn parse_package_id(id: &str) -> Result<PackageId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid package id: {e}")))
}
