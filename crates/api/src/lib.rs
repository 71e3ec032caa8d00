//! HTTP API server for the shipment service.
//!
//! Exposes package registration, quoting, carrier hiring and status
//! tracking over REST, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use domain::{
    Carrier, CarrierDirectory, CatalogError, InMemoryCarrierDirectory, InMemoryPackageRepository,
    PackageRepository, PackageService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use config::Config;
use routes::packages::AppState;

/// State type used by the binary: in-memory store and directory.
pub type DefaultState = AppState<InMemoryPackageRepository, InMemoryCarrierDirectory>;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R, D>(
    state: Arc<AppState<R, D>>,
    metrics_handle: PrometheusHandle,
    config: &Config,
) -> Router
where
    R: PackageRepository + 'static,
    D: CarrierDirectory + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health))
        .route(
            "/packages",
            post(routes::packages::create::<R, D>).get(routes::packages::list::<R, D>),
        )
        .route(
            "/packages/hire-carrier",
            post(routes::packages::hire_carrier::<R, D>),
        )
        .route(
            "/packages/status",
            put(routes::packages::update_status::<R, D>),
        )
        .route("/packages/{id}", get(routes::packages::get::<R, D>))
        .route("/packages/{id}/quote", post(routes::packages::quote::<R, D>))
        .route("/carriers", get(routes::carriers::list::<R, D>))
        .with_state(state)
        .merge(metrics_router)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over the given carrier catalog.
pub fn create_default_state(carriers: Vec<Carrier>) -> Arc<DefaultState> {
    let package_service = PackageService::new(
        InMemoryPackageRepository::new(),
        InMemoryCarrierDirectory::new(carriers),
    );
    Arc::new(AppState { package_service })
}

/// Loads the carrier catalog named by the configuration, or the built-in
/// catalog when no path is configured.
pub fn load_carriers(config: &Config) -> Result<Vec<Carrier>, CatalogError> {
    match &config.carrier_catalog_path {
        Some(path) => {
            let carriers = domain::load_catalog(path)?;
            tracing::info!(
                path = %path.display(),
                count = carriers.len(),
                "loaded carrier catalog"
            );
            Ok(carriers)
        }
        None => Ok(domain::default_catalog()),
    }
}
