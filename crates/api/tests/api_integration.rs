//! Integration tests for the API server.

use std::sync::OnceLock;

use api::config::Config;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain::{Carrier, CarrierRegionOffer, Money, Region};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    setup_with_carriers(domain::default_catalog())
}

fn setup_with_carriers(carriers: Vec<Carrier>) -> axum::Router {
    let state = api::create_default_state(carriers);
    api::create_app(state, get_metrics_handle(), &Config::default())
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create_package(app: &axum::Router, weight_kg: f64, state_code: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/packages",
        Some(json!({
            "product": "Camisa tamanho G",
            "weight_kg": weight_kg,
            "state_code": state_code,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn hire(app: &axum::Router, package_id: &str, carrier_id: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/packages/hire-carrier",
        Some(json!({ "package_id": package_id, "carrier_id": carrier_id })),
    )
    .await
}

async fn set_status(app: &axum::Router, package_id: &str, status: &str) -> (StatusCode, Value) {
    send(
        app,
        "PUT",
        "/packages/status",
        Some(json!({ "package_id": package_id, "status": status })),
    )
    .await
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_package() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/packages",
        Some(json!({ "product": "Notebook", "weight_kg": 2.5, "state_code": "SP" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(json["id"].as_str().is_some());
    assert_eq!(json["status"], "created");
}

#[tokio::test]
async fn test_create_and_get_package() {
    let app = setup();
    let id = create_package(&app, 0.6, "PR").await;

    let (status, json) = send(&app, "GET", &format!("/packages/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["destination_state"], "PR");
    assert_eq!(json["destination_region"], "south");
    assert_eq!(json["status"], "created");
    assert_eq!(json["version"], 1);
    assert!(json.get("shipping").is_none());
}

#[tokio::test]
async fn test_create_package_validation() {
    let app = setup();

    let invalid = [
        json!({ "product": "A", "weight_kg": 1.0, "state_code": "SP" }),
        json!({ "product": "Mesa", "weight_kg": 0.0, "state_code": "SP" }),
        json!({ "product": "Mesa", "weight_kg": 1500.0, "state_code": "SP" }),
        json!({ "product": "Mesa", "weight_kg": 1.0, "state_code": "SAO" }),
    ];
    for body in invalid {
        let (status, json) = send(&app, "POST", "/packages", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["kind"], "invalid_input");
    }
}

#[tokio::test]
async fn test_create_package_unknown_state() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/packages",
        Some(json!({ "product": "Mesa", "weight_kg": 1.0, "state_code": "XX" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("XX"));
}

#[tokio::test]
async fn test_get_nonexistent_package() {
    let app = setup();

    let (status, json) = send(
        &app,
        "GET",
        "/packages/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");
}

#[tokio::test]
async fn test_invalid_package_id_format() {
    let app = setup();

    let (status, _) = send(&app, "GET", "/packages/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = hire(&app, "not-a-uuid", "nebulix").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quotes_ordered_by_lead_time() {
    let carriers = vec![
        Carrier::new(
            "a",
            "Carrier A",
            vec![CarrierRegionOffer::new(
                Region::Southeast,
                3,
                Money::from_cents(1000),
            )],
        ),
        Carrier::new(
            "b",
            "Carrier B",
            vec![CarrierRegionOffer::new(
                Region::Southeast,
                7,
                Money::from_cents(500),
            )],
        ),
        Carrier::new(
            "c",
            "Carrier C",
            vec![CarrierRegionOffer::new(
                Region::South,
                5,
                Money::from_cents(700),
            )],
        ),
    ];
    let app = setup_with_carriers(carriers);
    let id = create_package(&app, 0.5, "SP").await;

    let (status, json) = send(&app, "POST", &format!("/packages/{id}/quote"), None).await;

    assert_eq!(status, StatusCode::OK);
    let quotes = json.as_array().unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0]["carrier_id"], "a");
    assert_eq!(quotes[0]["estimated_days"], 3);
    assert_eq!(quotes[0]["estimated_price_cents"], 1000);
    assert_eq!(quotes[1]["carrier_id"], "b");
}

#[tokio::test]
async fn test_quote_unserved_region_is_empty() {
    let app = setup();
    let id = create_package(&app, 3.0, "AM").await;

    let (status, json) = send(&app, "POST", &format!("/packages/{id}/quote"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_hire_carrier() {
    let app = setup();
    let id = create_package(&app, 2.0, "RS").await;

    let (status, json) = hire(&app, &id, "nebulix").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "waiting_pickup");
    assert_eq!(json["shipping"]["carrier_id"], "nebulix");
    assert_eq!(json["shipping"]["estimated_days"], 4);
    assert_eq!(json["shipping"]["estimated_price_cents"], 1180);
}

#[tokio::test]
async fn test_hire_twice_conflicts() {
    let app = setup();
    let id = create_package(&app, 2.0, "RS").await;

    let (status, _) = hire(&app, &id, "nebulix").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = hire(&app, &id, "rotafacil").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "conflict");

    let (status, _) = hire(&app, &id, "ghost").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_hire_unknown_carrier() {
    let app = setup();
    let id = create_package(&app, 2.0, "RS").await;

    let (status, json) = hire(&app, &id, "ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Carrier not found: ghost");
}

#[tokio::test]
async fn test_hire_carrier_outside_region() {
    let app = setup();
    let id = create_package(&app, 2.0, "RS").await;

    let (status, json) = hire(&app, &id, "moventra").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_input");
}

#[tokio::test]
async fn test_update_status_requires_carrier() {
    let app = setup();
    let id = create_package(&app, 1.0, "SP").await;

    let (status, json) = set_status(&app, &id, "shipped").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Package cannot be marked as 'shipped' without a carrier assigned"
    );

    let (status, _) = hire(&app, &id, "nebulix").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = set_status(&app, &id, "shipped").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "shipped");
}

#[tokio::test]
async fn test_update_status_unknown_value() {
    let app = setup();
    let id = create_package(&app, 1.0, "SP").await;

    let (status, json) = set_status(&app, &id, "enviado").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid status: enviado");
}

#[tokio::test]
async fn test_list_packages() {
    let app = setup();
    let first = create_package(&app, 1.0, "SP").await;
    let second = create_package(&app, 1.0, "BA").await;

    let (status, json) = send(&app, "GET", "/packages", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first));
    assert!(ids.contains(&second));
}

#[tokio::test]
async fn test_list_carriers() {
    let app = setup();

    let (status, json) = send(&app, "GET", "/carriers", None).await;

    assert_eq!(status, StatusCode::OK);
    let carriers = json.as_array().unwrap();
    assert_eq!(carriers.len(), 3);
    let nebulix = carriers.iter().find(|c| c["id"] == "nebulix").unwrap();
    assert_eq!(nebulix["regions"][0]["price_per_kg_cents"], 590);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    create_package(&app, 1.0, "SP").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("packages_created_total"));
}
