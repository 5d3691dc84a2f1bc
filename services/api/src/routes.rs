use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use hr_saas::diagnostics::DiagnosticsReport;
use hr_saas::error::AppError;
use hr_saas::schema::{export, SchemaCatalog};
use serde_json::json;
use std::sync::atomic::Ordering;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_endpoint))
        .route("/api/hello", get(hello_endpoint))
        .route("/test", get(diagnostics_endpoint))
        .route("/schema", get(schema_endpoint))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(cors_layer())
        .with_state(state)
}

/// The viewer is served from arbitrary origins, so every origin, method and
/// header is accepted.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub(crate) async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "message": "SaaS HR API is running" }))
}

pub(crate) async fn hello_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from the HR backend API!" }))
}

pub(crate) async fn diagnostics_endpoint(
    State(state): State<AppState>,
) -> Json<DiagnosticsReport> {
    let report = DiagnosticsReport::collect(&state.database, state.probe.as_deref());
    debug!(database = %report.database, "diagnostics collected");
    Json(report)
}

pub(crate) async fn schema_endpoint(
    State(state): State<AppState>,
) -> Result<Json<SchemaCatalog>, AppError> {
    let catalog = export(&state.registry).map_err(|err| {
        error!(error = %err, "schema export failed");
        AppError::from(err)
    })?;

    Ok(Json(catalog))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
