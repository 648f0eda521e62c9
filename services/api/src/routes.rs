use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use roster_validator::config::FailurePolicy;
use roster_validator::error::AppError;
use roster_validator::roster::{
    NameSource, NameValidator, RosterError, RosterValidationService, ValidationSummary,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

pub(crate) struct RosterState<S, V> {
    service: RosterValidationService<S, V>,
    failure_policy: FailurePolicy,
}

/// Health and roster validation routes.
pub(crate) fn roster_router<S, V>(
    service: RosterValidationService<S, V>,
    failure_policy: FailurePolicy,
) -> Router
where
    S: NameSource + 'static,
    V: NameValidator + 'static,
{
    let state = Arc::new(RosterState {
        service,
        failure_policy,
    });

    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/validate-users", get(validate_users_endpoint::<S, V>))
        .with_state(state)
}

/// Readiness and metrics routes; both read `AppState` from an `Extension` layer.
pub(crate) fn with_operational_routes(router: Router) -> Router {
    router
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
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

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn validate_users_endpoint<S, V>(
    State(state): State<Arc<RosterState<S, V>>>,
) -> Result<Json<ValidationSummary>, AppError>
where
    S: NameSource + 'static,
    V: NameValidator + 'static,
{
    match state.service.run().await {
        Ok(summary) => Ok(Json(summary)),
        Err(RosterError::Halted(halt)) if state.failure_policy == FailurePolicy::ExitProcess => {
            error!(
                name = %halt.name,
                position = halt.position,
                validated = halt.validated_before,
                "validation halted, terminating"
            );
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
