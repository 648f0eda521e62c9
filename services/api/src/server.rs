use crate::cli::ServeArgs;
use crate::infra::{build_roster_service, AppState};
use crate::routes::{roster_router, with_operational_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use roster_validator::config::AppConfig;
use roster_validator::error::AppError;
use roster_validator::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.environment.is_test() {
        info!("test environment detected; not binding a listener");
        return Ok(());
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = build_roster_service(&config.validation)?;
    let app = with_operational_routes(roster_router(
        service,
        config.validation.failure_policy,
    ))
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        %addr,
        users = %config.validation.users_path.display(),
        endpoint = %config.validation.endpoint,
        "Server listening on port {}",
        config.server.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}
