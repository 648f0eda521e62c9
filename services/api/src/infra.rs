use metrics_exporter_prometheus::PrometheusHandle;
use roster_validator::config::ValidationConfig;
use roster_validator::error::AppError;
use roster_validator::roster::{HttpNameValidator, JsonFileNameSource, RosterValidationService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type RosterService = RosterValidationService<JsonFileNameSource, HttpNameValidator>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_roster_service(config: &ValidationConfig) -> Result<RosterService, AppError> {
    let source = JsonFileNameSource::new(config.users_path.clone());
    let validator = HttpNameValidator::new(config.endpoint.clone(), config.timeout)?;
    Ok(RosterValidationService::new(
        Arc::new(source),
        Arc::new(validator),
    ))
}
