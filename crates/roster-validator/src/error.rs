use crate::config::ConfigError;
use crate::roster::RosterError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    HttpClient(reqwest::Error),
    Roster(RosterError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Roster(RosterError::Halted(halt)) if halt.is_unreachable() => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Roster(RosterError::Halted(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Roster(RosterError::Source(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::HttpClient(err) => write!(f, "http client error: {}", err),
            // Roster failures are shown to API callers as-is.
            AppError::Roster(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::HttpClient(err) => Some(err),
            AppError::Roster(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let body = if message.trim().is_empty() {
            json!({ "error": "Unexpected error while validating user names." })
        } else {
            json!({ "error": message })
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::HttpClient(value)
    }
}

impl From<RosterError> for AppError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{NameSourceError, ValidationHalt, ValidationOutcome};
    use std::path::PathBuf;

    fn halt(outcome: ValidationOutcome) -> AppError {
        AppError::Roster(RosterError::Halted(ValidationHalt {
            name: "Ada".to_string(),
            position: 0,
            validated_before: 0,
            outcome,
        }))
    }

    #[test]
    fn load_errors_are_internal_with_the_underlying_message() {
        let err = AppError::from(RosterError::Source(NameSourceError::Read {
            path: PathBuf::from("data/users.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "failed to read user list data/users.json: no such file"
        );
    }

    #[test]
    fn halted_batches_map_to_gateway_statuses() {
        let rejected = halt(ValidationOutcome::Rejected {
            message: "Invalid name".to_string(),
            status: 400,
        });
        assert_eq!(rejected.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(rejected.to_string(), "Ada - Invalid name");

        let unreachable = halt(ValidationOutcome::Unreachable {
            message: "Failed to reach validation service.".to_string(),
        });
        assert_eq!(unreachable.status_code(), StatusCode::BAD_GATEWAY);
    }
}
