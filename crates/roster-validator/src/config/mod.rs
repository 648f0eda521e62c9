use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_USERS_PATH: &str = "data/users.json";
pub const DEFAULT_VALIDATION_URL: &str = "https://schoolbaseapp.com/validate-name";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Test mode skips binding a listener.
    pub fn is_test(self) -> bool {
        self == Self::Test
    }
}

/// What the server does once a batch halts on a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and terminate the process with a non-zero status.
    ExitProcess,
    /// Stop the batch and answer the request with an error response.
    Respond,
}

impl FailurePolicy {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exit" => Ok(Self::ExitProcess),
            "respond" => Ok(Self::Respond),
            _ => Err(ConfigError::InvalidFailurePolicy {
                value: value.to_string(),
            }),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub validation: ValidationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort)?,
            Err(_) => DEFAULT_PORT,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let users_path = env::var("USERS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_USERS_PATH));

        let raw_endpoint =
            env::var("VALIDATION_URL").unwrap_or_else(|_| DEFAULT_VALIDATION_URL.to_string());
        let endpoint = Url::parse(&raw_endpoint).map_err(|source| {
            ConfigError::InvalidValidationUrl {
                value: raw_endpoint.clone(),
                source,
            }
        })?;

        let timeout = match env::var("VALIDATION_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?,
            )),
            Err(_) => None,
        };

        let failure_policy = match env::var("VALIDATION_FAILURE_POLICY") {
            Ok(raw) => FailurePolicy::parse(&raw)?,
            Err(_) => FailurePolicy::ExitProcess,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            validation: ValidationConfig {
                users_path,
                endpoint,
                timeout,
                failure_policy,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the roster lives and how the remote validation service is reached.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub users_path: PathBuf,
    pub endpoint: Url,
    /// `None` waits on the remote service indefinitely.
    pub timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidValidationUrl {
        value: String,
        source: url::ParseError,
    },
    InvalidTimeout {
        value: String,
    },
    InvalidFailurePolicy {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValidationUrl { value, .. } => {
                write!(f, "VALIDATION_URL '{value}' is not a valid URL")
            }
            ConfigError::InvalidTimeout { value } => {
                write!(
                    f,
                    "VALIDATION_TIMEOUT_SECS '{value}' must be a whole number of seconds"
                )
            }
            ConfigError::InvalidFailurePolicy { value } => {
                write!(
                    f,
                    "VALIDATION_FAILURE_POLICY '{value}' must be 'exit' or 'respond'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidValidationUrl { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout { .. }
            | ConfigError::InvalidFailurePolicy { .. } => None,
        }
    }
}
