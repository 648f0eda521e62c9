use std::future::Future;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

/// Everything `encodeURIComponent` escapes: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const NAME_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Message reported when the validation service cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "Failed to reach validation service.";

/// Result of one remote validation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The service answered 200.
    Accepted { message: String, status: u16 },
    /// The service answered with any other status.
    Rejected { message: String, status: u16 },
    /// No response arrived (connect failure, reset, timeout).
    Unreachable { message: String },
}

impl ValidationOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationOutcome::Accepted { message, .. }
            | ValidationOutcome::Rejected { message, .. }
            | ValidationOutcome::Unreachable { message } => message,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ValidationOutcome::Accepted { status, .. }
            | ValidationOutcome::Rejected { status, .. } => Some(*status),
            ValidationOutcome::Unreachable { .. } => None,
        }
    }

    /// Classifies a response by status code alone; only 200 counts as valid.
    pub fn from_response(status: u16, message: String) -> Self {
        if status == StatusCode::OK.as_u16() {
            ValidationOutcome::Accepted { message, status }
        } else {
            ValidationOutcome::Rejected { message, status }
        }
    }
}

/// Checks a single, already normalized, name against the validation service.
pub trait NameValidator: Send + Sync {
    fn validate(&self, name: &str) -> impl Future<Output = ValidationOutcome> + Send;
}

/// Pulls a `message` string out of a response body, falling back to
/// `Received status {code}` when the body is not JSON or has no string
/// `message` field.
pub fn extract_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|payload| {
            payload
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Received status {status}"))
}

/// Validator backed by the remote HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpNameValidator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpNameValidator {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The endpoint with `name` appended as a percent-encoded query pair.
    /// A space is sent as `%20`, never `+`.
    pub fn request_url(&self, name: &str) -> Url {
        let pair = format!("name={}", utf8_percent_encode(name, NAME_COMPONENT));
        let query = match self.endpoint.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{pair}"),
            _ => pair,
        };
        let mut url = self.endpoint.clone();
        url.set_query(Some(&query));
        url
    }
}

impl NameValidator for HttpNameValidator {
    async fn validate(&self, name: &str) -> ValidationOutcome {
        let response = match self.client.get(self.request_url(name)).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(name, error = %err, "validation request failed");
                return ValidationOutcome::Unreachable {
                    message: UNREACHABLE_MESSAGE.to_string(),
                };
            }
        };

        let status = response.status().as_u16();
        // An unreadable body gets the same fallback as an unparseable one.
        let body = response.bytes().await.unwrap_or_default();
        ValidationOutcome::from_response(status, extract_message(status, &body))
    }
}
