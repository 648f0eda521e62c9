use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::normalizer::normalize_name;
use super::source::{NameSource, NameSourceError};
use super::validator::{NameValidator, ValidationOutcome};

/// Count of roster names that passed validation in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub validated: usize,
}

/// The first name that did not pass, which stopped the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationHalt {
    /// Normalized form of the name, as sent to the service.
    pub name: String,
    /// Zero-based index in the roster.
    pub position: usize,
    pub validated_before: usize,
    pub outcome: ValidationOutcome,
}

impl ValidationHalt {
    pub fn is_unreachable(&self) -> bool {
        matches!(self.outcome, ValidationOutcome::Unreachable { .. })
    }
}

impl fmt::Display for ValidationHalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.outcome.message())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error(transparent)]
    Source(#[from] NameSourceError),
    #[error("{0}")]
    Halted(ValidationHalt),
}

/// Runs the roster through the validator one name at a time, in roster order,
/// stopping at the first name that is not accepted.
pub struct RosterValidationService<S, V> {
    source: Arc<S>,
    validator: Arc<V>,
}

impl<S, V> Clone for RosterValidationService<S, V> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<S, V> RosterValidationService<S, V>
where
    S: NameSource + 'static,
    V: NameValidator + 'static,
{
    pub fn new(source: Arc<S>, validator: Arc<V>) -> Self {
        Self { source, validator }
    }

    pub async fn run(&self) -> Result<ValidationSummary, RosterError> {
        let names = self.source.load().await?;
        let mut validated = 0;

        for (position, raw) in names.iter().enumerate() {
            let name = normalize_name(raw);
            let outcome = self.validator.validate(&name).await;

            if outcome.succeeded() {
                info!(status = outcome.status_code(), "{} - {}", name, outcome.message());
                validated += 1;
                continue;
            }

            error!(status = outcome.status_code(), "{} - {}", name, outcome.message());
            return Err(RosterError::Halted(ValidationHalt {
                name,
                position,
                validated_before: validated,
                outcome,
            }));
        }

        Ok(ValidationSummary { validated })
    }
}
