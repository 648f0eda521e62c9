//! The roster validation workflow: load names, normalize them, and check each
//! one against the remote validation service in roster order.

pub mod normalizer;
pub mod orchestrator;
pub mod source;
pub mod validator;

pub use normalizer::normalize_name;
pub use orchestrator::{RosterError, RosterValidationService, ValidationHalt, ValidationSummary};
pub use source::{JsonFileNameSource, NameSource, NameSourceError};
pub use validator::{HttpNameValidator, NameValidator, ValidationOutcome, UNREACHABLE_MESSAGE};
