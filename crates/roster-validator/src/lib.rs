//! Roster name validation: normalize each user name from a local roster and
//! check it against a remote name-validation API, halting on the first failure.

pub mod config;
pub mod error;
pub mod roster;
pub mod telemetry;

#[cfg(test)]
mod test_support;
