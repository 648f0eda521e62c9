use crate::infra::build_roster_service;
use clap::Args;
use roster_validator::config::AppConfig;
use roster_validator::error::AppError;
use roster_validator::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Roster file to validate instead of the configured USERS_PATH
    #[arg(long)]
    pub(crate) users: Option<PathBuf>,
}

/// One-shot batch run. A halted batch comes back as an error so the binary
/// exits non-zero.
pub(crate) async fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(users) = args.users {
        config.validation.users_path = users;
    }

    telemetry::init(&config.telemetry)?;

    let service = build_roster_service(&config.validation)?;
    let summary = service.run().await?;

    println!("validated {} name(s)", summary.validated);
    Ok(())
}
