mod batch;
mod cli;
mod infra;
mod routes;
mod server;

use roster_validator::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
