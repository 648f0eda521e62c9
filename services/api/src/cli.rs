use crate::batch::{run_check, CheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use roster_validator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Roster Validator",
    about = "Normalize roster user names and validate them against the name-validation service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate the roster once and exit non-zero on the first failure
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["roster-validator"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_check_with_roster_override() {
        let cli = Cli::try_parse_from(["roster-validator", "check", "--users", "/tmp/users.json"])
            .expect("parses");
        match cli.command {
            Some(Command::Check(args)) => {
                assert_eq!(
                    args.users.as_deref(),
                    Some(std::path::Path::new("/tmp/users.json"))
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["roster-validator", "serve", "--port", "4000"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(4000));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
