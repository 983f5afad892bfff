use bfdfuzz_cli::{list_scenarios, Cli, Commands};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Exit code for failures before a verdict exists
const EXIT_STARTUP_FAILURE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::List) = cli.command {
        return match list_scenarios(&mut std::io::stdout(), cli.seed) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "failed to write scenario list");
                ExitCode::from(EXIT_STARTUP_FAILURE)
            }
        };
    }

    match bfdfuzz_cli::execute(&cli).await {
        Ok(verdict) => ExitCode::from(verdict.exit_code()),
        Err(e) => {
            error!(error = %e, "fuzz run aborted");
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_STARTUP_FAILURE)
        }
    }
}
