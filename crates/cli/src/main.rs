use std::process::ExitCode;

use clap::Parser;

use stockwatch_cli::{Args, CliConfig};
use stockwatch_observability::LogFormat;

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match CliConfig::from_env() {
        Ok(config) => config.with_args(args),
        Err(err) => {
            stockwatch_observability::init(LogFormat::default());
            tracing::error!(error = %err, "invalid environment configuration");
            return ExitCode::FAILURE;
        }
    };

    stockwatch_observability::init(config.log_format);
    tracing::debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    match stockwatch_cli::run(&config, chrono::Utc::now(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "inventory report failed");
            ExitCode::FAILURE
        }
    }
}
