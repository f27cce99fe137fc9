mod cli;
mod commands;
mod error;
mod logging;
mod provider;
mod prune;
mod settings;
mod upload;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::error::PublishError;
use crate::provider::SpacesProvider;
use crate::settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), PublishError> {
    let settings = Settings::load(cli.config.as_deref())?;
    let provider = SpacesProvider;

    match cli.command {
        Command::Upload(args) => commands::upload(&provider, &settings, args).await,
        Command::Prune(args) => commands::prune(&provider, &settings, args).await,
        Command::List { build_type } => commands::list(&provider, &settings, build_type).await,
    }
}
