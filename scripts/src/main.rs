use std::{io, process::ExitCode};

use clap::Parser;
use degen_scripts::{cli::Cli, config::Environment};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    // Load .env file, before clap reads its env fallbacks
    let env = Environment::load();

    let Cli { network, command } = Cli::parse();

    match command.run(&network, &env).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            error!("hint: {}", e.hint());
            ExitCode::FAILURE
        }
    }
}
