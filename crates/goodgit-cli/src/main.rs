mod commands;
mod prompt;
mod style;

use std::process::ExitCode;

use clap::Parser;
use goodgit_core::error::GoodgitError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "goodgit", version, about = "Switch Git/SSH identities per repository")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GOODGIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match commands::run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style::error(&format!("{e:#}")));
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit code of the first goodgit error in the chain, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<GoodgitError>())
        .map(GoodgitError::exit_code)
        .unwrap_or(1)
}
