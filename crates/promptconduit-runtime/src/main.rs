//! promptconduit: hook entry point binary.
//! Reads one native hook event from stdin, normalizes it through the
//! matching adapter, and hands it to a detached worker for delivery.

use clap::Parser;
use clap::error::ErrorKind;

mod cli;
mod client;
mod cmd_status;
mod config;
mod deliver;
mod detect;
mod hook;
mod registry;
#[cfg(test)]
mod scenarios;

const LOG_ENV: &str = "PROMPTCONDUIT_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Unexpected arguments from a host tool must not break its hook.
            let _ = e.print();
            hook::print_continue();
            return Ok(());
        }
    };

    init_tracing();
    let config = config::Config::load(&args.global);

    match args.command.unwrap_or(cli::Command::Hook) {
        cli::Command::Hook => hook::cmd_hook(&config).await,
        cli::Command::SendEvent => deliver::cmd_send_event(&config).await?,
        cli::Command::Translate => hook::cmd_translate(&config).await?,
        cli::Command::Test => cmd_test::cmd_test(&config).await?,
        cli::Command::Status => cmd_status::cmd_status(&config),
    }

    Ok(())
}

/// Diagnostics go to stderr; stdout belongs to the hook protocol.
fn init_tracing() {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
