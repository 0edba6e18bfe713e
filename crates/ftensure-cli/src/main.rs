//! filetracker-ensure CLI - Make a filetracker copy match a local file
//!
//! Waits for the filetracker service to come up, compares the remote
//! SHA-256 digest with the local one and uploads only when they differ.
//!
//! Exit status is 0 on success (uploaded or already up to date) and a
//! per-class non-zero code on failure.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::ensure::EnsureCommand;
use output::get_formatter;

#[derive(Debug, Parser)]
#[command(
    name = "filetracker-ensure",
    version,
    about = "Upload a local file to filetracker unless an identical copy is already stored"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    #[command(flatten)]
    ensure: EnsureCommand,
}

impl Cli {
    /// Default log filter for the selected verbosity
    fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let formatter = get_formatter(cli.json);

    match cli.ensure.execute().await {
        Ok(outcome) => {
            formatter.outcome(&cli.ensure, &outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            formatter.failure(&cli.ensure, &err);
            ExitCode::from(err.exit_code())
        }
    }
}
