//! pulse-decode CLI
//!
//! Command-line interface for the pulse decoder.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::debug;

use pulse_decode::cli::commands::{self, Outcome};
use pulse_decode::cli::{Cli, Commands};
use pulse_decode::PulseError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    debug!("pulse-decode v{}", env!("CARGO_PKG_VERSION"));

    match handle_command(cli.command) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::NothingDecoded) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(pulse_err) = err.downcast_ref::<PulseError>() {
                for hint in pulse_err.recovery_suggestions() {
                    eprintln!("  {}", hint);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<Outcome> {
    match cmd {
        Commands::Decode(args) => commands::decode(&args),
        Commands::Frames { input, format } => commands::show_frames(&input, format),
        Commands::Preview {
            input,
            output,
            sample_rate,
            amplitude,
        } => commands::preview(&input, &output, sample_rate, amplitude),
        Commands::Config => commands::print_config(),
    }
}
