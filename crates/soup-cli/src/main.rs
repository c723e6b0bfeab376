mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("pdbsoup CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = dispatch(cli.command);
    if let Err(e) = &command_result {
        error!("Command failed: {}", e);
    }
    Ok(command_result?)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Info(args) => {
            info!("Dispatching to 'info' command.");
            commands::info::run(args)
        }
        Commands::Residues(args) => {
            info!("Dispatching to 'residues' command.");
            commands::residues::run(args)
        }
        Commands::Bonds(args) => {
            info!("Dispatching to 'bonds' command.");
            commands::bonds::run(args)
        }
    }
}
