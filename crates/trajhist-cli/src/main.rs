mod cli;
mod commands;
mod config;
mod error;
mod input;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::FileConfig;
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match run_app(cli) {
        Ok(()) => info!("Command completed successfully."),
        Err(e) if e.is_recoverable() => error!("{}", e),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_app(cli: Cli) -> Result<()> {
    info!("trajhist v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let file_config = FileConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Profile(args) => {
            info!("Dispatching to 'profile' command.");
            commands::profile::run(args, &file_config, cli.quiet)
        }
        Commands::Quadrant(args) => {
            info!("Dispatching to 'quadrant' command.");
            commands::quadrant::run(args, &file_config, cli.quiet)
        }
        Commands::DensityField(args) => {
            info!("Dispatching to 'density-field' command.");
            commands::density_field::run(args, &file_config, cli.quiet)
        }
    }
}
