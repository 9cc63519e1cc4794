//! kicks-setup - placeholder sneaker images for the Future Kicks site.

mod batch;
mod bitmap;
mod cli;
mod config;
mod error;
mod font;
mod output;
mod placeholder;

use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::SetupError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: &Cli) -> Result<(), SetupError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(SetupError::Config)?;
    log::debug!("config: {}", config_path.display());

    // Configured batch replaces the built-in sneakers
    let placeholders =
        if config.images.is_empty() { batch::default_placeholders() } else { config.images.clone() };
    let fonts = config.resolved_fonts();

    // Generate
    batch::run_batch(&cli.output_dir(), &placeholders, &fonts)?;
    Ok(())
}
