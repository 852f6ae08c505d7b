//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use banquito_core::config::load_config;
use banquito_core::logging::init_logging;

/// Load configuration, start logging and run the selected command
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config_file, cli.overrides())?;
    init_logging(&config.logging)?;
    tracing::debug!("Configuration: {:?}", config);

    match cli.command() {
        Commands::Init => commands::init::run(&config).await,
        Commands::Verify { json } => commands::verify::run(&config, json).await,
        Commands::Plan => commands::plan::run(&config),
    }
}
