use anyhow::{Context, Result};
use clap::Parser;

use workshop_cli::episodes;
use workshop_cli::{Cli, Episode};
use workshop_infra::WorkshopConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config(WorkshopConfig::from_env().context("reading configuration from the environment")?);
    workshop_observability::init(config.log_format);

    tracing::debug!(?config, "configuration loaded");

    match &cli.episode {
        Episode::Basket { message_file } => {
            episodes::basket::run(message_file)?;
        }
        Episode::Factory => {
            episodes::factory::run(&config)?;
        }
        Episode::Currency => {
            episodes::currency::run()?;
        }
        Episode::All { message_file } => {
            episodes::basket::run(message_file)?;
            episodes::factory::run(&config)?;
            episodes::currency::run()?;
        }
    }

    Ok(())
}
