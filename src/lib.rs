pub mod cli;
pub mod core;
pub mod providers;

use crate::core::DateRange;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Chart,
    Table,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    range: &DateRange,
) -> Result<()> {
    info!("Euribor starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::EcbProvider::new(&config.provider.base_url)?;

    match command {
        AppCommand::Chart => cli::chart::run(&provider, &config, range).await,
        AppCommand::Table => cli::table::run(&provider, &config, range).await,
    }
}
