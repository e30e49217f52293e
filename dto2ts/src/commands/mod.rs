//! Command handlers for the dto2ts CLI.

pub mod generate;
pub mod info;
pub mod init;

use crate::cli::Cli;
use dto2ts_core::{config::Dto2TsConfig, error::Result};
use tracing::{error, info};

/// Loads the configuration named on the command line, or searches for
/// dto2ts.toml from the working directory upward.
pub fn load_config(cli: &Cli) -> Result<Dto2TsConfig> {
    let loaded = match &cli.config {
        Some(path) => Dto2TsConfig::from_path(path),
        None => Dto2TsConfig::new(),
    };

    match loaded {
        Ok(config) => {
            info!("Configuration loaded successfully");
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
