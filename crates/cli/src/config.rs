use anyhow::Result;
use std::path::PathBuf;
use tracing::info;
use wrr_common::AppConfig;

/// Resolved configuration with the path it was loaded from.
pub struct CliConfig {
    pub config: AppConfig,
    pub config_path: PathBuf,
}

impl CliConfig {
    pub fn load(path: &str) -> Result<Self> {
        info!(path = path, "loading configuration");
        let config = AppConfig::load(path)?;
        Ok(Self {
            config,
            config_path: PathBuf::from(path),
        })
    }

    /// Override the configured number of draws, e.g. from the command line.
    pub fn with_draws(mut self, draws: u64) -> Result<Self> {
        self.config.simulation.draws = draws;
        self.config.validate()?;
        Ok(self)
    }
}
