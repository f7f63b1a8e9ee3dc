use serde::{Deserialize, Serialize};

use crate::error::{WrrError, WrrResult};

/// Entry count at which draws switch from a linear scan to binary search.
pub const DEFAULT_SIZE_THRESHOLD: usize = 10;

/// Top-level configuration for the `wrr` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub selector: SelectorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Initial state of a selector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Linear-scan vs binary-search cutover. Zero means "use the default".
    #[serde(default)]
    pub size_threshold: usize,
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Unique key. Falls back to `value` when absent.
    #[serde(default)]
    pub key: Option<String>,
    pub value: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_draws")]
    pub draws: u64,
    /// Fixed RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            draws: default_draws(),
            seed: None,
        }
    }
}

// Default value helpers
fn default_weight() -> u32 {
    1
}
fn default_draws() -> u64 {
    10_000
}

impl SelectorConfig {
    /// The size threshold actually used by a selector built from this config.
    pub fn effective_size_threshold(&self) -> usize {
        if self.size_threshold == 0 {
            DEFAULT_SIZE_THRESHOLD
        } else {
            self.size_threshold
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> WrrResult<()> {
        if self.draws == 0 {
            return Err(WrrError::Config(
                "simulation.draws must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency.
    ///
    /// Entry contents (empty values, duplicate keys) are checked by the
    /// selector when it is built.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.simulation.validate()?;
        Ok(())
    }
}
