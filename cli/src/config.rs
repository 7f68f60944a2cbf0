//! CLI configuration file

use anyhow::{bail, Context, Result};
use dualpool_sdk::{ConfigIndex, ProgramIds};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/dualpool/config.toml";

/// ```toml
/// default_slippage_bps = 50
/// config_index = 0
///
/// [program_ids]
/// cp_swap = "CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub program_ids: ProgramIds,
    pub default_slippage_bps: u64,
    pub config_index: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program_ids: ProgramIds::default(),
            default_slippage_bps: 50,
            config_index: None,
        }
    }
}

impl Config {
    /// Load `path` (or the default location). A missing file yields defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let raw_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let expanded = shellexpand::full(raw_path)
            .with_context(|| format!("Failed to expand config path: {}", raw_path))?;
        let path = PathBuf::from(expanded.as_ref());

        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Slippage from the command line, falling back to the configured default
    pub fn slippage_bps(&self, arg: Option<u64>) -> u64 {
        arg.unwrap_or(self.default_slippage_bps)
    }

    pub fn config_index(&self, arg: Option<u64>, wide: bool) -> Result<ConfigIndex> {
        let index = arg.or(self.config_index).unwrap_or(0);
        if wide {
            return Ok(ConfigIndex::U64(index));
        }
        match u16::try_from(index) {
            Ok(index) => Ok(ConfigIndex::U16(index)),
            Err(_) => bail!("Config index {} does not fit in 2 bytes; pass --wide-index", index),
        }
    }
}
