//! Arguments shared by several commands

use anyhow::{Context, Result};
use clap::Args;
use dualpool_sdk::{ConfigIndex, PoolAddresses};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::config::Config;

pub fn parse_pubkey(label: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).with_context(|| format!("Invalid {}: {}", label, value))
}

/// A pool identified by its mint pair and AMM config
#[derive(Args, Debug, Clone)]
pub struct PoolArgs {
    /// First mint (any order)
    #[arg(long)]
    pub mint_a: String,

    /// Second mint (any order)
    #[arg(long)]
    pub mint_b: String,

    /// AMM config index (defaults to the config file value, then 0)
    #[arg(long)]
    pub config_index: Option<u64>,

    /// Encode the config index as 8 bytes instead of 2
    #[arg(long)]
    pub wide_index: bool,
}

impl PoolArgs {
    pub fn mints(&self) -> Result<(Pubkey, Pubkey)> {
        Ok((
            parse_pubkey("mint A", &self.mint_a)?,
            parse_pubkey("mint B", &self.mint_b)?,
        ))
    }

    pub fn config_index(&self, config: &Config) -> Result<ConfigIndex> {
        config.config_index(self.config_index, self.wide_index)
    }

    pub fn addresses(&self, config: &Config) -> Result<PoolAddresses> {
        let (mint_a, mint_b) = self.mints()?;
        PoolAddresses::derive(&config.program_ids, self.config_index(config)?, &mint_a, &mint_b)
            .context("Failed to derive pool addresses")
    }
}
