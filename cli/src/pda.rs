//! Address derivation commands

use anyhow::{Context, Result};
use colored::Colorize;
use dualpool_sdk::pda::{find_associated_token_address, find_metadata_address};

use crate::args::{parse_pubkey, PoolArgs};
use crate::config::Config;

pub fn show_pool_addresses(config: &Config, pool: &PoolArgs) -> Result<()> {
    let index = pool.config_index(config)?;
    let addresses = pool.addresses(config)?;
    let (metadata, _) = find_metadata_address(&config.program_ids.metadata, &addresses.lp_mint)
        .context("Failed to derive LP metadata address")?;

    println!("{}", "=== Pool Addresses ===".bright_green().bold());
    println!("{} {}", "Program:".bright_cyan(), config.program_ids.cp_swap);
    println!("{} {}", "Config Index:".bright_cyan(), index.value());
    println!("{} {}", "AMM Config:".bright_cyan(), addresses.amm_config);
    println!("{} {}", "Authority:".bright_cyan(), addresses.authority);
    println!("{} {}", "Pool:".bright_cyan(), addresses.pool);
    println!("{} {}", "Token A Mint:".bright_cyan(), addresses.token_a_mint);
    println!("{} {}", "Token B Mint:".bright_cyan(), addresses.token_b_mint);
    println!("{} {}", "Token A Vault:".bright_cyan(), addresses.token_a_vault);
    println!("{} {}", "Token B Vault:".bright_cyan(), addresses.token_b_vault);
    println!("{} {}", "LP Mint:".bright_cyan(), addresses.lp_mint);
    println!("{} {}", "LP Metadata:".bright_cyan(), metadata);
    println!("{} {}", "Observation:".bright_cyan(), addresses.observation);
    Ok(())
}

pub fn show_associated_token_address(
    config: &Config,
    owner: &str,
    mint: &str,
    token_2022: bool,
) -> Result<()> {
    let owner = parse_pubkey("owner", owner)?;
    let mint = parse_pubkey("mint", mint)?;
    let token_program = if token_2022 {
        config.program_ids.token_2022
    } else {
        config.program_ids.token
    };
    let (address, bump) =
        find_associated_token_address(&config.program_ids.associated_token, &owner, &token_program, &mint)
            .context("Failed to derive associated token address")?;

    println!("{}", "=== Associated Token Account ===".bright_green().bold());
    println!("{} {}", "Owner:".bright_cyan(), owner);
    println!("{} {}", "Mint:".bright_cyan(), mint);
    println!("{} {}", "Token Program:".bright_cyan(), token_program);
    println!("{} {}", "Address:".bright_cyan(), address);
    println!("{} {}", "Bump:".bright_cyan(), bump);
    Ok(())
}
