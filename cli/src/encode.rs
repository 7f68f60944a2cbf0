//! Instruction encoding commands. Nothing is signed or sent; the encoded
//! instruction is printed for use with other tooling.

use anyhow::{Context, Result};
use dualpool_sdk::instruction::{
    create_amm_config, deposit, initialize, initialize_metadata, swap_base_input, swap_base_output, withdraw,
    CreateAmmConfigAccounts, CreateAmmConfigArgs, DepositArgs, InitializeAccounts, InitializeArgs,
    InitializeMetadataAccounts, InitializeMetadataArgs, LiquidityAccounts, SwapAccounts, SwapBaseInputArgs,
    SwapBaseOutputArgs, WithdrawArgs,
};
use dualpool_sdk::ProgramIds;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::args::{parse_pubkey, PoolArgs};
use crate::config::Config;
use crate::output::print_instruction;

/// Amount and token program for one side of a pool, as given on the
/// command line (not yet in canonical mint order)
#[derive(Debug, Clone, Copy)]
pub struct Side {
    pub amount: u64,
    pub token_2022: bool,
}

fn token_program(program_ids: &ProgramIds, token_2022: bool) -> Pubkey {
    if token_2022 {
        program_ids.token_2022
    } else {
        program_ids.token
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SwapAmounts {
    ExactIn { amount_in: u64, minimum_amount_out: u64 },
    ExactOut { max_amount_in: u64, amount_out: u64 },
}

pub fn build_swap(
    config: &Config,
    payer: &str,
    pool: &PoolArgs,
    input_mint: &str,
    (input_token_2022, output_token_2022): (bool, bool),
    amounts: SwapAmounts,
) -> Result<Instruction> {
    let ids = &config.program_ids;
    let payer = parse_pubkey("payer", payer)?;
    let input_mint = parse_pubkey("input mint", input_mint)?;
    let addresses = pool.addresses(config)?;
    let accounts = SwapAccounts::derive(
        ids,
        payer,
        &addresses,
        (input_mint, token_program(ids, input_token_2022)),
        token_program(ids, output_token_2022),
    )
    .context("Failed to derive swap accounts")?;

    let instruction = match amounts {
        SwapAmounts::ExactIn {
            amount_in,
            minimum_amount_out,
        } => swap_base_input(
            ids,
            &accounts,
            SwapBaseInputArgs {
                amount_in,
                minimum_amount_out,
            },
        ),
        SwapAmounts::ExactOut {
            max_amount_in,
            amount_out,
        } => swap_base_output(
            ids,
            &accounts,
            SwapBaseOutputArgs {
                max_amount_in,
                amount_out,
            },
        ),
    };
    instruction.context("Failed to encode swap")
}

/// Liquidity accounts plus both amounts in canonical mint order
fn liquidity_accounts(
    config: &Config,
    owner: &str,
    pool: &PoolArgs,
    side_a: Side,
    side_b: Side,
) -> Result<(LiquidityAccounts, u64, u64)> {
    let ids = &config.program_ids;
    let owner = parse_pubkey("owner", owner)?;
    let (mint_a, _) = pool.mints()?;
    let addresses = pool.addresses(config)?;
    let (first, second) = if addresses.token_a_mint == mint_a {
        (side_a, side_b)
    } else {
        (side_b, side_a)
    };
    let accounts = LiquidityAccounts::derive(
        ids,
        owner,
        &addresses,
        &token_program(ids, first.token_2022),
        &token_program(ids, second.token_2022),
    )
    .context("Failed to derive liquidity accounts")?;
    Ok((accounts, first.amount, second.amount))
}

pub fn build_deposit(
    config: &Config,
    owner: &str,
    pool: &PoolArgs,
    lp_token_amount: u64,
    maximum_a: Side,
    maximum_b: Side,
) -> Result<Instruction> {
    let (accounts, maximum_token_a_amount, maximum_token_b_amount) =
        liquidity_accounts(config, owner, pool, maximum_a, maximum_b)?;
    deposit(
        &config.program_ids,
        &accounts,
        DepositArgs {
            lp_token_amount,
            maximum_token_a_amount,
            maximum_token_b_amount,
        },
    )
    .context("Failed to encode deposit")
}

pub fn build_withdraw(
    config: &Config,
    owner: &str,
    pool: &PoolArgs,
    lp_token_amount: u64,
    minimum_a: Side,
    minimum_b: Side,
) -> Result<Instruction> {
    let (accounts, minimum_token_a_amount, minimum_token_b_amount) =
        liquidity_accounts(config, owner, pool, minimum_a, minimum_b)?;
    withdraw(
        &config.program_ids,
        &accounts,
        WithdrawArgs {
            lp_token_amount,
            minimum_token_a_amount,
            minimum_token_b_amount,
        },
    )
    .context("Failed to encode withdraw")
}

pub fn build_create_pool(
    config: &Config,
    creator: &str,
    pool: &PoolArgs,
    side_a: Side,
    side_b: Side,
    open_time: u64,
) -> Result<Instruction> {
    let ids = &config.program_ids;
    let creator = parse_pubkey("creator", creator)?;
    let (mint_a, mint_b) = pool.mints()?;
    let accounts = InitializeAccounts::derive(
        ids,
        creator,
        pool.config_index(config)?,
        (mint_a, token_program(ids, side_a.token_2022)),
        (mint_b, token_program(ids, side_b.token_2022)),
    )
    .context("Failed to derive pool creation accounts")?;
    let (amount_max_a, amount_max_b) = if accounts.token_a_mint == mint_a {
        (side_a.amount, side_b.amount)
    } else {
        (side_b.amount, side_a.amount)
    };

    initialize(
        ids,
        &accounts,
        InitializeArgs {
            amount_max_a,
            amount_max_b,
            open_time,
        },
    )
    .context("Failed to encode pool creation")
}

pub fn build_create_config(
    config: &Config,
    owner: &str,
    index: Option<u64>,
    wide_index: bool,
    rates: [u64; 4],
) -> Result<Instruction> {
    let owner = parse_pubkey("owner", owner)?;
    let index = config.config_index(index, wide_index)?;
    let accounts = CreateAmmConfigAccounts::derive(&config.program_ids, owner, index)
        .context("Failed to derive AMM config address")?;
    let [token_0_lp_rate, token_1_lp_rate, token_0_creator_rate, token_1_creator_rate] = rates;

    create_amm_config(
        &config.program_ids,
        &accounts,
        CreateAmmConfigArgs {
            index: index.value(),
            token_1_lp_rate,
            token_0_lp_rate,
            token_0_creator_rate,
            token_1_creator_rate,
        },
    )
    .context("Failed to encode AMM config creation")
}

pub fn build_metadata(
    config: &Config,
    payer: &str,
    pool: &PoolArgs,
    name: &str,
    symbol: &str,
    uri: &str,
) -> Result<Instruction> {
    let payer = parse_pubkey("payer", payer)?;
    let addresses = pool.addresses(config)?;
    let args = InitializeMetadataArgs::new(name, symbol, uri).context("Invalid LP token metadata")?;
    let accounts = InitializeMetadataAccounts::new(
        &config.program_ids,
        payer,
        addresses.authority,
        addresses.pool,
        addresses.lp_mint,
    )
    .context("Failed to derive metadata accounts")?;

    initialize_metadata(&config.program_ids, &accounts, &args).context("Failed to encode metadata")
}

pub fn print(title: &str, instruction: Result<Instruction>) -> Result<()> {
    print_instruction(title, &instruction?);
    Ok(())
}
