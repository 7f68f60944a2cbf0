//! Dualpool CLI - offline address derivation, instruction encoding and quoting
//!
//! Nothing here talks to a cluster. Pool state comes from JSON snapshot files
//! holding raw account data; instructions are printed, not sent.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod args;
mod config;
mod encode;
mod output;
mod pda;
mod quote;
mod snapshot;

use args::PoolArgs;
use config::Config;
use encode::{Side, SwapAmounts};
use quote::DepositMode;

#[derive(Parser, Debug)]
#[command(name = "dualpool")]
#[command(about = "Dual AMM toolkit - derive addresses, encode instructions and quote pools", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/dualpool/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive program addresses
    Pda {
        #[command(subcommand)]
        command: PdaCommands,
    },

    /// Encode an instruction for the swap program
    Encode {
        #[command(subcommand)]
        command: EncodeCommands,
    },

    /// Quote against a pool snapshot file
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PdaCommands {
    /// Every address of a pool
    Pool {
        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Associated token account of an owner
    Ata {
        #[arg(long)]
        owner: String,

        #[arg(long)]
        mint: String,

        /// Mint is owned by the token-2022 program
        #[arg(long)]
        token_2022: bool,
    },
}

#[derive(Subcommand, Debug)]
enum EncodeCommands {
    /// Swap an exact input amount
    SwapIn {
        #[arg(long)]
        payer: String,

        #[command(flatten)]
        pool: PoolArgs,

        /// Mint being sold
        #[arg(long)]
        input_mint: String,

        #[arg(long)]
        amount_in: u64,

        #[arg(long)]
        minimum_amount_out: u64,

        #[arg(long)]
        input_token_2022: bool,

        #[arg(long)]
        output_token_2022: bool,
    },

    /// Swap for an exact output amount
    SwapOut {
        #[arg(long)]
        payer: String,

        #[command(flatten)]
        pool: PoolArgs,

        /// Mint being sold
        #[arg(long)]
        input_mint: String,

        #[arg(long)]
        max_amount_in: u64,

        #[arg(long)]
        amount_out: u64,

        #[arg(long)]
        input_token_2022: bool,

        #[arg(long)]
        output_token_2022: bool,
    },

    /// Deposit liquidity for LP tokens
    Deposit {
        #[arg(long)]
        owner: String,

        #[command(flatten)]
        pool: PoolArgs,

        /// LP tokens to mint
        #[arg(long)]
        lp_amount: u64,

        /// Maximum of --mint-a to pay
        #[arg(long)]
        max_amount_a: u64,

        /// Maximum of --mint-b to pay
        #[arg(long)]
        max_amount_b: u64,

        #[arg(long)]
        a_token_2022: bool,

        #[arg(long)]
        b_token_2022: bool,
    },

    /// Burn LP tokens for liquidity
    Withdraw {
        #[arg(long)]
        owner: String,

        #[command(flatten)]
        pool: PoolArgs,

        /// LP tokens to burn
        #[arg(long)]
        lp_amount: u64,

        /// Minimum of --mint-a to receive
        #[arg(long, default_value = "0")]
        min_amount_a: u64,

        /// Minimum of --mint-b to receive
        #[arg(long, default_value = "0")]
        min_amount_b: u64,

        #[arg(long)]
        a_token_2022: bool,

        #[arg(long)]
        b_token_2022: bool,
    },

    /// Create a pool with initial liquidity
    CreatePool {
        #[arg(long)]
        creator: String,

        #[command(flatten)]
        pool: PoolArgs,

        /// Initial amount of --mint-a
        #[arg(long)]
        amount_a: u64,

        /// Initial amount of --mint-b
        #[arg(long)]
        amount_b: u64,

        /// Unix time trading opens (0 = immediately)
        #[arg(long, default_value = "0")]
        open_time: u64,

        #[arg(long)]
        a_token_2022: bool,

        #[arg(long)]
        b_token_2022: bool,
    },

    /// Create an AMM config
    CreateConfig {
        #[arg(long)]
        owner: String,

        #[arg(long)]
        config_index: Option<u64>,

        #[arg(long)]
        wide_index: bool,

        #[arg(long, default_value = "0")]
        token_0_lp_rate: u64,

        #[arg(long, default_value = "0")]
        token_1_lp_rate: u64,

        #[arg(long, default_value = "0")]
        token_0_creator_rate: u64,

        #[arg(long, default_value = "0")]
        token_1_creator_rate: u64,
    },

    /// Create metadata for a pool's LP mint
    Metadata {
        #[arg(long)]
        payer: String,

        #[command(flatten)]
        pool: PoolArgs,

        /// Up to 32 bytes
        #[arg(long)]
        name: String,

        /// Up to 10 bytes
        #[arg(long)]
        symbol: String,

        /// Cut to 200 bytes when longer
        #[arg(long)]
        uri: String,
    },
}

#[derive(Subcommand, Debug)]
enum QuoteCommands {
    /// Reserves and virtual price
    Info {
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Swap quote
    Swap {
        #[arg(long)]
        snapshot: PathBuf,

        /// Mint being sold
        #[arg(long)]
        in_mint: String,

        /// Input amount, or the output amount with --exact-out
        #[arg(long)]
        amount: u64,

        #[arg(long)]
        exact_out: bool,

        #[arg(long)]
        slippage_bps: Option<u64>,
    },

    /// Deposit quote. Balanced with --in-mint/--amount, otherwise imbalanced
    Deposit {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long, requires = "amount")]
        in_mint: Option<String>,

        #[arg(long, requires = "in_mint")]
        amount: Option<u64>,

        #[arg(long, default_value = "0", conflicts_with = "in_mint")]
        amount_a: u64,

        #[arg(long, default_value = "0", conflicts_with = "in_mint")]
        amount_b: u64,

        #[arg(long)]
        slippage_bps: Option<u64>,
    },

    /// Withdraw quote. Single sided with --out-mint (stable pools only)
    Withdraw {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        lp_amount: u64,

        #[arg(long)]
        out_mint: Option<String>,

        #[arg(long)]
        slippage_bps: Option<u64>,
    },
}

fn side(amount: u64, token_2022: bool) -> Side {
    Side { amount, token_2022 }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Pda { command } => match command {
            PdaCommands::Pool { pool } => pda::show_pool_addresses(&config, &pool)?,
            PdaCommands::Ata {
                owner,
                mint,
                token_2022,
            } => pda::show_associated_token_address(&config, &owner, &mint, token_2022)?,
        },
        Commands::Encode { command } => match command {
            EncodeCommands::SwapIn {
                payer,
                pool,
                input_mint,
                amount_in,
                minimum_amount_out,
                input_token_2022,
                output_token_2022,
            } => encode::print(
                "Swap Base Input",
                encode::build_swap(
                    &config,
                    &payer,
                    &pool,
                    &input_mint,
                    (input_token_2022, output_token_2022),
                    SwapAmounts::ExactIn {
                        amount_in,
                        minimum_amount_out,
                    },
                ),
            )?,
            EncodeCommands::SwapOut {
                payer,
                pool,
                input_mint,
                max_amount_in,
                amount_out,
                input_token_2022,
                output_token_2022,
            } => encode::print(
                "Swap Base Output",
                encode::build_swap(
                    &config,
                    &payer,
                    &pool,
                    &input_mint,
                    (input_token_2022, output_token_2022),
                    SwapAmounts::ExactOut {
                        max_amount_in,
                        amount_out,
                    },
                ),
            )?,
            EncodeCommands::Deposit {
                owner,
                pool,
                lp_amount,
                max_amount_a,
                max_amount_b,
                a_token_2022,
                b_token_2022,
            } => encode::print(
                "Deposit",
                encode::build_deposit(
                    &config,
                    &owner,
                    &pool,
                    lp_amount,
                    side(max_amount_a, a_token_2022),
                    side(max_amount_b, b_token_2022),
                ),
            )?,
            EncodeCommands::Withdraw {
                owner,
                pool,
                lp_amount,
                min_amount_a,
                min_amount_b,
                a_token_2022,
                b_token_2022,
            } => encode::print(
                "Withdraw",
                encode::build_withdraw(
                    &config,
                    &owner,
                    &pool,
                    lp_amount,
                    side(min_amount_a, a_token_2022),
                    side(min_amount_b, b_token_2022),
                ),
            )?,
            EncodeCommands::CreatePool {
                creator,
                pool,
                amount_a,
                amount_b,
                open_time,
                a_token_2022,
                b_token_2022,
            } => encode::print(
                "Initialize Pool",
                encode::build_create_pool(
                    &config,
                    &creator,
                    &pool,
                    side(amount_a, a_token_2022),
                    side(amount_b, b_token_2022),
                    open_time,
                ),
            )?,
            EncodeCommands::CreateConfig {
                owner,
                config_index,
                wide_index,
                token_0_lp_rate,
                token_1_lp_rate,
                token_0_creator_rate,
                token_1_creator_rate,
            } => encode::print(
                "Create AMM Config",
                encode::build_create_config(
                    &config,
                    &owner,
                    config_index,
                    wide_index,
                    [
                        token_0_lp_rate,
                        token_1_lp_rate,
                        token_0_creator_rate,
                        token_1_creator_rate,
                    ],
                ),
            )?,
            EncodeCommands::Metadata {
                payer,
                pool,
                name,
                symbol,
                uri,
            } => encode::print(
                "Initialize Metadata",
                encode::build_metadata(&config, &payer, &pool, &name, &symbol, &uri),
            )?,
        },
        Commands::Quote { command } => match command {
            QuoteCommands::Info { snapshot } => quote::show_pool_info(&snapshot)?,
            QuoteCommands::Swap {
                snapshot,
                in_mint,
                amount,
                exact_out,
                slippage_bps,
            } => quote::quote_swap(&config, &snapshot, &in_mint, amount, exact_out, slippage_bps)?,
            QuoteCommands::Deposit {
                snapshot,
                in_mint,
                amount,
                amount_a,
                amount_b,
                slippage_bps,
            } => {
                let mode = match (in_mint, amount) {
                    (Some(in_mint), Some(amount)) => DepositMode::Balanced { in_mint, amount },
                    (None, None) => DepositMode::Imbalanced { amount_a, amount_b },
                    _ => anyhow::bail!("--in-mint and --amount must be given together"),
                };
                quote::quote_deposit(&config, &snapshot, mode, slippage_bps)?
            }
            QuoteCommands::Withdraw {
                snapshot,
                lp_amount,
                out_mint,
                slippage_bps,
            } => quote::quote_withdraw(&config, &snapshot, lp_amount, out_mint.as_deref(), slippage_bps)?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pool_pda() {
        let cli = Cli::try_parse_from([
            "dualpool",
            "pda",
            "pool",
            "--mint-a",
            "So11111111111111111111111111111111111111112",
            "--mint-b",
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "--config-index",
            "1",
        ])
        .unwrap();
        match cli.command {
            Commands::Pda {
                command: PdaCommands::Pool { pool },
            } => {
                assert_eq!(pool.config_index, Some(1));
                assert!(!pool.wide_index);
            }
            _ => panic!("expected pda pool"),
        }
    }

    #[test]
    fn test_deposit_quote_modes_conflict() {
        let result = Cli::try_parse_from([
            "dualpool",
            "quote",
            "deposit",
            "--snapshot",
            "s.json",
            "--in-mint",
            "So11111111111111111111111111111111111111112",
            "--amount",
            "5",
            "--amount-a",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deposit_quote_amount_requires_in_mint() {
        let err = Cli::try_parse_from(["dualpool", "quote", "deposit", "--snapshot", "s.json", "--amount", "5"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from([
            "dualpool",
            "quote",
            "deposit",
            "--snapshot",
            "s.json",
            "--amount-a",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Quote {
                command: QuoteCommands::Deposit { in_mint, amount, amount_a, .. },
            } => {
                assert_eq!((in_mint, amount, amount_a), (None, None, 5));
            }
            _ => panic!("expected quote deposit"),
        }
    }
}
