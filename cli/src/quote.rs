//! Offline quotes from snapshot files

use anyhow::{Context, Result};
use colored::Colorize;
use dualpool_sdk::quote::{
    compute_balanced_deposit_quote, compute_imbalanced_deposit_quote, compute_single_sided_withdraw_quote,
    compute_swap_exact_out_quote, compute_swap_quote, compute_withdraw_quote, DepositQuote, WithdrawQuote,
};
use dualpool_sdk::calculate_pool_info;
use std::path::Path;

use crate::args::parse_pubkey;
use crate::config::Config;
use crate::snapshot;

#[derive(Debug, Clone)]
pub enum DepositMode {
    /// One side fixed, the other in pool ratio
    Balanced { in_mint: String, amount: u64 },
    Imbalanced { amount_a: u64, amount_b: u64 },
}

pub fn show_pool_info(snapshot_path: &Path) -> Result<()> {
    let loaded = snapshot::load(snapshot_path)?;
    let info = calculate_pool_info(&loaded.snapshot, &loaded.oracle).context("Failed to compute pool info")?;
    let pool = &loaded.snapshot.pool;

    println!("{}", "=== Pool Info ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), loaded.snapshot.pool_key);
    println!(
        "{} {}",
        "Curve:".bright_cyan(),
        if loaded.snapshot.swap_curve().is_stable() { "stable" } else { "constant product" }
    );
    println!("{} {}", "Enabled:".bright_cyan(), pool.enabled);
    println!("{} {} ({})", "Token A:".bright_cyan(), info.token_a_amount, pool.token_a_mint);
    println!("{} {} ({})", "Token B:".bright_cyan(), info.token_b_amount, pool.token_b_mint);
    println!("{} {}", "LP Supply:".bright_cyan(), info.pool_lp_supply);
    println!("{} {:.8}", "Virtual Price:".bright_cyan(), info.virtual_price_f64());
    Ok(())
}

pub fn quote_swap(
    config: &Config,
    snapshot_path: &Path,
    in_mint: &str,
    amount: u64,
    exact_out: bool,
    slippage_bps: Option<u64>,
) -> Result<()> {
    let loaded = snapshot::load(snapshot_path)?;
    let in_mint = parse_pubkey("input mint", in_mint)?;
    let slippage_bps = config.slippage_bps(slippage_bps);

    if exact_out {
        let quote = compute_swap_exact_out_quote(&loaded.snapshot, &in_mint, amount, slippage_bps, &loaded.oracle)
            .context("Failed to quote exact output swap")?;
        println!("{}", "=== Swap Quote (exact out) ===".bright_green().bold());
        println!("{} {} ({})", "Amount Out:".bright_cyan(), quote.out_amount, quote.out_mint);
        println!("{} {} ({})", "Amount In:".bright_cyan(), quote.in_amount, quote.in_mint);
        println!("{} {}", "Maximum In:".bright_cyan(), quote.maximum_in_amount);
        println!("{} {}", "Trade Fee:".bright_cyan(), quote.trade_fee);
        println!("{} {}", "Protocol Fee:".bright_cyan(), quote.protocol_fee);
        return Ok(());
    }

    let quote = compute_swap_quote(&loaded.snapshot, &in_mint, amount, slippage_bps, &loaded.oracle)
        .context("Failed to quote swap")?;
    println!("{}", "=== Swap Quote ===".bright_green().bold());
    println!("{} {} ({})", "Amount In:".bright_cyan(), quote.in_amount, quote.in_mint);
    println!("{} {} ({})", "Amount Out:".bright_cyan(), quote.out_amount, quote.out_mint);
    println!("{} {}", "Minimum Out:".bright_cyan(), quote.minimum_out_amount);
    println!("{} {}", "Trade Fee:".bright_cyan(), quote.trade_fee);
    println!("{} {}", "Protocol Fee:".bright_cyan(), quote.protocol_fee);
    let impact = format!("{:.4}%", quote.price_impact * 100.0);
    if quote.price_impact > 0.01 {
        println!("{} {}", "Price Impact:".bright_cyan(), impact.yellow());
    } else {
        println!("{} {}", "Price Impact:".bright_cyan(), impact);
    }
    Ok(())
}

fn print_deposit(quote: &DepositQuote) {
    println!("{}", "=== Deposit Quote ===".bright_green().bold());
    println!("{} {}", "Pool Tokens Out:".bright_cyan(), quote.pool_token_amount_out);
    println!("{} {}", "Minimum Pool Tokens:".bright_cyan(), quote.minimum_pool_token_amount_out);
    println!(
        "{} {} (max {})",
        "Token A In:".bright_cyan(),
        quote.token_a_amount_in,
        quote.maximum_token_a_amount_in
    );
    println!(
        "{} {} (max {})",
        "Token B In:".bright_cyan(),
        quote.token_b_amount_in,
        quote.maximum_token_b_amount_in
    );
}

pub fn quote_deposit(
    config: &Config,
    snapshot_path: &Path,
    mode: DepositMode,
    slippage_bps: Option<u64>,
) -> Result<()> {
    let loaded = snapshot::load(snapshot_path)?;
    let slippage_bps = config.slippage_bps(slippage_bps);

    let quote = match mode {
        DepositMode::Balanced { in_mint, amount } => {
            let in_mint = parse_pubkey("input mint", &in_mint)?;
            compute_balanced_deposit_quote(&loaded.snapshot, &in_mint, amount, slippage_bps)
        }
        DepositMode::Imbalanced { amount_a, amount_b } => {
            compute_imbalanced_deposit_quote(&loaded.snapshot, amount_a, amount_b, slippage_bps, &loaded.oracle)
        }
    }
    .context("Failed to quote deposit")?;

    print_deposit(&quote);
    Ok(())
}

fn print_withdraw(quote: &WithdrawQuote) {
    println!("{}", "=== Withdraw Quote ===".bright_green().bold());
    println!("{} {}", "Pool Tokens In:".bright_cyan(), quote.pool_token_amount_in);
    println!(
        "{} {} (min {})",
        "Token A Out:".bright_cyan(),
        quote.token_a_amount_out,
        quote.minimum_token_a_amount_out
    );
    println!(
        "{} {} (min {})",
        "Token B Out:".bright_cyan(),
        quote.token_b_amount_out,
        quote.minimum_token_b_amount_out
    );
}

pub fn quote_withdraw(
    config: &Config,
    snapshot_path: &Path,
    lp_amount: u64,
    out_mint: Option<&str>,
    slippage_bps: Option<u64>,
) -> Result<()> {
    let loaded = snapshot::load(snapshot_path)?;
    let slippage_bps = config.slippage_bps(slippage_bps);

    let quote = match out_mint {
        Some(out_mint) => {
            let out_mint = parse_pubkey("output mint", out_mint)?;
            compute_single_sided_withdraw_quote(&loaded.snapshot, lp_amount, &out_mint, slippage_bps, &loaded.oracle)
        }
        None => compute_withdraw_quote(&loaded.snapshot, lp_amount, slippage_bps),
    }
    .context("Failed to quote withdraw")?;

    print_withdraw(&quote);
    Ok(())
}
