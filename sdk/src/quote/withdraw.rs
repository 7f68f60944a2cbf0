use curve_math::{
    math::{mul_div_floor, to_u64},
    CurveCalculator, CurveError, StakePriceOracle, TokenSide,
};
use log::debug;
use solana_sdk::pubkey::Pubkey;

use super::slippage::minimum_with_slippage;
use crate::error::Result;
use crate::snapshot::{PoolSnapshot, VaultReserve};
use crate::state::{amount_by_share, unmint_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawQuote {
    pub pool_token_amount_in: u64,
    pub token_a_amount_out: u64,
    pub token_b_amount_out: u64,
    pub minimum_token_a_amount_out: u64,
    pub minimum_token_b_amount_out: u64,
}

fn check_pool_tokens(snapshot: &PoolSnapshot, pool_token_amount: u64) -> Result<u64> {
    let supply = snapshot.pool_lp_mint.supply;
    if pool_token_amount == 0 {
        return Err(CurveError::ZeroSwapResult.into());
    }
    if pool_token_amount > supply {
        return Err(CurveError::InsufficientLiquidity.into());
    }
    Ok(supply)
}

/// Tokens paid by one vault when the pool burns its pro-rata vault LP
fn balanced_vault_out(vault: &VaultReserve, pool_token_amount: u64, supply: u64) -> Result<u64> {
    let vault_lp_burn = to_u64(mul_div_floor(
        pool_token_amount as u128,
        vault.pool_vault_lp as u128,
        supply as u128,
    )?)?;
    amount_by_share(vault_lp_burn, vault.withdrawable, vault.vault_lp_supply)
}

/// Burn `pool_token_amount` for both tokens in pool proportion
pub fn compute_withdraw_quote(
    snapshot: &PoolSnapshot,
    pool_token_amount: u64,
    slippage_bps: u64,
) -> Result<WithdrawQuote> {
    let supply = check_pool_tokens(snapshot, pool_token_amount)?;
    let token_a_amount_out = balanced_vault_out(&snapshot.vault_a_reserve()?, pool_token_amount, supply)?;
    let token_b_amount_out = balanced_vault_out(&snapshot.vault_b_reserve()?, pool_token_amount, supply)?;
    debug!(
        "withdraw {} pool tokens -> {} A + {} B",
        pool_token_amount, token_a_amount_out, token_b_amount_out
    );

    Ok(WithdrawQuote {
        pool_token_amount_in: pool_token_amount,
        token_a_amount_out,
        token_b_amount_out,
        minimum_token_a_amount_out: minimum_with_slippage(token_a_amount_out, slippage_bps)?,
        minimum_token_b_amount_out: minimum_with_slippage(token_b_amount_out, slippage_bps)?,
    })
}

/// Burn `pool_token_amount` for `out_mint` only. Stable pools only.
pub fn compute_single_sided_withdraw_quote(
    snapshot: &PoolSnapshot,
    pool_token_amount: u64,
    out_mint: &Pubkey,
    slippage_bps: u64,
    oracle: &dyn StakePriceOracle,
) -> Result<WithdrawQuote> {
    let supply = check_pool_tokens(snapshot, pool_token_amount)?;
    let side = if snapshot.pool.is_token_a(out_mint)? {
        TokenSide::A
    } else {
        TokenSide::B
    };
    let fees = snapshot.fees();
    fees.validate()?;

    let vault_a = snapshot.vault_a_reserve()?;
    let vault_b = snapshot.vault_b_reserve()?;
    let curve_out = snapshot.bind_curve(oracle).compute_single_sided_withdraw(
        pool_token_amount as u128,
        supply as u128,
        vault_a.reserve()? as u128,
        vault_b.reserve()? as u128,
        &fees,
        side,
    )?;
    let curve_out = to_u64(curve_out)?;

    // vault LP is burned for the curve amount and pays out by share
    let vault = match side {
        TokenSide::A => vault_a,
        TokenSide::B => vault_b,
    };
    let vault_lp_burn = unmint_amount(curve_out, vault.withdrawable, vault.vault_lp_supply)?;
    let amount_out = amount_by_share(vault_lp_burn, vault.withdrawable, vault.vault_lp_supply)?;
    let minimum_out = minimum_with_slippage(amount_out, slippage_bps)?;
    debug!(
        "single sided withdraw {} pool tokens -> {} {} (curve {})",
        pool_token_amount, amount_out, out_mint, curve_out
    );

    let (token_a_amount_out, token_b_amount_out, minimum_token_a_amount_out, minimum_token_b_amount_out) =
        match side {
            TokenSide::A => (amount_out, 0, minimum_out, 0),
            TokenSide::B => (0, amount_out, 0, minimum_out),
        };
    Ok(WithdrawQuote {
        pool_token_amount_in: pool_token_amount,
        token_a_amount_out,
        token_b_amount_out,
        minimum_token_a_amount_out,
        minimum_token_b_amount_out,
    })
}
