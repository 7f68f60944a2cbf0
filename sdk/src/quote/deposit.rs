use curve_math::{
    math::{mul_div_ceil, mul_div_floor, to_u64},
    CurveCalculator, CurveError, StakePriceOracle, SwapCurve,
};
use log::debug;
use solana_sdk::pubkey::Pubkey;

use super::ensure_enabled;
use super::slippage::{apply_bps, maximum_with_slippage, minimum_with_slippage};
use crate::constants::UNLOCK_AMOUNT_BUFFER_BPS;
use crate::error::{Result, SdkError};
use crate::snapshot::PoolSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositQuote {
    pub pool_token_amount_out: u64,
    /// Buffered for locked profit that unlocks before execution, then
    /// reduced by slippage
    pub minimum_pool_token_amount_out: u64,
    pub token_a_amount_in: u64,
    pub token_b_amount_in: u64,
    pub maximum_token_a_amount_in: u64,
    pub maximum_token_b_amount_in: u64,
}

fn minimum_pool_tokens(pool_token_amount_out: u64, slippage_bps: u64) -> Result<u64> {
    let buffered = apply_bps(pool_token_amount_out, UNLOCK_AMOUNT_BUFFER_BPS)?;
    minimum_with_slippage(buffered, slippage_bps)
}

/// Deposit `amount` of `in_mint` together with the matching amount of the
/// other token, keeping the pool ratio.
pub fn compute_balanced_deposit_quote(
    snapshot: &PoolSnapshot,
    in_mint: &Pubkey,
    amount: u64,
    slippage_bps: u64,
) -> Result<DepositQuote> {
    ensure_enabled(snapshot)?;
    if amount == 0 {
        return Err(SdkError::EmptyDeposit);
    }
    let is_token_a = snapshot.pool.is_token_a(in_mint)?;

    let reserve_a = snapshot.vault_a_reserve()?.reserve()?;
    let reserve_b = snapshot.vault_b_reserve()?.reserve()?;
    let (reserve_in, reserve_other) = if is_token_a {
        (reserve_a, reserve_b)
    } else {
        (reserve_b, reserve_a)
    };
    let supply = snapshot.pool_lp_mint.supply;
    if supply == 0 || reserve_in == 0 {
        // an empty pool only takes imbalanced deposits
        return Err(CurveError::InvalidReserves.into());
    }

    let pool_token_amount_out = to_u64(mul_div_floor(amount as u128, supply as u128, reserve_in as u128)?)?;
    if pool_token_amount_out == 0 {
        return Err(CurveError::ZeroSwapResult.into());
    }

    let other_amount = match snapshot.swap_curve() {
        SwapCurve::ConstantProduct => mul_div_ceil(
            pool_token_amount_out as u128,
            reserve_other as u128,
            supply as u128,
        )?,
        SwapCurve::Stable(_) => mul_div_ceil(amount as u128, reserve_other as u128, reserve_in as u128)?,
    };
    let other_amount = to_u64(other_amount)?;

    let (token_a_amount_in, token_b_amount_in) = if is_token_a {
        (amount, other_amount)
    } else {
        (other_amount, amount)
    };
    debug!(
        "balanced deposit {} A + {} B -> {} pool tokens",
        token_a_amount_in, token_b_amount_in, pool_token_amount_out
    );

    Ok(DepositQuote {
        pool_token_amount_out,
        minimum_pool_token_amount_out: minimum_pool_tokens(pool_token_amount_out, slippage_bps)?,
        token_a_amount_in,
        token_b_amount_in,
        maximum_token_a_amount_in: maximum_with_slippage(token_a_amount_in, slippage_bps)?,
        maximum_token_b_amount_in: maximum_with_slippage(token_b_amount_in, slippage_bps)?,
    })
}

/// Deposit arbitrary amounts of both tokens. Only curves that can price the
/// imbalance support this; the first deposit into an empty pool goes here.
pub fn compute_imbalanced_deposit_quote(
    snapshot: &PoolSnapshot,
    token_a_amount: u64,
    token_b_amount: u64,
    slippage_bps: u64,
    oracle: &dyn StakePriceOracle,
) -> Result<DepositQuote> {
    ensure_enabled(snapshot)?;
    if token_a_amount == 0 && token_b_amount == 0 {
        return Err(SdkError::EmptyDeposit);
    }
    let fees = snapshot.fees();
    fees.validate()?;

    let reserve_a = snapshot.vault_a_reserve()?.reserve()?;
    let reserve_b = snapshot.vault_b_reserve()?.reserve()?;
    let minted = snapshot.bind_curve(oracle).compute_imbalanced_deposit(
        token_a_amount as u128,
        token_b_amount as u128,
        reserve_a as u128,
        reserve_b as u128,
        snapshot.pool_lp_mint.supply as u128,
        &fees,
    )?;
    let pool_token_amount_out = to_u64(minted)?;
    debug!(
        "imbalanced deposit {} A + {} B -> {} pool tokens",
        token_a_amount, token_b_amount, pool_token_amount_out
    );

    Ok(DepositQuote {
        pool_token_amount_out,
        minimum_pool_token_amount_out: minimum_pool_tokens(pool_token_amount_out, slippage_bps)?,
        token_a_amount_in: token_a_amount,
        token_b_amount_in: token_b_amount,
        // amounts are exact, only the minted side moves
        maximum_token_a_amount_in: token_a_amount,
        maximum_token_b_amount_in: token_b_amount,
    })
}
