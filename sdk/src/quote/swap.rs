//! Swap quotes.
//!
//! Tokens never sit in the pool directly: the input is deposited into the
//! source vault for vault LP and the output is withdrawn from the
//! destination vault by burning vault LP. Both conversions round down, so
//! the quote routes amounts through the same share math the program uses.

use curve_math::{
    math::{checked_ceil_div, mul_div_ceil, to_u64},
    CurveCalculator, CurveError, Fees, StakePriceOracle, TradeDirection,
};
use log::debug;
use solana_sdk::pubkey::Pubkey;

use super::ensure_tradable;
use super::slippage::{maximum_with_slippage, minimum_with_slippage};
use crate::error::Result;
use crate::snapshot::{PoolSnapshot, VaultReserve};
use crate::state::{amount_by_share, unmint_amount};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapQuote {
    pub in_mint: Pubkey,
    pub out_mint: Pubkey,
    pub in_amount: u64,
    pub out_amount: u64,
    pub minimum_out_amount: u64,
    /// Total trade fee, protocol share included
    pub trade_fee: u64,
    pub protocol_fee: u64,
    /// Display only
    pub price_impact: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapExactOutQuote {
    pub in_mint: Pubkey,
    pub out_mint: Pubkey,
    pub out_amount: u64,
    pub in_amount: u64,
    pub maximum_in_amount: u64,
    pub trade_fee: u64,
    pub protocol_fee: u64,
}

struct SwapSides {
    direction: TradeDirection,
    out_mint: Pubkey,
    source: VaultReserve,
    destination: VaultReserve,
}

fn swap_sides(snapshot: &PoolSnapshot, in_mint: &Pubkey) -> Result<SwapSides> {
    let pool = &snapshot.pool;
    let (vault_a, vault_b) = (snapshot.vault_a_reserve()?, snapshot.vault_b_reserve()?);
    if pool.is_token_a(in_mint)? {
        Ok(SwapSides {
            direction: TradeDirection::AtoB,
            out_mint: pool.token_b_mint,
            source: vault_a,
            destination: vault_b,
        })
    } else {
        Ok(SwapSides {
            direction: TradeDirection::BtoA,
            out_mint: pool.token_a_mint,
            source: vault_b,
            destination: vault_a,
        })
    }
}

/// Upper bound on input refinements for an exact output quote
const MAX_EXACT_OUT_STEPS: usize = 32;

/// What the curve sees of a user input once fees are taken and the rest
/// has been deposited into the source vault
struct SourceDeposit {
    trade_fee: u64,
    protocol_fee: u64,
    curve_in_amount: u64,
}

fn deposit_into_source(fees: &Fees, source: &VaultReserve, in_amount: u64) -> Result<SourceDeposit> {
    let trade_fee = to_u64(fees.trading_fee(in_amount as u128)?)?;
    let protocol_fee = to_u64(fees.protocol_trading_fee(trade_fee as u128)?)?;
    let lp_fee = trade_fee - protocol_fee;
    let in_amount_after_protocol_fee = in_amount
        .checked_sub(protocol_fee)
        .ok_or(CurveError::ArithmeticUnderflow)?;

    // deposit into the source vault and see what the pool's share is worth
    let in_vault_lp = unmint_amount(in_amount_after_protocol_fee, source.withdrawable, source.vault_lp_supply)?;
    let after_withdrawable = add(source.withdrawable, in_amount_after_protocol_fee)?;
    let after_vault_lp_supply = add(source.vault_lp_supply, in_vault_lp)?;
    let after_pool_vault_lp = add(source.pool_vault_lp, in_vault_lp)?;
    let actual_in_amount = amount_by_share(after_pool_vault_lp, after_withdrawable, after_vault_lp_supply)?
        .checked_sub(amount_by_share(source.pool_vault_lp, after_withdrawable, after_vault_lp_supply)?)
        .ok_or(CurveError::ArithmeticUnderflow)?;
    let curve_in_amount = actual_in_amount
        .checked_sub(lp_fee)
        .ok_or(CurveError::ArithmeticUnderflow)?;

    Ok(SourceDeposit {
        trade_fee,
        protocol_fee,
        curve_in_amount,
    })
}

/// Tokens paid out for `curve_out_amount` after burning destination vault LP
fn withdraw_from_destination(destination: &VaultReserve, curve_out_amount: u64) -> Result<u64> {
    let out_vault_lp = unmint_amount(curve_out_amount, destination.withdrawable, destination.vault_lp_supply)?;
    amount_by_share(out_vault_lp, destination.withdrawable, destination.vault_lp_supply)
}

/// Smallest curve output that still pays out `out_amount` once withdrawn
/// from the destination vault
fn destination_curve_target(destination: &VaultReserve, out_amount: u64) -> Result<u64> {
    let (withdrawable, supply) = (destination.withdrawable as u128, destination.vault_lp_supply as u128);
    if withdrawable == 0 || supply == 0 {
        return Ok(out_amount);
    }
    let vault_lp = mul_div_ceil(out_amount as u128, supply, withdrawable)?;
    Ok(to_u64(mul_div_ceil(vault_lp, withdrawable, supply)?)?)
}

/// Quote swapping exactly `in_amount` of `in_mint`
pub fn compute_swap_quote(
    snapshot: &PoolSnapshot,
    in_mint: &Pubkey,
    in_amount: u64,
    slippage_bps: u64,
    oracle: &dyn StakePriceOracle,
) -> Result<SwapQuote> {
    ensure_tradable(snapshot)?;
    let sides = swap_sides(snapshot, in_mint)?;
    let fees = snapshot.fees();
    fees.validate()?;

    let SourceDeposit {
        trade_fee,
        protocol_fee,
        curve_in_amount,
    } = deposit_into_source(&fees, &sides.source, in_amount)?;

    let destination = sides.destination;
    let swap_destination_amount = destination.reserve()?;
    let result = snapshot.bind_curve(oracle).compute_out_amount(
        curve_in_amount as u128,
        sides.source.reserve()? as u128,
        swap_destination_amount as u128,
        sides.direction,
    )?;
    let curve_out_amount = to_u64(result.out_amount)?;

    let out_amount = withdraw_from_destination(&destination, curve_out_amount)?;
    if out_amount >= swap_destination_amount {
        return Err(CurveError::InsufficientLiquidity.into());
    }
    if out_amount == 0 {
        return Err(CurveError::ZeroSwapResult.into());
    }

    debug!(
        "swap {} {} -> {} {} (curve in {}, trade fee {}, protocol fee {})",
        in_amount, in_mint, out_amount, sides.out_mint, curve_in_amount, trade_fee, protocol_fee
    );

    Ok(SwapQuote {
        in_mint: *in_mint,
        out_mint: sides.out_mint,
        in_amount,
        out_amount,
        minimum_out_amount: minimum_with_slippage(out_amount, slippage_bps)?,
        trade_fee,
        protocol_fee,
        price_impact: result.price_impact,
    })
}

/// Quote receiving exactly `out_amount` of the mint opposite `in_mint`.
///
/// The curve output is raised until the destination vault pays out at least
/// `out_amount`. The input starts from the fee gross-up and is raised until
/// what reaches the curve through the source vault covers the curve input.
pub fn compute_swap_exact_out_quote(
    snapshot: &PoolSnapshot,
    in_mint: &Pubkey,
    out_amount: u64,
    slippage_bps: u64,
    oracle: &dyn StakePriceOracle,
) -> Result<SwapExactOutQuote> {
    ensure_tradable(snapshot)?;
    let sides = swap_sides(snapshot, in_mint)?;
    let fees = snapshot.fees();
    fees.validate()?;

    let curve_out_amount = destination_curve_target(&sides.destination, out_amount)?;
    let net_in_amount = to_u64(snapshot.bind_curve(oracle).compute_in_amount(
        curve_out_amount as u128,
        sides.source.reserve()? as u128,
        sides.destination.reserve()? as u128,
        sides.direction,
    )?)?;

    // in - fee(in) >= net  =>  in = ceil(net * den / (den - num))
    let denominator = fees.trade_fee_denominator as u128;
    let kept = denominator
        .checked_sub(fees.trade_fee_numerator as u128)
        .filter(|kept| *kept > 0)
        .ok_or(CurveError::InvalidFee)?;
    let scaled = (net_in_amount as u128)
        .checked_mul(denominator)
        .ok_or(CurveError::ArithmeticOverflow)?;
    let (in_amount, _) = checked_ceil_div(scaled, kept)?;
    let mut in_amount = to_u64(in_amount)?;

    for _ in 0..MAX_EXACT_OUT_STEPS {
        let deposit = deposit_into_source(&fees, &sides.source, in_amount)?;
        if deposit.curve_in_amount >= net_in_amount {
            debug!(
                "exact out {} {} <- {} {} (curve in {}, {} after vault)",
                out_amount, sides.out_mint, in_amount, in_mint, net_in_amount, deposit.curve_in_amount
            );
            return Ok(SwapExactOutQuote {
                in_mint: *in_mint,
                out_mint: sides.out_mint,
                out_amount,
                in_amount,
                maximum_in_amount: maximum_with_slippage(in_amount, slippage_bps)?,
                trade_fee: deposit.trade_fee,
                protocol_fee: deposit.protocol_fee,
            });
        }
        in_amount = add(in_amount, net_in_amount - deposit.curve_in_amount)?;
    }

    Err(CurveError::ConvergenceFailure.into())
}

fn add(a: u64, b: u64) -> Result<u64> {
    Ok(a.checked_add(b).ok_or(CurveError::ArithmeticOverflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use crate::snapshot::fixtures::{snapshot, stable_curve};
    use crate::state::CurveType;
    use curve_math::NoStakeOracle;

    #[test]
    fn test_constant_product_swap_quote() {
        let snapshot = snapshot(1_000_000_000, 1_000_000_000, 1_000_000_000, CurveType::ConstantProduct);
        let in_mint = snapshot.pool.token_a_mint;
        let quote = compute_swap_quote(&snapshot, &in_mint, 1_000_000, 100, &NoStakeOracle).unwrap();

        // 0.25% fee, 20% of it to the protocol
        assert_eq!(quote.trade_fee, 2_500);
        assert_eq!(quote.protocol_fee, 500);
        assert_eq!(quote.out_mint, snapshot.pool.token_b_mint);
        assert!(quote.out_amount < 997_500);
        assert!(quote.out_amount > 996_000);
        assert_eq!(quote.minimum_out_amount, quote.out_amount * 9_900 / 10_000);
        assert!(quote.price_impact > 0.0);
    }

    #[test]
    fn test_stable_quote_beats_constant_product() {
        let cp = snapshot(1_000_000_000, 1_000_000_000, 1_000_000_000, CurveType::ConstantProduct);
        let stable = snapshot(1_000_000_000, 1_000_000_000, 1_000_000_000, stable_curve(100));

        let cp_quote = compute_swap_quote(&cp, &cp.pool.token_b_mint, 100_000_000, 0, &NoStakeOracle).unwrap();
        let stable_quote =
            compute_swap_quote(&stable, &stable.pool.token_b_mint, 100_000_000, 0, &NoStakeOracle).unwrap();
        assert!(stable_quote.out_amount > cp_quote.out_amount);
    }

    #[test]
    fn test_swap_rejects_foreign_mint() {
        let snapshot = snapshot(1_000_000, 1_000_000, 1_000_000, CurveType::ConstantProduct);
        let result = compute_swap_quote(&snapshot, &Pubkey::new_unique(), 1_000, 0, &NoStakeOracle);
        assert!(matches!(result, Err(SdkError::InvalidMint(_))));
    }

    #[test]
    fn test_swap_requires_active_pool() {
        let mut snapshot = snapshot(1_000_000, 1_000_000, 1_000_000, CurveType::ConstantProduct);
        let in_mint = snapshot.pool.token_a_mint;

        snapshot.pool.bootstrapping.activation_point = snapshot.clock.slot + 1;
        assert!(matches!(
            compute_swap_quote(&snapshot, &in_mint, 1_000, 0, &NoStakeOracle),
            Err(SdkError::PoolNotActivated { .. })
        ));

        snapshot.pool.enabled = false;
        assert!(matches!(
            compute_swap_quote(&snapshot, &in_mint, 1_000, 0, &NoStakeOracle),
            Err(SdkError::PoolDisabled)
        ));
    }

    #[test]
    fn test_exact_out_covers_requested_amount() {
        let snapshot = snapshot(1_000_000_000, 2_000_000_000, 1_000_000_000, CurveType::ConstantProduct);
        let in_mint = snapshot.pool.token_a_mint;
        let quote = compute_swap_exact_out_quote(&snapshot, &in_mint, 1_000_000, 50, &NoStakeOracle).unwrap();

        assert_eq!(quote.out_mint, snapshot.pool.token_b_mint);
        assert!(quote.maximum_in_amount > quote.in_amount);

        // swapping the quoted input in yields at least the requested output
        let forward = compute_swap_quote(&snapshot, &in_mint, quote.in_amount, 0, &NoStakeOracle).unwrap();
        assert!(forward.out_amount >= 1_000_000);
    }

    #[test]
    fn test_exact_out_through_uneven_vault_shares() {
        // one vault LP is worth 2 tokens, so odd deposits lose a unit
        let snapshot = snapshot(1_000_000_000, 3_000_000_000, 1_000_000_000, CurveType::ConstantProduct);
        for in_mint in [snapshot.pool.token_a_mint, snapshot.pool.token_b_mint] {
            for out_amount in [1_001u64, 77_777, 1_234_567] {
                let quote = compute_swap_exact_out_quote(&snapshot, &in_mint, out_amount, 0, &NoStakeOracle).unwrap();
                assert_eq!(quote.maximum_in_amount, quote.in_amount);

                let forward = compute_swap_quote(&snapshot, &in_mint, quote.in_amount, 0, &NoStakeOracle).unwrap();
                assert!(forward.out_amount >= out_amount);
                assert_eq!(forward.trade_fee, quote.trade_fee);
            }
        }
    }

    #[test]
    fn test_exact_out_beyond_reserve() {
        let snapshot = snapshot(1_000_000, 1_000_000, 1_000_000, CurveType::ConstantProduct);
        let in_mint = snapshot.pool.token_a_mint;
        assert!(matches!(
            compute_swap_exact_out_quote(&snapshot, &in_mint, 1_000_000, 0, &NoStakeOracle),
            Err(SdkError::Curve(CurveError::InsufficientLiquidity))
        ));
    }
}
