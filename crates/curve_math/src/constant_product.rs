//! Constant product curve (x·y=k)
//!
//! Rounding always favours the pool: the new destination reserve is rounded
//! up, so the invariant never decreases on a fee-free swap.

use crate::curve::{price_impact, CurveCalculator, OutResult, TokenSide, TradeDirection};
use crate::fees::Fees;
use crate::math::{checked_ceil_div, sqrt};
use crate::CurveError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantProductSwap;

impl CurveCalculator for ConstantProductSwap {
    /// - k = x0·y0
    /// - y1 = ceil(k / (x0 + Δx))
    /// - Δy_out = y0 - y1
    fn compute_out_amount(
        &self,
        source_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        _direction: TradeDirection,
    ) -> Result<OutResult, CurveError> {
        if swap_source_amount == 0 || swap_destination_amount == 0 {
            return Err(CurveError::InvalidReserves);
        }

        let invariant = swap_source_amount
            .checked_mul(swap_destination_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let new_swap_source_amount = swap_source_amount
            .checked_add(source_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let (new_swap_destination_amount, _) = checked_ceil_div(invariant, new_swap_source_amount)?;

        let out_amount = swap_destination_amount
            .checked_sub(new_swap_destination_amount)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        if out_amount == 0 {
            return Err(CurveError::ZeroSwapResult);
        }

        // No-slippage reference: Δx · y0 / x0
        let ideal_out =
            source_amount as f64 * swap_destination_amount as f64 / swap_source_amount as f64;

        Ok(OutResult {
            out_amount,
            price_impact: price_impact(ideal_out, out_amount as f64),
        })
    }

    /// - y1 = y0 - Δy
    /// - x1 = ceil(k / y1)
    /// - Δx_in = x1 - x0
    fn compute_in_amount(
        &self,
        destination_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        _direction: TradeDirection,
    ) -> Result<u128, CurveError> {
        if swap_source_amount == 0 || swap_destination_amount == 0 {
            return Err(CurveError::InvalidReserves);
        }
        if destination_amount == 0 {
            return Err(CurveError::ZeroSwapResult);
        }
        if destination_amount >= swap_destination_amount {
            return Err(CurveError::InsufficientLiquidity);
        }

        let invariant = swap_source_amount
            .checked_mul(swap_destination_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let new_swap_destination_amount = swap_destination_amount - destination_amount;
        let (new_swap_source_amount, _) = checked_ceil_div(invariant, new_swap_destination_amount)?;

        new_swap_source_amount
            .checked_sub(swap_source_amount)
            .ok_or(CurveError::ArithmeticUnderflow)
    }

    /// Geometric mean of the reserves. Only used as a liquidity reference
    /// value (virtual price), never for swap math.
    fn compute_invariant(
        &self,
        token_a_amount: u128,
        token_b_amount: u128,
    ) -> Result<u128, CurveError> {
        let product = token_a_amount
            .checked_mul(token_b_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        Ok(sqrt(product))
    }

    fn compute_imbalanced_deposit(
        &self,
        _deposit_a: u128,
        _deposit_b: u128,
        _token_a_amount: u128,
        _token_b_amount: u128,
        _pool_token_supply: u128,
        _fees: &Fees,
    ) -> Result<u128, CurveError> {
        Err(CurveError::UnsupportedOperation)
    }

    fn compute_single_sided_withdraw(
        &self,
        _pool_token_amount: u128,
        _pool_token_supply: u128,
        _token_a_amount: u128,
        _token_b_amount: u128,
        _fees: &Fees,
        _side: TokenSide,
    ) -> Result<u128, CurveError> {
        Err(CurveError::UnsupportedOperation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE: ConstantProductSwap = ConstantProductSwap;

    #[test]
    fn test_out_amount_small() {
        // k = 1e12, new x = 1_001_000, y1 = ceil(1e12 / 1_001_000) = 999_001
        let result = CURVE
            .compute_out_amount(1_000, 1_000_000, 1_000_000, TradeDirection::AtoB)
            .unwrap();
        assert_eq!(result.out_amount, 999);
        assert!(result.price_impact > 0.0 && result.price_impact < 0.01);
    }

    #[test]
    fn test_invariant_non_decreasing() {
        let (x0, y0) = (5_000_000u128, 12_345_678u128);
        let dx = 777_777u128;
        let out = CURVE.compute_out_amount(dx, x0, y0, TradeDirection::AtoB).unwrap().out_amount;

        assert!(out < y0);
        assert!((x0 + dx) * (y0 - out) >= x0 * y0, "Invariant should not decrease");
    }

    #[test]
    fn test_in_amount_round_trip_favours_pool() {
        let (x0, y0) = (1_000_000u128, 3_000_000u128);
        let dx = 12_345u128;
        let out = CURVE.compute_out_amount(dx, x0, y0, TradeDirection::AtoB).unwrap().out_amount;
        let back = CURVE.compute_in_amount(out, x0, y0, TradeDirection::AtoB).unwrap();
        assert!(back <= dx);
    }

    #[test]
    fn test_in_amount_is_minimal() {
        let (x0, y0) = (1_000_000u128, 1_000_000u128);
        let dy = 500u128;
        let dx = CURVE.compute_in_amount(dy, x0, y0, TradeDirection::BtoA).unwrap();
        let out = CURVE.compute_out_amount(dx, x0, y0, TradeDirection::BtoA).unwrap().out_amount;
        assert!(out >= dy);
    }

    #[test]
    fn test_zero_swap_result() {
        // 1 unit into a balanced pool rounds to nothing
        assert_eq!(
            CURVE.compute_out_amount(1, 1_000_000, 1_000_000, TradeDirection::AtoB),
            Err(CurveError::ZeroSwapResult)
        );
    }

    #[test]
    fn test_in_amount_insufficient_liquidity() {
        assert_eq!(
            CURVE.compute_in_amount(1_000, 1_000, 1_000, TradeDirection::AtoB),
            Err(CurveError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_invariant_is_geometric_mean() {
        assert_eq!(CURVE.compute_invariant(4, 9).unwrap(), 6);
        assert_eq!(CURVE.compute_invariant(1_000_000, 1_000_000).unwrap(), 1_000_000);
    }

    #[test]
    fn test_imbalanced_operations_unsupported() {
        let fees = Fees::default();
        assert_eq!(
            CURVE.compute_imbalanced_deposit(1, 2, 3, 4, 5, &fees),
            Err(CurveError::UnsupportedOperation)
        );
        assert_eq!(
            CURVE.compute_single_sided_withdraw(1, 2, 3, 4, &fees, TokenSide::A),
            Err(CurveError::UnsupportedOperation)
        );
    }
}
