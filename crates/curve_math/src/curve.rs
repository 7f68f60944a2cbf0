//! Common capability set of the swap curves and the closed set of curve
//! variants a pool can carry

use crate::constant_product::ConstantProductSwap;
use crate::depeg::StakePriceOracle;
use crate::fees::Fees;
use crate::stable_swap::{StableCurveParams, StableSwap};
use crate::CurveError;

/// The direction of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    /// Input token A, output token B
    AtoB,
    /// Input token B, output token A
    BtoA,
}

impl TradeDirection {
    pub fn opposite(&self) -> TradeDirection {
        match self {
            TradeDirection::AtoB => TradeDirection::BtoA,
            TradeDirection::BtoA => TradeDirection::AtoB,
        }
    }

    /// (source side, destination side)
    pub fn sides(&self) -> (TokenSide, TokenSide) {
        match self {
            TradeDirection::AtoB => (TokenSide::A, TokenSide::B),
            TradeDirection::BtoA => (TokenSide::B, TokenSide::A),
        }
    }
}

/// One side of a two-token pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSide {
    A,
    B,
}

/// Swap output with its price impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutResult {
    /// Destination tokens paid out
    pub out_amount: u128,
    /// `(ideal - actual) / ideal` against the no-slippage price. Display only.
    pub price_impact: f64,
}

/// Operations every swap curve provides.
///
/// Reserves are the pool's token balances in native units. Curves that cannot
/// express an operation return [`CurveError::UnsupportedOperation`].
pub trait CurveCalculator {
    /// Destination tokens received for `source_amount` (fees already removed)
    fn compute_out_amount(
        &self,
        source_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        direction: TradeDirection,
    ) -> Result<OutResult, CurveError>;

    /// Minimal source amount that yields at least `destination_amount`
    fn compute_in_amount(
        &self,
        destination_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        direction: TradeDirection,
    ) -> Result<u128, CurveError>;

    /// Invariant value anchoring the pool token supply
    fn compute_invariant(&self, token_a_amount: u128, token_b_amount: u128)
        -> Result<u128, CurveError>;

    /// Pool tokens minted for a deposit of arbitrary proportions
    fn compute_imbalanced_deposit(
        &self,
        deposit_a: u128,
        deposit_b: u128,
        token_a_amount: u128,
        token_b_amount: u128,
        pool_token_supply: u128,
        fees: &Fees,
    ) -> Result<u128, CurveError>;

    /// Tokens of `side` received for burning `pool_token_amount`
    fn compute_single_sided_withdraw(
        &self,
        pool_token_amount: u128,
        pool_token_supply: u128,
        token_a_amount: u128,
        token_b_amount: u128,
        fees: &Fees,
        side: TokenSide,
    ) -> Result<u128, CurveError>;
}

/// Curve variant stored in the pool account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapCurve {
    ConstantProduct,
    Stable(StableCurveParams),
}

impl SwapCurve {
    pub fn is_stable(&self) -> bool {
        matches!(self, SwapCurve::Stable(_))
    }

    /// Bind the curve to a point in time and a stake price source.
    ///
    /// `stake_account` is only read by depegged stable curves.
    pub fn bind<'a>(
        &self,
        current_time: u64,
        stake_account: [u8; 32],
        oracle: &'a dyn StakePriceOracle,
    ) -> BoundCurve<'a> {
        match self {
            SwapCurve::ConstantProduct => BoundCurve::ConstantProduct(ConstantProductSwap),
            SwapCurve::Stable(params) => BoundCurve::Stable(StableSwap::new(
                params,
                stake_account,
                current_time,
                oracle,
            )),
        }
    }
}

/// A curve ready to compute
pub enum BoundCurve<'a> {
    ConstantProduct(ConstantProductSwap),
    Stable(StableSwap<'a>),
}

impl CurveCalculator for BoundCurve<'_> {
    fn compute_out_amount(
        &self,
        source_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        direction: TradeDirection,
    ) -> Result<OutResult, CurveError> {
        match self {
            BoundCurve::ConstantProduct(curve) => curve.compute_out_amount(
                source_amount,
                swap_source_amount,
                swap_destination_amount,
                direction,
            ),
            BoundCurve::Stable(curve) => curve.compute_out_amount(
                source_amount,
                swap_source_amount,
                swap_destination_amount,
                direction,
            ),
        }
    }

    fn compute_in_amount(
        &self,
        destination_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        direction: TradeDirection,
    ) -> Result<u128, CurveError> {
        match self {
            BoundCurve::ConstantProduct(curve) => curve.compute_in_amount(
                destination_amount,
                swap_source_amount,
                swap_destination_amount,
                direction,
            ),
            BoundCurve::Stable(curve) => curve.compute_in_amount(
                destination_amount,
                swap_source_amount,
                swap_destination_amount,
                direction,
            ),
        }
    }

    fn compute_invariant(
        &self,
        token_a_amount: u128,
        token_b_amount: u128,
    ) -> Result<u128, CurveError> {
        match self {
            BoundCurve::ConstantProduct(curve) => curve.compute_invariant(token_a_amount, token_b_amount),
            BoundCurve::Stable(curve) => curve.compute_invariant(token_a_amount, token_b_amount),
        }
    }

    fn compute_imbalanced_deposit(
        &self,
        deposit_a: u128,
        deposit_b: u128,
        token_a_amount: u128,
        token_b_amount: u128,
        pool_token_supply: u128,
        fees: &Fees,
    ) -> Result<u128, CurveError> {
        match self {
            BoundCurve::ConstantProduct(curve) => curve.compute_imbalanced_deposit(
                deposit_a,
                deposit_b,
                token_a_amount,
                token_b_amount,
                pool_token_supply,
                fees,
            ),
            BoundCurve::Stable(curve) => curve.compute_imbalanced_deposit(
                deposit_a,
                deposit_b,
                token_a_amount,
                token_b_amount,
                pool_token_supply,
                fees,
            ),
        }
    }

    fn compute_single_sided_withdraw(
        &self,
        pool_token_amount: u128,
        pool_token_supply: u128,
        token_a_amount: u128,
        token_b_amount: u128,
        fees: &Fees,
        side: TokenSide,
    ) -> Result<u128, CurveError> {
        match self {
            BoundCurve::ConstantProduct(curve) => curve.compute_single_sided_withdraw(
                pool_token_amount,
                pool_token_supply,
                token_a_amount,
                token_b_amount,
                fees,
                side,
            ),
            BoundCurve::Stable(curve) => curve.compute_single_sided_withdraw(
                pool_token_amount,
                pool_token_supply,
                token_a_amount,
                token_b_amount,
                fees,
                side,
            ),
        }
    }
}

/// `(ideal - actual) / ideal`, clamped to zero when actual beats ideal
pub(crate) fn price_impact(ideal_out: f64, actual_out: f64) -> f64 {
    if ideal_out <= 0.0 || actual_out >= ideal_out {
        return 0.0;
    }
    (ideal_out - actual_out) / ideal_out
}
