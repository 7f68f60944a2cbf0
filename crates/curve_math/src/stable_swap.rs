//! Depeg-aware stable swap curve
//!
//! Invariant (two coins, `ann = amp * n`):
//!
//! ```text
//! ann * (x + y) + D = ann * D + D^3 / (4 * x * y)
//! ```
//!
//! All amounts are upscaled before the Newton solvers run: token A by its
//! decimal multiplier (and by `DEPEG_PRECISION` when depegged), token B by its
//! multiplier (and by the base virtual price when depegged). Results are
//! downscaled by the inverse.

use primitive_types::U256;

use crate::curve::{price_impact, CurveCalculator, OutResult, TokenSide, TradeDirection};
use crate::depeg::{Depeg, StakePriceOracle, DEPEG_PRECISION};
use crate::fees::Fees;
use crate::math::{abs_diff, mul_div_floor, to_u128};
use crate::CurveError;

/// Number of coins in a pool
pub const N_COINS: u8 = 2;

/// Newton iteration cap for D and Y
const MAX_ITERATIONS: u16 = 256;

/// Multipliers that bring both tokens to a common number of decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenMultiplier {
    pub token_a_multiplier: u64,
    pub token_b_multiplier: u64,
    pub precision_factor: u8,
}

/// Stable curve parameters as stored in the pool account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StableCurveParams {
    pub amp: u64,
    pub token_multiplier: TokenMultiplier,
    pub depeg: Depeg,
    pub last_amp_updated_timestamp: u64,
}

/// Stable swap calculator bound to a clock value and a stake price source
#[derive(Clone, Copy)]
pub struct StableSwap<'a> {
    amp: u64,
    token_multiplier: TokenMultiplier,
    depeg: Depeg,
    stake_account: [u8; 32],
    current_time: u64,
    oracle: &'a dyn StakePriceOracle,
}

impl core::fmt::Debug for StableSwap<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StableSwap")
            .field("amp", &self.amp)
            .field("token_multiplier", &self.token_multiplier)
            .field("depeg", &self.depeg)
            .field("current_time", &self.current_time)
            .finish()
    }
}

/// Scale factors resolved once per operation
#[derive(Debug, Clone, Copy)]
struct Scaling {
    token_a: u128,
    token_b: u128,
}

impl Scaling {
    fn factor(&self, side: TokenSide) -> u128 {
        match side {
            TokenSide::A => self.token_a,
            TokenSide::B => self.token_b,
        }
    }

    fn upscale(&self, side: TokenSide, amount: u128) -> Result<u128, CurveError> {
        amount
            .checked_mul(self.factor(side))
            .ok_or(CurveError::ArithmeticOverflow)
    }

    fn downscale(&self, side: TokenSide, amount: u128) -> Result<u128, CurveError> {
        amount
            .checked_div(self.factor(side))
            .ok_or(CurveError::DivisionByZero)
    }

    fn downscale_ceil(&self, side: TokenSide, amount: u128) -> Result<u128, CurveError> {
        let factor = self.factor(side);
        if factor == 0 {
            return Err(CurveError::DivisionByZero);
        }
        Ok(amount / factor + u128::from(amount % factor != 0))
    }
}

impl<'a> StableSwap<'a> {
    pub fn new(
        params: &StableCurveParams,
        stake_account: [u8; 32],
        current_time: u64,
        oracle: &'a dyn StakePriceOracle,
    ) -> Self {
        Self {
            amp: params.amp,
            token_multiplier: params.token_multiplier,
            depeg: params.depeg,
            stake_account,
            current_time,
            oracle,
        }
    }

    /// Depeg cache valid at the bound clock value
    pub fn current_depeg(&self) -> Result<Depeg, CurveError> {
        self.depeg
            .refreshed(self.current_time, &self.stake_account, self.oracle)
    }

    fn scaling(&self) -> Result<Scaling, CurveError> {
        let depeg = self.current_depeg()?;
        let token_a = self.token_multiplier.token_a_multiplier as u128;
        let token_b = self.token_multiplier.token_b_multiplier as u128;
        if token_a == 0 || token_b == 0 {
            return Err(CurveError::InvalidReserves);
        }

        if !depeg.is_depegged() {
            return Ok(Scaling { token_a, token_b });
        }
        if depeg.base_virtual_price == 0 {
            return Err(CurveError::MissingStakePrice);
        }
        Ok(Scaling {
            token_a: token_a * DEPEG_PRECISION as u128,
            token_b: token_b * depeg.base_virtual_price as u128,
        })
    }

    pub fn upscale_token_a(&self, amount: u128) -> Result<u128, CurveError> {
        self.scaling()?.upscale(TokenSide::A, amount)
    }

    pub fn downscale_token_a(&self, amount: u128) -> Result<u128, CurveError> {
        self.scaling()?.downscale(TokenSide::A, amount)
    }

    pub fn upscale_token_b(&self, amount: u128) -> Result<u128, CurveError> {
        self.scaling()?.upscale(TokenSide::B, amount)
    }

    pub fn downscale_token_b(&self, amount: u128) -> Result<u128, CurveError> {
        self.scaling()?.downscale(TokenSide::B, amount)
    }

    /// Marginal output per unit of input at the given upscaled reserves,
    /// from the partial derivatives of the invariant. Display math only.
    fn spot_rate(&self, source: u128, destination: u128, d: u128) -> f64 {
        let ann = (self.amp as f64) * (N_COINS as f64);
        let (x, y, d) = (source as f64, destination as f64, d as f64);
        if x <= 0.0 || y <= 0.0 {
            return 0.0;
        }
        // D^3 / (4xy), kept in f64 to avoid overflowing 256 bits
        let t = d / (2.0 * x) * d / (2.0 * y) * d;
        (ann + t / x) / (ann + t / y)
    }
}

impl CurveCalculator for StableSwap<'_> {
    fn compute_out_amount(
        &self,
        source_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        direction: TradeDirection,
    ) -> Result<OutResult, CurveError> {
        let scaling = self.scaling()?;
        let (source_side, destination_side) = direction.sides();

        let upscaled_source_amount = scaling.upscale(source_side, source_amount)?;
        let upscaled_swap_source = scaling.upscale(source_side, swap_source_amount)?;
        let upscaled_swap_destination = scaling.upscale(destination_side, swap_destination_amount)?;

        let d = compute_d(self.amp, upscaled_swap_source, upscaled_swap_destination)?;
        let new_swap_source = upscaled_swap_source
            .checked_add(upscaled_source_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let new_swap_destination = compute_y(self.amp, new_swap_source, d)?;

        // the extra unit keeps rounding from draining the pool
        let upscaled_out = upscaled_swap_destination
            .checked_sub(new_swap_destination)
            .and_then(|out| out.checked_sub(1))
            .ok_or(CurveError::ZeroSwapResult)?;
        let out_amount = scaling.downscale(destination_side, upscaled_out)?;
        if out_amount == 0 {
            return Err(CurveError::ZeroSwapResult);
        }

        let ideal_out = upscaled_source_amount as f64
            * self.spot_rate(upscaled_swap_source, upscaled_swap_destination, d);

        Ok(OutResult {
            out_amount,
            price_impact: price_impact(ideal_out, upscaled_out as f64),
        })
    }

    fn compute_in_amount(
        &self,
        destination_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        direction: TradeDirection,
    ) -> Result<u128, CurveError> {
        let scaling = self.scaling()?;
        let (source_side, destination_side) = direction.sides();

        if destination_amount == 0 {
            return Err(CurveError::ZeroSwapResult);
        }
        let upscaled_destination_amount = scaling.upscale(destination_side, destination_amount)?;
        let upscaled_swap_source = scaling.upscale(source_side, swap_source_amount)?;
        let upscaled_swap_destination = scaling.upscale(destination_side, swap_destination_amount)?;
        if upscaled_destination_amount >= upscaled_swap_destination {
            return Err(CurveError::InsufficientLiquidity);
        }

        let d = compute_d(self.amp, upscaled_swap_source, upscaled_swap_destination)?;
        let new_swap_destination = upscaled_swap_destination - upscaled_destination_amount;
        let new_swap_source = compute_y(self.amp, new_swap_destination, d)?;

        let upscaled_in = new_swap_source
            .checked_sub(upscaled_swap_source)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        // input side rounds up so the pool is never short
        scaling.downscale_ceil(source_side, upscaled_in)
    }

    /// D expressed in token A units
    fn compute_invariant(
        &self,
        token_a_amount: u128,
        token_b_amount: u128,
    ) -> Result<u128, CurveError> {
        let scaling = self.scaling()?;
        let d = compute_d(
            self.amp,
            scaling.upscale(TokenSide::A, token_a_amount)?,
            scaling.upscale(TokenSide::B, token_b_amount)?,
        )?;
        scaling.downscale(TokenSide::A, d)
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
        let scaling = self.scaling()?;
        let old_a = scaling.upscale(TokenSide::A, token_a_amount)?;
        let old_b = scaling.upscale(TokenSide::B, token_b_amount)?;
        let new_a = old_a
            .checked_add(scaling.upscale(TokenSide::A, deposit_a)?)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let new_b = old_b
            .checked_add(scaling.upscale(TokenSide::B, deposit_b)?)
            .ok_or(CurveError::ArithmeticOverflow)?;

        let d_0 = compute_d(self.amp, old_a, old_b)?;
        let d_1 = compute_d(self.amp, new_a, new_b)?;
        if d_1 < d_0 {
            return Err(CurveError::ArithmeticUnderflow);
        }

        if pool_token_supply == 0 {
            // first deposit mints D in token A units
            return scaling.downscale(TokenSide::A, d_1);
        }
        if d_0 == 0 {
            return Err(CurveError::InvalidReserves);
        }

        // charge the imbalance fee on each side's distance from its ideal balance
        let mut adjusted = [0u128; 2];
        for (slot, (old, new)) in adjusted.iter_mut().zip([(old_a, new_a), (old_b, new_b)]) {
            let ideal = mul_div_floor(d_1, old, d_0)?;
            let difference = ideal.abs_diff(new);
            let fee = fees.normalized_trade_fee(difference)?;
            *slot = new.checked_sub(fee).ok_or(CurveError::ArithmeticUnderflow)?;
        }
        let d_2 = compute_d(self.amp, adjusted[0], adjusted[1])?;

        let minted = d_2
            .checked_sub(d_0)
            .ok_or(CurveError::ArithmeticUnderflow)
            .and_then(|growth| mul_div_floor(pool_token_supply, growth, d_0))?;
        if minted == 0 {
            return Err(CurveError::ZeroSwapResult);
        }
        Ok(minted)
    }

    /// Withdraw-both then swap the other side into `side`, with the trade fee
    /// charged on the implied swap
    fn compute_single_sided_withdraw(
        &self,
        pool_token_amount: u128,
        pool_token_supply: u128,
        token_a_amount: u128,
        token_b_amount: u128,
        fees: &Fees,
        side: TokenSide,
    ) -> Result<u128, CurveError> {
        if pool_token_supply == 0 {
            return Err(CurveError::DivisionByZero);
        }
        if pool_token_amount == 0 {
            return Err(CurveError::ZeroSwapResult);
        }
        if pool_token_amount > pool_token_supply {
            return Err(CurveError::InsufficientLiquidity);
        }

        let scaling = self.scaling()?;
        let upscaled_a = scaling.upscale(TokenSide::A, token_a_amount)?;
        let upscaled_b = scaling.upscale(TokenSide::B, token_b_amount)?;
        let (base, quote) = match side {
            TokenSide::A => (upscaled_a, upscaled_b),
            TokenSide::B => (upscaled_b, upscaled_a),
        };

        let d_0 = compute_d(self.amp, base, quote)?;
        if d_0 == 0 {
            return Err(CurveError::InvalidReserves);
        }
        let d_1 = d_0
            .checked_sub(mul_div_floor(pool_token_amount, d_0, pool_token_supply)?)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        let new_y = compute_y(self.amp, quote, d_1)?;

        let expected_base = mul_div_floor(base, d_1, d_0)?
            .checked_sub(new_y)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        let expected_quote = quote
            .checked_sub(mul_div_floor(quote, d_1, d_0)?)
            .ok_or(CurveError::ArithmeticUnderflow)?;

        let new_base = base
            .checked_sub(fees.normalized_trade_fee(expected_base)?)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        let new_quote = quote
            .checked_sub(fees.normalized_trade_fee(expected_quote)?)
            .ok_or(CurveError::ArithmeticUnderflow)?;

        let dy = new_base
            .checked_sub(compute_y(self.amp, new_quote, d_1)?)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        let out_amount = scaling.downscale(side, dy)?;
        if out_amount == 0 {
            return Err(CurveError::ZeroSwapResult);
        }
        Ok(out_amount)
    }
}

/// d = (ann * sum_x + d_prod * n) * d / ((ann - 1) * d + (n + 1) * d_prod)
fn compute_next_d(ann: U256, d_init: U256, d_prod: U256, sum_x: U256) -> Result<U256, CurveError> {
    let n = U256::from(N_COINS);
    let numerator = ann
        .checked_mul(sum_x)
        .and_then(|leverage| d_prod.checked_mul(n)?.checked_add(leverage))
        .and_then(|inner| d_init.checked_mul(inner))
        .ok_or(CurveError::ArithmeticOverflow)?;
    let denominator = ann
        .checked_sub(U256::one())
        .ok_or(CurveError::InvalidReserves)?
        .checked_mul(d_init)
        .and_then(|lhs| d_prod.checked_mul(n + U256::one())?.checked_add(lhs))
        .ok_or(CurveError::ArithmeticOverflow)?;
    numerator
        .checked_div(denominator)
        .ok_or(CurveError::DivisionByZero)
}

/// Stable swap invariant D for upscaled reserves, by Newton's method
pub fn compute_d(amp: u64, amount_a: u128, amount_b: u128) -> Result<u128, CurveError> {
    let sum_x = amount_a
        .checked_add(amount_b)
        .ok_or(CurveError::ArithmeticOverflow)?;
    if sum_x == 0 {
        return Ok(0);
    }
    if amount_a == 0 || amount_b == 0 {
        return Err(CurveError::InvalidReserves);
    }

    let n = U256::from(N_COINS);
    let ann = U256::from(amp) * n;
    let amount_a_times_coins = U256::from(amount_a) * n;
    let amount_b_times_coins = U256::from(amount_b) * n;
    let sum_x = U256::from(sum_x);

    let mut d = sum_x;
    for _ in 0..MAX_ITERATIONS {
        // d_prod = D^3 / (n^n * prod(x_i)), built up one reserve at a time
        let d_prod = d
            .checked_mul(d)
            .map(|v| v / amount_a_times_coins)
            .and_then(|v| v.checked_mul(d))
            .map(|v| v / amount_b_times_coins)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let d_prev = d;
        d = compute_next_d(ann, d, d_prod, sum_x)?;
        if abs_diff(d, d_prev) <= U256::one() {
            return to_u128(d);
        }
    }

    Err(CurveError::ConvergenceFailure)
}

/// Reserve of the other token given one upscaled reserve `x` and invariant `d`
pub fn compute_y(amp: u64, x: u128, d: u128) -> Result<u128, CurveError> {
    if x == 0 {
        return Err(CurveError::DivisionByZero);
    }
    let n = U256::from(N_COINS);
    let ann = U256::from(amp) * n;
    if ann.is_zero() {
        return Err(CurveError::InvalidReserves);
    }
    let d = U256::from(d);
    let x = U256::from(x);

    // c = D^(n+1) / (n^(2n) * prod' * A), b = sum' + D / ann (D is subtracted below)
    let c = d
        .checked_mul(d)
        .map(|v| v / (x * n))
        .and_then(|v| v.checked_mul(d))
        .map(|v| v / (ann * n))
        .ok_or(CurveError::ArithmeticOverflow)?;
    let b = d / ann + x;

    // y^2 + (b - D) * y = c
    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let y_prev = y;
        let numerator = y
            .checked_mul(y)
            .and_then(|v| v.checked_add(c))
            .ok_or(CurveError::ArithmeticOverflow)?;
        let denominator = (y * U256::from(2u8) + b)
            .checked_sub(d)
            .filter(|v| !v.is_zero())
            .ok_or(CurveError::ArithmeticUnderflow)?;
        y = numerator / denominator;
        if abs_diff(y, y_prev) <= U256::one() {
            return to_u128(y);
        }
    }

    Err(CurveError::ConvergenceFailure)
}
