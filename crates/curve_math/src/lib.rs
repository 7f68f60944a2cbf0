//! Curve Math - swap curve engines for constant product (x·y=k) and
//! stable swap pools
//!
//! This crate holds the consensus-critical integer math shared by the quote
//! engine: checked ceiling division, fee accounting, the constant product
//! curve and the depeg-aware stable swap curve with its Newton solvers.
//!
//! No I/O and no Solana types. Time only enters through the caller-supplied
//! `current_time` used for the depeg cache.

#![cfg_attr(not(test), no_std)]

pub mod constant_product;
pub mod curve;
pub mod depeg;
pub mod fees;
pub mod math;
pub mod stable_swap;

pub use constant_product::ConstantProductSwap;
pub use curve::{BoundCurve, CurveCalculator, OutResult, SwapCurve, TokenSide, TradeDirection};
pub use depeg::{Depeg, DepegType, NoStakeOracle, StakePriceOracle, BASE_CACHE_EXPIRES, DEPEG_PRECISION};
pub use fees::Fees;
pub use math::checked_ceil_div;
pub use stable_swap::{StableCurveParams, StableSwap, TokenMultiplier};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Error types for curve operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// Arithmetic overflow
    ArithmeticOverflow,
    /// A subtraction or division produced a negative or zero result where a
    /// positive one is required (e.g. ceiling division with a zero quotient)
    ArithmeticUnderflow,
    /// Division by zero
    DivisionByZero,
    /// Swap would return zero tokens
    ZeroSwapResult,
    /// Requested amount exceeds what the pool holds
    InsufficientLiquidity,
    /// Invalid reserves (one side empty, zero amp, ...)
    InvalidReserves,
    /// Fee numerator above denominator or zero denominator
    InvalidFee,
    /// Operation not defined for this curve (constant product imbalance)
    UnsupportedOperation,
    /// Depeg base virtual price is older than the cache window
    StaleDepegCache,
    /// The stake price oracle could not price the stake account
    MissingStakePrice,
    /// Newton iteration did not converge
    ConvergenceFailure,
}

impl core::fmt::Display for CurveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            CurveError::ArithmeticOverflow => "arithmetic overflow",
            CurveError::ArithmeticUnderflow => "arithmetic underflow",
            CurveError::DivisionByZero => "division by zero",
            CurveError::ZeroSwapResult => "swap result is zero",
            CurveError::InsufficientLiquidity => "insufficient liquidity",
            CurveError::InvalidReserves => "invalid reserves",
            CurveError::InvalidFee => "invalid fee",
            CurveError::UnsupportedOperation => "operation not supported by this curve",
            CurveError::StaleDepegCache => "depeg cache is stale",
            CurveError::MissingStakePrice => "stake price unavailable",
            CurveError::ConvergenceFailure => "newton iteration did not converge",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for CurveError {}
