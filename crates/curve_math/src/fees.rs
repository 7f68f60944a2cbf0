//! Trade and protocol fee accounting from numerator/denominator pairs

use crate::math::mul_div_floor;
use crate::stable_swap::N_COINS;
use crate::CurveError;

/// Pool fee rates.
///
/// The protocol fee is a cut of the trade fee, not of the traded amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fees {
    pub trade_fee_numerator: u64,
    pub trade_fee_denominator: u64,
    pub protocol_trade_fee_numerator: u64,
    pub protocol_trade_fee_denominator: u64,
}

impl Fees {
    pub const fn new(
        trade_fee_numerator: u64,
        trade_fee_denominator: u64,
        protocol_trade_fee_numerator: u64,
        protocol_trade_fee_denominator: u64,
    ) -> Self {
        Self {
            trade_fee_numerator,
            trade_fee_denominator,
            protocol_trade_fee_numerator,
            protocol_trade_fee_denominator,
        }
    }

    /// numerator <= denominator and denominator > 0 for both pairs
    pub fn validate(&self) -> Result<(), CurveError> {
        validate_fraction(self.trade_fee_numerator, self.trade_fee_denominator)?;
        validate_fraction(
            self.protocol_trade_fee_numerator,
            self.protocol_trade_fee_denominator,
        )
    }

    /// Trade fee charged on `amount`, rounded down
    pub fn trading_fee(&self, amount: u128) -> Result<u128, CurveError> {
        calculate_fee(amount, self.trade_fee_numerator, self.trade_fee_denominator)
    }

    /// Protocol share of an already computed trade fee
    pub fn protocol_trading_fee(&self, trade_fee: u128) -> Result<u128, CurveError> {
        calculate_fee(
            trade_fee,
            self.protocol_trade_fee_numerator,
            self.protocol_trade_fee_denominator,
        )
    }

    /// Trade fee scaled for liquidity imbalance: `fee * n / (4 * (n - 1))`.
    ///
    /// For a two-coin pool this halves the numerator.
    pub fn normalized_trade_fee(&self, amount: u128) -> Result<u128, CurveError> {
        let n = N_COINS as u64;
        let adjusted_numerator = self
            .trade_fee_numerator
            .checked_mul(n)
            .ok_or(CurveError::ArithmeticOverflow)?
            / (4 * (n - 1));
        calculate_fee(amount, adjusted_numerator, self.trade_fee_denominator)
    }
}

fn validate_fraction(numerator: u64, denominator: u64) -> Result<(), CurveError> {
    if denominator == 0 || numerator > denominator {
        return Err(CurveError::InvalidFee);
    }
    Ok(())
}

fn calculate_fee(amount: u128, numerator: u64, denominator: u64) -> Result<u128, CurveError> {
    if numerator == 0 || amount == 0 {
        return Ok(0);
    }
    mul_div_floor(amount, numerator as u128, denominator as u128)
}
