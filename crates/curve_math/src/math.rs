//! Checked integer helpers shared by both curves

use primitive_types::U256;

use crate::CurveError;

/// Ceiling division that mirrors the on-chain reference implementation.
///
/// Returns `(quotient, refined_divisor)`:
/// - `quotient = ceil(dividend / divisor)`
/// - `refined_divisor` is the smallest divisor that still yields `quotient`
///   when the division had a remainder, otherwise `divisor` unchanged.
///
/// A zero floor quotient is rejected: the programs treat a swap that rounds
/// to nothing as invalid, not as a zero-amount swap.
pub fn checked_ceil_div(dividend: u128, divisor: u128) -> Result<(u128, u128), CurveError> {
    if divisor == 0 {
        return Err(CurveError::DivisionByZero);
    }

    let mut quotient = dividend / divisor;
    if quotient == 0 {
        return Err(CurveError::ArithmeticUnderflow);
    }

    let mut refined = divisor;
    if dividend % divisor > 0 {
        quotient = quotient.checked_add(1).ok_or(CurveError::ArithmeticOverflow)?;
        refined = dividend / quotient;
        if dividend % quotient > 0 {
            refined = refined.checked_add(1).ok_or(CurveError::ArithmeticOverflow)?;
        }
    }

    Ok((quotient, refined))
}

/// Integer square root, rounded down
#[inline]
pub fn sqrt(value: u128) -> u128 {
    U256::from(value).integer_sqrt().low_u128()
}

/// `a * b / c`, rounded down, with a 256-bit intermediate
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u128, CurveError> {
    if c == 0 {
        return Err(CurveError::DivisionByZero);
    }
    to_u128(U256::from(a) * U256::from(b) / U256::from(c))
}

/// `a * b / c`, rounded up, with a 256-bit intermediate
pub fn mul_div_ceil(a: u128, b: u128, c: u128) -> Result<u128, CurveError> {
    if c == 0 {
        return Err(CurveError::DivisionByZero);
    }
    let numerator = U256::from(a) * U256::from(b);
    let denominator = U256::from(c);
    let mut quotient = numerator / denominator;
    if !(numerator % denominator).is_zero() {
        quotient = quotient + U256::one();
    }
    to_u128(quotient)
}

/// Narrow a 256-bit value back to u128
#[inline]
pub fn to_u128(value: U256) -> Result<u128, CurveError> {
    if value > U256::from(u128::MAX) {
        return Err(CurveError::ArithmeticOverflow);
    }
    Ok(value.low_u128())
}

/// Narrow a u128 amount to the u64 used by token accounts
#[inline]
pub fn to_u64(value: u128) -> Result<u64, CurveError> {
    u64::try_from(value).map_err(|_| CurveError::ArithmeticOverflow)
}

/// Absolute difference of two 256-bit values
#[inline]
pub(crate) fn abs_diff(a: U256, b: U256) -> U256 {
    if a > b {
        a - b
    } else {
        b - a
    }
}
