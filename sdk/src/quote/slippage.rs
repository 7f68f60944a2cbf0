use curve_math::{
    math::{mul_div_ceil, mul_div_floor, to_u64},
    BPS_SCALE,
};

use crate::error::{Result, SdkError};

fn check_bps(slippage_bps: u64) -> Result<()> {
    if slippage_bps > BPS_SCALE {
        return Err(SdkError::InvalidSlippage(slippage_bps));
    }
    Ok(())
}

/// `amount * (10000 - bps) / 10000`, rounded down
pub fn minimum_with_slippage(amount: u64, slippage_bps: u64) -> Result<u64> {
    check_bps(slippage_bps)?;
    let minimum = mul_div_floor(
        amount as u128,
        (BPS_SCALE - slippage_bps) as u128,
        BPS_SCALE as u128,
    )?;
    Ok(to_u64(minimum)?)
}

/// `amount * (10000 + bps) / 10000`, rounded up
pub fn maximum_with_slippage(amount: u64, slippage_bps: u64) -> Result<u64> {
    check_bps(slippage_bps)?;
    let maximum = mul_div_ceil(
        amount as u128,
        (BPS_SCALE + slippage_bps) as u128,
        BPS_SCALE as u128,
    )?;
    Ok(to_u64(maximum)?)
}

/// `amount * bps / 10000`, rounded down
pub fn apply_bps(amount: u64, bps: u64) -> Result<u64> {
    check_bps(bps)?;
    Ok(to_u64(mul_div_floor(amount as u128, bps as u128, BPS_SCALE as u128)?)?)
}
