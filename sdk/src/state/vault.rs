//! Yield vault account and its share math.
//!
//! A vault holds the pool's tokens and lends part of them out to strategies.
//! Profit reported by strategies is released linearly, so the amount a vault
//! LP share is worth grows between reports:
//!
//! ```text
//! locked_profit = last_updated_locked_profit * (1e12 - elapsed * degradation) / 1e12
//! withdrawable  = total_amount - locked_profit
//! ```

use borsh::{BorshDeserialize, BorshSerialize};
use curve_math::math::{mul_div_floor, to_u64};
use curve_math::CurveError;
use solana_sdk::pubkey::Pubkey;

use super::decode_anchor_account;
use crate::constants::LOCKED_PROFIT_DEGRADATION_DENOMINATOR;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LockedProfitTracker {
    pub last_updated_locked_profit: u64,
    pub last_report: u64,
    pub locked_profit_degradation: u64,
}

impl LockedProfitTracker {
    /// Profit still locked at `current_time`. Zero once fully released.
    pub fn locked_profit(&self, current_time: u64) -> Result<u64> {
        let elapsed = current_time.saturating_sub(self.last_report) as u128;
        let ratio = elapsed
            .checked_mul(self.locked_profit_degradation as u128)
            .ok_or(CurveError::ArithmeticOverflow)?;
        if ratio > LOCKED_PROFIT_DEGRADATION_DENOMINATOR {
            return Ok(0);
        }

        let locked = mul_div_floor(
            self.last_updated_locked_profit as u128,
            LOCKED_PROFIT_DEGRADATION_DENOMINATOR - ratio,
            LOCKED_PROFIT_DEGRADATION_DENOMINATOR,
        )?;
        Ok(to_u64(locked)?)
    }
}

/// Vault account. Decoded from `discriminator || borsh(VaultState)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VaultState {
    pub enabled: bool,
    pub total_amount: u64,
    pub token_vault: Pubkey,
    pub token_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub locked_profit_tracker: LockedProfitTracker,
}

impl VaultState {
    pub const ACCOUNT_NAME: &'static str = "Vault";

    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        decode_anchor_account(Self::ACCOUNT_NAME, data)
    }

    /// Tokens LP holders can withdraw right now
    pub fn get_unlocked_amount(&self, current_time: u64) -> Result<u64> {
        let locked = self.locked_profit_tracker.locked_profit(current_time)?;
        Ok(self
            .total_amount
            .checked_sub(locked)
            .ok_or(CurveError::ArithmeticUnderflow)?)
    }

    /// Tokens redeemable for `share` vault LP out of `total_supply`
    pub fn get_amount_by_share(&self, current_time: u64, share: u64, total_supply: u64) -> Result<u64> {
        amount_by_share(share, self.get_unlocked_amount(current_time)?, total_supply)
    }

    /// Vault LP minted for depositing `amount` tokens
    pub fn get_unmint_amount(&self, current_time: u64, amount: u64, total_supply: u64) -> Result<u64> {
        unmint_amount(amount, self.get_unlocked_amount(current_time)?, total_supply)
    }
}

/// `share * withdrawable / total_shares`, floored; 0 when there are no shares
pub fn amount_by_share(share: u64, withdrawable: u64, total_shares: u64) -> Result<u64> {
    if total_shares == 0 {
        return Ok(0);
    }
    let amount = mul_div_floor(share as u128, withdrawable as u128, total_shares as u128)?;
    Ok(to_u64(amount)?)
}

/// Inverse of [`amount_by_share`]: `amount * total_shares / withdrawable`.
///
/// An empty vault mints shares 1:1.
pub fn unmint_amount(amount: u64, withdrawable: u64, total_shares: u64) -> Result<u64> {
    if withdrawable == 0 {
        return Ok(amount);
    }
    let shares = mul_div_floor(amount as u128, total_shares as u128, withdrawable as u128)?;
    Ok(to_u64(shares)?)
}
