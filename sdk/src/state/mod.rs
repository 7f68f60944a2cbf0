//! Decoders for the raw account bytes a quote needs

mod clock;
mod pool;
mod token;
mod vault;

pub use clock::ClockSnapshot;
pub use pool::{ActivationType, Bootstrapping, CurveType, DepegLayout, DepegTypeLayout, PoolFees, PoolState, TokenMultiplierLayout};
pub use token::{MintSnapshot, TokenAccountSnapshot};
pub use vault::{amount_by_share, unmint_amount, LockedProfitTracker, VaultState};

use borsh::BorshDeserialize;
use solana_sdk::hash::hashv;

use crate::error::{Result, SdkError};

/// Anchor account discriminator: `sha256("account:<name>")[..8]`
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let hash = hashv(&[b"account:", name.as_bytes()]).to_bytes();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

/// Check the 8-byte discriminator then borsh-decode the rest. Trailing
/// bytes (account padding) are ignored.
pub(crate) fn decode_anchor_account<T: BorshDeserialize>(name: &'static str, data: &[u8]) -> Result<T> {
    if data.len() < 8 {
        return Err(SdkError::AccountDataTooShort {
            account: name,
            len: data.len(),
            expected: 8,
        });
    }
    if data[..8] != account_discriminator(name) {
        return Err(SdkError::InvalidAccountDiscriminator(name));
    }
    let mut body = &data[8..];
    Ok(T::deserialize(&mut body)?)
}

/// Little-endian u64 at `offset`
pub(crate) fn read_u64(account: &'static str, data: &[u8], offset: usize) -> Result<u64> {
    let bytes = data
        .get(offset..offset + 8)
        .ok_or(SdkError::AccountDataTooShort {
            account,
            len: data.len(),
            expected: offset + 8,
        })?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(buf))
}
