use solana_sdk::pubkey::Pubkey;

use super::read_u64;
use crate::error::{Result, SdkError};

/// SPL mint fields used in quotes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MintSnapshot {
    pub supply: u64,
    pub decimals: u8,
}

impl MintSnapshot {
    pub const LEN: usize = 82;
    const SUPPLY_OFFSET: usize = 36;
    const DECIMALS_OFFSET: usize = 44;

    /// Works for both token programs; extensions after the base layout are ignored
    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        if data.len() < Self::LEN {
            return Err(SdkError::AccountDataTooShort {
                account: "mint",
                len: data.len(),
                expected: Self::LEN,
            });
        }
        Ok(Self {
            supply: read_u64("mint", data, Self::SUPPLY_OFFSET)?,
            decimals: data[Self::DECIMALS_OFFSET],
        })
    }
}

/// SPL token account fields used in quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountSnapshot {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl TokenAccountSnapshot {
    pub const LEN: usize = 165;
    const AMOUNT_OFFSET: usize = 64;

    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        if data.len() < Self::LEN {
            return Err(SdkError::AccountDataTooShort {
                account: "token account",
                len: data.len(),
                expected: Self::LEN,
            });
        }
        Ok(Self {
            mint: pubkey_at(data, 0),
            owner: pubkey_at(data, 32),
            amount: read_u64("token account", data, Self::AMOUNT_OFFSET)?,
        })
    }
}

/// Caller checks the length
fn pubkey_at(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[offset..offset + 32]);
    Pubkey::new_from_array(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mint() {
        let mut data = vec![0u8; MintSnapshot::LEN];
        data[36..44].copy_from_slice(&1_000_000u64.to_le_bytes());
        data[44] = 6;
        assert_eq!(
            MintSnapshot::try_from_account_data(&data).unwrap(),
            MintSnapshot {
                supply: 1_000_000,
                decimals: 6
            }
        );
        assert!(MintSnapshot::try_from_account_data(&data[..81]).is_err());
    }

    #[test]
    fn test_decode_token_account() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut data = vec![0u8; TokenAccountSnapshot::LEN];
        data[..32].copy_from_slice(mint.as_ref());
        data[32..64].copy_from_slice(owner.as_ref());
        data[64..72].copy_from_slice(&77u64.to_le_bytes());

        let account = TokenAccountSnapshot::try_from_account_data(&data).unwrap();
        assert_eq!(account.mint, mint);
        assert_eq!(account.owner, owner);
        assert_eq!(account.amount, 77);
    }
}
