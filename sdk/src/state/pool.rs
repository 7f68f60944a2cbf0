use borsh::{BorshDeserialize, BorshSerialize};
use curve_math::{Depeg, DepegType, Fees, StableCurveParams, SwapCurve, TokenMultiplier};
use solana_sdk::pubkey::Pubkey;

use super::decode_anchor_account;
use crate::error::{Result, SdkError};

/// Pool account. Decoded from `discriminator || borsh(PoolState)`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PoolState {
    pub lp_mint: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_decimals: u8,
    pub token_b_decimals: u8,
    /// Vault state accounts
    pub a_vault: Pubkey,
    pub b_vault: Pubkey,
    /// Pool-owned token accounts holding vault LP
    pub a_vault_lp: Pubkey,
    pub b_vault_lp: Pubkey,
    pub enabled: bool,
    pub fees: PoolFees,
    /// Stake pool priced by the depeg oracle
    pub stake: Pubkey,
    pub bootstrapping: Bootstrapping,
    pub curve_type: CurveType,
}

impl PoolState {
    pub const ACCOUNT_NAME: &'static str = "Pool";

    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        decode_anchor_account(Self::ACCOUNT_NAME, data)
    }

    /// `true` when `mint` is token A, `false` when token B
    pub fn is_token_a(&self, mint: &Pubkey) -> Result<bool> {
        if *mint == self.token_a_mint {
            Ok(true)
        } else if *mint == self.token_b_mint {
            Ok(false)
        } else {
            Err(SdkError::InvalidMint(*mint))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PoolFees {
    pub trade_fee_numerator: u64,
    pub trade_fee_denominator: u64,
    pub protocol_trade_fee_numerator: u64,
    pub protocol_trade_fee_denominator: u64,
}

impl From<PoolFees> for Fees {
    fn from(fees: PoolFees) -> Self {
        Fees::new(
            fees.trade_fee_numerator,
            fees.trade_fee_denominator,
            fees.protocol_trade_fee_numerator,
            fees.protocol_trade_fee_denominator,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ActivationType {
    #[default]
    Slot,
    Timestamp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Bootstrapping {
    pub activation_point: u64,
    pub activation_type: ActivationType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TokenMultiplierLayout {
    pub token_a_multiplier: u64,
    pub token_b_multiplier: u64,
    pub precision_factor: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum DepegTypeLayout {
    #[default]
    None,
    Marinade,
    Lido,
    SplStake,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DepegLayout {
    pub base_virtual_price: u64,
    pub base_cache_updated: u64,
    pub depeg_type: DepegTypeLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum CurveType {
    ConstantProduct,
    Stable {
        amp: u64,
        token_multiplier: TokenMultiplierLayout,
        depeg: DepegLayout,
        last_amp_updated_timestamp: u64,
    },
}

impl From<DepegTypeLayout> for DepegType {
    fn from(depeg_type: DepegTypeLayout) -> Self {
        match depeg_type {
            DepegTypeLayout::None => DepegType::None,
            DepegTypeLayout::Marinade => DepegType::Marinade,
            DepegTypeLayout::Lido => DepegType::Lido,
            DepegTypeLayout::SplStake => DepegType::SplStake,
        }
    }
}

impl From<CurveType> for SwapCurve {
    fn from(curve_type: CurveType) -> Self {
        match curve_type {
            CurveType::ConstantProduct => SwapCurve::ConstantProduct,
            CurveType::Stable {
                amp,
                token_multiplier,
                depeg,
                last_amp_updated_timestamp,
            } => SwapCurve::Stable(StableCurveParams {
                amp,
                token_multiplier: TokenMultiplier {
                    token_a_multiplier: token_multiplier.token_a_multiplier,
                    token_b_multiplier: token_multiplier.token_b_multiplier,
                    precision_factor: token_multiplier.precision_factor,
                },
                depeg: Depeg {
                    base_virtual_price: depeg.base_virtual_price,
                    base_cache_updated: depeg.base_cache_updated,
                    depeg_type: depeg.depeg_type.into(),
                },
                last_amp_updated_timestamp,
            }),
        }
    }
}
