use curve_math::CurveError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("curve math failed: {0}")]
    Curve(#[from] CurveError),

    #[error("{field} is {len} bytes, maximum is {max}")]
    FieldLengthExceeded {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("no valid bump seed found for program derived address")]
    NoValidBumpFound,

    #[error("mint {0} does not belong to this pool")]
    InvalidMint(Pubkey),

    #[error("{account} account data is {len} bytes, expected at least {expected}")]
    AccountDataTooShort {
        account: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("{0} account discriminator mismatch")]
    InvalidAccountDiscriminator(&'static str),

    #[error("failed to decode account data: {0}")]
    Decode(#[from] std::io::Error),

    #[error("pool is disabled")]
    PoolDisabled,

    #[error("pool activates at {activation_point}, current point is {current_point}")]
    PoolNotActivated {
        activation_point: u64,
        current_point: u64,
    },

    #[error("slippage of {0} bps is above 10000")]
    InvalidSlippage(u64),

    #[error("deposit amounts are all zero")]
    EmptyDeposit,
}

pub type Result<T> = std::result::Result<T, SdkError>;
