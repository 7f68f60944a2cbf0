//! Instruction builders for the constant product swap program.
//!
//! Data is always `discriminator (8 bytes) || borsh(args)`. Borsh writes
//! fixed-width little-endian integers without padding and strings as a
//! `u32` length followed by the raw bytes, which is exactly the layout the
//! program expects.

mod create_pool;
mod liquidity;
mod metadata;
mod swap;

pub use create_pool::{
    create_amm_config, initialize, CreateAmmConfigAccounts, CreateAmmConfigArgs,
    InitializeAccounts, InitializeArgs,
};
pub use liquidity::{deposit, withdraw, DepositArgs, LiquidityAccounts, WithdrawArgs};
pub use metadata::{initialize_metadata, InitializeMetadataAccounts, InitializeMetadataArgs};
pub use swap::{swap_base_input, swap_base_output, SwapAccounts, SwapBaseInputArgs, SwapBaseOutputArgs};

use borsh::BorshSerialize;

use crate::error::Result;

/// `discriminator || borsh(args)`
pub fn encode_data<T: BorshSerialize>(discriminator: [u8; 8], args: &T) -> Result<Vec<u8>> {
    let mut data = discriminator.to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}
