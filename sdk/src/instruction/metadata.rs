use borsh::{BorshDeserialize, BorshSerialize};
use log::debug;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};

use super::encode_data;
use crate::config::ProgramIds;
use crate::constants::{
    INITIALIZE_METADATA_DISCRIMINATOR, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH,
};
use crate::error::{Result, SdkError};
use crate::pda::find_metadata_address;

/// LP token metadata. [`initialize_metadata`] applies the length limits
/// again, so a struct literal encodes the same as [`InitializeMetadataArgs::new`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct InitializeMetadataArgs {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl InitializeMetadataArgs {
    /// Rejects an over-long name or symbol. An over-long uri is cut to
    /// `MAX_URI_LENGTH` bytes instead, at the last char boundary that fits.
    pub fn new(name: &str, symbol: &str, uri: &str) -> Result<Self> {
        check_length("name", name, MAX_NAME_LENGTH)?;
        check_length("symbol", symbol, MAX_SYMBOL_LENGTH)?;

        let truncated = truncate_at_char_boundary(uri, MAX_URI_LENGTH);
        if truncated.len() < uri.len() {
            debug!("metadata uri truncated from {} to {} bytes", uri.len(), truncated.len());
        }

        Ok(Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: truncated.to_string(),
        })
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(SdkError::FieldLengthExceeded {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

fn truncate_at_char_boundary(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeMetadataAccounts {
    pub payer: Pubkey,
    pub authority: Pubkey,
    pub pool_state: Pubkey,
    pub lp_mint: Pubkey,
    pub metadata: Pubkey,
}

impl InitializeMetadataAccounts {
    pub fn new(
        program_ids: &ProgramIds,
        payer: Pubkey,
        authority: Pubkey,
        pool_state: Pubkey,
        lp_mint: Pubkey,
    ) -> Result<Self> {
        let (metadata, _) = find_metadata_address(&program_ids.metadata, &lp_mint)?;
        Ok(Self {
            payer,
            authority,
            pool_state,
            lp_mint,
            metadata,
        })
    }
}

pub fn initialize_metadata(
    program_ids: &ProgramIds,
    accounts: &InitializeMetadataAccounts,
    args: &InitializeMetadataArgs,
) -> Result<Instruction> {
    let args = InitializeMetadataArgs::new(&args.name, &args.symbol, &args.uri)?;
    Ok(Instruction {
        program_id: program_ids.cp_swap,
        accounts: vec![
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(accounts.authority, false),
            AccountMeta::new_readonly(accounts.pool_state, false),
            AccountMeta::new(accounts.lp_mint, false),
            AccountMeta::new(accounts.metadata, false),
            AccountMeta::new_readonly(program_ids.metadata, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data: encode_data(INITIALIZE_METADATA_DISCRIMINATOR, &args)?,
    })
}
