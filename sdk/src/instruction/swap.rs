use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::encode_data;
use crate::config::ProgramIds;
use crate::constants::{SWAP_BASE_INPUT_DISCRIMINATOR, SWAP_BASE_OUTPUT_DISCRIMINATOR};
use crate::error::{Result, SdkError};
use crate::pda::{find_associated_token_address, PoolAddresses};

/// Exact input swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SwapBaseInputArgs {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

/// Exact output swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SwapBaseOutputArgs {
    pub max_amount_in: u64,
    pub amount_out: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAccounts {
    pub payer: Pubkey,
    pub authority: Pubkey,
    pub amm_config: Pubkey,
    pub pool_state: Pubkey,
    pub input_token_account: Pubkey,
    pub output_token_account: Pubkey,
    pub input_vault: Pubkey,
    pub output_vault: Pubkey,
    pub input_token_program: Pubkey,
    pub output_token_program: Pubkey,
    pub input_token_mint: Pubkey,
    pub output_token_mint: Pubkey,
    pub observation_state: Pubkey,
}

impl SwapAccounts {
    /// Accounts for swapping `input_mint` into the other pool mint, using
    /// the payer's associated token accounts
    pub fn derive(
        program_ids: &ProgramIds,
        payer: Pubkey,
        addresses: &PoolAddresses,
        (input_mint, input_token_program): (Pubkey, Pubkey),
        output_token_program: Pubkey,
    ) -> Result<Self> {
        let output_mint = if input_mint == addresses.token_a_mint {
            addresses.token_b_mint
        } else if input_mint == addresses.token_b_mint {
            addresses.token_a_mint
        } else {
            return Err(SdkError::InvalidMint(input_mint));
        };

        let ata = |token_program: &Pubkey, mint: &Pubkey| {
            find_associated_token_address(&program_ids.associated_token, &payer, token_program, mint)
                .map(|(address, _)| address)
        };

        Ok(Self {
            payer,
            authority: addresses.authority,
            amm_config: addresses.amm_config,
            pool_state: addresses.pool,
            input_token_account: ata(&input_token_program, &input_mint)?,
            output_token_account: ata(&output_token_program, &output_mint)?,
            input_vault: addresses.vault_for(&input_mint)?,
            output_vault: addresses.vault_for(&output_mint)?,
            input_token_program,
            output_token_program,
            input_token_mint: input_mint,
            output_token_mint: output_mint,
            observation_state: addresses.observation,
        })
    }

    fn account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.payer, true),
            AccountMeta::new_readonly(self.authority, false),
            AccountMeta::new_readonly(self.amm_config, false),
            AccountMeta::new(self.pool_state, false),
            AccountMeta::new(self.input_token_account, false),
            AccountMeta::new(self.output_token_account, false),
            AccountMeta::new(self.input_vault, false),
            AccountMeta::new(self.output_vault, false),
            AccountMeta::new_readonly(self.input_token_program, false),
            AccountMeta::new_readonly(self.output_token_program, false),
            AccountMeta::new_readonly(self.input_token_mint, false),
            AccountMeta::new_readonly(self.output_token_mint, false),
            AccountMeta::new(self.observation_state, false),
        ]
    }
}

pub fn swap_base_input(
    program_ids: &ProgramIds,
    accounts: &SwapAccounts,
    args: SwapBaseInputArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: program_ids.cp_swap,
        accounts: accounts.account_metas(),
        data: encode_data(SWAP_BASE_INPUT_DISCRIMINATOR, &args)?,
    })
}

pub fn swap_base_output(
    program_ids: &ProgramIds,
    accounts: &SwapAccounts,
    args: SwapBaseOutputArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: program_ids.cp_swap,
        accounts: accounts.account_metas(),
        data: encode_data(SWAP_BASE_OUTPUT_DISCRIMINATOR, &args)?,
    })
}
