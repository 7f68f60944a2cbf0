use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};

use super::encode_data;
use crate::config::ProgramIds;
use crate::constants::{CREATE_AMM_CONFIG_DISCRIMINATOR, INITIALIZE_DISCRIMINATOR};
use crate::error::Result;
use crate::pda::{find_amm_config_address, find_associated_token_address, ConfigIndex, PoolAddresses};

/// Initial liquidity and open time for a new pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct InitializeArgs {
    pub amount_max_a: u64,
    pub amount_max_b: u64,
    pub open_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeAccounts {
    pub creator: Pubkey,
    pub amm_config: Pubkey,
    pub authority: Pubkey,
    pub pool_state: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub creator_token_a: Pubkey,
    pub creator_token_b: Pubkey,
    pub creator_lp_token: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub token_a_program: Pubkey,
    pub token_b_program: Pubkey,
    pub observation_state: Pubkey,
}

impl InitializeAccounts {
    /// Derive every account for `creator` creating a pool of `mint_a`/`mint_b`.
    /// The creator's token accounts are their associated token accounts.
    pub fn derive(
        program_ids: &ProgramIds,
        creator: Pubkey,
        config_index: ConfigIndex,
        (mint_a, mint_a_program): (Pubkey, Pubkey),
        (mint_b, mint_b_program): (Pubkey, Pubkey),
    ) -> Result<Self> {
        let addresses = PoolAddresses::derive(program_ids, config_index, &mint_a, &mint_b)?;
        // token programs follow their mints into canonical order
        let (token_a_program, token_b_program) = if addresses.token_a_mint == mint_a {
            (mint_a_program, mint_b_program)
        } else {
            (mint_b_program, mint_a_program)
        };

        let ata = |token_program: &Pubkey, mint: &Pubkey| {
            find_associated_token_address(&program_ids.associated_token, &creator, token_program, mint)
                .map(|(address, _)| address)
        };

        Ok(Self {
            creator,
            amm_config: addresses.amm_config,
            authority: addresses.authority,
            pool_state: addresses.pool,
            token_a_mint: addresses.token_a_mint,
            token_b_mint: addresses.token_b_mint,
            lp_mint: addresses.lp_mint,
            creator_token_a: ata(&token_a_program, &addresses.token_a_mint)?,
            creator_token_b: ata(&token_b_program, &addresses.token_b_mint)?,
            creator_lp_token: ata(&program_ids.token, &addresses.lp_mint)?,
            token_a_vault: addresses.token_a_vault,
            token_b_vault: addresses.token_b_vault,
            token_a_program,
            token_b_program,
            observation_state: addresses.observation,
        })
    }
}

/// Create a pool and seed it with initial liquidity
pub fn initialize(
    program_ids: &ProgramIds,
    accounts: &InitializeAccounts,
    args: InitializeArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: program_ids.cp_swap,
        accounts: vec![
            AccountMeta::new(accounts.creator, true),
            AccountMeta::new_readonly(accounts.amm_config, false),
            AccountMeta::new_readonly(accounts.authority, false),
            AccountMeta::new(accounts.pool_state, false),
            AccountMeta::new_readonly(accounts.token_a_mint, false),
            AccountMeta::new_readonly(accounts.token_b_mint, false),
            AccountMeta::new(accounts.lp_mint, false),
            AccountMeta::new(accounts.creator_token_a, false),
            AccountMeta::new(accounts.creator_token_b, false),
            AccountMeta::new(accounts.creator_lp_token, false),
            AccountMeta::new(accounts.token_a_vault, false),
            AccountMeta::new(accounts.token_b_vault, false),
            AccountMeta::new_readonly(program_ids.token, false),
            AccountMeta::new_readonly(accounts.token_a_program, false),
            AccountMeta::new_readonly(accounts.token_b_program, false),
            AccountMeta::new_readonly(program_ids.associated_token, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new(accounts.observation_state, false),
        ],
        data: encode_data(INITIALIZE_DISCRIMINATOR, &args)?,
    })
}

/// Fee rates of a new AMM config
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreateAmmConfigArgs {
    pub index: u64,
    pub token_1_lp_rate: u64,
    pub token_0_lp_rate: u64,
    pub token_0_creator_rate: u64,
    pub token_1_creator_rate: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAmmConfigAccounts {
    pub owner: Pubkey,
    pub amm_config: Pubkey,
}

impl CreateAmmConfigAccounts {
    pub fn derive(program_ids: &ProgramIds, owner: Pubkey, index: ConfigIndex) -> Result<Self> {
        let (amm_config, _) = find_amm_config_address(&program_ids.cp_swap, index)?;
        Ok(Self { owner, amm_config })
    }
}

pub fn create_amm_config(
    program_ids: &ProgramIds,
    accounts: &CreateAmmConfigAccounts,
    args: CreateAmmConfigArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: program_ids.cp_swap,
        accounts: vec![
            AccountMeta::new(accounts.owner, true),
            AccountMeta::new(accounts.amm_config, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: encode_data(CREATE_AMM_CONFIG_DISCRIMINATOR, &args)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_layout() {
        let ids = ProgramIds::default();
        let accounts = InitializeAccounts::derive(
            &ids,
            Pubkey::new_unique(),
            ConfigIndex::U16(0),
            (Pubkey::new_from_array([9; 32]), ids.token),
            (Pubkey::new_from_array([1; 32]), ids.token_2022),
        )
        .unwrap();
        let args = InitializeArgs {
            amount_max_a: 1,
            amount_max_b: 2,
            open_time: 3,
        };
        let ix = initialize(&ids, &accounts, args).unwrap();

        assert_eq!(ix.data.len(), 8 + 24);
        assert_eq!(&ix.data[..8], &INITIALIZE_DISCRIMINATOR);
        assert_eq!(&ix.data[16..24], &2u64.to_le_bytes());
        assert_eq!(ix.accounts.len(), 19);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(ix.accounts[3].is_writable);
        assert!(!ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[18].pubkey, accounts.observation_state);

        // token programs were swapped along with the mints
        assert_eq!(accounts.token_a_mint, Pubkey::new_from_array([1; 32]));
        assert_eq!(accounts.token_a_program, ids.token_2022);
        assert_eq!(ix.accounts[13].pubkey, ids.token_2022);
    }

    #[test]
    fn test_create_amm_config_layout() {
        let ids = ProgramIds::default();
        let accounts = CreateAmmConfigAccounts::derive(&ids, Pubkey::new_unique(), ConfigIndex::U64(4)).unwrap();
        let args = CreateAmmConfigArgs {
            index: 4,
            token_1_lp_rate: 2_500,
            token_0_lp_rate: 2_500,
            token_0_creator_rate: 0,
            token_1_creator_rate: 0,
        };
        let ix = create_amm_config(&ids, &accounts, args).unwrap();

        assert_eq!(ix.data.len(), 8 + 40);
        assert_eq!(&ix.data[8..16], &4u64.to_le_bytes());
        assert_eq!(ix.accounts.len(), 3);
        assert_eq!(ix.accounts[2].pubkey, system_program::ID);
    }
}
