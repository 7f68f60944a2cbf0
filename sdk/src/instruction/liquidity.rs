use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::encode_data;
use crate::config::ProgramIds;
use crate::constants::{DEPOSIT_DISCRIMINATOR, WITHDRAW_DISCRIMINATOR};
use crate::error::Result;
use crate::pda::{find_associated_token_address, PoolAddresses};

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DepositArgs {
    pub lp_token_amount: u64,
    pub maximum_token_a_amount: u64,
    pub maximum_token_b_amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct WithdrawArgs {
    pub lp_token_amount: u64,
    pub minimum_token_a_amount: u64,
    pub minimum_token_b_amount: u64,
}

/// Accounts shared by deposit and withdraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityAccounts {
    pub owner: Pubkey,
    pub authority: Pubkey,
    pub pool_state: Pubkey,
    pub owner_lp_token: Pubkey,
    pub token_a_account: Pubkey,
    pub token_b_account: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub vault_a_mint: Pubkey,
    pub vault_b_mint: Pubkey,
    pub lp_mint: Pubkey,
}

impl LiquidityAccounts {
    /// Owner accounts are associated token accounts; `token_a_program` and
    /// `token_b_program` must match the canonical mint order of `addresses`.
    pub fn derive(
        program_ids: &ProgramIds,
        owner: Pubkey,
        addresses: &PoolAddresses,
        token_a_program: &Pubkey,
        token_b_program: &Pubkey,
    ) -> Result<Self> {
        let ata = |token_program: &Pubkey, mint: &Pubkey| {
            find_associated_token_address(&program_ids.associated_token, &owner, token_program, mint)
                .map(|(address, _)| address)
        };

        Ok(Self {
            owner,
            authority: addresses.authority,
            pool_state: addresses.pool,
            owner_lp_token: ata(&program_ids.token, &addresses.lp_mint)?,
            token_a_account: ata(token_a_program, &addresses.token_a_mint)?,
            token_b_account: ata(token_b_program, &addresses.token_b_mint)?,
            token_a_vault: addresses.token_a_vault,
            token_b_vault: addresses.token_b_vault,
            vault_a_mint: addresses.token_a_mint,
            vault_b_mint: addresses.token_b_mint,
            lp_mint: addresses.lp_mint,
        })
    }

    fn account_metas(&self, program_ids: &ProgramIds) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.owner, true),
            AccountMeta::new_readonly(self.authority, false),
            AccountMeta::new(self.pool_state, false),
            AccountMeta::new(self.owner_lp_token, false),
            AccountMeta::new(self.token_a_account, false),
            AccountMeta::new(self.token_b_account, false),
            AccountMeta::new(self.token_a_vault, false),
            AccountMeta::new(self.token_b_vault, false),
            AccountMeta::new_readonly(program_ids.token, false),
            AccountMeta::new_readonly(program_ids.token_2022, false),
            AccountMeta::new_readonly(self.vault_a_mint, false),
            AccountMeta::new_readonly(self.vault_b_mint, false),
            AccountMeta::new(self.lp_mint, false),
        ]
    }
}

/// Mint `lp_token_amount` LP tokens, paying at most the given token amounts
pub fn deposit(
    program_ids: &ProgramIds,
    accounts: &LiquidityAccounts,
    args: DepositArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: program_ids.cp_swap,
        accounts: accounts.account_metas(program_ids),
        data: encode_data(DEPOSIT_DISCRIMINATOR, &args)?,
    })
}

/// Burn `lp_token_amount` LP tokens for at least the given token amounts
pub fn withdraw(
    program_ids: &ProgramIds,
    accounts: &LiquidityAccounts,
    args: WithdrawArgs,
) -> Result<Instruction> {
    let mut metas = accounts.account_metas(program_ids);
    metas.push(AccountMeta::new_readonly(program_ids.memo, false));

    Ok(Instruction {
        program_id: program_ids.cp_swap,
        accounts: metas,
        data: encode_data(WITHDRAW_DISCRIMINATOR, &args)?,
    })
}
