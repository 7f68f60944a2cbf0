//! Program derived addresses for pools and their accounts

use log::debug;
use solana_sdk::pubkey::Pubkey;

use crate::config::ProgramIds;
use crate::constants::{
    AMM_CONFIG_SEED, AUTH_SEED, METADATA_SEED, OBSERVATION_SEED, POOL_LP_MINT_SEED, POOL_SEED,
    POOL_VAULT_SEED,
};
use crate::error::{Result, SdkError};

/// `(address, bump)`
pub type PdaResult = (Pubkey, u8);

/// AMM config index. Older configs use a 2-byte index, newer ones 8 bytes;
/// both are encoded big-endian in the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIndex {
    U16(u16),
    U64(u64),
}

impl ConfigIndex {
    pub fn to_seed_bytes(&self) -> Vec<u8> {
        match self {
            ConfigIndex::U16(index) => index.to_be_bytes().to_vec(),
            ConfigIndex::U64(index) => index.to_be_bytes().to_vec(),
        }
    }

    pub fn value(&self) -> u64 {
        match self {
            ConfigIndex::U16(index) => *index as u64,
            ConfigIndex::U64(index) => *index,
        }
    }
}

/// First off-curve address for `seeds`, searching bumps from 255 down
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<PdaResult> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or(SdkError::NoValidBumpFound)
}

pub fn find_authority_address(program_id: &Pubkey) -> Result<PdaResult> {
    find_program_address(&[AUTH_SEED], program_id)
}

pub fn find_amm_config_address(program_id: &Pubkey, index: ConfigIndex) -> Result<PdaResult> {
    let index_bytes = index.to_seed_bytes();
    find_program_address(&[AMM_CONFIG_SEED, &index_bytes], program_id)
}

/// Pool address for a mint pair; the pair is put in canonical order first
pub fn find_pool_address(
    program_id: &Pubkey,
    amm_config: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
) -> Result<PdaResult> {
    let (token_a_mint, token_b_mint) = canonical_mint_pair(mint_a, mint_b)?;
    find_program_address(
        &[
            POOL_SEED,
            amm_config.as_ref(),
            token_a_mint.as_ref(),
            token_b_mint.as_ref(),
        ],
        program_id,
    )
}

pub fn find_lp_mint_address(program_id: &Pubkey, pool: &Pubkey) -> Result<PdaResult> {
    find_program_address(&[POOL_LP_MINT_SEED, pool.as_ref()], program_id)
}

pub fn find_vault_address(program_id: &Pubkey, pool: &Pubkey, mint: &Pubkey) -> Result<PdaResult> {
    find_program_address(&[POOL_VAULT_SEED, pool.as_ref(), mint.as_ref()], program_id)
}

pub fn find_observation_address(program_id: &Pubkey, pool: &Pubkey) -> Result<PdaResult> {
    find_program_address(&[OBSERVATION_SEED, pool.as_ref()], program_id)
}

/// Associated token account of `owner` for `mint` under `token_program`
pub fn find_associated_token_address(
    associated_token_program: &Pubkey,
    owner: &Pubkey,
    token_program: &Pubkey,
    mint: &Pubkey,
) -> Result<PdaResult> {
    find_program_address(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        associated_token_program,
    )
}

/// Token metadata account for `mint`
pub fn find_metadata_address(metadata_program: &Pubkey, mint: &Pubkey) -> Result<PdaResult> {
    find_program_address(
        &[METADATA_SEED, metadata_program.as_ref(), mint.as_ref()],
        metadata_program,
    )
}

/// Order two distinct mints by their bytes
pub fn canonical_mint_pair(mint_a: &Pubkey, mint_b: &Pubkey) -> Result<(Pubkey, Pubkey)> {
    match mint_a.to_bytes().cmp(&mint_b.to_bytes()) {
        std::cmp::Ordering::Less => Ok((*mint_a, *mint_b)),
        std::cmp::Ordering::Greater => Ok((*mint_b, *mint_a)),
        std::cmp::Ordering::Equal => Err(SdkError::InvalidMint(*mint_b)),
    }
}

/// Every address a pool owns, derived in one go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAddresses {
    pub authority: Pubkey,
    pub amm_config: Pubkey,
    pub pool: Pubkey,
    pub lp_mint: Pubkey,
    /// Canonically ordered mints
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub observation: Pubkey,
}

impl PoolAddresses {
    pub fn derive(
        program_ids: &ProgramIds,
        config_index: ConfigIndex,
        mint_a: &Pubkey,
        mint_b: &Pubkey,
    ) -> Result<Self> {
        let program_id = &program_ids.cp_swap;
        let (token_a_mint, token_b_mint) = canonical_mint_pair(mint_a, mint_b)?;

        let (authority, _) = find_authority_address(program_id)?;
        let (amm_config, _) = find_amm_config_address(program_id, config_index)?;
        let (pool, pool_bump) = find_pool_address(program_id, &amm_config, &token_a_mint, &token_b_mint)?;
        let (lp_mint, _) = find_lp_mint_address(program_id, &pool)?;
        let (token_a_vault, _) = find_vault_address(program_id, &pool, &token_a_mint)?;
        let (token_b_vault, _) = find_vault_address(program_id, &pool, &token_b_mint)?;
        let (observation, _) = find_observation_address(program_id, &pool)?;

        debug!(
            "derived pool {} (bump {}) for config {} index {}",
            pool,
            pool_bump,
            amm_config,
            config_index.value()
        );

        Ok(Self {
            authority,
            amm_config,
            pool,
            lp_mint,
            token_a_mint,
            token_b_mint,
            token_a_vault,
            token_b_vault,
            observation,
        })
    }

    /// Vault holding `mint`, or `InvalidMint` when the pool does not trade it
    pub fn vault_for(&self, mint: &Pubkey) -> Result<Pubkey> {
        if *mint == self.token_a_mint {
            Ok(self.token_a_vault)
        } else if *mint == self.token_b_mint {
            Ok(self.token_b_vault)
        } else {
            Err(SdkError::InvalidMint(*mint))
        }
    }
}
