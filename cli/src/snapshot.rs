//! JSON pool snapshot files.
//!
//! Account data is stored the way RPC `getAccountInfo` returns it with
//! base64 encoding, so responses can be pasted in as-is:
//!
//! ```json
//! {
//!   "pool": "<pool address>",
//!   "accounts": {
//!     "pool": { "data": ["<base64>", "base64"] },
//!     "vault_a": { "data": ["<base64>", "base64"] },
//!     ...
//!   },
//!   "stake_prices": { "<stake account>": 1050000 },
//!   "spl_stake_pools": { "<stake account>": { "data": ["<base64>", "base64"] } }
//! }
//! ```

use anyhow::{bail, Context, Result};
use base64::Engine;
use dualpool_sdk::{PoolSnapshot, RawPoolAccounts, StakePrices};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::args::parse_pubkey;

#[derive(Debug, Deserialize)]
pub struct EncodedAccount {
    /// `[data, encoding]`
    pub data: (String, String),
}

impl EncodedAccount {
    pub fn decode(&self, name: &str) -> Result<Vec<u8>> {
        let (data, encoding) = &self.data;
        if encoding != "base64" {
            bail!("Account {} uses unsupported encoding {}", name, encoding);
        }
        base64::engine::general_purpose::STANDARD
            .decode(data.trim().as_bytes())
            .with_context(|| format!("Invalid base64 data for account {}", name))
    }
}

#[derive(Debug, Deserialize)]
pub struct SnapshotAccounts {
    pub pool: EncodedAccount,
    pub vault_a: EncodedAccount,
    pub vault_b: EncodedAccount,
    pub vault_a_lp_mint: EncodedAccount,
    pub vault_b_lp_mint: EncodedAccount,
    pub pool_vault_a_lp: EncodedAccount,
    pub pool_vault_b_lp: EncodedAccount,
    pub pool_lp_mint: EncodedAccount,
    pub clock: EncodedAccount,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotFile {
    pub pool: String,
    pub accounts: SnapshotAccounts,
    /// Stake prices scaled by 1e6, for Marinade/Lido depeg pools
    #[serde(default)]
    pub stake_prices: BTreeMap<String, u64>,
    #[serde(default)]
    pub spl_stake_pools: BTreeMap<String, EncodedAccount>,
}

/// A decoded snapshot with the stake prices it shipped with
pub struct LoadedSnapshot {
    pub snapshot: PoolSnapshot,
    pub oracle: StakePrices,
}

impl SnapshotFile {
    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))
    }

    pub fn decode(&self) -> Result<LoadedSnapshot> {
        let pool_key = parse_pubkey("pool address", &self.pool)?;
        let accounts = &self.accounts;
        let pool = accounts.pool.decode("pool")?;
        let vault_a = accounts.vault_a.decode("vault_a")?;
        let vault_b = accounts.vault_b.decode("vault_b")?;
        let vault_a_lp_mint = accounts.vault_a_lp_mint.decode("vault_a_lp_mint")?;
        let vault_b_lp_mint = accounts.vault_b_lp_mint.decode("vault_b_lp_mint")?;
        let pool_vault_a_lp = accounts.pool_vault_a_lp.decode("pool_vault_a_lp")?;
        let pool_vault_b_lp = accounts.pool_vault_b_lp.decode("pool_vault_b_lp")?;
        let pool_lp_mint = accounts.pool_lp_mint.decode("pool_lp_mint")?;
        let clock = accounts.clock.decode("clock")?;

        let snapshot = RawPoolAccounts {
            pool: &pool,
            vault_a: &vault_a,
            vault_b: &vault_b,
            vault_a_lp_mint: &vault_a_lp_mint,
            vault_b_lp_mint: &vault_b_lp_mint,
            pool_vault_a_lp: &pool_vault_a_lp,
            pool_vault_b_lp: &pool_vault_b_lp,
            pool_lp_mint: &pool_lp_mint,
            clock: &clock,
        }
        .decode(pool_key)
        .with_context(|| format!("Failed to decode accounts of pool {}", pool_key))?;

        let mut oracle = StakePrices::new();
        for (stake_account, price) in &self.stake_prices {
            oracle.insert_price(parse_pubkey("stake account", stake_account)?, *price);
        }
        for (stake_account, account) in &self.spl_stake_pools {
            let data = account.decode(stake_account)?;
            oracle
                .insert_spl_stake_pool(parse_pubkey("stake account", stake_account)?, &data)
                .with_context(|| format!("Invalid SPL stake pool {}", stake_account))?;
        }

        Ok(LoadedSnapshot { snapshot, oracle })
    }
}

pub fn load(path: &Path) -> Result<LoadedSnapshot> {
    SnapshotFile::read(path)?.decode()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use dualpool_sdk::state::{
        account_discriminator, Bootstrapping, ClockSnapshot, CurveType, LockedProfitTracker, MintSnapshot, PoolFees,
        PoolState, TokenAccountSnapshot, VaultState,
    };
    use serde_json::json;
    use solana_sdk::pubkey::Pubkey;

    fn encoded(data: &[u8]) -> serde_json::Value {
        json!({ "data": [base64::engine::general_purpose::STANDARD.encode(data), "base64"] })
    }

    fn anchor<T: borsh::BorshSerialize>(name: &str, value: &T) -> Vec<u8> {
        let mut data = account_discriminator(name).to_vec();
        data.extend(borsh::to_vec(value).unwrap());
        data
    }

    fn mint(supply: u64) -> Vec<u8> {
        let mut data = vec![0u8; MintSnapshot::LEN];
        data[36..44].copy_from_slice(&supply.to_le_bytes());
        data[44] = 6;
        data
    }

    fn token(amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; TokenAccountSnapshot::LEN];
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data
    }

    fn vault(total_amount: u64, token_mint: Pubkey) -> VaultState {
        VaultState {
            enabled: true,
            total_amount,
            token_vault: Pubkey::new_unique(),
            token_mint,
            lp_mint: Pubkey::new_unique(),
            locked_profit_tracker: LockedProfitTracker::default(),
        }
    }

    /// Constant product pool with 1M of each token, vault shares 1:1,
    /// written as snapshot JSON
    pub fn constant_product_json() -> (PoolState, serde_json::Value) {
        let reserve = 1_000_000u64;
        let pool = PoolState {
            lp_mint: Pubkey::new_unique(),
            token_a_mint: Pubkey::new_unique(),
            token_b_mint: Pubkey::new_unique(),
            token_a_decimals: 6,
            token_b_decimals: 6,
            a_vault: Pubkey::new_unique(),
            b_vault: Pubkey::new_unique(),
            a_vault_lp: Pubkey::new_unique(),
            b_vault_lp: Pubkey::new_unique(),
            enabled: true,
            fees: PoolFees {
                trade_fee_numerator: 25,
                trade_fee_denominator: 10_000,
                protocol_trade_fee_numerator: 20,
                protocol_trade_fee_denominator: 100,
            },
            stake: Pubkey::default(),
            bootstrapping: Bootstrapping::default(),
            curve_type: CurveType::ConstantProduct,
        };
        let mut clock = vec![0u8; ClockSnapshot::LEN];
        clock[32..40].copy_from_slice(&1_700_000_000i64.to_le_bytes());

        let value = json!({
            "pool": Pubkey::new_unique().to_string(),
            "accounts": {
                "pool": encoded(&anchor(PoolState::ACCOUNT_NAME, &pool)),
                "vault_a": encoded(&anchor(VaultState::ACCOUNT_NAME, &vault(reserve, pool.token_a_mint))),
                "vault_b": encoded(&anchor(VaultState::ACCOUNT_NAME, &vault(reserve, pool.token_b_mint))),
                "vault_a_lp_mint": encoded(&mint(reserve)),
                "vault_b_lp_mint": encoded(&mint(reserve)),
                "pool_vault_a_lp": encoded(&token(reserve)),
                "pool_vault_b_lp": encoded(&token(reserve)),
                "pool_lp_mint": encoded(&mint(reserve)),
                "clock": encoded(&clock),
            },
        });
        (pool, value)
    }
}
