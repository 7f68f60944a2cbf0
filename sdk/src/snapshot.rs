//! A consistent view of every account a pool quote reads

use log::{debug, warn};
use solana_sdk::pubkey::Pubkey;

use curve_math::{BoundCurve, Fees, StakePriceOracle, SwapCurve, BASE_CACHE_EXPIRES};

use crate::error::Result;
use crate::state::{
    amount_by_share, ActivationType, ClockSnapshot, MintSnapshot, PoolState, TokenAccountSnapshot,
    VaultState,
};

/// Raw account data as fetched. All slices must come from the same slot.
#[derive(Debug, Clone, Copy)]
pub struct RawPoolAccounts<'a> {
    pub pool: &'a [u8],
    pub vault_a: &'a [u8],
    pub vault_b: &'a [u8],
    pub vault_a_lp_mint: &'a [u8],
    pub vault_b_lp_mint: &'a [u8],
    pub pool_vault_a_lp: &'a [u8],
    pub pool_vault_b_lp: &'a [u8],
    pub pool_lp_mint: &'a [u8],
    pub clock: &'a [u8],
}

impl RawPoolAccounts<'_> {
    pub fn decode(&self, pool_key: Pubkey) -> Result<PoolSnapshot> {
        let snapshot = PoolSnapshot {
            pool_key,
            pool: PoolState::try_from_account_data(self.pool)?,
            vault_a: VaultState::try_from_account_data(self.vault_a)?,
            vault_b: VaultState::try_from_account_data(self.vault_b)?,
            vault_a_lp_mint: MintSnapshot::try_from_account_data(self.vault_a_lp_mint)?,
            vault_b_lp_mint: MintSnapshot::try_from_account_data(self.vault_b_lp_mint)?,
            pool_vault_a_lp: TokenAccountSnapshot::try_from_account_data(self.pool_vault_a_lp)?,
            pool_vault_b_lp: TokenAccountSnapshot::try_from_account_data(self.pool_vault_b_lp)?,
            pool_lp_mint: MintSnapshot::try_from_account_data(self.pool_lp_mint)?,
            clock: ClockSnapshot::try_from_account_data(self.clock)?,
        };
        debug!(
            "decoded pool {} at slot {} (lp supply {})",
            pool_key, snapshot.clock.slot, snapshot.pool_lp_mint.supply
        );
        Ok(snapshot)
    }
}

/// Decoded pool, vaults, mints and clock. Read-only; quotes never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub pool_key: Pubkey,
    pub pool: PoolState,
    pub vault_a: VaultState,
    pub vault_b: VaultState,
    pub vault_a_lp_mint: MintSnapshot,
    pub vault_b_lp_mint: MintSnapshot,
    /// Pool's holding of each vault's LP token
    pub pool_vault_a_lp: TokenAccountSnapshot,
    pub pool_vault_b_lp: TokenAccountSnapshot,
    pub pool_lp_mint: MintSnapshot,
    pub clock: ClockSnapshot,
}

/// One vault as seen by the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultReserve {
    pub vault: VaultState,
    /// Tokens the vault can pay out now
    pub withdrawable: u64,
    pub vault_lp_supply: u64,
    /// Vault LP held by the pool
    pub pool_vault_lp: u64,
}

impl VaultReserve {
    /// Pool's token reserve held in this vault
    pub fn reserve(&self) -> Result<u64> {
        amount_by_share(self.pool_vault_lp, self.withdrawable, self.vault_lp_supply)
    }
}

impl PoolSnapshot {
    pub fn current_time(&self) -> u64 {
        self.clock.current_time()
    }

    /// Slot or timestamp, whichever the pool's activation is measured in
    pub fn current_point(&self) -> u64 {
        match self.pool.bootstrapping.activation_type {
            ActivationType::Slot => self.clock.slot,
            ActivationType::Timestamp => self.current_time(),
        }
    }

    pub fn fees(&self) -> Fees {
        self.pool.fees.into()
    }

    pub fn swap_curve(&self) -> SwapCurve {
        self.pool.curve_type.into()
    }

    /// Curve bound to this snapshot's clock and the pool's stake account
    pub fn bind_curve<'a>(&self, oracle: &'a dyn StakePriceOracle) -> BoundCurve<'a> {
        let curve = self.swap_curve();
        let now = self.current_time();
        if let SwapCurve::Stable(params) = &curve {
            if params.depeg.ensure_fresh(now).is_err() {
                warn!(
                    "depeg cache of pool {} expired at {}, refreshing from stake account {}",
                    self.pool_key,
                    params.depeg.base_cache_updated.saturating_add(BASE_CACHE_EXPIRES),
                    self.pool.stake
                );
            }
        }
        curve.bind(now, self.pool.stake.to_bytes(), oracle)
    }

    pub fn vault_a_reserve(&self) -> Result<VaultReserve> {
        Ok(VaultReserve {
            vault: self.vault_a,
            withdrawable: self.vault_a.get_unlocked_amount(self.current_time())?,
            vault_lp_supply: self.vault_a_lp_mint.supply,
            pool_vault_lp: self.pool_vault_a_lp.amount,
        })
    }

    pub fn vault_b_reserve(&self) -> Result<VaultReserve> {
        Ok(VaultReserve {
            vault: self.vault_b,
            withdrawable: self.vault_b.get_unlocked_amount(self.current_time())?,
            vault_lp_supply: self.vault_b_lp_mint.supply,
            pool_vault_lp: self.pool_vault_b_lp.amount,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::state::{Bootstrapping, CurveType, DepegLayout, LockedProfitTracker, PoolFees, TokenMultiplierLayout};

    pub fn vault(total_amount: u64, mint: Pubkey) -> VaultState {
        VaultState {
            enabled: true,
            total_amount,
            token_vault: Pubkey::new_unique(),
            token_mint: mint,
            lp_mint: Pubkey::new_unique(),
            locked_profit_tracker: LockedProfitTracker::default(),
        }
    }

    pub fn stable_curve(amp: u64) -> CurveType {
        CurveType::Stable {
            amp,
            token_multiplier: TokenMultiplierLayout {
                token_a_multiplier: 1,
                token_b_multiplier: 1,
                precision_factor: 6,
            },
            depeg: DepegLayout::default(),
            last_amp_updated_timestamp: 0,
        }
    }

    /// Pool with both vaults fully owned by the pool: reserves equal vault totals.
    /// Vault LP supply is half the vault total, so one vault LP is worth 2 tokens.
    pub fn snapshot(reserve_a: u64, reserve_b: u64, lp_supply: u64, curve_type: CurveType) -> PoolSnapshot {
        let token_a_mint = Pubkey::new_unique();
        let token_b_mint = Pubkey::new_unique();
        let token_account = |amount| TokenAccountSnapshot {
            mint: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            amount,
        };
        let mint = |supply| MintSnapshot { supply, decimals: 6 };

        PoolSnapshot {
            pool_key: Pubkey::new_unique(),
            pool: PoolState {
                lp_mint: Pubkey::new_unique(),
                token_a_mint,
                token_b_mint,
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
                curve_type,
            },
            vault_a: vault(reserve_a, token_a_mint),
            vault_b: vault(reserve_b, token_b_mint),
            vault_a_lp_mint: mint(reserve_a / 2),
            vault_b_lp_mint: mint(reserve_b / 2),
            pool_vault_a_lp: token_account(reserve_a / 2),
            pool_vault_b_lp: token_account(reserve_b / 2),
            pool_lp_mint: mint(lp_supply),
            clock: ClockSnapshot::new(1_000, 1_700_000_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::snapshot;
    use super::*;
    use crate::state::{account_discriminator, CurveType};

    fn anchor_bytes<T: borsh::BorshSerialize>(name: &str, value: &T) -> Vec<u8> {
        let mut data = account_discriminator(name).to_vec();
        data.extend(borsh::to_vec(value).unwrap());
        data
    }

    fn mint_bytes(supply: u64) -> Vec<u8> {
        let mut data = vec![0u8; MintSnapshot::LEN];
        data[36..44].copy_from_slice(&supply.to_le_bytes());
        data[44] = 6;
        data
    }

    fn token_bytes(owner: &Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; TokenAccountSnapshot::LEN];
        data[32..64].copy_from_slice(owner.as_ref());
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data
    }

    #[test]
    fn test_decode_raw_accounts() {
        let expected = snapshot(1_000_000, 2_000_000, 1_000_000, CurveType::ConstantProduct);
        let pool = anchor_bytes("Pool", &expected.pool);
        let vault_a = anchor_bytes("Vault", &expected.vault_a);
        let vault_b = anchor_bytes("Vault", &expected.vault_b);
        let vault_a_lp_mint = mint_bytes(500_000);
        let vault_b_lp_mint = mint_bytes(1_000_000);
        let pool_vault_a_lp = token_bytes(&expected.pool_key, 500_000);
        let pool_vault_b_lp = token_bytes(&expected.pool_key, 1_000_000);
        let pool_lp_mint = mint_bytes(1_000_000);
        let mut clock = vec![0u8; ClockSnapshot::LEN];
        clock[32..40].copy_from_slice(&1_700_000_000i64.to_le_bytes());

        let raw = RawPoolAccounts {
            pool: &pool,
            vault_a: &vault_a,
            vault_b: &vault_b,
            vault_a_lp_mint: &vault_a_lp_mint,
            vault_b_lp_mint: &vault_b_lp_mint,
            pool_vault_a_lp: &pool_vault_a_lp,
            pool_vault_b_lp: &pool_vault_b_lp,
            pool_lp_mint: &pool_lp_mint,
            clock: &clock,
        };
        let decoded = raw.decode(expected.pool_key).unwrap();

        assert_eq!(decoded.pool, expected.pool);
        assert_eq!(decoded.vault_b_reserve().unwrap().reserve().unwrap(), 2_000_000);
        assert_eq!(decoded.pool_vault_a_lp.owner, expected.pool_key);
        assert_eq!(decoded.current_time(), 1_700_000_000);
    }

    #[test]
    fn test_decode_fails_on_swapped_accounts() {
        let expected = snapshot(1_000, 1_000, 1_000, CurveType::ConstantProduct);
        let pool = anchor_bytes("Pool", &expected.pool);
        let vault = anchor_bytes("Vault", &expected.vault_a);
        let mint = mint_bytes(1);
        let token = token_bytes(&expected.pool_key, 1);
        let clock = vec![0u8; ClockSnapshot::LEN];

        let raw = RawPoolAccounts {
            pool: &vault,
            vault_a: &pool,
            vault_b: &vault,
            vault_a_lp_mint: &mint,
            vault_b_lp_mint: &mint,
            pool_vault_a_lp: &token,
            pool_vault_b_lp: &token,
            pool_lp_mint: &mint,
            clock: &clock,
        };
        assert!(raw.decode(expected.pool_key).is_err());
    }

    #[test]
    fn test_current_point_follows_activation_type() {
        let mut snapshot = snapshot(1_000, 1_000, 1_000, CurveType::ConstantProduct);
        assert_eq!(snapshot.current_point(), 1_000);
        snapshot.pool.bootstrapping.activation_type = ActivationType::Timestamp;
        assert_eq!(snapshot.current_point(), 1_700_000_000);
    }
}
