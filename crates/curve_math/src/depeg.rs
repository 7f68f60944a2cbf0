//! Depeg cache for stable pools whose token B is a yield-bearing
//! representation of token A (liquid staking tokens)

use crate::CurveError;

/// Seconds before the cached base virtual price must be refreshed
pub const BASE_CACHE_EXPIRES: u64 = 60 * 10;

/// Precision of the base virtual price (1e6)
pub const DEPEG_PRECISION: u64 = 1_000_000;

/// Source of the base virtual price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepegType {
    #[default]
    None,
    Marinade,
    Lido,
    SplStake,
}

/// Read-only capability that prices a staked asset against its base asset.
///
/// Implementations usually decode already fetched stake-pool accounts; the
/// curve only calls this when its cached price has expired.
pub trait StakePriceOracle {
    /// Base virtual price scaled by [`DEPEG_PRECISION`], or `None` when the
    /// stake account is unknown to this oracle.
    fn virtual_price(&self, depeg_type: DepegType, stake_account: &[u8; 32]) -> Option<u64>;
}

/// Oracle for pools without depeg. Always returns `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStakeOracle;

impl StakePriceOracle for NoStakeOracle {
    fn virtual_price(&self, _depeg_type: DepegType, _stake_account: &[u8; 32]) -> Option<u64> {
        None
    }
}

/// Cached depeg state stored with the stable curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Depeg {
    pub base_virtual_price: u64,
    pub base_cache_updated: u64,
    pub depeg_type: DepegType,
}

impl Depeg {
    pub fn is_depegged(&self) -> bool {
        self.depeg_type != DepegType::None
    }

    /// `StaleDepegCache` once `current_time > base_cache_updated + BASE_CACHE_EXPIRES`
    pub fn ensure_fresh(&self, current_time: u64) -> Result<(), CurveError> {
        if self.is_depegged()
            && current_time > self.base_cache_updated.saturating_add(BASE_CACHE_EXPIRES)
        {
            return Err(CurveError::StaleDepegCache);
        }
        Ok(())
    }

    /// Copy of this cache that is valid at `current_time`, refreshed through
    /// the oracle when expired. The snapshot itself is never mutated.
    pub fn refreshed(
        &self,
        current_time: u64,
        stake_account: &[u8; 32],
        oracle: &dyn StakePriceOracle,
    ) -> Result<Depeg, CurveError> {
        match self.ensure_fresh(current_time) {
            Ok(()) => Ok(*self),
            Err(CurveError::StaleDepegCache) => {
                let base_virtual_price = oracle
                    .virtual_price(self.depeg_type, stake_account)
                    .filter(|price| *price > 0)
                    .ok_or(CurveError::MissingStakePrice)?;
                Ok(Depeg {
                    base_virtual_price,
                    base_cache_updated: current_time,
                    depeg_type: self.depeg_type,
                })
            }
            Err(e) => Err(e),
        }
    }
}
