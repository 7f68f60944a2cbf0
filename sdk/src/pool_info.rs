//! Effective reserves and virtual price of a pool

use curve_math::{math::mul_div_floor, CurveCalculator, StakePriceOracle};
use log::debug;

use crate::constants::VIRTUAL_PRICE_PRECISION;
use crate::error::Result;
use crate::snapshot::PoolSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInfo {
    /// Token A owned by the pool through its vault A share
    pub token_a_amount: u64,
    /// Token B owned by the pool through its vault B share
    pub token_b_amount: u64,
    /// Invariant per LP token, scaled by `VIRTUAL_PRICE_PRECISION`
    pub virtual_price: u128,
    pub pool_lp_supply: u64,
}

impl PoolInfo {
    /// Virtual price as a float for display
    pub fn virtual_price_f64(&self) -> f64 {
        self.virtual_price as f64 / VIRTUAL_PRICE_PRECISION as f64
    }
}

pub fn calculate_pool_info(snapshot: &PoolSnapshot, oracle: &dyn StakePriceOracle) -> Result<PoolInfo> {
    let token_a_amount = snapshot.vault_a_reserve()?.reserve()?;
    let token_b_amount = snapshot.vault_b_reserve()?.reserve()?;
    let pool_lp_supply = snapshot.pool_lp_mint.supply;

    let virtual_price = if pool_lp_supply == 0 {
        0
    } else {
        let invariant = snapshot
            .bind_curve(oracle)
            .compute_invariant(token_a_amount as u128, token_b_amount as u128)?;
        mul_div_floor(invariant, VIRTUAL_PRICE_PRECISION, pool_lp_supply as u128)?
    };

    debug!(
        "pool {}: reserves {} / {}, lp supply {}, virtual price {}",
        snapshot.pool_key, token_a_amount, token_b_amount, pool_lp_supply, virtual_price
    );

    Ok(PoolInfo {
        token_a_amount,
        token_b_amount,
        virtual_price,
        pool_lp_supply,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::fixtures::{snapshot, stable_curve};
    use crate::state::{CurveType, LockedProfitTracker};
    use curve_math::NoStakeOracle;

    #[test]
    fn test_constant_product_pool_info() {
        let snapshot = snapshot(4_000_000, 1_000_000, 2_000_000, CurveType::ConstantProduct);
        let info = calculate_pool_info(&snapshot, &NoStakeOracle).unwrap();

        assert_eq!(info.token_a_amount, 4_000_000);
        assert_eq!(info.token_b_amount, 1_000_000);
        // sqrt(4e12) = 2e6 over 2e6 LP
        assert_eq!(info.virtual_price, VIRTUAL_PRICE_PRECISION);
        assert!((info.virtual_price_f64() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stable_pool_info() {
        let snapshot = snapshot(1_000_000, 1_000_000, 1_000_000, stable_curve(100));
        let info = calculate_pool_info(&snapshot, &NoStakeOracle).unwrap();
        // balanced stable pool: D = 2e6
        assert_eq!(info.virtual_price, 2 * VIRTUAL_PRICE_PRECISION);
    }

    #[test]
    fn test_empty_lp_supply() {
        let snapshot = snapshot(1_000, 1_000, 0, CurveType::ConstantProduct);
        assert_eq!(calculate_pool_info(&snapshot, &NoStakeOracle).unwrap().virtual_price, 0);
    }

    #[test]
    fn test_locked_profit_reduces_reserve() {
        let mut snapshot = snapshot(1_000_000, 1_000_000, 1_000_000, CurveType::ConstantProduct);
        snapshot.vault_a.locked_profit_tracker = LockedProfitTracker {
            last_updated_locked_profit: 100_000,
            last_report: snapshot.current_time(),
            locked_profit_degradation: 1,
        };
        let info = calculate_pool_info(&snapshot, &NoStakeOracle).unwrap();
        assert_eq!(info.token_a_amount, 900_000);
    }
}
