//! Off-chain quotes for swaps, deposits and withdrawals.
//!
//! Every quote reads a [`PoolSnapshot`] and never mutates it.

mod deposit;
mod slippage;
mod swap;
mod withdraw;

pub use deposit::{compute_balanced_deposit_quote, compute_imbalanced_deposit_quote, DepositQuote};
pub use slippage::{apply_bps, maximum_with_slippage, minimum_with_slippage};
pub use swap::{compute_swap_exact_out_quote, compute_swap_quote, SwapExactOutQuote, SwapQuote};
pub use withdraw::{compute_single_sided_withdraw_quote, compute_withdraw_quote, WithdrawQuote};

use crate::error::{Result, SdkError};
use crate::snapshot::PoolSnapshot;

pub(crate) fn ensure_enabled(snapshot: &PoolSnapshot) -> Result<()> {
    if !snapshot.pool.enabled {
        return Err(SdkError::PoolDisabled);
    }
    Ok(())
}

/// The pool must be enabled and past its activation point
pub fn ensure_tradable(snapshot: &PoolSnapshot) -> Result<()> {
    ensure_enabled(snapshot)?;
    let current_point = snapshot.current_point();
    let activation_point = snapshot.pool.bootstrapping.activation_point;
    if current_point < activation_point {
        return Err(SdkError::PoolNotActivated {
            activation_point,
            current_point,
        });
    }
    Ok(())
}
