//! Client SDK for a dual AMM: a constant product swap program with Raydium
//! cp-swap style instructions, and stable/constant-product pools that keep
//! their liquidity in yield vaults.
//!
//! - [`pda`] derives every program address a pool needs
//! - [`instruction`] builds ready-to-sign instructions
//! - [`snapshot`] decodes raw account bytes into a [`PoolSnapshot`]
//! - [`pool_info`] and [`quote`] price pools, swaps and liquidity changes
//!
//! Nothing here talks to the network; callers fetch accounts and pass the
//! bytes in.

pub mod config;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod oracle;
pub mod pda;
pub mod pool_info;
pub mod quote;
pub mod snapshot;
pub mod state;

pub use config::ProgramIds;
pub use error::{Result, SdkError};
pub use oracle::{StakePoolSnapshot, StakePrices};
pub use pda::{ConfigIndex, PdaResult, PoolAddresses};
pub use pool_info::{calculate_pool_info, PoolInfo};
pub use snapshot::{PoolSnapshot, RawPoolAccounts, VaultReserve};

pub use curve_math;
