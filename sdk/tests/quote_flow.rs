//! End to end: raw account bytes -> snapshot -> quote -> instruction

use dualpool_sdk::{
    constants::{DEPOSIT_DISCRIMINATOR, SWAP_BASE_INPUT_DISCRIMINATOR, WITHDRAW_DISCRIMINATOR},
    curve_math::NoStakeOracle,
    instruction::{
        deposit, swap_base_input, withdraw, DepositArgs, LiquidityAccounts, SwapAccounts,
        SwapBaseInputArgs, WithdrawArgs,
    },
    quote::{compute_balanced_deposit_quote, compute_swap_quote, compute_withdraw_quote},
    state::{
        account_discriminator, Bootstrapping, ClockSnapshot, CurveType, DepegLayout, LockedProfitTracker,
        MintSnapshot, PoolFees, PoolState, TokenAccountSnapshot, TokenMultiplierLayout, VaultState,
    },
    calculate_pool_info, ConfigIndex, PoolAddresses, ProgramIds, RawPoolAccounts,
};
use solana_sdk::pubkey::Pubkey;

struct Fixture {
    addresses: PoolAddresses,
    pool: Vec<u8>,
    vault_a: Vec<u8>,
    vault_b: Vec<u8>,
    vault_a_lp_mint: Vec<u8>,
    vault_b_lp_mint: Vec<u8>,
    pool_vault_a_lp: Vec<u8>,
    pool_vault_b_lp: Vec<u8>,
    pool_lp_mint: Vec<u8>,
    clock: Vec<u8>,
}

impl Fixture {
    fn raw(&self) -> RawPoolAccounts<'_> {
        RawPoolAccounts {
            pool: &self.pool,
            vault_a: &self.vault_a,
            vault_b: &self.vault_b,
            vault_a_lp_mint: &self.vault_a_lp_mint,
            vault_b_lp_mint: &self.vault_b_lp_mint,
            pool_vault_a_lp: &self.pool_vault_a_lp,
            pool_vault_b_lp: &self.pool_vault_b_lp,
            pool_lp_mint: &self.pool_lp_mint,
            clock: &self.clock,
        }
    }
}

fn anchor_account<T: borsh::BorshSerialize>(name: &str, value: &T) -> Vec<u8> {
    let mut data = account_discriminator(name).to_vec();
    data.extend(borsh::to_vec(value).unwrap());
    data
}

fn mint_account(supply: u64, decimals: u8) -> Vec<u8> {
    let mut data = vec![0u8; MintSnapshot::LEN];
    data[36..44].copy_from_slice(&supply.to_le_bytes());
    data[44] = decimals;
    data
}

fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TokenAccountSnapshot::LEN];
    data[0..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
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

/// USDC/USDT style stable pool: 5M of each side (6 decimals), 10M LP
fn stable_pool_fixture() -> Fixture {
    let program_ids = ProgramIds::default();
    let addresses = PoolAddresses::derive(
        &program_ids,
        ConfigIndex::U16(0),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
    )
    .unwrap();

    let reserve = 5_000_000_000_000u64;
    let vault_a = vault(reserve, addresses.token_a_mint);
    let vault_b = vault(reserve, addresses.token_b_mint);
    let pool = PoolState {
        lp_mint: addresses.lp_mint,
        token_a_mint: addresses.token_a_mint,
        token_b_mint: addresses.token_b_mint,
        token_a_decimals: 6,
        token_b_decimals: 6,
        a_vault: Pubkey::new_unique(),
        b_vault: Pubkey::new_unique(),
        a_vault_lp: Pubkey::new_unique(),
        b_vault_lp: Pubkey::new_unique(),
        enabled: true,
        fees: PoolFees {
            trade_fee_numerator: 1,
            trade_fee_denominator: 10_000,
            protocol_trade_fee_numerator: 20,
            protocol_trade_fee_denominator: 100,
        },
        stake: Pubkey::default(),
        bootstrapping: Bootstrapping::default(),
        curve_type: CurveType::Stable {
            amp: 200,
            token_multiplier: TokenMultiplierLayout {
                token_a_multiplier: 1,
                token_b_multiplier: 1,
                precision_factor: 6,
            },
            depeg: DepegLayout::default(),
            last_amp_updated_timestamp: 0,
        },
    };

    let mut clock = vec![0u8; ClockSnapshot::LEN];
    clock[0..8].copy_from_slice(&250_000_000u64.to_le_bytes());
    clock[32..40].copy_from_slice(&1_700_000_000i64.to_le_bytes());

    Fixture {
        addresses,
        pool: anchor_account(PoolState::ACCOUNT_NAME, &pool),
        vault_a: anchor_account(VaultState::ACCOUNT_NAME, &vault_a),
        vault_b: anchor_account(VaultState::ACCOUNT_NAME, &vault_b),
        vault_a_lp_mint: mint_account(reserve, 6),
        vault_b_lp_mint: mint_account(reserve, 6),
        pool_vault_a_lp: token_account(&vault_a.lp_mint, &addresses.pool, reserve),
        pool_vault_b_lp: token_account(&vault_b.lp_mint, &addresses.pool, reserve),
        pool_lp_mint: mint_account(2 * reserve, 6),
        clock,
    }
}

#[test]
fn test_swap_quote_to_instruction() {
    let fixture = stable_pool_fixture();
    let snapshot = fixture.raw().decode(fixture.addresses.pool).unwrap();
    let in_mint = fixture.addresses.token_a_mint;

    let quote = compute_swap_quote(&snapshot, &in_mint, 1_000_000_000, 50, &NoStakeOracle).unwrap();
    // 1000 USDC on a deep balanced stable pool comes back almost 1:1
    assert!(quote.out_amount > 999_000_000);
    assert!(quote.out_amount < 1_000_000_000);
    assert_eq!(quote.trade_fee, 100_000);
    assert_eq!(quote.protocol_fee, 20_000);

    let program_ids = ProgramIds::default();
    let payer = Pubkey::new_unique();
    let accounts = SwapAccounts::derive(
        &program_ids,
        payer,
        &fixture.addresses,
        (in_mint, program_ids.token),
        program_ids.token,
    )
    .unwrap();
    let ix = swap_base_input(
        &program_ids,
        &accounts,
        SwapBaseInputArgs {
            amount_in: quote.in_amount,
            minimum_amount_out: quote.minimum_out_amount,
        },
    )
    .unwrap();

    assert_eq!(ix.program_id, program_ids.cp_swap);
    assert_eq!(&ix.data[..8], &SWAP_BASE_INPUT_DISCRIMINATOR);
    assert_eq!(ix.data[8..16], 1_000_000_000u64.to_le_bytes());
    assert_eq!(ix.data[16..24], quote.minimum_out_amount.to_le_bytes());
    assert_eq!(ix.accounts[3].pubkey, fixture.addresses.pool);
    assert_eq!(ix.accounts[6].pubkey, fixture.addresses.token_a_vault);
    assert_eq!(ix.accounts[7].pubkey, fixture.addresses.token_b_vault);
}

#[test]
fn test_liquidity_round_trip() {
    let fixture = stable_pool_fixture();
    let snapshot = fixture.raw().decode(fixture.addresses.pool).unwrap();
    let program_ids = ProgramIds::default();
    let owner = Pubkey::new_unique();
    let accounts = LiquidityAccounts::derive(
        &program_ids,
        owner,
        &fixture.addresses,
        &program_ids.token,
        &program_ids.token,
    )
    .unwrap();

    let deposit_quote =
        compute_balanced_deposit_quote(&snapshot, &fixture.addresses.token_b_mint, 1_000_000, 100).unwrap();
    assert_eq!(deposit_quote.pool_token_amount_out, 2_000_000);
    assert_eq!(deposit_quote.token_a_amount_in, 1_000_000);

    let ix = deposit(
        &program_ids,
        &accounts,
        DepositArgs {
            lp_token_amount: deposit_quote.minimum_pool_token_amount_out,
            maximum_token_a_amount: deposit_quote.maximum_token_a_amount_in,
            maximum_token_b_amount: deposit_quote.maximum_token_b_amount_in,
        },
    )
    .unwrap();
    assert_eq!(&ix.data[..8], &DEPOSIT_DISCRIMINATOR);
    assert_eq!(ix.data.len(), 32);
    assert_eq!(ix.accounts.len(), 13);

    let withdraw_quote = compute_withdraw_quote(&snapshot, 2_000_000, 100).unwrap();
    assert_eq!(withdraw_quote.token_a_amount_out, 1_000_000);
    assert_eq!(withdraw_quote.token_b_amount_out, 1_000_000);

    let ix = withdraw(
        &program_ids,
        &accounts,
        WithdrawArgs {
            lp_token_amount: withdraw_quote.pool_token_amount_in,
            minimum_token_a_amount: withdraw_quote.minimum_token_a_amount_out,
            minimum_token_b_amount: withdraw_quote.minimum_token_b_amount_out,
        },
    )
    .unwrap();
    assert_eq!(&ix.data[..8], &WITHDRAW_DISCRIMINATOR);
    assert_eq!(ix.accounts.last().unwrap().pubkey, program_ids.memo);
}

#[test]
fn test_pool_info_from_bytes() {
    let fixture = stable_pool_fixture();
    let snapshot = fixture.raw().decode(fixture.addresses.pool).unwrap();
    let info = calculate_pool_info(&snapshot, &NoStakeOracle).unwrap();

    assert_eq!(info.token_a_amount, 5_000_000_000_000);
    assert_eq!(info.token_b_amount, 5_000_000_000_000);
    assert_eq!(info.pool_lp_supply, 10_000_000_000_000);
    // D equals the sum of balanced reserves, so one LP is worth one token
    assert!((info.virtual_price_f64() - 1.0).abs() < 1e-6);
}

#[test]
fn test_truncated_pool_account_is_rejected() {
    let mut fixture = stable_pool_fixture();
    fixture.pool.truncate(40);
    assert!(fixture.raw().decode(fixture.addresses.pool).is_err());
}
