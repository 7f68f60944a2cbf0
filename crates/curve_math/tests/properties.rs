//! Property tests for the swap curves
//!
//! Increase cases: PROPTEST_CASES=5000 cargo test -p curve_math

use curve_math::*;
use proptest::prelude::*;

const ORACLE: NoStakeOracle = NoStakeOracle;

fn stable_params(amp: u64, token_a_multiplier: u64, token_b_multiplier: u64) -> StableCurveParams {
    StableCurveParams {
        amp,
        token_multiplier: TokenMultiplier {
            token_a_multiplier,
            token_b_multiplier,
            precision_factor: 9,
        },
        ..Default::default()
    }
}

// ============================================================================
// CONSTANT PRODUCT
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_cp_invariant_never_decreases(
        x0 in 1_000u128..1_000_000_000_000,
        y0 in 1_000u128..1_000_000_000_000,
        dx in 1u128..1_000_000_000_000,
    ) {
        if let Ok(result) = ConstantProductSwap.compute_out_amount(dx, x0, y0, TradeDirection::AtoB) {
            prop_assert!(result.out_amount < y0);
            prop_assert!((x0 + dx) * (y0 - result.out_amount) >= x0 * y0);
            prop_assert!(result.price_impact >= 0.0 && result.price_impact <= 1.0);
        }
    }

    #[test]
    fn prop_cp_round_trip_never_exceeds_input(
        x0 in 1_000u128..1_000_000_000_000,
        y0 in 1_000u128..1_000_000_000_000,
        dx in 1u128..1_000_000_000_000,
    ) {
        if let Ok(result) = ConstantProductSwap.compute_out_amount(dx, x0, y0, TradeDirection::AtoB) {
            let back = ConstantProductSwap
                .compute_in_amount(result.out_amount, x0, y0, TradeDirection::AtoB)
                .unwrap();
            prop_assert!(back <= dx);
        }
    }

    #[test]
    fn prop_ceil_div_bounds(
        dividend in 1u128..(u64::MAX as u128),
        divisor in 1u128..(u64::MAX as u128),
    ) {
        prop_assume!(dividend >= divisor);
        let (quotient, refined) = checked_ceil_div(dividend, divisor).unwrap();
        prop_assert!(quotient * divisor >= dividend);
        prop_assert!((quotient - 1) * divisor < dividend);
        prop_assert!(refined <= divisor);
        prop_assert!(refined * quotient >= dividend);
    }
}

// ============================================================================
// STABLE SWAP
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_stable_scaling_inverse_without_depeg(
        amount in 0u128..(u64::MAX as u128),
        token_a_multiplier in 1u64..1_000_000_000,
        token_b_multiplier in 1u64..1_000_000_000,
    ) {
        let params = stable_params(100, token_a_multiplier, token_b_multiplier);
        let curve = StableSwap::new(&params, [0; 32], 0, &ORACLE);

        let up_a = curve.upscale_token_a(amount).unwrap();
        let up_b = curve.upscale_token_b(amount).unwrap();
        prop_assert_eq!(curve.downscale_token_a(up_a).unwrap(), amount);
        prop_assert_eq!(curve.downscale_token_b(up_b).unwrap(), amount);
    }

    #[test]
    fn prop_stable_out_below_reserve(
        amp in 1u64..2_000,
        swap_source in 1_000u128..1_000_000_000_000,
        swap_destination in 1_000u128..1_000_000_000_000,
        source in 1u128..1_000_000_000_000,
    ) {
        let params = stable_params(amp, 1, 1);
        let curve = StableSwap::new(&params, [0; 32], 0, &ORACLE);

        if let Ok(result) = curve.compute_out_amount(source, swap_source, swap_destination, TradeDirection::BtoA) {
            prop_assert!(result.out_amount < swap_destination);
            prop_assert!(result.out_amount > 0);
        }
    }

    #[test]
    fn prop_stable_beats_constant_product_near_peg(
        amp in 10u64..2_000,
        reserve in 1_000_000_000u128..1_000_000_000_000,
        fraction_bps in 1u128..100,
    ) {
        // a trade below 1% of a balanced pool
        let source = reserve * fraction_bps / 10_000;
        let params = stable_params(amp, 1, 1);
        let stable = StableSwap::new(&params, [0; 32], 0, &ORACLE);

        let stable_out = stable.compute_out_amount(source, reserve, reserve, TradeDirection::AtoB).unwrap();
        let cp_out = ConstantProductSwap.compute_out_amount(source, reserve, reserve, TradeDirection::AtoB).unwrap();
        prop_assert!(stable_out.out_amount >= cp_out.out_amount);
        prop_assert!(stable_out.out_amount <= source);
    }
}
