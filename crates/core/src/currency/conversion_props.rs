//! Property-based tests for balance projection.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{PROJECTION_DECIMAL_PLACES, project_balance};

/// Strategy for non-negative balances with cents.
fn arb_balance() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for positive quotes with up to 6 decimal places.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 6))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_projection_has_at_most_two_decimals(balance in arb_balance(), rate in arb_rate()) {
        let projected = project_balance(balance, rate).unwrap();
        prop_assert!(projected.scale() <= PROJECTION_DECIMAL_PLACES);
    }

    #[test]
    fn prop_projection_is_within_half_a_cent(balance in arb_balance(), rate in arb_rate()) {
        let exact = balance * rate;
        let projected = project_balance(balance, rate).unwrap();
        prop_assert!((projected - exact).abs() <= Decimal::new(5, 3));
    }

    #[test]
    fn prop_projection_is_monotonic(a in arb_balance(), b in arb_balance(), rate in arb_rate()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(project_balance(low, rate).unwrap() <= project_balance(high, rate).unwrap());
    }

    #[test]
    fn prop_projection_never_negative(balance in arb_balance(), rate in arb_rate()) {
        prop_assert!(project_balance(balance, rate).unwrap() >= Decimal::ZERO);
    }
}
