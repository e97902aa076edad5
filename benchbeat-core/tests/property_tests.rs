//! Property tests for the growth calculator and formatters.
//!
//! Uses proptest to verify:
//! 1. Growth formula: growth(s, e) == (e - s) / s * 100 for positive prices
//! 2. Formatter totality: every input renders and only NaN/None is N/A

use benchbeat_core::format::{format_currency, format_percentage, MISSING};
use benchbeat_core::growth::{checked_growth_rate, growth_rate};
use proptest::prelude::*;

fn arb_price() -> impl Strategy<Value = f64> {
    (0.01..10_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

// ── 1. Growth formula ────────────────────────────────────────────────

proptest! {
    #[test]
    fn growth_matches_formula(s in arb_price(), e in arb_price()) {
        prop_assert_eq!(growth_rate(s, e), (e - s) / s * 100.0);
        prop_assert_eq!(checked_growth_rate(s, e), Some(growth_rate(s, e)));
    }

    #[test]
    fn growth_sign_follows_direction(s in arb_price(), e in arb_price()) {
        let g = growth_rate(s, e);
        if e > s {
            prop_assert!(g > 0.0);
        } else if e < s {
            prop_assert!(g < 0.0);
        } else {
            prop_assert_eq!(g, 0.0);
        }
    }

    #[test]
    fn non_positive_start_is_missing(s in -10_000.0..=0.0_f64, e in arb_price()) {
        prop_assert_eq!(checked_growth_rate(s, e), None);
    }
}

// ── 2. Formatter totality ────────────────────────────────────────────

proptest! {
    #[test]
    fn currency_always_renders(v in proptest::num::f64::ANY) {
        let s = format_currency(Some(v));
        if v.is_nan() {
            prop_assert_eq!(s, MISSING);
        } else {
            prop_assert!(s.starts_with('$'));
        }
    }

    #[test]
    fn currency_suffix_follows_magnitude(v in 0.0..1e13_f64) {
        let s = format_currency(Some(v));
        if v >= 1e9 {
            prop_assert!(s.ends_with('B'));
        } else if v >= 1e6 {
            prop_assert!(s.ends_with('M'));
        } else {
            prop_assert!(!s.ends_with('B') && !s.ends_with('M'));
        }
    }

    #[test]
    fn percentage_always_renders(v in proptest::num::f64::ANY) {
        let s = format_percentage(Some(v));
        if v.is_nan() {
            prop_assert_eq!(s, MISSING);
        } else {
            prop_assert!(s.ends_with('%'));
        }
    }

    #[test]
    fn percentage_has_two_decimals(v in -1e6..1e6_f64) {
        let s = format_percentage(Some(v));
        let body = s.trim_end_matches('%');
        let decimals = body.split('.').nth(1).map(str::len);
        prop_assert_eq!(decimals, Some(2));
    }
}
