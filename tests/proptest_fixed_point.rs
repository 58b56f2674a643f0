use proptest::prelude::*;
use qfixed::numeric::{Fp32s, Fp64s, POWERS_OF_TEN};

// Property 1: integer round trip (from_integer -> integer_part is identity)
proptest! {
    #[test]
    fn prop_integer_roundtrip_32(q in 0u8..=31, seed in any::<i32>()) {
        // Keep the value inside the range that survives `<< q`
        let bound = 1i64 << (31 - q as u32);
        let i = (i64::from(seed).rem_euclid(2 * bound) - bound) as i32;

        let x = Fp32s::from_integer(i, q);
        prop_assert_eq!(x.integer_part(), i);
        prop_assert_eq!(i64::from(x), i64::from(i));
    }

    #[test]
    fn prop_integer_roundtrip_64(q in 0u8..=63, seed in any::<i64>()) {
        let bound = 1i128 << (63 - q as u32);
        let i = (i128::from(seed).rem_euclid(2 * bound) - bound) as i64;

        let x = Fp64s::from_integer(i, q);
        prop_assert_eq!(x.integer_part(), i);
    }
}

// Property 2: a + b - b == a at matching precision
proptest! {
    #[test]
    fn prop_add_sub_identity(
        a in -1_000_000i32..1_000_000,
        b in -1_000_000i32..1_000_000,
        q in 0u8..=10
    ) {
        let x = Fp32s::from_raw(a, q);
        let y = Fp32s::from_raw(b, q);

        let back = x + y - y;
        prop_assert_eq!(back.raw_value(), x.raw_value());
        prop_assert_eq!(back.q(), q);
    }
}

// Property 3: multiplication tracks floating point within the precision
proptest! {
    #[test]
    fn prop_multiplication_close_to_float(
        a in -100.0f64..100.0,
        b in -100.0f64..100.0,
        q in 8u8..=16
    ) {
        let x = Fp32s::from_f64(a, q);
        let y = Fp32s::from_f64(b, q);

        let expected = x.to_f64() * y.to_f64();
        let actual = (x * y).to_f64();
        // One unit in the last place from the final shift
        let tolerance = 2.0 / f64::from(1u32 << q);
        prop_assert!(
            (expected - actual).abs() <= tolerance,
            "{} * {} = {} (expected {})", a, b, actual, expected
        );
    }

    #[test]
    fn prop_multiplication_close_to_float_64(
        a in -1.0e6f64..1.0e6,
        b in -1.0e3f64..1.0e3,
        q in 16u8..=32
    ) {
        let x = Fp64s::from_f64(a, q);
        let y = Fp64s::from_f64(b, q);

        let expected = x.to_f64() * y.to_f64();
        let actual = (x * y).to_f64();
        let tolerance = 2.0 / (1u64 << q) as f64 + expected.abs() * 1e-12;
        prop_assert!((expected - actual).abs() <= tolerance);
    }
}

// Property 4: the result precision follows the alignment rule
proptest! {
    #[test]
    fn prop_result_precision(
        a in -1000i32..1000,
        b in -1000i32..1000,
        qa in 0u8..=16,
        qb in 0u8..=16
    ) {
        let x = Fp32s::from_integer(a, qa);
        let y = Fp32s::from_integer(b, qb);

        let expected_q = qa.min(qb);
        prop_assert_eq!((x + y).q(), expected_q);
        prop_assert_eq!((x - y).q(), expected_q);
        prop_assert_eq!((x * y).q(), expected_q);
        // Integers survive any down-shift exactly
        prop_assert_eq!((x + y).integer_part(), a + b);
    }
}

// Property 5: fractional decomposition stays inside its divisor
proptest! {
    #[test]
    fn prop_fractional_part_bounded(raw in any::<i32>(), q in 0u8..=31) {
        let x = Fp32s::from_raw(raw, q);
        let divisor = x.fractional_part_divisor();

        prop_assert_eq!(divisor, POWERS_OF_TEN[x.decimal_digits() as usize]);
        prop_assert!(x.fractional_part() < divisor);
    }

    #[test]
    fn prop_fractional_part_bounded_64(raw in any::<i64>(), q in 0u8..=63) {
        let x = Fp64s::from_raw(raw, q);
        prop_assert!(x.fractional_part() < x.fractional_part_divisor());
    }

    #[test]
    fn prop_decomposition_reconstructs_value(raw in any::<i32>(), q in 0u8..=28) {
        let x = Fp32s::from_raw(raw, q);
        let divisor = f64::from(x.fractional_part_divisor());
        let rebuilt = f64::from(x.integer_part()) + f64::from(x.fractional_part()) / divisor;

        // Half a decimal step of rounding, or one step when the carry saturates
        prop_assert!((rebuilt - x.to_f64()).abs() <= 1.0 / divisor + 1e-9);
    }
}

// Property 6: comparisons agree with the aligned float values
proptest! {
    #[test]
    fn prop_comparison_matches_aligned_floats(
        a in -1.0e4f64..1.0e4,
        b in -1.0e4f64..1.0e4,
        qa in 0u8..=16,
        qb in 0u8..=16
    ) {
        let x = Fp32s::from_f64(a, qa);
        let y = Fp32s::from_f64(b, qb);

        let q = qa.min(qb);
        let xa = x.with_precision(q).to_f64();
        let ya = y.with_precision(q).to_f64();

        prop_assert_eq!(x < y, xa < ya);
        prop_assert_eq!(x == y, xa == ya);
        prop_assert_eq!(x >= y, xa >= ya);
    }
}
