// ============================================================================
// Compound Arithmetic Tests
// Compound operators on both widths, same-precision and mixed-precision
// ============================================================================

use qfixed::numeric::{Fp32s, Fp64s};

fn check_close(expected: f64, actual: f64, tolerance: f64) {
    assert!(
        (expected - actual).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

macro_rules! compound_suite {
    ($module:ident, $Fp:ty) => {
        mod $module {
            use super::*;

            #[test]
            fn test_compound_addition() {
                let mut fp1 = <$Fp>::from_f64(3.2, 12);
                let fp2 = <$Fp>::from_f64(0.6, 12);

                fp1 += fp2;

                check_close(3.8, fp1.to_f64(), 0.1);
            }

            #[test]
            fn test_compound_subtraction() {
                let mut fp1 = <$Fp>::from_f64(3.2, 12);
                let fp2 = <$Fp>::from_f64(0.6, 12);

                fp1 -= fp2;

                check_close(2.6, fp1.to_f64(), 0.1);
            }

            #[test]
            fn test_compound_multiplication() {
                let mut fp1 = <$Fp>::from_f64(3.2, 12);
                let fp2 = <$Fp>::from_f64(0.6, 12);

                fp1 *= fp2;

                check_close(1.92, fp1.to_f64(), 0.1);
            }

            #[test]
            fn test_compound_division() {
                let mut fp1 = <$Fp>::from_f64(3.2, 12);
                let fp2 = <$Fp>::from_f64(0.6, 12);

                fp1 /= fp2;

                check_close(5.33, fp1.to_f64(), 0.1);
            }

            #[test]
            fn test_compound_modulo() {
                let mut fp1 = <$Fp>::from_f64(20.2, 12);
                let fp2 = <$Fp>::from_f64(1.5, 12);

                // 20.2 % 1.5 = 0.7
                fp1 %= fp2;

                check_close(0.7, fp1.to_f64(), 0.1);
            }

            #[test]
            fn test_simple_operators_match_compound() {
                let a = <$Fp>::from_f64(7.25, 10);
                let b = <$Fp>::from_f64(-1.5, 6);

                let mut x = a;
                x *= b;
                let y = a * b;
                assert_eq!(x.raw_value(), y.raw_value());
                assert_eq!(x.q(), y.q());
                assert_eq!(y.q(), 6);
                check_close(-10.875, y.to_f64(), 0.05);
            }

            #[test]
            fn test_more_precise_left_operand_narrows() {
                let mut a = <$Fp>::from_f64(1.5, 8);
                a += <$Fp>::from_f64(1.0, 4);
                assert_eq!(a.q(), 4);
                assert_eq!(a.decimal_digits(), 1);
                check_close(2.5, a.to_f64(), 1e-9);
            }

            #[test]
            fn test_less_precise_left_operand_keeps_q() {
                let mut a = <$Fp>::from_f64(1.5, 4);
                a += <$Fp>::from_f64(1.0, 8);
                assert_eq!(a.q(), 4);
                check_close(2.5, a.to_f64(), 1e-9);
            }

            #[test]
            fn test_accumulating_small_steps() {
                // 0.01 at Q7 is raw 1 (0.0078125)
                let step = <$Fp>::from_parts(0, 1, 100, 7);
                let mut acc = <$Fp>::from_integer(1000, 7);
                for _ in 0..128 {
                    acc += step;
                }
                assert_eq!(acc.integer_part(), 1001);
                assert_eq!(acc.fractional_part(), 0);
                assert_eq!(acc.fractional_part_divisor(), 100);
            }
        }
    };
}

compound_suite!(fp32s, Fp32s);
compound_suite!(fp64s, Fp64s);

#[test]
fn test_64_bit_keeps_large_products() {
    // 1e6 * 1e6 would overflow a 32-bit raw value at any precision
    let a = Fp64s::from_integer(1_000_000, 16);
    let product = a * a;
    assert_eq!(product.integer_part(), 1_000_000_000_000);
}
