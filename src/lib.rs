// ============================================================================
// QFixed Library
// Binary-scaled fixed-point numbers with a runtime precision
// ============================================================================

//! # QFixed
//!
//! Fixed-point numbers for targets without an efficient floating-point unit.
//!
//! ## Features
//!
//! - **Runtime precision**: every value carries its own fractional bit count `q`
//! - **Precision alignment**: mixed-precision operands are shifted to a
//!   common `q` before every operation
//! - **Wide intermediates** for multiply/divide (`i64` for 32-bit values,
//!   `i128` for 64-bit values)
//! - **Decimal decomposition** into integer part, fractional digits and
//!   divisor for printing without floating point
//! - **Checked arithmetic** returning [`numeric::NumericError`]
//!
//! ## Example
//!
//! ```rust
//! use qfixed::prelude::*;
//!
//! // 9.2935 with 14 fractional bits, built without floating point
//! let x = Fp32s::from_parts(9, 2935, 10_000, 14);
//! let y = Fp32s::from_f64(0.5, 14);
//!
//! let product = x * y;
//! println!(
//!     "{}.{:0>4} (q={})",
//!     product.integer_part(),
//!     product.fractional_part(),
//!     product.q()
//! );
//!
//! // Mixed precision: the more precise left operand drops to the right's q
//! let coarse = Fp32s::from_integer(2, 4);
//! assert_eq!((x + coarse).q(), 4);
//! assert_eq!((coarse + x).q(), 4);
//! ```

pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::numeric::{FixedPoint, Fp32s, Fp64s, NumericError, NumericResult, RawInt};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;

    #[test]
    fn test_end_to_end_decomposition() {
        let a = Fp32s::from_parts(9, 2935, 10_000, 14);
        let b = Fp32s::from_parts(0, 2935, 10_000, 14);

        let product = a * b;
        assert_eq!(product.q(), 14);
        assert_eq!(product.integer_part(), 2);
        assert_eq!(product.fractional_part_divisor(), 10_000);
        // 9.2935 * 0.2935 = 2.72764...
        assert!((product.to_f64() - 2.7276).abs() < 0.001);
        assert_eq!(product.to_string().len(), "2.7276".len());
    }

    #[test]
    fn test_widths_share_semantics() {
        let a32 = Fp32s::from_f64(3.2, 12) / Fp32s::from_f64(0.6, 12);
        let a64 = Fp64s::from_f64(3.2, 12) / Fp64s::from_f64(0.6, 12);
        assert_eq!(i64::from(a32.raw_value()), a64.raw_value());
        assert_eq!(a32.q(), a64.q());
    }
}
