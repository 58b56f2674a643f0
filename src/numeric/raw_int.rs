// ============================================================================
// Raw Integer Storage
// Width-specific integer operations behind the fixed-point type
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// Signed integer that can hold the raw value of a [`FixedPoint`].
///
/// Implemented for `i32` (widened to `i64` for multiply/divide) and `i64`
/// (widened to `i128`). Every operation the fixed-point type performs on its
/// raw value goes through this trait, so both widths share one
/// implementation of the precision-alignment rules.
///
/// # Shift Semantics
/// Shift amounts are always `< BITS`; callers validate precision before it
/// reaches this trait. Left shifts discard high bits (wrap), right shifts
/// are arithmetic and floor toward negative infinity.
///
/// [`FixedPoint`]: super::FixedPoint
pub trait RawInt:
    Copy + Eq + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static + sealed::Sealed
{
    /// Intermediate type used to keep products and shifted dividends exact.
    type Wide: Copy + fmt::Debug;

    /// Total bit width of the raw value.
    const BITS: u32;

    /// Raw zero.
    const ZERO: Self;

    /// Short name of the fixed-point variant backed by this width.
    const NAME: &'static str;

    /// `self << n`, discarding bits shifted out.
    fn shl_wrapping(self, n: u32) -> Self;

    /// `self >> n`, flooring toward negative infinity.
    fn shr_floor(self, n: u32) -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;

    /// Remainder with the sign of the dividend. Panics when `rhs` is zero.
    fn wrapping_rem(self, rhs: Self) -> Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_rem(self, rhs: Self) -> Option<Self>;
    fn checked_abs(self) -> Option<Self>;

    /// `(self * rhs) >> q` computed in [`RawInt::Wide`], truncated back.
    fn mul_shr(self, rhs: Self, q: u32) -> Self;

    /// Like [`RawInt::mul_shr`], failing when the result does not fit.
    fn checked_mul_shr(self, rhs: Self, q: u32) -> NumericResult<Self>;

    /// `(self << q) / rhs` computed in [`RawInt::Wide`], truncated back.
    ///
    /// Panics when `rhs` is zero.
    fn shl_div(self, rhs: Self, q: u32) -> Self;

    /// Like [`RawInt::shl_div`], failing on a zero divisor or when the
    /// result does not fit.
    fn checked_shl_div(self, rhs: Self, q: u32) -> NumericResult<Self>;

    /// `(numerator << q) / denominator` as a raw value, truncating.
    ///
    /// Panics when `denominator` is zero.
    fn scaled_fraction(numerator: u64, denominator: u64, q: u32) -> Self;

    /// The low `q` bits as an unsigned quantity (`self mod 2^q`, never
    /// negative).
    fn low_bits(self, q: u32) -> u128;

    /// Absolute value without overflow.
    fn magnitude(self) -> u128;

    /// `v` truncated toward zero; saturates outside the raw range and maps
    /// NaN to zero.
    fn from_f64_trunc(v: f64) -> Self;

    /// `v` truncated toward zero, rejecting values outside the raw range.
    fn try_from_f64_trunc(v: f64) -> NumericResult<Self>;

    /// Narrow an `i128`, reporting which side of the range it fell off.
    fn try_from_i128(v: i128) -> NumericResult<Self>;

    fn to_i64(self) -> i64;
    fn to_f64(self) -> f64;
    fn to_f32(self) -> f32;
}

macro_rules! raw_int_impl {
    ($T:ty, $U:ty, $Wide:ty, $name:expr) => {
        impl RawInt for $T {
            type Wide = $Wide;

            const BITS: u32 = <$T>::BITS;
            const ZERO: Self = 0;
            const NAME: &'static str = $name;

            #[inline(always)]
            fn shl_wrapping(self, n: u32) -> Self {
                self.wrapping_shl(n)
            }

            #[inline(always)]
            fn shr_floor(self, n: u32) -> Self {
                self >> n
            }

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$T>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$T>::wrapping_sub(self, rhs)
            }

            #[inline(always)]
            fn wrapping_neg(self) -> Self {
                <$T>::wrapping_neg(self)
            }

            #[inline(always)]
            fn wrapping_rem(self, rhs: Self) -> Self {
                <$T>::wrapping_rem(self, rhs)
            }

            #[inline(always)]
            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$T>::checked_add(self, rhs)
            }

            #[inline(always)]
            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$T>::checked_sub(self, rhs)
            }

            #[inline(always)]
            fn checked_rem(self, rhs: Self) -> Option<Self> {
                <$T>::checked_rem(self, rhs)
            }

            #[inline(always)]
            fn checked_abs(self) -> Option<Self> {
                <$T>::checked_abs(self)
            }

            #[inline(always)]
            fn mul_shr(self, rhs: Self, q: u32) -> Self {
                ((<$Wide>::from(self) * <$Wide>::from(rhs)) >> q) as $T
            }

            #[inline]
            fn checked_mul_shr(self, rhs: Self, q: u32) -> NumericResult<Self> {
                let wide = (<$Wide>::from(self) * <$Wide>::from(rhs)) >> q;
                <$T>::try_from(wide).map_err(|_| {
                    if wide > 0 {
                        NumericError::Overflow
                    } else {
                        NumericError::Underflow
                    }
                })
            }

            #[inline(always)]
            fn shl_div(self, rhs: Self, q: u32) -> Self {
                ((<$Wide>::from(self) << q) / <$Wide>::from(rhs)) as $T
            }

            #[inline]
            fn checked_shl_div(self, rhs: Self, q: u32) -> NumericResult<Self> {
                if rhs == 0 {
                    return Err(NumericError::DivisionByZero);
                }
                let wide = (<$Wide>::from(self) << q) / <$Wide>::from(rhs);
                <$T>::try_from(wide).map_err(|_| {
                    if wide > 0 {
                        NumericError::Overflow
                    } else {
                        NumericError::Underflow
                    }
                })
            }

            #[inline]
            fn scaled_fraction(numerator: u64, denominator: u64, q: u32) -> Self {
                ((u128::from(numerator) << q) / u128::from(denominator)) as $T
            }

            #[inline(always)]
            fn low_bits(self, q: u32) -> u128 {
                let mask: $U = (1 as $U).wrapping_shl(q).wrapping_sub(1);
                ((self as $U) & mask) as u128
            }

            #[inline(always)]
            fn magnitude(self) -> u128 {
                self.unsigned_abs() as u128
            }

            #[inline(always)]
            fn from_f64_trunc(v: f64) -> Self {
                v as $T
            }

            fn try_from_f64_trunc(v: f64) -> NumericResult<Self> {
                let t = v.trunc();
                if t.is_nan() {
                    Err(NumericError::InvalidInput)
                } else if t >= -(<$T>::MIN as f64) {
                    Err(NumericError::Overflow)
                } else if t < <$T>::MIN as f64 {
                    Err(NumericError::Underflow)
                } else {
                    Ok(t as $T)
                }
            }

            #[inline]
            fn try_from_i128(v: i128) -> NumericResult<Self> {
                <$T>::try_from(v).map_err(|_| {
                    if v > 0 {
                        NumericError::Overflow
                    } else {
                        NumericError::Underflow
                    }
                })
            }

            #[inline(always)]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn to_f32(self) -> f32 {
                self as f32
            }
        }
    };
}

raw_int_impl!(i32, u32, i64, "Fp32s");
raw_int_impl!(i64, u64, i128, "Fp64s");
