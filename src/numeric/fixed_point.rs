// ============================================================================
// Binary Fixed-Point Number
// Scaled-integer arithmetic with a runtime fractional bit count
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::raw_int::RawInt;
use super::tables::{decimal_digits_for, MAX_DECIMAL_DIGITS, POWERS_OF_TEN};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-point number with a runtime precision.
///
/// Internally stores `value × 2^q` in the raw integer `R` (`i32` or `i64`).
/// The precision `q` travels with the value and may drop when the value is
/// combined with a less precise one.
///
/// # Precision Alignment
/// Binary operations first bring both operands to a common precision:
/// - equal `q`: raw values are used as-is;
/// - left `q` higher: the left raw value is shifted down and the result takes
///   the right (lower) precision;
/// - left `q` lower: the right raw value is shifted down and the result keeps
///   the left precision.
///
/// The result precision is therefore not symmetric in its operands:
/// `a + b` and `b + a` may carry different `q`.
///
/// # Overflow
/// Operators wrap on overflow (two's complement) and panic on division or
/// remainder by zero, exactly like the primitive integers. Use the
/// `checked_*` methods to get a [`NumericError`] instead.
///
/// # Example
/// ```
/// use qfixed::numeric::Fp32s;
///
/// let a = Fp32s::from_f64(3.2, 12);
/// let b = Fp32s::from_f64(0.6, 12);
/// let c = a * b;
/// assert!((c.to_f64() - 1.92).abs() < 0.01);
/// assert_eq!(c.q(), 12);
/// ```
#[derive(Clone, Copy)]
pub struct FixedPoint<R: RawInt> {
    raw: R,
    q: u8,
    decimal_digits: u8,
}

/// 32-bit fixed-point number (widens to `i64` for multiply/divide).
pub type Fp32s = FixedPoint<i32>;

/// 64-bit fixed-point number (widens to `i128` for multiply/divide).
pub type Fp64s = FixedPoint<i64>;

impl<R: RawInt> FixedPoint<R> {
    /// Largest accepted precision for this width.
    pub const MAX_Q: u8 = (R::BITS - 1) as u8;

    // ========================================================================
    // Construction
    // ========================================================================

    #[inline]
    fn check_precision(q: u8) -> NumericResult<()> {
        if q <= Self::MAX_Q {
            Ok(())
        } else {
            tracing::debug!(q, width = R::BITS, "fixed-point precision out of range");
            Err(NumericError::PrecisionOutOfRange)
        }
    }

    #[inline]
    fn assert_precision(q: u8) {
        assert!(
            q <= Self::MAX_Q,
            "{} precision q={} out of range (max {})",
            R::NAME,
            q,
            Self::MAX_Q
        );
    }

    #[inline]
    fn with_raw(raw: R, q: u8) -> Self {
        Self {
            raw,
            q,
            decimal_digits: decimal_digits_for(q),
        }
    }

    /// Create from raw internal representation (`value × 2^q`).
    ///
    /// # Panics
    /// Panics if `q` is not below the raw bit width.
    #[inline]
    pub fn from_raw(raw: R, q: u8) -> Self {
        Self::assert_precision(q);
        Self::with_raw(raw, q)
    }

    /// Create from an integer value: `raw = value << q`.
    ///
    /// High bits shifted out of the raw integer are lost (the value wraps).
    ///
    /// # Panics
    /// Panics if `q` is not below the raw bit width.
    #[inline]
    pub fn from_integer(value: R, q: u8) -> Self {
        Self::assert_precision(q);
        Self::with_raw(value.shl_wrapping(q as u32), q)
    }

    /// Create from a double: `raw = trunc(value × 2^q)`.
    ///
    /// The scaled value is truncated toward zero, not rounded. Values beyond
    /// the raw range saturate and NaN becomes zero.
    ///
    /// # Panics
    /// Panics if `q` is not below the raw bit width.
    #[inline]
    pub fn from_f64(value: f64, q: u8) -> Self {
        Self::assert_precision(q);
        Self::with_raw(R::from_f64_trunc(value * scale_f64(q)), q)
    }

    /// Create from a float; same truncation as [`FixedPoint::from_f64`].
    #[inline]
    pub fn from_f32(value: f32, q: u8) -> Self {
        Self::from_f64(f64::from(value), q)
    }

    /// Create from an integer part and a fraction given as
    /// `numerator / denominator`, without touching floating point.
    ///
    /// `raw = (integer << q) + (numerator << q) / denominator`, the division
    /// truncating. The fraction is added to the integer part, so for negative
    /// integers it moves the value toward zero.
    ///
    /// # Example
    /// ```
    /// use qfixed::numeric::Fp32s;
    ///
    /// // 9.2935 with 14 fractional bits
    /// let x = Fp32s::from_parts(9, 2935, 10_000, 14);
    /// assert_eq!(x.integer_part(), 9);
    /// assert_eq!(x.fractional_part(), 2935);
    /// assert_eq!(x.fractional_part_divisor(), 10_000);
    /// ```
    ///
    /// # Panics
    /// Panics if `q` is not below the raw bit width or `denominator` is zero.
    #[inline]
    pub fn from_parts(integer: R, numerator: u64, denominator: u64, q: u8) -> Self {
        Self::assert_precision(q);
        let int_scaled = integer.shl_wrapping(q as u32);
        let fraction = R::scaled_fraction(numerator, denominator, q as u32);
        Self::with_raw(int_scaled.wrapping_add(fraction), q)
    }

    /// Checked [`FixedPoint::from_raw`].
    ///
    /// # Errors
    /// Returns `PrecisionOutOfRange` if `q` is not below the raw bit width.
    pub fn try_from_raw(raw: R, q: u8) -> NumericResult<Self> {
        Self::check_precision(q)?;
        Ok(Self::with_raw(raw, q))
    }

    /// Checked [`FixedPoint::from_integer`].
    ///
    /// Only the precision is validated; the shift still wraps.
    ///
    /// # Errors
    /// Returns `PrecisionOutOfRange` if `q` is not below the raw bit width.
    pub fn try_from_integer(value: R, q: u8) -> NumericResult<Self> {
        Self::check_precision(q)?;
        Ok(Self::with_raw(value.shl_wrapping(q as u32), q))
    }

    /// Checked [`FixedPoint::from_f64`].
    ///
    /// # Errors
    /// - `PrecisionOutOfRange` if `q` is not below the raw bit width
    /// - `InvalidInput` for NaN
    /// - `Overflow` / `Underflow` if the scaled value does not fit
    pub fn try_from_f64(value: f64, q: u8) -> NumericResult<Self> {
        Self::check_precision(q)?;
        let raw = R::try_from_f64_trunc(value * scale_f64(q))
            .inspect_err(|err| tracing::debug!(value, q, %err, "float not representable"))?;
        Ok(Self::with_raw(raw, q))
    }

    /// Checked [`FixedPoint::from_parts`].
    ///
    /// # Errors
    /// - `PrecisionOutOfRange` if `q` is not below the raw bit width
    /// - `DivisionByZero` if `denominator` is zero
    pub fn try_from_parts(
        integer: R,
        numerator: u64,
        denominator: u64,
        q: u8,
    ) -> NumericResult<Self> {
        Self::check_precision(q)?;
        if denominator == 0 {
            tracing::debug!(integer = %integer, numerator, "zero fraction denominator");
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::from_parts(integer, numerator, denominator, q))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (`value × 2^q`).
    #[inline]
    pub fn raw_value(self) -> R {
        self.raw
    }

    /// Number of fractional bits.
    #[inline]
    pub fn q(self) -> u8 {
        self.q
    }

    /// Decimal digits [`FixedPoint::fractional_part`] is scaled to.
    #[inline]
    pub fn decimal_digits(self) -> u8 {
        self.decimal_digits
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == R::ZERO
    }

    /// Check if value is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.raw > R::ZERO
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.raw < R::ZERO
    }

    // ========================================================================
    // Precision Alignment
    // ========================================================================

    /// Bring both raw values to a common precision.
    ///
    /// Returns `(lhs_raw, rhs_raw, result_q)`. Only a more precise left
    /// operand changes the result precision.
    #[inline]
    fn align(self, rhs: Self) -> (R, R, u8) {
        match self.q.cmp(&rhs.q) {
            Ordering::Equal => (self.raw, rhs.raw, self.q),
            Ordering::Greater => (
                self.raw.shr_floor((self.q - rhs.q) as u32),
                rhs.raw,
                rhs.q,
            ),
            Ordering::Less => (
                self.raw,
                rhs.raw.shr_floor((rhs.q - self.q) as u32),
                self.q,
            ),
        }
    }

    /// Store an operation result, refreshing the cached digit count when the
    /// precision moved.
    #[inline]
    fn set(&mut self, raw: R, q: u8) {
        self.raw = raw;
        if q != self.q {
            tracing::trace!(from = self.q, to = q, "fixed-point precision narrowed");
            self.q = q;
            self.decimal_digits = decimal_digits_for(q);
        }
    }

    /// Rescale to precision `q`.
    ///
    /// Raising the precision shifts left and wraps if bits fall off the top;
    /// lowering it shifts right and floors.
    ///
    /// # Panics
    /// Panics if `q` is not below the raw bit width.
    pub fn with_precision(self, q: u8) -> Self {
        Self::assert_precision(q);
        let raw = if q >= self.q {
            self.raw.shl_wrapping((q - self.q) as u32)
        } else {
            self.raw.shr_floor((self.q - q) as u32)
        };
        Self::with_raw(raw, q)
    }

    /// Checked [`FixedPoint::with_precision`].
    ///
    /// # Errors
    /// - `PrecisionOutOfRange` if `q` is not below the raw bit width
    /// - `Overflow` / `Underflow` if raising the precision loses high bits
    pub fn try_with_precision(self, q: u8) -> NumericResult<Self> {
        Self::check_precision(q)?;
        let rescaled = self.with_precision(q);
        if q > self.q && rescaled.raw.shr_floor((q - self.q) as u32) != self.raw {
            return Err(if self.is_negative() {
                NumericError::Underflow
            } else {
                NumericError::Overflow
            });
        }
        Ok(rescaled)
    }

    // ========================================================================
    // Checked Arithmetic
    // ========================================================================

    /// Checked addition, aligned like `+`.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let (a, b, q) = self.align(rhs);
        let raw = a.checked_add(b).ok_or_else(|| {
            if b > R::ZERO {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        });
        self.finish_checked("add", raw, q)
    }

    /// Checked subtraction, aligned like `-`.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        let (a, b, q) = self.align(rhs);
        let raw = a.checked_sub(b).ok_or_else(|| {
            if b < R::ZERO {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        });
        self.finish_checked("sub", raw, q)
    }

    /// Checked multiplication, aligned like `*`.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the narrowed product is out of
    /// range.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let (a, b, q) = self.align(rhs);
        self.finish_checked("mul", a.checked_mul_shr(b, q as u32), q)
    }

    /// Checked division, aligned like `/`.
    ///
    /// # Errors
    /// - `DivisionByZero` if the divisor is zero after alignment
    /// - `Overflow` / `Underflow` if the narrowed quotient is out of range
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        let (a, b, q) = self.align(rhs);
        self.finish_checked("div", a.checked_shl_div(b, q as u32), q)
    }

    /// Checked remainder, aligned like `%`.
    ///
    /// # Errors
    /// - `DivisionByZero` if the divisor is zero after alignment
    /// - `Overflow` for the minimum raw value divided by raw `-1`
    pub fn checked_rem(self, rhs: Self) -> NumericResult<Self> {
        let (a, b, q) = self.align(rhs);
        let raw = if b == R::ZERO {
            Err(NumericError::DivisionByZero)
        } else {
            a.checked_rem(b).ok_or(NumericError::Overflow)
        };
        self.finish_checked("rem", raw, q)
    }

    #[inline]
    fn finish_checked(
        mut self,
        op: &'static str,
        raw: NumericResult<R>,
        q: u8,
    ) -> NumericResult<Self> {
        match raw {
            Ok(raw) => {
                self.set(raw, q);
                Ok(self)
            },
            Err(err) => {
                tracing::debug!(op, %err, lhs = ?self, "checked fixed-point operation failed");
                Err(err)
            },
        }
    }

    /// Get absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for the minimum raw value.
    pub fn abs(self) -> NumericResult<Self> {
        self.raw
            .checked_abs()
            .map(|raw| Self::with_raw(raw, self.q))
            .ok_or(NumericError::Overflow)
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Integer part: `raw >> q`.
    ///
    /// Floors toward negative infinity, so `-1.25` has integer part `-2`.
    #[inline]
    pub fn integer_part(self) -> R {
        self.raw.shr_floor(self.q as u32)
    }

    /// Integer part widened to `i64`.
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.integer_part().to_i64()
    }

    /// `raw / 2^q` in double precision.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.raw.to_f64() / scale_f64(self.q)
    }

    /// `raw / 2^q` in single precision.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.raw.to_f32() / scale_f64(self.q) as f32
    }

    /// Fractional part as a decimal integer, to be read over
    /// [`FixedPoint::fractional_part_divisor`].
    ///
    /// Built from the low `q` bits (always non-negative, complementing the
    /// flooring [`FixedPoint::integer_part`]) and rounded half-up at the last
    /// decimal digit. At the 9 digit ceiling the digits are truncated
    /// instead. A rounding carry out of the last digit saturates at
    /// `divisor - 1`.
    pub fn fractional_part(self) -> u32 {
        let low = self.raw.low_bits(self.q as u32);
        let fraction = decimal_fraction(low, self.q, self.decimal_digits);
        fraction.min(self.fractional_part_divisor() - 1)
    }

    /// `10^decimal_digits`.
    #[inline]
    pub fn fractional_part_divisor(self) -> u32 {
        POWERS_OF_TEN[self.decimal_digits as usize]
    }

    /// Sign and magnitude split into `(negative, integer, fraction)` digits,
    /// with a rounding carry moved into the integer.
    fn display_parts(self) -> (bool, u128, u32) {
        let magnitude = self.raw.magnitude();
        let mut integer = magnitude >> self.q;
        let low = magnitude & ((1u128 << self.q) - 1);
        let mut fraction = decimal_fraction(low, self.q, self.decimal_digits);
        if fraction >= self.fractional_part_divisor() {
            integer += 1;
            fraction -= self.fractional_part_divisor();
        }
        (self.is_negative() && (integer != 0 || fraction != 0), integer, fraction)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `2^q` as a double. Exact for every supported precision.
#[inline]
fn scale_f64(q: u8) -> f64 {
    (1u64 << q) as f64
}

/// Scale `low` (a `q`-bit fraction) to `digits` decimal digits.
///
/// Below the digit ceiling one extra digit is computed and rounded half-up
/// away; at the ceiling the digits are truncated. May return the divisor
/// itself when rounding carries.
#[inline]
fn decimal_fraction(low: u128, q: u8, digits: u8) -> u32 {
    let divisor = u128::from(POWERS_OF_TEN[digits as usize]);
    if digits < MAX_DECIMAL_DIGITS {
        let extended = (low * divisor * 10) >> q;
        let rounded = extended / 10 + u128::from(extended % 10 >= 5);
        rounded as u32
    } else {
        ((low * divisor) >> q) as u32
    }
}

// ============================================================================
// Compound Arithmetic Operators
// ============================================================================

impl<R: RawInt> AddAssign for FixedPoint<R> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        let (a, b, q) = self.align(rhs);
        self.set(a.wrapping_add(b), q);
    }
}

impl<R: RawInt> SubAssign for FixedPoint<R> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        let (a, b, q) = self.align(rhs);
        self.set(a.wrapping_sub(b), q);
    }
}

impl<R: RawInt> MulAssign for FixedPoint<R> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        let (a, b, q) = self.align(rhs);
        self.set(a.mul_shr(b, q as u32), q);
    }
}

/// # Panics
/// Panics if the divisor is zero after alignment.
impl<R: RawInt> DivAssign for FixedPoint<R> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        let (a, b, q) = self.align(rhs);
        self.set(a.shl_div(b, q as u32), q);
    }
}

/// # Panics
/// Panics if the divisor is zero after alignment.
impl<R: RawInt> RemAssign for FixedPoint<R> {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        let (a, b, q) = self.align(rhs);
        self.set(a.wrapping_rem(b), q);
    }
}

// ============================================================================
// Simple Arithmetic Operators
// ============================================================================

macro_rules! binary_op_via_assign {
    ($Op:ident, $op:ident, $op_assign:ident) => {
        impl<R: RawInt> $Op for FixedPoint<R> {
            type Output = Self;

            #[inline]
            fn $op(mut self, rhs: Self) -> Self::Output {
                self.$op_assign(rhs);
                self
            }
        }
    };
}

binary_op_via_assign!(Add, add, add_assign);
binary_op_via_assign!(Sub, sub, sub_assign);
binary_op_via_assign!(Mul, mul, mul_assign);
binary_op_via_assign!(Div, div, div_assign);
binary_op_via_assign!(Rem, rem, rem_assign);

impl<R: RawInt> Neg for FixedPoint<R> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::with_raw(self.raw.wrapping_neg(), self.q)
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl<R: RawInt> PartialEq for FixedPoint<R> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let (a, b, _) = self.align(*other);
        a == b
    }
}

impl<R: RawInt> PartialOrd for FixedPoint<R> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (a, b, _) = self.align(*other);
        Some(a.cmp(&b))
    }
}

// ============================================================================
// Conversion Traits
// ============================================================================

impl From<Fp32s> for i32 {
    #[inline]
    fn from(value: Fp32s) -> Self {
        value.integer_part()
    }
}

impl From<Fp32s> for i64 {
    #[inline]
    fn from(value: Fp32s) -> Self {
        value.to_i64()
    }
}

impl From<Fp64s> for i64 {
    #[inline]
    fn from(value: Fp64s) -> Self {
        value.integer_part()
    }
}

impl<R: RawInt> From<FixedPoint<R>> for f64 {
    #[inline]
    fn from(value: FixedPoint<R>) -> Self {
        value.to_f64()
    }
}

impl<R: RawInt> From<FixedPoint<R>> for f32 {
    #[inline]
    fn from(value: FixedPoint<R>) -> Self {
        value.to_f32()
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<R: RawInt> fmt::Debug for FixedPoint<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, raw={}, q={})", R::NAME, self, self.raw, self.q)
    }
}

impl<R: RawInt> fmt::Display for FixedPoint<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (negative, integer, fraction) = self.display_parts();
        let sign = if negative { "-" } else { "" };

        if self.decimal_digits == 0 {
            write!(f, "{}{}", sign, integer)
        } else {
            write!(
                f,
                "{}{}.{:0>width$}",
                sign,
                integer,
                fraction,
                width = self.decimal_digits as usize
            )
        }
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl<R: RawInt> FixedPoint<R> {
    /// Convert from rust_decimal::Decimal: `raw = trunc(d × 2^q)`.
    ///
    /// Truncates toward zero like [`FixedPoint::from_f64`], but without a
    /// floating-point round trip.
    ///
    /// # Errors
    /// - `PrecisionOutOfRange` if `q` is not below the raw bit width
    /// - `Overflow` / `Underflow` if the scaled value does not fit
    pub fn from_decimal(d: rust_decimal::Decimal, q: u8) -> NumericResult<Self> {
        use rust_decimal::prelude::ToPrimitive;

        Self::check_precision(q)?;
        let scale = rust_decimal::Decimal::from(1u64 << q);
        let overflow = if d.is_sign_negative() {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        };
        let scaled = d.checked_mul(scale).ok_or(overflow)?.trunc();
        let raw = scaled.to_i128().ok_or(overflow)?;
        Ok(Self::with_raw(R::try_from_i128(raw)?, q))
    }

    /// Convert to rust_decimal::Decimal with `decimal_digits` places.
    ///
    /// Uses the same rounded digits as `Display`, so the result is what the
    /// value prints as, not its exact binary expansion.
    ///
    /// # Errors
    /// Returns `Overflow` if the digits do not fit a `Decimal` mantissa.
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        let (negative, integer, fraction) = self.display_parts();
        let divisor = u128::from(self.fractional_part_divisor());
        let magnitude = integer
            .checked_mul(divisor)
            .and_then(|m| m.checked_add(u128::from(fraction)))
            .and_then(|m| i128::try_from(m).ok())
            .ok_or(NumericError::Overflow)?;
        let mantissa = if negative { -magnitude } else { magnitude };
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, u32::from(self.decimal_digits))
            .map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Serialized form: the raw value and its precision.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct FixedPointParts<R> {
    raw: R,
    q: u8,
}

#[cfg(feature = "serde")]
impl<R: RawInt + Serialize> Serialize for FixedPoint<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FixedPointParts {
            raw: self.raw,
            q: self.q,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, R: RawInt + Deserialize<'de>> Deserialize<'de> for FixedPoint<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parts = FixedPointParts::<R>::deserialize(deserializer)?;
        Self::try_from_raw(parts.raw, parts.q).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
