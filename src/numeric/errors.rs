// ============================================================================
// Numeric Errors
// Error types for fixed-point construction and checked arithmetic
// ============================================================================

use std::fmt;

/// Errors reported by the checked (`checked_*` / `try_*`) entry points.
///
/// The operator forms never return these: they wrap on overflow and panic on
/// division by zero, like the primitive integers they are built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the maximum of the raw integer (`i32` for `Fp32s`,
    /// `i64` for `Fp64s`)
    Overflow,
    /// Result below the minimum of the raw integer (`i32` for `Fp32s`,
    /// `i64` for `Fp64s`)
    Underflow,
    /// Attempted division or remainder by a zero (aligned) divisor
    DivisionByZero,
    /// Fractional bit count is not below the raw integer width
    PrecisionOutOfRange,
    /// Input value cannot be represented (NaN, infinite, out of range)
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionOutOfRange => write!(
                f,
                "precision out of range: q must be smaller than the raw bit width"
            ),
            NumericError::InvalidInput => {
                write!(f, "invalid input: value is not representable")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
