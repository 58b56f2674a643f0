// ============================================================================
// Numeric Module
// Binary fixed-point arithmetic for targets without a floating-point unit
// ============================================================================
//
// This module provides:
// - FixedPoint<R>: binary-scaled number with a runtime fractional bit count
// - Fp32s / Fp64s: the 32-bit and 64-bit variants
// - RawInt: width-specific raw integer operations
// - DECIMAL_DIGITS / POWERS_OF_TEN: decimal rendering tables
// - NumericError: error types for the checked entry points
//
// Design principles:
// - Operands are aligned to a common precision before every operation
// - Multiply/divide go through a wider intermediate integer
// - Operators wrap like primitive integers; checked_* returns Result
// - No heap, no shared state

mod errors;
mod fixed_point;
mod raw_int;
mod tables;

pub use errors::{NumericError, NumericResult};
pub use fixed_point::{FixedPoint, Fp32s, Fp64s};
pub use raw_int::RawInt;
pub use tables::{decimal_digits_for, DECIMAL_DIGITS, MAX_DECIMAL_DIGITS, POWERS_OF_TEN};
