// ============================================================================
// Lookup Tables
// Decimal digit counts and powers of ten used for fractional decomposition
// ============================================================================

/// Largest number of decimal digits a fractional part is rendered with.
pub const MAX_DECIMAL_DIGITS: u8 = 9;

/// Decimal digits needed to print the fractional part of a Q`n` number.
///
/// Entry `q` is `round(log10(2^q))`, capped at [`MAX_DECIMAL_DIGITS`].
/// Covers every precision of the 64-bit variant; the 32-bit variant only
/// indexes the first 32 entries.
#[rustfmt::skip]
pub const DECIMAL_DIGITS: [u8; 64] = [
    0, 0, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5,
    5, 5, 5, 6, 6, 6, 7, 7, 7, 8, 8, 8, 8, 9, 9, 9,
    9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9,
    9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9,
];

/// `10^n` for every possible decimal digit count.
pub const POWERS_OF_TEN: [u32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Decimal digit count for precision `q`.
#[inline]
pub const fn decimal_digits_for(q: u8) -> u8 {
    DECIMAL_DIGITS[q as usize]
}
