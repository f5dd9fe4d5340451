//! Bit-count primitives used by the periodic tasks.
//!
//! Both operate on the unsigned 32-bit reinterpretation of the payload, so a
//! negative payload is well defined (its sign bit counts as a set bit).

/// Number of set bits in the 32-bit pattern of `n`.
#[must_use]
pub const fn popcount(n: i32) -> u32 {
    (n as u32).count_ones()
}

/// Number of zero bits above the most significant set bit, over 32 bits.
///
/// Returns 32 for zero and 0 for any negative input.
#[must_use]
pub const fn leading_zeros(n: i32) -> u32 {
    (n as u32).leading_zeros()
}
