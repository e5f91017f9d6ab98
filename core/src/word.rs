//! Word-level bit-width utilities
//!
//! Counter-based generators operate on unsigned words of a declared bit
//! width that may be narrower than the native integer holding them. Every
//! word in the system is kept masked to its declared width at all times.
//!
//! This module provides the `Word` trait implemented by `u32` and `u64`:
//! masking, wrapping arithmetic and the wide multiply that produces the
//! high/low halves of a w-bit x w-bit product.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};
use std::str::FromStr;

/// An unsigned machine word usable as PRF input/output material.
///
/// # Example
/// ```
/// use counter_rng_core::Word;
///
/// assert_eq!(u32::mask(8), 0xFF);
/// let (hi, lo) = 0xFFFF_FFFFu32.mul_hi_lo(2, 32);
/// assert_eq!((hi, lo), (1, 0xFFFF_FFFE));
/// ```
pub trait Word:
    Copy
    + Default
    + Eq
    + Ord
    + fmt::Debug
    + fmt::Display
    + FromStr
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + 'static
{
    /// Native width of the underlying integer type
    const BITS: u32;

    const ZERO: Self;
    const ONE: Self;

    /// Value with the low `width` bits set
    ///
    /// `width` greater than or equal to `BITS` yields the all-ones value.
    fn mask(width: u32) -> Self;

    /// This word masked to the low `width` bits
    fn masked(self, width: u32) -> Self {
        self & Self::mask(width)
    }

    fn wrapping_add(self, rhs: Self) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Wide multiply: high and low `width`-bit halves of `self * rhs`
    ///
    /// Both operands are taken modulo 2^width; the 2*width-bit product is
    /// split into (hi, lo). Computed through u128, which covers every
    /// supported width up to 64 bits.
    fn mul_hi_lo(self, rhs: Self, width: u32) -> (Self, Self) {
        let product = self.masked(width).to_u128() * rhs.masked(width).to_u128();
        let hi = Self::from_u128(product >> width).masked(width);
        let lo = Self::from_u128(product).masked(width);
        (hi, lo)
    }

    /// Widen into the u128 transport used for counter/position arithmetic
    fn to_u128(self) -> u128;

    /// Truncating conversion from the u128 transport
    fn from_u128(value: u128) -> Self;

    /// Truncating conversion from a 32-bit value (seed material)
    fn from_u32(value: u32) -> Self;
}

macro_rules! impl_word {
    ($ty:ty) => {
        impl Word for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            fn mask(width: u32) -> Self {
                if width >= Self::BITS {
                    <$ty>::MAX
                } else {
                    (1 << width) - 1
                }
            }

            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }

            fn to_u128(self) -> u128 {
                self as u128
            }

            fn from_u128(value: u128) -> Self {
                value as $ty
            }

            fn from_u32(value: u32) -> Self {
                value as $ty
            }
        }
    };
}

impl_word!(u32);
impl_word!(u64);
