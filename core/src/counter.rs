//! Multi-word counter arithmetic
//!
//! A counter is a logical unsigned value of `len * width` bits stored as a
//! slice of words, word 0 least significant. Overflow at the top wraps
//! silently to zero - counter-based generators treat the counter as an
//! unbounded modular position, never an error.
//!
//! Scalar get/set (`load`/`store`) use u128 as the transport integer and
//! are therefore only valid while `len * width <= 128`. Wider counters
//! (e.g. four 64-bit words) are still fully supported by the carry-based
//! operations `increment`, `decrement` and `advance`, which is what the
//! engine uses for position arithmetic.

use crate::word::Word;

/// Add 1 to the counter, propagating carries.
///
/// Stops at the first word that did not overflow; the common case touches
/// only word 0.
///
/// # Example
/// ```
/// use counter_rng_core::counter;
///
/// let mut words = [0xFFFF_FFFFu32, 7];
/// counter::increment(&mut words, 32);
/// assert_eq!(words, [0, 8]);
/// ```
pub fn increment<W: Word>(words: &mut [W], width: u32) {
    for word in words.iter_mut() {
        *word = word.wrapping_add(W::ONE).masked(width);
        if *word != W::ZERO {
            return;
        }
    }
}

/// Subtract 1 from the counter, propagating borrows.
///
/// Zero wraps to the maximum representable counter value.
pub fn decrement<W: Word>(words: &mut [W], width: u32) {
    for word in words.iter_mut() {
        if *word == W::ZERO {
            *word = W::mask(width);
        } else {
            *word = word.wrapping_sub(W::ONE);
            return;
        }
    }
}

/// Add a scalar `delta` to the counter, propagating carries across words.
///
/// Exact for any counter width; overflow past the top word wraps. This is
/// the multi-limb position arithmetic used by bulk fill and discard, so
/// counters wider than the 128-bit scalar transport still advance
/// correctly.
pub fn advance<W: Word>(words: &mut [W], width: u32, delta: u128) {
    let mask = W::mask(width).to_u128();
    let mut carry = delta;
    for word in words.iter_mut() {
        if carry == 0 {
            return;
        }
        let sum = word.to_u128() + (carry & mask);
        *word = W::from_u128(sum).masked(width);
        carry = (carry >> width) + (sum >> width);
    }
}

/// Read the counter as a scalar.
///
/// # Panics
/// Panics if `len * width` exceeds the 128-bit transport; such counters
/// must use the carry-based operations instead.
pub fn load<W: Word>(words: &[W], width: u32) -> u128 {
    assert!(
        words.len() as u32 * width <= 128,
        "counter of {} x {} bits exceeds the u128 scalar transport",
        words.len(),
        width
    );
    let mut value = 0u128;
    for (i, word) in words.iter().enumerate() {
        value |= word.to_u128() << (width * i as u32);
    }
    value
}

/// Bulk-set the counter from a scalar, masking each word.
///
/// # Panics
/// Panics if `len * width` exceeds the 128-bit transport.
pub fn store<W: Word>(words: &mut [W], width: u32, value: u128) {
    assert!(
        words.len() as u32 * width <= 128,
        "counter of {} x {} bits exceeds the u128 scalar transport",
        words.len(),
        width
    );
    for (i, word) in words.iter_mut().enumerate() {
        *word = W::from_u128(value >> (width * i as u32)).masked(width);
    }
}
