//! Pseudo-random function (PRF) contract
//!
//! A PRF is the mixing primitive at the heart of a counter-based
//! generator: a pure, stateless function from one fixed-size input block
//! (counter words followed by key words) to one fixed-size output block.
//!
//! The engine is generic over this trait with static dispatch; nothing on
//! the per-word hot path goes through a vtable.

pub mod philox;

use crate::word::Word;
use std::fmt::Debug;

pub use philox::{Philox2x32, Philox2x64, Philox4x32, Philox4x64};

/// The capability set a mixing primitive must expose.
///
/// # Contract
///
/// `evaluate` must be a deterministic function of the input words alone:
/// no internal state may be retained between calls. Both evaluation forms
/// are associated functions rather than methods to make statelessness
/// structural.
///
/// Output words are always within `min()..=max()`.
pub trait PseudoRandomFunction {
    /// Word type shared by input and output blocks
    type Word: Word;

    /// One input block: `INPUT_COUNT` words, counter words first
    type InputBlock: Copy + Default + Debug + AsRef<[Self::Word]> + AsMut<[Self::Word]>;

    /// One output block: `OUTPUT_COUNT` words
    type OutputBlock: Copy + Default + Debug + AsRef<[Self::Word]> + AsMut<[Self::Word]>;

    /// Significant bit width of each input word
    const INPUT_WORD_SIZE: u32;

    /// Significant bit width of each output word
    const OUTPUT_WORD_SIZE: u32;

    /// Number of words in one input block
    const INPUT_COUNT: usize;

    /// Number of words in one output block
    const OUTPUT_COUNT: usize;

    /// Smallest producible output word
    fn min() -> Self::Word {
        <Self::Word as Word>::ZERO
    }

    /// Largest producible output word
    fn max() -> Self::Word {
        <Self::Word as Word>::mask(Self::OUTPUT_WORD_SIZE)
    }

    /// Evaluate the PRF on one input block.
    fn evaluate(input: &Self::InputBlock, output: &mut Self::OutputBlock);

    /// Batched evaluation: consume an ordered sequence of input blocks and
    /// write the concatenation of their output blocks in the same order.
    ///
    /// `output` must hold `OUTPUT_COUNT` words per input block. Only one
    /// input block is materialized at a time, so a lazily produced
    /// sequence costs no memory proportional to its length.
    fn generate<I>(inputs: I, output: &mut [Self::Word])
    where
        I: IntoIterator<Item = Self::InputBlock>,
    {
        let mut block: Self::OutputBlock = Default::default();
        let chunks = output.chunks_exact_mut(Self::OUTPUT_COUNT);
        for (input, chunk) in inputs.into_iter().zip(chunks) {
            Self::evaluate(&input, &mut block);
            chunk.copy_from_slice(block.as_ref());
        }
    }
}
