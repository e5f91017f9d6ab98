//! Philox round functions
//!
//! Philox (Salmon et al., "Parallel Random Numbers: As Easy as 1, 2, 3",
//! 2011) mixes its input with multiply-high/low Feistel-style rounds and a
//! Weyl-sequence key schedule. The constants and lane wiring below are the
//! published reference values; they are required verbatim for bit-exact
//! conformance with the published test vectors, not derived from first
//! principles.
//!
//! Variants: 2 or 4 lanes of 32- or 64-bit words, `R` rounds (reference
//! default 10). Input block layout is `n` lane words followed by `n/2` key
//! words; the output block is the final lane values in original order.

use super::PseudoRandomFunction;
use crate::word::Word;

// 4-lane multipliers and Weyl (round) constants
const PHILOX_M4X32: [u32; 2] = [0xD251_1F53, 0xCD9E_8D57];
const PHILOX_W4X32: [u32; 2] = [0x9E37_79B9, 0xBB67_AE85];
const PHILOX_M4X64: [u64; 2] = [0xD2E7_470E_E14C_6C93, 0xCA5A_8263_9512_1157];
const PHILOX_W4X64: [u64; 2] = [0x9E37_79B9_7F4A_7C15, 0xBB67_AE85_84CA_A73B];

// 2-lane multipliers and Weyl constants
const PHILOX_M2X32: u32 = 0xD256_D193;
const PHILOX_W2X32: u32 = 0x9E37_79B9;
const PHILOX_M2X64: u64 = 0xD2B7_4407_B1CE_6E93;
const PHILOX_W2X64: u64 = 0x9E37_79B9_7F4A_7C15;

/// 2-lane Philox: one multiply per round.
fn mix2<W: Word>(input: &[W], output: &mut [W], width: u32, rounds: usize, mult: W, weyl: W) {
    let mut r0 = input[0].masked(width);
    let mut l0 = input[1].masked(width);
    let mut k0 = input[2].masked(width);
    for _ in 0..rounds {
        let (hi, lo) = r0.mul_hi_lo(mult, width);
        r0 = hi ^ k0 ^ l0;
        l0 = lo;
        k0 = k0.wrapping_add(weyl).masked(width);
    }
    output[0] = r0;
    output[1] = l0;
}

/// 4-lane Philox: two multiplies per round with crossed lane wiring.
fn mix4<W: Word>(
    input: &[W],
    output: &mut [W],
    width: u32,
    rounds: usize,
    mult: [W; 2],
    weyl: [W; 2],
) {
    let mut r0 = input[0].masked(width);
    let mut l0 = input[1].masked(width);
    let mut r1 = input[2].masked(width);
    let mut l1 = input[3].masked(width);
    let mut k0 = input[4].masked(width);
    let mut k1 = input[5].masked(width);
    for _ in 0..rounds {
        let (hi0, lo0) = r0.mul_hi_lo(mult[0], width);
        let (hi1, lo1) = r1.mul_hi_lo(mult[1], width);
        r0 = hi1 ^ l0 ^ k0;
        l0 = lo1;
        r1 = hi0 ^ l1 ^ k1;
        l1 = lo0;
        k0 = k0.wrapping_add(weyl[0]).masked(width);
        k1 = k1.wrapping_add(weyl[1]).masked(width);
    }
    output[0] = r0;
    output[1] = l0;
    output[2] = r1;
    output[3] = l1;
}

/// Philox 2x32: 2 lanes of 32-bit words, `R` rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Philox2x32<const R: usize = 10>;

/// Philox 4x32: 4 lanes of 32-bit words, `R` rounds.
///
/// The 10-round instantiation is the variant with published conformance
/// vectors (default seed 20111115).
#[derive(Debug, Clone, Copy, Default)]
pub struct Philox4x32<const R: usize = 10>;

/// Philox 2x64: 2 lanes of 64-bit words, `R` rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Philox2x64<const R: usize = 10>;

/// Philox 4x64: 4 lanes of 64-bit words, `R` rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Philox4x64<const R: usize = 10>;

impl<const R: usize> Philox2x32<R> {
    const ROUNDS_NONZERO: () = assert!(R > 0, "philox requires at least one round");
}

impl<const R: usize> Philox4x32<R> {
    const ROUNDS_NONZERO: () = assert!(R > 0, "philox requires at least one round");
}

impl<const R: usize> Philox2x64<R> {
    const ROUNDS_NONZERO: () = assert!(R > 0, "philox requires at least one round");
}

impl<const R: usize> Philox4x64<R> {
    const ROUNDS_NONZERO: () = assert!(R > 0, "philox requires at least one round");
}

impl<const R: usize> PseudoRandomFunction for Philox2x32<R> {
    type Word = u32;
    type InputBlock = [u32; 3];
    type OutputBlock = [u32; 2];
    const INPUT_WORD_SIZE: u32 = 32;
    const OUTPUT_WORD_SIZE: u32 = 32;
    const INPUT_COUNT: usize = 3;
    const OUTPUT_COUNT: usize = 2;

    fn evaluate(input: &Self::InputBlock, output: &mut Self::OutputBlock) {
        let () = Self::ROUNDS_NONZERO;
        mix2(input, output, 32, R, PHILOX_M2X32, PHILOX_W2X32);
    }
}

impl<const R: usize> PseudoRandomFunction for Philox4x32<R> {
    type Word = u32;
    type InputBlock = [u32; 6];
    type OutputBlock = [u32; 4];
    const INPUT_WORD_SIZE: u32 = 32;
    const OUTPUT_WORD_SIZE: u32 = 32;
    const INPUT_COUNT: usize = 6;
    const OUTPUT_COUNT: usize = 4;

    fn evaluate(input: &Self::InputBlock, output: &mut Self::OutputBlock) {
        let () = Self::ROUNDS_NONZERO;
        mix4(input, output, 32, R, PHILOX_M4X32, PHILOX_W4X32);
    }
}

impl<const R: usize> PseudoRandomFunction for Philox2x64<R> {
    type Word = u64;
    type InputBlock = [u64; 3];
    type OutputBlock = [u64; 2];
    const INPUT_WORD_SIZE: u32 = 64;
    const OUTPUT_WORD_SIZE: u32 = 64;
    const INPUT_COUNT: usize = 3;
    const OUTPUT_COUNT: usize = 2;

    fn evaluate(input: &Self::InputBlock, output: &mut Self::OutputBlock) {
        let () = Self::ROUNDS_NONZERO;
        mix2(input, output, 64, R, PHILOX_M2X64, PHILOX_W2X64);
    }
}

impl<const R: usize> PseudoRandomFunction for Philox4x64<R> {
    type Word = u64;
    type InputBlock = [u64; 6];
    type OutputBlock = [u64; 4];
    const INPUT_WORD_SIZE: u32 = 64;
    const OUTPUT_WORD_SIZE: u32 = 64;
    const INPUT_COUNT: usize = 6;
    const OUTPUT_COUNT: usize = 4;

    fn evaluate(input: &Self::InputBlock, output: &mut Self::OutputBlock) {
        let () = Self::ROUNDS_NONZERO;
        mix4(input, output, 64, R, PHILOX_M4X64, PHILOX_W4X64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_philox4x32_first_block() {
        // Counter 0, key 20111115: the first block of the canonical stream
        let mut output = [0u32; 4];
        Philox4x32::<10>::evaluate(&[0, 0, 0, 0, 20_111_115, 0], &mut output);
        assert_eq!(output, [3587538684, 1324224816, 3068087177, 2030706281]);
    }

    #[test]
    fn test_philox4x32_second_block() {
        let mut output = [0u32; 4];
        Philox4x32::<10>::evaluate(&[1, 0, 0, 0, 20_111_115, 0], &mut output);
        assert_eq!(output, [1694797232, 3200855668, 284762628, 612470539]);
    }

    #[test]
    fn test_philox4x64_first_block() {
        let mut output = [0u64; 4];
        Philox4x64::<10>::evaluate(&[0, 0, 0, 0, 20_111_115, 0], &mut output);
        assert_eq!(
            output,
            [
                4854577551194240716,
                11024447680751626801,
                6491473261962256061,
                17735969495851009945,
            ]
        );
    }

    #[test]
    fn test_philox2x32_blocks() {
        let mut output = [0u32; 2];
        Philox2x32::<10>::evaluate(&[0, 0, 42], &mut output);
        assert_eq!(output, [624017136, 4231775638]);
        Philox2x32::<10>::evaluate(&[1, 0, 42], &mut output);
        assert_eq!(output, [1309680519, 1926238910]);
    }

    #[test]
    fn test_philox2x64_blocks() {
        let mut output = [0u64; 2];
        Philox2x64::<10>::evaluate(&[0, 0, 42], &mut output);
        assert_eq!(output, [17722514536119504384, 780345652393288209]);
        Philox2x64::<10>::evaluate(&[1, 0, 42], &mut output);
        assert_eq!(output, [512748429967054602, 17436118716812280898]);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let input = [7u32, 8, 9, 10, 11, 12];
        let mut a = [0u32; 4];
        let mut b = [0u32; 4];
        Philox4x32::<10>::evaluate(&input, &mut a);
        Philox4x32::<10>::evaluate(&input, &mut b);
        assert_eq!(a, b, "evaluate must be a pure function of its input");
    }

    #[test]
    fn test_generate_matches_sequential_evaluate() {
        let inputs: Vec<[u32; 6]> = (0..5u32).map(|c| [c, 0, 0, 0, 999, 0]).collect();
        let mut batched = [0u32; 20];
        Philox4x32::<10>::generate(inputs.iter().copied(), &mut batched);

        for (i, input) in inputs.iter().enumerate() {
            let mut single = [0u32; 4];
            Philox4x32::<10>::evaluate(input, &mut single);
            assert_eq!(
                &batched[i * 4..(i + 1) * 4],
                &single,
                "batched output out of order at block {}",
                i
            );
        }
    }

    #[test]
    fn test_generate_is_lazy_friendly() {
        // An iterator adaptor as input range: no block buffer allocated
        let mut batched = [0u32; 12];
        Philox4x32::<10>::generate((0..3u32).map(|c| [c, 0, 0, 0, 7, 7]), &mut batched);
        let mut single = [0u32; 4];
        Philox4x32::<10>::evaluate(&[2, 0, 0, 0, 7, 7], &mut single);
        assert_eq!(&batched[8..], &single);
    }

    #[test]
    fn test_round_count_changes_output() {
        let input = [0u32, 0, 0, 0, 1, 0];
        let mut ten = [0u32; 4];
        let mut seven = [0u32; 4];
        Philox4x32::<10>::evaluate(&input, &mut ten);
        Philox4x32::<7>::evaluate(&input, &mut seven);
        assert_ne!(ten, seven);
    }

    #[test]
    fn test_output_bounds() {
        assert_eq!(Philox4x32::<10>::min(), 0);
        assert_eq!(Philox4x32::<10>::max(), 0xFFFF_FFFF);
        assert_eq!(Philox4x64::<10>::max(), u64::MAX);
    }
}
