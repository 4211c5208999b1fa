//! Packed-word codec for operand transfer.
//!
//! The register interface moves operands as 32-bit words holding up to
//! 16 trits, two BCT bits per trit (see [`Trit::from_bct`]). An 81-trit
//! operand therefore spans [`WORDS_PER_OPERAND`] consecutive words, with
//! the final word carrying only the single leftover trit; its upper bits
//! are zero on encode and ignored on decode.
//!
//! Round-trip law: `decode(encode(v)) == v` for any slice of at most
//! 16 trits.

use crate::ternary::{Trit, TritVector, TRIT_COUNT};
use std::ops::Range;

/// Trits packed into one 32-bit register word.
pub const TRITS_PER_WORD: usize = 16;

/// Packed words needed to transfer one full operand.
pub const WORDS_PER_OPERAND: usize = (TRIT_COUNT + TRITS_PER_WORD - 1) / TRITS_PER_WORD;

/// Trit index range covered by the given operand word.
///
/// # Panics
/// Panics if `index >= WORDS_PER_OPERAND`.
#[inline]
pub fn word_range(index: usize) -> Range<usize> {
    assert!(index < WORDS_PER_OPERAND, "operand word index {} out of range", index);
    let start = index * TRITS_PER_WORD;
    start..(start + TRITS_PER_WORD).min(TRIT_COUNT)
}

/// Number of trits carried by the given operand word.
#[inline]
pub fn trits_in_word(index: usize) -> usize {
    word_range(index).len()
}

/// Pack up to 16 trits into a 32-bit word, two bits per trit.
///
/// Bit positions beyond the slice stay zero.
///
/// # Panics
/// Panics if the slice holds more than 16 trits.
pub fn encode_word(trits: &[Trit]) -> u32 {
    assert!(trits.len() <= TRITS_PER_WORD, "at most 16 trits fit one word");
    let mut word = 0u32;
    for (i, trit) in trits.iter().enumerate() {
        word |= (trit.to_bct() as u32) << (2 * i);
    }
    word
}

/// Unpack trits from a 32-bit word into `out`, two bits per trit.
///
/// Only `out.len()` trits are read; higher bits of the word are ignored.
/// The unused `0b11` bit pattern decodes as zero.
///
/// # Panics
/// Panics if `out` holds more than 16 trits.
pub fn decode_word(word: u32, out: &mut [Trit]) {
    assert!(out.len() <= TRITS_PER_WORD, "at most 16 trits fit one word");
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = Trit::from_bct((word >> (2 * i)) as u8);
    }
}

/// Encode a full operand as its register-word sequence.
pub fn encode_vector(vector: &TritVector) -> [u32; WORDS_PER_OPERAND] {
    let mut words = [0u32; WORDS_PER_OPERAND];
    for (i, word) in words.iter_mut().enumerate() {
        *word = encode_word(&vector.trits()[word_range(i)]);
    }
    words
}

/// Decode a register-word sequence back into a full operand.
pub fn decode_vector(words: &[u32; WORDS_PER_OPERAND]) -> TritVector {
    let mut vector = TritVector::zero();
    for (i, &word) in words.iter().enumerate() {
        decode_word(word, &mut vector.trits_mut()[word_range(i)]);
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_operand_geometry() {
        assert_eq!(WORDS_PER_OPERAND, 6);
        assert_eq!(word_range(0), 0..16);
        assert_eq!(word_range(4), 64..80);
        // Final word carries the single leftover trit
        assert_eq!(word_range(5), 80..81);
        assert_eq!(trits_in_word(5), 1);
    }

    #[test]
    fn test_encode_known_patterns() {
        assert_eq!(encode_word(&[Trit::O; 16]), 0);
        // +1 encodes as 01 in every lane
        assert_eq!(encode_word(&[Trit::P; 16]), 0x5555_5555);
        // -1 encodes as 10 in every lane
        assert_eq!(encode_word(&[Trit::N; 16]), 0xAAAA_AAAA);
        // LSB-first: trit 0 lands in bits [1:0]
        assert_eq!(encode_word(&[Trit::N, Trit::P]), 0b0110);
    }

    #[test]
    fn test_short_slice_leaves_upper_bits_zero() {
        let word = encode_word(&[Trit::P]);
        assert_eq!(word, 0x1);
        assert_eq!(word >> 2, 0);
    }

    #[test]
    fn test_decode_ignores_bits_past_count() {
        let mut out = [Trit::O; 1];
        decode_word(0xFFFF_FFF1, &mut out);
        assert_eq!(out[0], Trit::P);
    }

    #[test]
    fn test_decode_treats_invalid_lanes_as_zero() {
        // 0b11 in every lane is never produced by the encoder but must
        // come back as all-zero
        let mut out = [Trit::P; 16];
        decode_word(0xFFFF_FFFF, &mut out);
        assert!(out.iter().all(|t| t.is_zero()));
    }

    #[test]
    fn test_vector_roundtrip() {
        let mut v = TritVector::zero();
        v.set(0, Trit::P);
        v.set(15, Trit::N);
        v.set(16, Trit::N);
        v.set(79, Trit::P);
        v.set(80, Trit::N);

        let words = encode_vector(&v);
        assert_eq!(decode_vector(&words), v);
        // Word 5 holds exactly one trit: -1 = 0b10
        assert_eq!(words[5], 0x2);
    }

    proptest! {
        #[test]
        fn prop_word_roundtrip(raw in prop::collection::vec(-1i8..=1, 0..=16)) {
            let trits: Vec<Trit> = raw.iter().map(|&v| Trit::from_i8(v)).collect();
            let word = encode_word(&trits);
            let mut out = vec![Trit::O; trits.len()];
            decode_word(word, &mut out);
            prop_assert_eq!(out, trits);
        }

        #[test]
        fn prop_vector_roundtrip(raw in prop::collection::vec(-1i8..=1, TRIT_COUNT)) {
            let mut v = TritVector::zero();
            for (i, &t) in raw.iter().enumerate() {
                v.set(i, Trit::from_i8(t));
            }
            prop_assert_eq!(decode_vector(&encode_vector(&v)), v);
        }
    }
}
