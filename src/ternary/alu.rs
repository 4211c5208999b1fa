//! Balanced ternary arithmetic/logic unit.
//!
//! Pure, stateless operations over full operands, all O(TRIT_COUNT):
//! - [`add`] - lane-parallel addition with per-lane carry
//! - [`not`] - elementwise negation
//! - [`and`] - elementwise minimum (the ternary AND)
//! - [`rotate_left`] - one-position cyclic rotation
//!
//! The adder matches the hardware's lane-parallel design: each trit
//! position is added independently and its carry is reported in the
//! carry vector, never propagated into the neighboring position. Callers
//! that want ripple-carry semantics do not get them here.

use crate::ternary::{TritVector, TRIT_COUNT};

/// Add two operands lane by lane, returning (result, carries).
///
/// For every position `i`: `a[i] + b[i] == result[i] + 3 * carries[i]`,
/// with both outputs normalized into {-1, 0, +1}.
pub fn add(a: &TritVector, b: &TritVector) -> (TritVector, TritVector) {
    let mut result = TritVector::zero();
    let mut carries = TritVector::zero();

    for i in 0..TRIT_COUNT {
        let (sum, carry) = a.get(i).add(b.get(i));
        result.set(i, sum);
        carries.set(i, carry);
    }

    (result, carries)
}

/// Negate every trit of an operand.
#[inline]
pub fn not(a: &TritVector) -> TritVector {
    a.neg()
}

/// Elementwise minimum of two operands (balanced ternary AND).
pub fn and(a: &TritVector, b: &TritVector) -> TritVector {
    let mut result = TritVector::zero();
    for i in 0..TRIT_COUNT {
        result.set(i, a.get(i).min(b.get(i)));
    }
    result
}

/// Cyclic left rotation by one position: `result[i] = a[(i+1) mod N]`.
///
/// This is the documented placeholder behind the SHA3 opcode. It is a
/// permutation, not a hash, and must never be treated as one.
pub fn rotate_left(a: &TritVector) -> TritVector {
    let mut result = TritVector::zero();
    for i in 0..TRIT_COUNT {
        result.set(i, a.get((i + 1) % TRIT_COUNT));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ternary::Trit;
    use proptest::prelude::*;

    fn vector_of(raw: &[i8]) -> TritVector {
        let mut v = TritVector::zero();
        for (i, &t) in raw.iter().enumerate() {
            v.set(i, Trit::from_i8(t));
        }
        v
    }

    #[test]
    fn test_add_zero_identity() {
        let a = vector_of(&[1, -1, 0, 1]);
        let (result, carries) = add(&a, &TritVector::zero());
        assert_eq!(result, a);
        assert!(carries.is_zero());
    }

    #[test]
    fn test_add_is_lane_parallel() {
        // All-ones plus all-ones: every lane wraps to -1 with carry +1,
        // and no lane disturbs its neighbor
        let ones = TritVector::filled(Trit::P);
        let (result, carries) = add(&ones, &ones);
        assert_eq!(result, TritVector::filled(Trit::N));
        assert_eq!(carries, TritVector::filled(Trit::P));
    }

    #[test]
    fn test_add_additive_inverse() {
        let a = vector_of(&[1, 1, -1, 0, -1, 1]);
        let (result, carries) = add(&a, &a.neg());
        assert!(result.is_zero());
        assert!(carries.is_zero());
    }

    #[test]
    fn test_not_involution() {
        let a = vector_of(&[1, 0, -1, -1, 1]);
        assert_eq!(not(&not(&a)), a);
    }

    #[test]
    fn test_and_is_elementwise_min() {
        let a = vector_of(&[1, 1, 0, -1]);
        let b = vector_of(&[-1, 1, 1, 0]);
        let result = and(&a, &b);
        assert_eq!(result.get(0), Trit::N);
        assert_eq!(result.get(1), Trit::P);
        assert_eq!(result.get(2), Trit::O);
        assert_eq!(result.get(3), Trit::N);
    }

    #[test]
    fn test_rotate_left_moves_each_position_down() {
        let mut a = TritVector::zero();
        a.set(1, Trit::P);
        let rotated = rotate_left(&a);
        assert_eq!(rotated.get(0), Trit::P);
        assert_eq!(rotated.get(1), Trit::O);
    }

    #[test]
    fn test_rotate_left_wraps_lsb_to_msb() {
        let mut a = TritVector::zero();
        a.set(0, Trit::N);
        let rotated = rotate_left(&a);
        assert_eq!(rotated.get(TRIT_COUNT - 1), Trit::N);
        assert_eq!(rotated.get(0), Trit::O);
    }

    #[test]
    fn test_rotate_left_full_cycle_is_identity() {
        let mut a = vector_of(&[1, -1, 0, 0, 1, -1, -1]);
        a.set(80, Trit::P);
        let mut rotated = a;
        for _ in 0..TRIT_COUNT {
            rotated = rotate_left(&rotated);
        }
        assert_eq!(rotated, a);
    }

    proptest! {
        #[test]
        fn prop_add_lane_law(
            a_raw in prop::collection::vec(-1i8..=1, TRIT_COUNT),
            b_raw in prop::collection::vec(-1i8..=1, TRIT_COUNT),
        ) {
            let a = vector_of(&a_raw);
            let b = vector_of(&b_raw);
            let (result, carries) = add(&a, &b);
            for i in 0..TRIT_COUNT {
                prop_assert_eq!(
                    a.get(i).to_i8() + b.get(i).to_i8(),
                    result.get(i).to_i8() + 3 * carries.get(i).to_i8()
                );
            }
        }
    }
}
