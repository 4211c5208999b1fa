//! Single balanced ternary digit (trit).
//!
//! A trit can hold one of three values: -1, 0, or +1.
//! We use a 2-bit Binary-Coded Ternary (BCT) encoding:
//! - `0b00` = 0 (Zero)
//! - `0b01` = +1 (Positive)
//! - `0b10` = -1 (Negative)
//! - `0b11` = never produced; decodes as 0
//!
//! The BCT encoding doubles as the coprocessor's wire format: packed
//! operand words carry 16 of these 2-bit codes per 32-bit register.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single balanced ternary digit.
///
/// Represented internally using 2-bit BCT encoding for efficient
/// bitwise operations while maintaining the balanced ternary semantics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Trit {
    /// Negative (-1)
    N = 0b10,
    /// Zero (0)
    O = 0b00,
    /// Positive (+1)
    P = 0b01,
}

impl Trit {
    /// All possible trit values in order: N, O, P
    pub const ALL: [Trit; 3] = [Trit::N, Trit::O, Trit::P];

    /// Create a trit from a raw BCT byte.
    ///
    /// The unused encoding `0b11` normalizes to O (zero); the hardware
    /// never emits it, and the register decoder must accept it silently.
    #[inline]
    pub const fn from_bct(byte: u8) -> Self {
        match byte & 0b11 {
            0b01 => Trit::P,
            0b10 => Trit::N,
            _ => Trit::O,
        }
    }

    /// Get the raw BCT byte representation.
    #[inline]
    pub const fn to_bct(self) -> u8 {
        self as u8
    }

    /// Create a trit from an integer value.
    ///
    /// # Panics
    /// Panics if value is not in {-1, 0, 1}.
    #[inline]
    pub fn from_i8(value: i8) -> Self {
        match value {
            -1 => Trit::N,
            0 => Trit::O,
            1 => Trit::P,
            _ => panic!("Invalid trit value: {} (must be -1, 0, or 1)", value),
        }
    }

    /// Convert to integer value.
    #[inline]
    pub const fn to_i8(self) -> i8 {
        match self {
            Trit::N => -1,
            Trit::O => 0,
            Trit::P => 1,
        }
    }

    /// Negate the trit (flip N ↔ P, O stays O).
    #[inline]
    pub const fn neg(self) -> Self {
        match self {
            Trit::N => Trit::P,
            Trit::O => Trit::O,
            Trit::P => Trit::N,
        }
    }

    /// Minimum (ternary AND) - returns the lesser value.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        match (self.to_i8(), other.to_i8()) {
            (a, b) if a <= b => self,
            _ => other,
        }
    }

    /// Single-lane add: returns (sum, carry) with the sum normalized
    /// back into {-1, 0, +1}.
    ///
    /// Satisfies `a + b == sum + 3 * carry` for every pair of trits.
    #[inline]
    pub const fn add(self, other: Self) -> (Self, Self) {
        let total = self.to_i8() + other.to_i8();
        match total {
            -2 => (Trit::P, Trit::N), // -2 = +1 - 3
            -1 => (Trit::N, Trit::O),
            0 => (Trit::O, Trit::O),
            1 => (Trit::P, Trit::O),
            2 => (Trit::N, Trit::P), // +2 = -1 + 3
            _ => unreachable!(),
        }
    }

    /// Returns true if this trit is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        matches!(self, Trit::O)
    }
}

impl Default for Trit {
    fn default() -> Self {
        Trit::O
    }
}

impl fmt::Debug for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "N"),
            Trit::O => write!(f, "O"),
            Trit::P => write!(f, "P"),
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "-"),
            Trit::O => write!(f, "0"),
            Trit::P => write!(f, "+"),
        }
    }
}

impl std::ops::Neg for Trit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Trit::neg(self)
    }
}

impl From<i8> for Trit {
    fn from(value: i8) -> Self {
        Trit::from_i8(value)
    }
}

impl From<Trit> for i8 {
    fn from(trit: Trit) -> Self {
        trit.to_i8()
    }
}
