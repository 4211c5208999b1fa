//! Fixed-width coprocessor operands.
//!
//! Every value that moves through the coprocessor - the input register,
//! the output register, and each stack slot - is a [`TritVector`] of
//! exactly [`TRIT_COUNT`] trits. Vectors are replaced wholesale by the
//! execution pipeline, never mutated in place across operations.

use crate::ternary::Trit;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of trits in one coprocessor operand.
pub const TRIT_COUNT: usize = 81;

/// One coprocessor operand: an ordered, fixed-length run of 81 trits.
///
/// Note: no integer conversion is provided. An 81-trit value spans
/// roughly 3^81 and does not fit in i128; operands are opaque trit
/// patterns as far as the device is concerned.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TritVector {
    /// Trits stored from least significant (index 0) to most significant
    trits: [Trit; TRIT_COUNT],
}

impl TritVector {
    /// Number of trits in a vector.
    pub const WIDTH: usize = TRIT_COUNT;

    /// Create a vector with all trits zero.
    #[inline]
    pub const fn zero() -> Self {
        Self { trits: [Trit::O; TRIT_COUNT] }
    }

    /// Create a vector with every trit set to the same value.
    #[inline]
    pub const fn filled(trit: Trit) -> Self {
        Self { trits: [trit; TRIT_COUNT] }
    }

    /// Create a vector from an array of trits (LSB first).
    #[inline]
    pub const fn from_trits(trits: [Trit; TRIT_COUNT]) -> Self {
        Self { trits }
    }

    /// Get the underlying trit array.
    #[inline]
    pub const fn trits(&self) -> &[Trit; TRIT_COUNT] {
        &self.trits
    }

    /// Get a mutable reference to the trit array.
    #[inline]
    pub fn trits_mut(&mut self) -> &mut [Trit; TRIT_COUNT] {
        &mut self.trits
    }

    /// Get a single trit by index (0 = LSB).
    #[inline]
    pub const fn get(&self, index: usize) -> Trit {
        self.trits[index]
    }

    /// Set a single trit by index (0 = LSB).
    #[inline]
    pub fn set(&mut self, index: usize, trit: Trit) {
        self.trits[index] = trit;
    }

    /// Negate all trits.
    #[inline]
    pub fn neg(&self) -> Self {
        let mut trits = [Trit::O; TRIT_COUNT];
        for i in 0..TRIT_COUNT {
            trits[i] = self.trits[i].neg();
        }
        Self { trits }
    }

    /// Check if every trit is zero.
    pub fn is_zero(&self) -> bool {
        self.trits.iter().all(|t| t.is_zero())
    }

    /// Parse from a string like "0tPON..." or "+0-..." (81 trit characters,
    /// most significant first).
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let s = s.strip_prefix("0t").unwrap_or(s);

        if s.chars().count() != TRIT_COUNT {
            return Err(ParseError::WrongLength {
                expected: TRIT_COUNT,
                got: s.chars().count(),
            });
        }

        let mut trits = [Trit::O; TRIT_COUNT];
        for (i, c) in s.chars().rev().enumerate() {
            trits[i] = match c {
                'N' | 'n' | '-' => Trit::N,
                'O' | 'o' | '0' => Trit::O,
                'P' | 'p' | '+' => Trit::P,
                _ => return Err(ParseError::InvalidChar(c)),
            };
        }

        Ok(Self { trits })
    }
}

impl Default for TritVector {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for TritVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TritVector(0t")?;
        for i in (0..TRIT_COUNT).rev() {
            write!(f, "{:?}", self.trits[i])?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for TritVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0t")?;
        for i in (0..TRIT_COUNT).rev() {
            write!(f, "{:?}", self.trits[i])?;
        }
        Ok(())
    }
}

impl std::ops::Neg for TritVector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        TritVector::neg(&self)
    }
}

// Serialized as the 81-character trit string rather than an array;
// serde's derived array support stops at 32 elements.
impl Serialize for TritVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TritVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TritVector::parse(&s).map_err(D::Error::custom)
    }
}

/// Errors that can occur when parsing trit strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input string was the wrong length.
    WrongLength { expected: usize, got: usize },
    /// An invalid character was encountered.
    InvalidChar(char),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::WrongLength { expected, got } => {
                write!(f, "expected {} trits, got {}", expected, got)
            }
            ParseError::InvalidChar(c) => {
                write!(f, "invalid trit character: '{}' (expected N/O/P or -/0/+)", c)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        let zero = TritVector::zero();
        assert!(zero.is_zero());
        assert_eq!(zero, TritVector::default());
    }

    #[test]
    fn test_filled() {
        let ones = TritVector::filled(Trit::P);
        assert!(!ones.is_zero());
        assert!(ones.trits().iter().all(|&t| t == Trit::P));
    }

    #[test]
    fn test_negation() {
        let ones = TritVector::filled(Trit::P);
        let negated = ones.neg();
        assert_eq!(negated, TritVector::filled(Trit::N));
        assert_eq!(negated.neg(), ones);
    }

    #[test]
    fn test_get_set() {
        let mut v = TritVector::zero();
        v.set(0, Trit::P);
        v.set(80, Trit::N);
        assert_eq!(v.get(0), Trit::P);
        assert_eq!(v.get(80), Trit::N);
        assert_eq!(v.get(40), Trit::O);
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let mut v = TritVector::zero();
        v.set(0, Trit::N);
        v.set(3, Trit::P);
        v.set(80, Trit::P);

        let s = format!("{}", v);
        assert!(s.starts_with("0t"));
        assert_eq!(TritVector::parse(&s).unwrap(), v);
    }

    #[test]
    fn test_parse_sign_characters() {
        let plus: String = std::iter::repeat('+').take(TRIT_COUNT).collect();
        assert_eq!(TritVector::parse(&plus).unwrap(), TritVector::filled(Trit::P));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            TritVector::parse("PON"),
            Err(ParseError::WrongLength { expected: 81, got: 3 })
        ));

        let bad: String = std::iter::repeat('X').take(TRIT_COUNT).collect();
        assert!(matches!(TritVector::parse(&bad), Err(ParseError::InvalidChar('X'))));
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let mut v = TritVector::zero();
        v.set(7, Trit::N);
        v.set(13, Trit::P);

        let json = serde_json::to_string(&v).unwrap();
        let back: TritVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
