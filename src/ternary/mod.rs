//! Balanced ternary number system primitives.
//!
//! This module provides the value types and pure functions under the
//! coprocessor:
//! - [`Trit`] - A single balanced ternary digit (-1, 0, +1)
//! - [`TritVector`] - An 81-trit operand
//! - [`codec`] - Packing trits into 32-bit register words
//! - [`alu`] - Lane-parallel arithmetic and tritwise logic

mod trit;
mod vector;

pub mod alu;
pub mod codec;

pub use codec::{TRITS_PER_WORD, WORDS_PER_OPERAND};
pub use trit::Trit;
pub use vector::{ParseError, TritVector, TRIT_COUNT};
