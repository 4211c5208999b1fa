//! # HanoiVM Ternary Coprocessor
//!
//! An emulator of the HanoiVM memory-mapped balanced ternary
//! coprocessor: a register-mapped device that packs 81-trit operands
//! into 32-bit words, runs them through a five-state execution pipeline,
//! and keeps a bounded stack of results.
//!
//! The hosting virtual machine drives the device through the
//! [`MmioDevice`] trait; [`HostDriver`] speaks the same protocol from
//! the host side for tests and the CLI.

pub mod coproc;
pub mod host;
pub mod ternary;

// Re-export commonly used types
pub use coproc::{Coprocessor, FsmState, MmioDevice, Opcode, Status, CYCLE_TICKS, STACK_DEPTH};
pub use host::{DriverError, HostDriver, Script, ScriptError};
pub use ternary::{Trit, TritVector, TRIT_COUNT, WORDS_PER_OPERAND};
