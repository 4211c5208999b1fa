//! Coprocessor device emulation.
//!
//! This module implements the register-mapped ternary coprocessor:
//! - A register file with INPUT/OUTPUT word ranges and COMMAND/STATUS/
//!   OPERAND_COUNT control registers
//! - A five-state execution pipeline advanced one state per tick
//! - A 16-slot bounded operand stack
//!
//! The hosting environment drives all of it through the [`MmioDevice`]
//! trait.

pub mod device;
pub mod mmio;
pub mod regs;
pub mod stack;

pub use device::{Coprocessor, CYCLE_TICKS};
pub use mmio::MmioDevice;
pub use regs::{FsmState, Opcode, RegisterFile, Status};
pub use stack::{OperandStack, StackError, STACK_DEPTH};
