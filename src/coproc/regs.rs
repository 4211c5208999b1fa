//! Register file and register-map definitions.
//!
//! The host sees the coprocessor as a small bank of 32-bit registers:
//!
//! | Offset        | Name          | Access | Purpose                        |
//! |---------------|---------------|--------|--------------------------------|
//! | `0x00..0x18`  | INPUT words   | W      | operand transfer, 6 words      |
//! | `0x20..0x38`  | OUTPUT words  | R      | result readback, 6 words       |
//! | `0x40`        | COMMAND       | W      | opcode, arms the pipeline      |
//! | `0x44`        | STATUS        | R      | accumulated error flags        |
//! | `0x48`        | OPERAND_COUNT | R/W    | forced to `WORDS_PER_OPERAND`  |
//!
//! All registers are 4-byte aligned and accessed as whole 32-bit words;
//! the decoder in [`crate::coproc::device`] rejects everything else.

use crate::ternary::{TritVector, WORDS_PER_OPERAND};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Only 32-bit accesses are valid.
pub const ACCESS_WIDTH: usize = 4;

/// First INPUT word offset.
pub const REG_INPUT_BASE: u32 = 0x00;

/// One past the last INPUT word offset.
pub const REG_INPUT_END: u32 = REG_INPUT_BASE + 4 * WORDS_PER_OPERAND as u32;

/// First OUTPUT word offset.
pub const REG_OUTPUT_BASE: u32 = 0x20;

/// One past the last OUTPUT word offset.
pub const REG_OUTPUT_END: u32 = REG_OUTPUT_BASE + 4 * WORDS_PER_OPERAND as u32;

/// COMMAND register offset (write-only).
pub const REG_COMMAND: u32 = 0x40;

/// STATUS register offset (read-only).
pub const REG_STATUS: u32 = 0x44;

/// OPERAND_COUNT register offset.
pub const REG_OPERAND_COUNT: u32 = 0x48;

/// Coprocessor opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum Opcode {
    /// Produce an all-zero result
    Nop = 0,
    /// Push the input operand onto the stack
    Push = 1,
    /// Pop the top of the stack into the output
    Pop = 2,
    /// Lane-parallel add of the two topmost slots
    Add = 3,
    /// Negate the top of the stack in place
    Not = 4,
    /// Tritwise minimum of the two topmost slots
    And = 5,
    /// Placeholder permutation (cyclic rotation of the input), not a hash
    Sha3 = 6,
}

impl Opcode {
    /// Decode a raw command-register value.
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Opcode::Nop),
            1 => Some(Opcode::Push),
            2 => Some(Opcode::Pop),
            3 => Some(Opcode::Add),
            4 => Some(Opcode::Not),
            5 => Some(Opcode::And),
            6 => Some(Opcode::Sha3),
            _ => None,
        }
    }

    /// The raw command-register value.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Nop => "NOP",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Add => "ADD",
            Opcode::Not => "NOT",
            Opcode::And => "AND",
            Opcode::Sha3 => "SHA3",
        };
        write!(f, "{}", name)
    }
}

/// Accumulated error flags, as exposed through the STATUS register.
///
/// Flags only ever OR in; the mask is cleared when the next COMMAND
/// write is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status(u32);

impl Status {
    /// Access width was not 4 bytes.
    pub const INVALID_SIZE: Status = Status(0x1);
    /// Offset outside every defined register range.
    pub const INVALID_ADDR: Status = Status(0x2);
    /// PUSH attempted with a full stack.
    pub const STACK_OVERFLOW: Status = Status(0x4);
    /// POP/ADD/NOT/AND attempted with insufficient depth.
    pub const STACK_UNDERFLOW: Status = Status(0x8);
    /// Unrecognized opcode.
    pub const INVALID_COMMAND: Status = Status(0x10);

    /// A mask with no flags raised.
    #[inline]
    pub const fn empty() -> Self {
        Status(0)
    }

    /// Rebuild a mask from a raw STATUS register value.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Status(bits)
    }

    /// The raw register value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// OR a flag into the mask.
    #[inline]
    pub fn raise(&mut self, flag: Status) {
        self.0 |= flag.0;
    }

    /// True if every bit of `flag` is raised.
    #[inline]
    pub const fn contains(self, flag: Status) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// True if no flag is raised.
    #[inline]
    pub const fn is_clear(self) -> bool {
        self.0 == 0
    }

    /// Drop every flag.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clear() {
            return write!(f, "clear");
        }
        let mut first = true;
        for (flag, name) in [
            (Status::INVALID_SIZE, "INVALID_SIZE"),
            (Status::INVALID_ADDR, "INVALID_ADDR"),
            (Status::STACK_OVERFLOW, "STACK_OVERFLOW"),
            (Status::STACK_UNDERFLOW, "STACK_UNDERFLOW"),
            (Status::INVALID_COMMAND, "INVALID_COMMAND"),
        ] {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Execution pipeline states.
///
/// Strictly cyclic: IDLE → FETCH → EXECUTE → WRITEBACK → DONE → IDLE,
/// one transition per tick, no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FsmState {
    /// Resting state; the only state in which writes are accepted
    Idle,
    /// Operand/instruction fetch latency, no computation
    Fetch,
    /// Opcode dispatch into the ALU and stack
    Execute,
    /// Result copy into the OUTPUT register
    Writeback,
    /// One tick of settle time before accepting new work
    Done,
}

/// The coprocessor register file.
///
/// All mutable device state apart from the operand stack lives here.
/// Mutation happens only through the MMIO decoder (host writes) or the
/// pipeline (EXECUTE/WRITEBACK); the file is created on device
/// construction and dropped on teardown.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterFile {
    /// Current operand assembled from incoming INPUT words.
    pub input: TritVector,
    /// Result of the last completed operation.
    pub output: TritVector,
    /// Last accepted opcode, stored raw; validated at EXECUTE.
    pub command: u32,
    /// Accumulated error flags.
    pub status: Status,
    /// Running count of INPUT words received for the current transfer.
    pub operand_words: u32,
    /// Words per full transfer; host writes are overridden with
    /// `WORDS_PER_OPERAND`.
    pub operand_count: u32,
    /// Current pipeline state.
    pub state: FsmState,
    /// Start latch: set when a write arms an operation, consumed by the
    /// next idle tick.
    pub armed: bool,
    /// Scratch result bridging EXECUTE and WRITEBACK.
    pub temp_result: TritVector,
}

impl RegisterFile {
    /// Create a register file in the reset state.
    pub fn new() -> Self {
        Self {
            input: TritVector::zero(),
            output: TritVector::zero(),
            command: 0,
            status: Status::empty(),
            operand_words: 0,
            operand_count: WORDS_PER_OPERAND as u32,
            state: FsmState::Idle,
            armed: false,
            temp_result: TritVector::zero(),
        }
    }

    /// Return every register to its reset value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_roundtrip() {
        for code in 0..=6 {
            let opcode = Opcode::from_u32(code).unwrap();
            assert_eq!(opcode.code(), code);
        }
        assert_eq!(Opcode::from_u32(7), None);
        assert_eq!(Opcode::from_u32(u32::MAX), None);
    }

    #[test]
    fn test_status_accumulates() {
        let mut status = Status::empty();
        assert!(status.is_clear());

        status.raise(Status::INVALID_SIZE);
        status.raise(Status::STACK_UNDERFLOW);
        status.raise(Status::INVALID_SIZE); // raising twice is idempotent

        assert_eq!(status.bits(), 0x9);
        assert!(status.contains(Status::INVALID_SIZE));
        assert!(status.contains(Status::STACK_UNDERFLOW));
        assert!(!status.contains(Status::INVALID_ADDR));

        status.clear();
        assert!(status.is_clear());
    }

    #[test]
    fn test_status_display() {
        let mut status = Status::empty();
        assert_eq!(format!("{}", status), "clear");

        status.raise(Status::INVALID_ADDR);
        status.raise(Status::INVALID_COMMAND);
        assert_eq!(format!("{}", status), "INVALID_ADDR|INVALID_COMMAND");
    }

    #[test]
    fn test_register_map_geometry() {
        assert_eq!(REG_INPUT_END, 0x18);
        assert_eq!(REG_OUTPUT_BASE, 0x20);
        assert_eq!(REG_OUTPUT_END, 0x38);
        // Control registers sit above both word ranges
        assert!(REG_COMMAND >= REG_OUTPUT_END);
    }

    #[test]
    fn test_register_file_reset_state() {
        let regs = RegisterFile::new();
        assert!(regs.input.is_zero());
        assert!(regs.output.is_zero());
        assert_eq!(regs.command, 0);
        assert!(regs.status.is_clear());
        assert_eq!(regs.operand_words, 0);
        assert_eq!(regs.operand_count, WORDS_PER_OPERAND as u32);
        assert_eq!(regs.state, FsmState::Idle);
        assert!(!regs.armed);
    }
}
