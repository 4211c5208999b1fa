//! The coprocessor device model.
//!
//! Ties the register file, the operand stack, and the ALU together
//! behind the [`MmioDevice`] interface. The execution pipeline mirrors
//! the hardware finite-state machine: one state per tick, five ticks
//! per operation, and writes dropped whenever the pipeline is busy.
//!
//! Every fault is folded into the STATUS register; nothing in this
//! module panics or returns an error to the host.

use crate::coproc::mmio::MmioDevice;
use crate::coproc::regs::{
    FsmState, Opcode, RegisterFile, Status, ACCESS_WIDTH, REG_COMMAND, REG_INPUT_BASE,
    REG_INPUT_END, REG_OPERAND_COUNT, REG_OUTPUT_BASE, REG_OUTPUT_END, REG_STATUS,
};
use crate::coproc::stack::{OperandStack, StackError};
use crate::ternary::{alu, codec, TritVector, WORDS_PER_OPERAND};
use serde::{Deserialize, Serialize};

/// Ticks from an armed pipeline back to IDLE: one each for the
/// IDLE→FETCH, FETCH→EXECUTE, EXECUTE→WRITEBACK, WRITEBACK→DONE and
/// DONE→IDLE transitions.
pub const CYCLE_TICKS: usize = 5;

/// The emulated ternary coprocessor.
///
/// One instance per emulated device; the hosting environment owns it,
/// serializes all access to it, and drops it on teardown.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Coprocessor {
    /// Register file holding all host-visible state.
    pub regs: RegisterFile,
    /// Bounded operand stack.
    pub stack: OperandStack,
}

impl Coprocessor {
    /// Create a device in the reset state: registers zeroed, stack
    /// empty, pipeline idle.
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            stack: OperandStack::new(),
        }
    }

    /// Return the device to its construction state.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.stack.clear();
    }

    fn write_input_word(&mut self, addr: u32, value: u32) {
        let index = ((addr - REG_INPUT_BASE) / 4) as usize;
        codec::decode_word(value, &mut self.regs.input.trits_mut()[codec::word_range(index)]);
        self.regs.operand_words += 1;
        log::trace!("input word {} = 0x{:08X} ({}/{})", index, value, self.regs.operand_words, self.regs.operand_count);

        if self.regs.operand_words >= self.regs.operand_count {
            self.regs.operand_words = 0;
            self.regs.armed = true;
            log::debug!("operand transfer complete, pipeline armed");
        }
    }

    fn accept_command(&mut self, value: u32) {
        self.regs.command = value;
        self.regs.status.clear();
        self.regs.armed = true;
        match Opcode::from_u32(value) {
            Some(op) => log::debug!("command {} accepted", op),
            None => log::debug!("command 0x{:X} accepted (unknown opcode)", value),
        }
    }

    /// EXECUTE-state dispatch into the ALU and stack.
    ///
    /// A failed dispatch leaves `temp_result` untouched, so WRITEBACK
    /// republishes the previous output unchanged.
    fn execute(&mut self) {
        let Some(op) = Opcode::from_u32(self.regs.command) else {
            log::debug!("execute: unknown opcode 0x{:X}", self.regs.command);
            self.regs.status.raise(Status::INVALID_COMMAND);
            return;
        };

        log::trace!("execute {}", op);
        match op {
            Opcode::Nop => self.regs.temp_result = TritVector::zero(),
            Opcode::Push => match self.stack.push(self.regs.input) {
                Ok(()) => self.regs.temp_result = self.regs.input,
                Err(e) => self.record(e),
            },
            Opcode::Pop => match self.stack.pop() {
                Ok(top) => self.regs.temp_result = top,
                Err(e) => self.record(e),
            },
            Opcode::Add => self.execute_binary(|a, b| alu::add(a, b).0),
            Opcode::Not => self.execute_not(),
            Opcode::And => self.execute_binary(alu::and),
            Opcode::Sha3 => self.regs.temp_result = alu::rotate_left(&self.regs.input),
        }
    }

    /// Combine the two topmost slots: retire one, overwrite the new top
    /// with the result.
    fn execute_binary(&mut self, op: fn(&TritVector, &TritVector) -> TritVector) {
        let result = match (self.stack.peek(1), self.stack.peek(0)) {
            (Ok(below), Ok(top)) => op(below, top),
            _ => return self.record(StackError::Underflow),
        };
        // Depth >= 2 was just established; neither step can fail
        match self.stack.pop().and(self.stack.replace_top(result)) {
            Ok(()) => self.regs.temp_result = result,
            Err(e) => self.record(e),
        }
    }

    /// Negate the top slot in place.
    fn execute_not(&mut self) {
        let result = match self.stack.peek(0) {
            Ok(top) => alu::not(top),
            Err(e) => return self.record(e),
        };
        match self.stack.replace_top(result) {
            Ok(()) => self.regs.temp_result = result,
            Err(e) => self.record(e),
        }
    }

    fn record(&mut self, err: StackError) {
        log::debug!("execute fault: {}", err);
        let flag = match err {
            StackError::Overflow => Status::STACK_OVERFLOW,
            StackError::Underflow => Status::STACK_UNDERFLOW,
        };
        self.regs.status.raise(flag);
    }
}

impl Default for Coprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MmioDevice for Coprocessor {
    fn read(&mut self, addr: u32, width: usize) -> u32 {
        if width != ACCESS_WIDTH {
            log::trace!("mmio read 0x{:02X} rejected: width {}", addr, width);
            self.regs.status.raise(Status::INVALID_SIZE);
            return 0;
        }
        if addr % 4 != 0 {
            log::trace!("mmio read 0x{:02X} rejected: unaligned", addr);
            self.regs.status.raise(Status::INVALID_ADDR);
            return 0;
        }

        match addr {
            a if (REG_OUTPUT_BASE..REG_OUTPUT_END).contains(&a) => {
                let index = ((a - REG_OUTPUT_BASE) / 4) as usize;
                encode_output_word(&self.regs.output, index)
            }
            REG_STATUS => self.regs.status.bits(),
            REG_OPERAND_COUNT => self.regs.operand_count,
            _ => {
                log::trace!("mmio read 0x{:02X} rejected: no such register", addr);
                self.regs.status.raise(Status::INVALID_ADDR);
                0
            }
        }
    }

    fn write(&mut self, addr: u32, value: u32, width: usize) {
        // Back-pressure: a busy pipeline drops writes wholesale, STATUS
        // included, so the host cannot corrupt an in-flight operation
        if self.regs.state != FsmState::Idle {
            log::trace!("mmio write 0x{:02X} dropped: pipeline in {:?}", addr, self.regs.state);
            return;
        }
        if width != ACCESS_WIDTH {
            log::trace!("mmio write 0x{:02X} rejected: width {}", addr, width);
            self.regs.status.raise(Status::INVALID_SIZE);
            return;
        }
        if addr % 4 != 0 {
            log::trace!("mmio write 0x{:02X} rejected: unaligned", addr);
            self.regs.status.raise(Status::INVALID_ADDR);
            return;
        }

        match addr {
            a if (REG_INPUT_BASE..REG_INPUT_END).contains(&a) => self.write_input_word(a, value),
            REG_COMMAND => self.accept_command(value),
            REG_OPERAND_COUNT => {
                // The register exists for protocol symmetry only; the
                // host-supplied value is overridden
                if value != WORDS_PER_OPERAND as u32 {
                    log::trace!("operand count write 0x{:X} overridden to {}", value, WORDS_PER_OPERAND);
                }
                self.regs.operand_count = WORDS_PER_OPERAND as u32;
            }
            _ => {
                log::trace!("mmio write 0x{:02X} rejected: no such register", addr);
                self.regs.status.raise(Status::INVALID_ADDR);
            }
        }
    }

    fn tick(&mut self) {
        let next = match self.regs.state {
            FsmState::Idle => {
                if !self.regs.armed {
                    return;
                }
                self.regs.armed = false;
                FsmState::Fetch
            }
            // Fetch models operand latency only; no work happens here
            FsmState::Fetch => FsmState::Execute,
            FsmState::Execute => {
                self.execute();
                FsmState::Writeback
            }
            FsmState::Writeback => {
                self.regs.output = self.regs.temp_result;
                FsmState::Done
            }
            FsmState::Done => FsmState::Idle,
        };
        log::trace!("fsm {:?} -> {:?}", self.regs.state, next);
        self.regs.state = next;
    }
}

fn encode_output_word(output: &TritVector, index: usize) -> u32 {
    codec::encode_word(&output.trits()[codec::word_range(index)])
}
