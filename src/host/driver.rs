//! Host-side driver for the coprocessor register protocol.
//!
//! Wraps any [`MmioDevice`] and speaks the wire protocol a real host
//! would: stream the operand words, write the command, run the device
//! through its five-tick cycle, then poll STATUS and read the result
//! back out. A non-zero STATUS is reported as an I/O failure, the same
//! contract the character-device consumer exposes to user space.

use crate::coproc::regs::{
    Opcode, Status, ACCESS_WIDTH, REG_COMMAND, REG_INPUT_BASE, REG_OUTPUT_BASE, REG_STATUS,
};
use crate::coproc::{MmioDevice, CYCLE_TICKS};
use crate::ternary::{codec, TritVector, WORDS_PER_OPERAND};
use thiserror::Error;

/// Drives one coprocessor through its register interface.
pub struct HostDriver<M> {
    device: M,
}

impl<M: MmioDevice> HostDriver<M> {
    /// Take ownership of a device to drive.
    pub fn new(device: M) -> Self {
        Self { device }
    }

    /// Give the device back (for snapshotting or inspection).
    pub fn into_device(self) -> M {
        self.device
    }

    /// Borrow the device without giving it up.
    pub fn device(&self) -> &M {
        &self.device
    }

    /// Transfer a full operand into the INPUT word range.
    ///
    /// Completing the transfer arms the pipeline with whatever command
    /// the device currently holds; callers normally follow up with
    /// [`execute`](Self::execute) before ticking.
    pub fn load_operand(&mut self, vector: &TritVector) {
        for (i, word) in codec::encode_vector(vector).iter().enumerate() {
            self.device.write(REG_INPUT_BASE + 4 * i as u32, *word, ACCESS_WIDTH);
        }
    }

    /// Write a command and run the device through one full cycle.
    pub fn submit(&mut self, opcode: Opcode) {
        self.device.write(REG_COMMAND, opcode.code(), ACCESS_WIDTH);
        for _ in 0..CYCLE_TICKS {
            self.device.tick();
        }
    }

    /// Read the accumulated STATUS flags.
    pub fn status(&mut self) -> Status {
        Status::from_bits(self.device.read(REG_STATUS, ACCESS_WIDTH))
    }

    /// Read the OUTPUT word range back into an operand.
    pub fn read_output(&mut self) -> TritVector {
        let mut words = [0u32; WORDS_PER_OPERAND];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.device.read(REG_OUTPUT_BASE + 4 * i as u32, ACCESS_WIDTH);
        }
        codec::decode_vector(&words)
    }

    /// Run one command to completion and return its result.
    ///
    /// Mirrors the user-space consumer: any STATUS flag raised during
    /// the cycle turns into an error carrying the mask.
    pub fn execute(&mut self, opcode: Opcode) -> Result<TritVector, DriverError> {
        self.submit(opcode);
        let status = self.status();
        if !status.is_clear() {
            return Err(DriverError::Device(status));
        }
        Ok(self.read_output())
    }
}

/// Errors surfaced by the host driver.
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    #[error("device reported errors: {0}")]
    Device(Status),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coproc::Coprocessor;
    use crate::ternary::Trit;

    #[test]
    fn test_execute_push_roundtrip() {
        let mut driver = HostDriver::new(Coprocessor::new());
        let ones = TritVector::filled(Trit::P);

        driver.load_operand(&ones);
        let result = driver.execute(Opcode::Push).unwrap();

        assert_eq!(result, ones);
        assert_eq!(driver.device().stack.depth(), 1);
    }

    #[test]
    fn test_execute_reports_device_errors() {
        let mut driver = HostDriver::new(Coprocessor::new());

        let err = driver.execute(Opcode::Add).unwrap_err();
        let DriverError::Device(status) = err;
        assert!(status.contains(Status::STACK_UNDERFLOW));
    }

    #[test]
    fn test_push_then_not_pipeline() {
        let mut driver = HostDriver::new(Coprocessor::new());

        driver.load_operand(&TritVector::filled(Trit::P));
        driver.execute(Opcode::Push).unwrap();
        let result = driver.execute(Opcode::Not).unwrap();

        assert_eq!(result, TritVector::filled(Trit::N));
    }

    #[test]
    fn test_status_clears_on_next_command() {
        let mut driver = HostDriver::new(Coprocessor::new());

        assert!(driver.execute(Opcode::Pop).is_err());
        assert!(driver.execute(Opcode::Nop).is_ok());
        assert!(driver.status().is_clear());
    }

    #[test]
    fn test_into_device_preserves_state() {
        let mut driver = HostDriver::new(Coprocessor::new());
        driver.load_operand(&TritVector::filled(Trit::N));
        driver.execute(Opcode::Push).unwrap();

        let device = driver.into_device();
        assert_eq!(device.stack.depth(), 1);
    }
}
